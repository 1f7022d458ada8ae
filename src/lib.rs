//! # richdoc-export
//!
//! A rich-text editor component with "export to PDF" and "export to Word".
//!
//! The editing widget itself is external: [`TextEditor`] holds the document
//! markup, drives an [`EditorWidget`], and hands a detached copy of the
//! widget's markup to an export pipeline.
//!
//! ## Features
//!
//! - Word export: paragraphs and headings become DOCX paragraphs with
//!   heading boldness and text alignment kept
//! - PDF export: text rendered on A4 pages with the standard PDF fonts
//! - Swappable renderer, packager and file saver behind small traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use richdoc_export::{
//!     DirectorySaver, DocxPackager, HeadlessWidget, PdfOptions, TextEditor, TextPdfRenderer,
//!     WordOptions,
//! };
//!
//! let mut editor = TextEditor::default();
//! editor.mount(Box::new(HeadlessWidget::new()));
//! editor.set_content(r#"<h1 style="text-align:center">Title</h1><p>Body text</p>"#);
//!
//! let mut saver = DirectorySaver::new("out");
//! editor.export_as_word(&DocxPackager::new(), &WordOptions::default(), &mut saver)?;
//! editor.export_as_pdf(&TextPdfRenderer::new(), &PdfOptions::default(), &mut saver)?;
//! # Ok::<(), richdoc_export::Error>(())
//! ```

pub mod docx;
pub mod editor;
pub mod error;
pub mod export;
pub mod html;
pub mod opc;
pub mod xml;

pub use docx::{Alignment, WordDocument};
pub use editor::{EditorConfig, EditorWidget, HeadlessWidget, TextEditor};
pub use error::{Error, Result};
pub use export::pdf::{PdfOptions, PdfRenderer, TextPdfRenderer};
pub use export::word::{DocumentPackager, DocxPackager, ParagraphDescriptor, WordOptions};
pub use export::{Blob, DirectorySaver, FileSaver, MemorySaver, SavedFile};
pub use opc::{Package, Part, PartUri};
