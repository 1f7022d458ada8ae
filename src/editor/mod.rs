//! Editor surface: content state around an external editing widget
//!
//! ```
//! use richdoc_export::editor::{HeadlessWidget, TextEditor};
//! use richdoc_export::export::MemorySaver;
//! use richdoc_export::export::word::{DocxPackager, WordOptions};
//!
//! let mut editor = TextEditor::default();
//! editor.mount(Box::new(HeadlessWidget::new()));
//! editor.set_content("<h1>Title</h1><p>Body</p>");
//!
//! let mut saver = MemorySaver::new();
//! let saved = editor
//!     .export_as_word(&DocxPackager::new(), &WordOptions::default(), &mut saver)
//!     .unwrap();
//! assert_eq!(saved.unwrap().filename, "document.docx");
//! ```

mod toolbar;
mod widget;

pub use toolbar::{Format, ListKind, Script, ToolbarConfig, ToolbarItem};
pub use widget::{EditorWidget, HeadlessWidget};

use crate::error::Result;
use crate::export::pdf::{self, PdfOptions, PdfRenderer};
use crate::export::word::{self, DocumentPackager, WordOptions};
use crate::export::{FileSaver, SavedFile};
use std::fmt;

/// Configuration handed to the widget on every render
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    pub toolbar: ToolbarConfig,
    /// Allowed formats; anything else is stripped by the widget
    pub formats: Vec<Format>,
    pub placeholder: String,
    pub theme: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            toolbar: ToolbarConfig::default(),
            formats: Format::ALL.to_vec(),
            placeholder: "Start typing your document...".to_string(),
            theme: "snow".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn toolbar(mut self, toolbar: ToolbarConfig) -> Self {
        self.toolbar = toolbar;
        self
    }
}

type ChangeListener = Box<dyn FnMut(&str)>;

/// Rich-text editor component with PDF and Word export
pub struct TextEditor {
    content: String,
    config: EditorConfig,
    widget: Option<Box<dyn EditorWidget>>,
    listeners: Vec<ChangeListener>,
}

impl TextEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            content: String::new(),
            config,
            widget: None,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Attach a widget and show the current content in it
    pub fn mount(&mut self, mut widget: Box<dyn EditorWidget>) {
        widget.render(&self.content, &self.config);
        self.widget = Some(widget);
    }

    pub fn unmount(&mut self) -> Option<Box<dyn EditorWidget>> {
        self.widget.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.widget.is_some()
    }

    /// The mounted widget, for hosts that forward input to it directly
    pub fn widget_mut(&mut self) -> Option<&mut (dyn EditorWidget + 'static)> {
        self.widget.as_deref_mut()
    }

    /// Current document markup
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the content from outside the widget
    pub fn set_content(&mut self, markup: impl Into<String>) {
        self.content = markup.into();
        if let Some(widget) = self.widget.as_mut() {
            widget.render(&self.content, &self.config);
        }
        self.notify();
    }

    /// Change callback for the widget. The markup is stored as-is; the
    /// widget only re-renders when it shows something else.
    pub fn handle_change(&mut self, markup: impl Into<String>) {
        self.content = markup.into();
        if let Some(widget) = self.widget.as_mut() {
            if widget.serialized_content() != self.content {
                widget.render(&self.content, &self.config);
            }
        }
        self.notify();
    }

    /// Subscribe to content changes
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener(&self.content);
        }
    }

    /// The widget's serialized markup, `None` when nothing is mounted
    pub fn rendered_markup(&self) -> Option<String> {
        self.widget.as_ref().map(|w| w.serialized_content())
    }

    /// Export the rendered markup to PDF. `Ok(None)` when no widget is
    /// mounted.
    pub fn export_as_pdf<R, S>(
        &self,
        renderer: &R,
        options: &PdfOptions,
        saver: &mut S,
    ) -> Result<Option<SavedFile>>
    where
        R: PdfRenderer + ?Sized,
        S: FileSaver + ?Sized,
    {
        let Some(markup) = self.rendered_markup() else {
            log::debug!("pdf export skipped: no widget mounted");
            return Ok(None);
        };
        pdf::export_pdf(&markup, renderer, options, saver).map(Some)
    }

    /// Export the rendered markup to a Word document. `Ok(None)` when no
    /// widget is mounted.
    pub fn export_as_word<P, S>(
        &self,
        packager: &P,
        options: &WordOptions,
        saver: &mut S,
    ) -> Result<Option<SavedFile>>
    where
        P: DocumentPackager + ?Sized,
        S: FileSaver + ?Sized,
    {
        let Some(markup) = self.rendered_markup() else {
            log::debug!("word export skipped: no widget mounted");
            return Ok(None);
        };
        word::export_word(&markup, packager, options, saver).map(Some)
    }
}

impl Default for TextEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl fmt::Debug for TextEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextEditor")
            .field("content", &self.content)
            .field("config", &self.config)
            .field("mounted", &self.is_mounted())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
