//! Word export: block elements to paragraph descriptors to `.docx`
//!
//! Only paragraphs and headings are exported. Each becomes one paragraph
//! holding the element's flattened text, so inline formatting is dropped.

use crate::docx::{Alignment, Packer, Paragraph, Section, SectionProperties, TextRun, WordDocument};
use crate::error::Result;
use crate::export::{Blob, FileSaver, SavedFile};
use crate::html::{self, style, Element, Node};

/// Elements that become paragraphs, matched like `p, h1, h2, h3, h4, h5, h6`
pub const EXPORTED_ELEMENTS: [&str; 7] = ["p", "h1", "h2", "h3", "h4", "h5", "h6"];

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The per-element record the Word document is built from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParagraphDescriptor {
    pub text: String,
    pub bold: bool,
    pub alignment: Alignment,
}

impl ParagraphDescriptor {
    /// Derive the descriptor of one element, given its ancestors in the tree
    pub fn from_element(element: &Element, ancestors: &[&Element]) -> Self {
        let text_align = style::computed_text_align(element, ancestors);
        Self {
            text: element.text_content(),
            bold: element.tag_name().starts_with('H'),
            alignment: Alignment::from_text_align(text_align.as_deref()),
        }
    }
}

/// Descriptors for every exported element of `root`, in document order
pub fn paragraph_descriptors(root: &Element) -> Vec<ParagraphDescriptor> {
    let mut descriptors = Vec::new();
    root.walk(&mut |element, ancestors| {
        if is_exported(element) {
            let descriptor = ParagraphDescriptor::from_element(element, ancestors);
            log::trace!(
                "<{}> -> bold={} align={} {:?}",
                element.name,
                descriptor.bold,
                descriptor.alignment,
                descriptor.text
            );
            descriptors.push(descriptor);
        }
    });

    if has_stray_text(root) {
        log::warn!("markup has text outside paragraphs and headings; it is not exported");
    }
    descriptors
}

/// Clone serialized content into a detached tree and map it
pub fn descriptors_from_markup(markup: &str) -> Result<Vec<ParagraphDescriptor>> {
    let root = html::parse_fragment(markup)?;
    Ok(paragraph_descriptors(&root))
}

fn is_exported(element: &Element) -> bool {
    EXPORTED_ELEMENTS.contains(&element.name.as_str())
}

fn has_stray_text(element: &Element) -> bool {
    element.children.iter().any(|child| match child {
        Node::Text(t) => !t.trim().is_empty(),
        Node::Element(e) => !is_exported(e) && has_stray_text(e),
    })
}

/// Builds a binary document from descriptors
pub trait DocumentPackager {
    fn build_document(&self, paragraphs: &[ParagraphDescriptor]) -> Result<Blob>;
}

/// Packages descriptors as a single-section DOCX
#[derive(Clone, Debug)]
pub struct DocxPackager {
    /// Emit a line break ahead of each paragraph's text
    pub leading_break: bool,
    pub section: SectionProperties,
    pub title: Option<String>,
}

impl Default for DocxPackager {
    fn default() -> Self {
        Self {
            leading_break: true,
            section: SectionProperties::default(),
            title: None,
        }
    }
}

impl DocxPackager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leading_break(mut self, leading_break: bool) -> Self {
        self.leading_break = leading_break;
        self
    }

    pub fn section(mut self, section: SectionProperties) -> Self {
        self.section = section;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The document model the descriptors map to
    pub fn to_document(&self, paragraphs: &[ParagraphDescriptor]) -> WordDocument {
        let breaks = u32::from(self.leading_break);
        let children = paragraphs
            .iter()
            .map(|d| {
                Paragraph::from_runs(vec![TextRun::new(d.text.as_str())
                    .bold(d.bold)
                    .break_before(breaks)])
                .alignment(d.alignment)
            })
            .collect();

        let mut doc =
            WordDocument::with_section(Section::new(children).properties(self.section.clone()));
        doc.title = self.title.clone();
        doc
    }
}

impl DocumentPackager for DocxPackager {
    fn build_document(&self, paragraphs: &[ParagraphDescriptor]) -> Result<Blob> {
        let bytes = Packer::to_bytes(&self.to_document(paragraphs))?;
        Ok(Blob::new(bytes, DOCX_MIME))
    }
}

/// Word export settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordOptions {
    pub filename: String,
}

impl Default for WordOptions {
    fn default() -> Self {
        Self {
            filename: "document.docx".to_string(),
        }
    }
}

impl WordOptions {
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }
}

/// Run the Word export for serialized content and save the result
pub fn export_word<P, S>(
    markup: &str,
    packager: &P,
    options: &WordOptions,
    saver: &mut S,
) -> Result<SavedFile>
where
    P: DocumentPackager + ?Sized,
    S: FileSaver + ?Sized,
{
    let descriptors = descriptors_from_markup(markup)?;
    log::debug!("word export: {} paragraph(s)", descriptors.len());
    let blob = packager.build_document(&descriptors)?;
    saver.save_blob(&blob, &options.filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn descriptor(text: &str, bold: bool, alignment: Alignment) -> ParagraphDescriptor {
        ParagraphDescriptor {
            text: text.to_string(),
            bold,
            alignment,
        }
    }

    #[test]
    fn test_heading_and_paragraph() {
        let got =
            descriptors_from_markup(r#"<h1 style="text-align:center">Title</h1><p>Body text</p>"#)
                .unwrap();
        assert_eq!(
            got,
            vec![
                descriptor("Title", true, Alignment::Center),
                descriptor("Body text", false, Alignment::Start),
            ]
        );
    }

    #[test]
    fn test_every_heading_level_is_bold() {
        let markup = (1..=6)
            .map(|level| format!("<h{0}>H{0}</h{0}>", level))
            .collect::<String>();
        let got = descriptors_from_markup(&markup).unwrap();
        assert_eq!(got.len(), 6);
        assert!(got.iter().all(|d| d.bold));
    }

    #[test]
    fn test_alignment_sources() {
        let got = descriptors_from_markup(concat!(
            r#"<p class="ql-align-right">r</p>"#,
            r#"<p class="ql-align-justify">j</p>"#,
            r#"<p style="text-align: left">l</p>"#,
            r#"<p align="center">c</p>"#,
            r#"<p style="text-align: end">e</p>"#,
        ))
        .unwrap();
        let aligns: Vec<_> = got.iter().map(|d| d.alignment).collect();
        assert_eq!(
            aligns,
            vec![
                Alignment::End,
                Alignment::Start,
                Alignment::Start,
                Alignment::Center,
                Alignment::Start,
            ]
        );
    }

    #[test]
    fn test_inline_formatting_is_flattened() {
        let got = descriptors_from_markup(
            "<p>plain <strong>bold</strong> <em>italic</em><br>next</p>",
        )
        .unwrap();
        assert_eq!(got, vec![descriptor("plain bold italicnext", false, Alignment::Start)]);
    }

    #[test]
    fn test_nested_matches_and_inherited_alignment() {
        let got = descriptors_from_markup(
            r#"<blockquote class="ql-align-center"><p>quoted</p></blockquote><ol><li>item</li></ol>"#,
        )
        .unwrap();
        // List items are not paragraphs and are skipped
        assert_eq!(got, vec![descriptor("quoted", false, Alignment::Center)]);
    }

    #[test]
    fn test_empty_content() {
        assert!(descriptors_from_markup("").unwrap().is_empty());
        assert_eq!(
            descriptors_from_markup("<p><br></p>").unwrap(),
            vec![descriptor("", false, Alignment::Start)]
        );
    }

    #[test]
    fn test_to_document() {
        let doc = DocxPackager::new().to_document(&[
            descriptor("T", true, Alignment::Center),
            descriptor("b", false, Alignment::Start),
        ]);
        let paras: Vec<_> = doc.paragraphs().collect();
        assert_eq!(paras.len(), 2);
        assert_eq!(paras[0].alignment, Some(Alignment::Center));
        assert_eq!(paras[0].runs, vec![TextRun::new("T").bold(true).break_before(1)]);

        let doc = DocxPackager::new()
            .leading_break(false)
            .to_document(&[descriptor("b", false, Alignment::End)]);
        assert_eq!(doc.paragraphs().next().unwrap().runs[0].break_before, 0);
    }
}
