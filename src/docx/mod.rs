//! WordprocessingML document model - just enough to write a DOCX
//!
//! A [`WordDocument`] is a list of sections, each holding paragraphs of text
//! runs. [`Packer`] turns it into the bytes of a `.docx` package.

mod packer;
mod paragraph;
mod run;
mod section;

pub use packer::Packer;
pub use paragraph::{Alignment, Paragraph};
pub use run::TextRun;
pub use section::{Orientation, Section, SectionProperties};

use crate::error::{Error, Result};
use crate::xml;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// A DOCX document under construction
#[derive(Clone, Debug, Default)]
pub struct WordDocument {
    pub sections: Vec<Section>,
    /// `dc:title` of the core properties
    pub title: Option<String>,
    /// `dc:creator` of the core properties
    pub creator: Option<String>,
}

impl WordDocument {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with a single section
    pub fn with_section(section: Section) -> Self {
        Self {
            sections: vec![section],
            ..Default::default()
        }
    }

    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Set the title stored in the core properties
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the creator stored in the core properties
    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Get all paragraphs across sections
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.sections.iter().flat_map(|s| s.children.iter())
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs().count()
    }

    /// Get all text in the document, one line per paragraph
    pub fn text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serialize to bytes of a `.docx` package
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Packer::to_bytes(self)
    }
}

/// Serialize the document body to `word/document.xml`
pub(crate) fn serialize_document_xml(doc: &WordDocument) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    xml::write_declaration(&mut writer)?;

    let mut doc_start = BytesStart::new("w:document");
    for attr in xml::word_namespaces() {
        doc_start.push_attribute(attr);
    }
    writer.write_event(Event::Start(doc_start))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    // Every section but the last carries its sectPr in its final paragraph;
    // the last section's sectPr closes the body.
    let default_section = Section::default();
    let last = doc.sections.len().saturating_sub(1);
    for (index, section) in doc.sections.iter().enumerate() {
        let is_last = index == last;
        let count = section.children.len();
        for (i, para) in section.children.iter().enumerate() {
            let carries_section = !is_last && i + 1 == count;
            para.write_to(&mut writer, carries_section.then_some(&section.properties))?;
        }
        if !is_last && count == 0 {
            Paragraph::from_runs(Vec::new()).write_to(&mut writer, Some(&section.properties))?;
        }
    }
    let final_props = doc
        .sections
        .last()
        .map(|s| &s.properties)
        .unwrap_or(&default_section.properties);
    final_props.write_to(&mut writer)?;

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| Error::InvalidDocument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(xml: &str) -> &str {
        let start = xml.find("<w:body>").unwrap();
        let end = xml.find("</w:body>").unwrap();
        &xml[start + "<w:body>".len()..end]
    }

    #[test]
    fn test_single_section_document() {
        let doc = WordDocument::with_section(Section::new(vec![
            Paragraph::new("Title").alignment(Alignment::Center),
            Paragraph::new("Body"),
        ]));

        let xml = serialize_document_xml(&doc).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#));

        let body = body_of(&xml);
        let title = body.find("Title").unwrap();
        let text = body.find("Body").unwrap();
        let sect = body.find("<w:sectPr>").unwrap();
        assert!(title < text && text < sect);
        assert_eq!(body.matches("<w:sectPr>").count(), 1);
    }

    #[test]
    fn test_empty_document_still_has_section() {
        let xml = serialize_document_xml(&WordDocument::new()).unwrap();
        assert_eq!(
            body_of(&xml).matches(r#"<w:pgSz w:w="11906" w:h="16838"/>"#).count(),
            1
        );
    }

    #[test]
    fn test_multiple_sections() {
        let mut doc = WordDocument::new();
        doc.add_section(Section::new(vec![Paragraph::new("one")]));
        doc.add_section(Section::new(vec![Paragraph::new("two")]));

        let xml = serialize_document_xml(&doc).unwrap();
        let body = body_of(&xml);
        // First sectPr sits inside the pPr of "one"
        assert_eq!(body.matches("<w:sectPr>").count(), 2);
        assert!(body.find("<w:pPr><w:sectPr>").unwrap() < body.find("two").unwrap());
        assert_eq!(doc.text(), "one\ntwo");
    }
}
