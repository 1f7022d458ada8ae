//! Text run (w:r) - a contiguous run of text with uniform formatting

use crate::error::Result;
use crate::xml;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

/// Text run. `break_before` line breaks are emitted ahead of the text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub break_before: u32,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn break_before(mut self, count: u32) -> Self {
        self.break_before = count;
        self
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:r")))?;

        if self.bold {
            writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;
            xml::write_empty(writer, "w:b", &[])?;
            xml::write_empty(writer, "w:bCs", &[])?;
            writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
        }

        for _ in 0..self.break_before {
            xml::write_empty(writer, "w:br", &[])?;
        }

        let text = xml::xml_safe(&self.text);
        if !text.is_empty() {
            // Leading, trailing or doubled spaces are dropped by Word unless preserved
            let preserve = text.starts_with(char::is_whitespace)
                || text.ends_with(char::is_whitespace)
                || text.contains("  ");
            let attrs: &[(&str, &str)] = if preserve {
                &[("xml:space", "preserve")]
            } else {
                &[]
            };
            xml::write_text_element(writer, "w:t", attrs, &text)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:r")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn to_xml(run: &TextRun) -> String {
        let mut writer = Writer::new(Vec::new());
        run.write_to(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_run() {
        assert_eq!(to_xml(&TextRun::new("Hello")), "<w:r><w:t>Hello</w:t></w:r>");
    }

    #[test]
    fn test_bold_run_with_break() {
        let run = TextRun::new("Title").bold(true).break_before(1);
        assert_eq!(
            to_xml(&run),
            "<w:r><w:rPr><w:b/><w:bCs/></w:rPr><w:br/><w:t>Title</w:t></w:r>"
        );
    }

    #[test]
    fn test_preserves_edge_whitespace() {
        let xml = to_xml(&TextRun::new(" padded "));
        assert!(xml.contains(r#"<w:t xml:space="preserve"> padded </w:t>"#));
    }

    #[test]
    fn test_empty_text_has_no_t() {
        assert_eq!(to_xml(&TextRun::new("").break_before(1)), "<w:r><w:br/></w:r>");
    }

    #[test]
    fn test_control_characters_never_reach_the_xml() {
        assert_eq!(to_xml(&TextRun::new("a\u{1}b")), "<w:r><w:t>ab</w:t></w:r>");
        assert_eq!(to_xml(&TextRun::new("\u{8}")), "<w:r></w:r>");
    }
}
