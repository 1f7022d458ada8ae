//! Paragraph element (w:p)

use crate::docx::TextRun;
use crate::error::Result;
use crate::xml;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use std::fmt;

/// Horizontal paragraph alignment, written as `w:jc`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl Alignment {
    /// Value of the `w:jc/@w:val` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Start => "start",
            Alignment::Center => "center",
            Alignment::End => "end",
        }
    }

    /// Map a CSS `text-align` value. Only `center` and `right` move text off the start.
    pub fn from_text_align(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("center") => Alignment::Center,
            Some(v) if v.eq_ignore_ascii_case("right") => Alignment::End,
            _ => Alignment::Start,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paragraph element (w:p)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// `None` leaves the alignment to the paragraph style
    pub alignment: Option<Alignment>,
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a new paragraph with a single plain run
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            alignment: None,
            runs: vec![TextRun::new(text)],
        }
    }

    /// Create a paragraph from runs
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self {
            alignment: None,
            runs,
        }
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get all text in this paragraph
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Write to XML writer. `section` is set for the last paragraph of a
    /// non-final section, whose `w:sectPr` lives inside `w:pPr`.
    pub fn write_to<W: std::io::Write>(
        &self,
        writer: &mut Writer<W>,
        section: Option<&crate::docx::SectionProperties>,
    ) -> Result<()> {
        if self.alignment.is_none() && self.runs.is_empty() && section.is_none() {
            writer.write_event(Event::Empty(BytesStart::new("w:p")))?;
            return Ok(());
        }

        writer.write_event(Event::Start(BytesStart::new("w:p")))?;

        if self.alignment.is_some() || section.is_some() {
            writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;
            if let Some(alignment) = self.alignment {
                xml::write_w_val(writer, "w:jc", alignment.as_str())?;
            }
            if let Some(props) = section {
                props.write_to(writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
        }

        for run in &self.runs {
            run.write_to(writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:p")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn to_xml(para: &Paragraph) -> String {
        let mut writer = Writer::new(Vec::new());
        para.write_to(&mut writer, None).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_alignment_from_text_align() {
        assert_eq!(Alignment::from_text_align(Some("center")), Alignment::Center);
        assert_eq!(Alignment::from_text_align(Some(" RIGHT ")), Alignment::End);
        assert_eq!(Alignment::from_text_align(Some("justify")), Alignment::Start);
        assert_eq!(Alignment::from_text_align(Some("left")), Alignment::Start);
        assert_eq!(Alignment::from_text_align(None), Alignment::Start);
    }

    #[test]
    fn test_aligned_paragraph() {
        let para = Paragraph::new("Hi").alignment(Alignment::End);
        assert_eq!(
            to_xml(&para),
            r#"<w:p><w:pPr><w:jc w:val="end"/></w:pPr><w:r><w:t>Hi</w:t></w:r></w:p>"#
        );
    }

    #[test]
    fn test_empty_paragraph() {
        assert_eq!(to_xml(&Paragraph::default()), "<w:p/>");
    }

    #[test]
    fn test_text_joins_runs() {
        let mut para = Paragraph::new("Hello, ");
        para.add_run(TextRun::new("World").bold(true));
        assert_eq!(para.text(), "Hello, World");
    }
}
