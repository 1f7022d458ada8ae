//! Sections and section properties (w:sectPr)

use crate::docx::Paragraph;
use crate::error::Result;
use crate::xml;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

/// Page orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page geometry of a section, all values in twentieths of a point (twips)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionProperties {
    pub page_width: u32,
    pub page_height: u32,
    pub orientation: Orientation,
    pub margin_top: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
    pub header: u32,
    pub footer: u32,
    pub gutter: u32,
}

impl Default for SectionProperties {
    /// A4 portrait with one-inch margins
    fn default() -> Self {
        Self {
            page_width: 11906,
            page_height: 16838,
            orientation: Orientation::Portrait,
            margin_top: 1440,
            margin_right: 1440,
            margin_bottom: 1440,
            margin_left: 1440,
            header: 708,
            footer: 708,
            gutter: 0,
        }
    }
}

impl SectionProperties {
    /// Swap to landscape, exchanging width and height
    pub fn landscape(mut self) -> Self {
        if self.orientation == Orientation::Portrait {
            std::mem::swap(&mut self.page_width, &mut self.page_height);
            self.orientation = Orientation::Landscape;
        }
        self
    }

    /// Same margin on all four sides
    pub fn margins(mut self, twips: u32) -> Self {
        self.margin_top = twips;
        self.margin_right = twips;
        self.margin_bottom = twips;
        self.margin_left = twips;
        self
    }

    /// Write to XML writer
    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;

        let width = self.page_width.to_string();
        let height = self.page_height.to_string();
        let mut size = vec![("w:w", width.as_str()), ("w:h", height.as_str())];
        if self.orientation == Orientation::Landscape {
            size.push(("w:orient", "landscape"));
        }
        xml::write_empty(writer, "w:pgSz", &size)?;

        let values = [
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left,
            self.header,
            self.footer,
            self.gutter,
        ]
        .map(|v| v.to_string());
        let names = [
            "w:top", "w:right", "w:bottom", "w:left", "w:header", "w:footer", "w:gutter",
        ];
        let margins: Vec<(&str, &str)> = names
            .iter()
            .zip(values.iter())
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        xml::write_empty(writer, "w:pgMar", &margins)?;

        writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
        Ok(())
    }
}

/// A section: page properties plus its paragraphs
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Section {
    pub properties: SectionProperties,
    pub children: Vec<Paragraph>,
}

impl Section {
    pub fn new(children: Vec<Paragraph>) -> Self {
        Self {
            properties: SectionProperties::default(),
            children,
        }
    }

    pub fn properties(mut self, properties: SectionProperties) -> Self {
        self.properties = properties;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn to_xml(props: &SectionProperties) -> String {
        let mut writer = Writer::new(Vec::new());
        props.write_to(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_default_is_a4_portrait() {
        assert_eq!(
            to_xml(&SectionProperties::default()),
            concat!(
                r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/>"#,
                r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>"#,
                "</w:sectPr>"
            )
        );
    }

    #[test]
    fn test_landscape_swaps_size() {
        let props = SectionProperties::default().landscape().landscape().margins(720);
        assert_eq!(props.page_width, 16838);
        assert_eq!(props.margin_left, 720);
        assert!(to_xml(&props).contains(r#"w:orient="landscape""#));
    }
}
