//! `[Content_Types].xml` handling

use crate::error::{Error, Result};
use crate::opc::PartUri;
use crate::xml;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;
use std::io::Write;

/// Content types definition for an OPC package
#[derive(Clone, Debug, Default)]
pub struct ContentTypes {
    /// extension -> content type
    defaults: BTreeMap<String, String>,
    /// part URI -> content type
    overrides: BTreeMap<PartUri, String>,
}

impl ContentTypes {
    /// Create a new ContentTypes with the `rels` and `xml` defaults
    pub fn new() -> Self {
        let mut ct = Self::default();
        ct.add_default("rels", RELATIONSHIPS);
        ct.add_default("xml", XML);
        ct
    }

    /// Parse from XML string
    pub fn from_xml(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut ct = Self::default();
        loop {
            match reader.read_event()? {
                Event::Empty(e) | Event::Start(e) => match e.name().local_name().as_ref() {
                    b"Default" => {
                        let ext = required_attr(&e, "Extension")?;
                        let content_type = required_attr(&e, "ContentType")?;
                        ct.add_default(&ext, &content_type);
                    }
                    b"Override" => {
                        let part_name = required_attr(&e, "PartName")?;
                        let content_type = required_attr(&e, "ContentType")?;
                        ct.add_override(&PartUri::new(&part_name)?, &content_type);
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(ct)
    }

    /// Write to a writer
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut w = Writer::new(writer);
        xml::write_declaration(&mut w)?;

        let mut types = BytesStart::new("Types");
        types.push_attribute(("xmlns", xml::CT));
        w.write_event(Event::Start(types))?;

        for (ext, content_type) in &self.defaults {
            xml::write_empty(
                &mut w,
                "Default",
                &[("Extension", ext.as_str()), ("ContentType", content_type.as_str())],
            )?;
        }

        for (uri, content_type) in &self.overrides {
            xml::write_empty(
                &mut w,
                "Override",
                &[("PartName", uri.as_str()), ("ContentType", content_type.as_str())],
            )?;
        }

        w.write_event(Event::End(BytesEnd::new("Types")))?;
        Ok(())
    }

    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .insert(extension.to_lowercase(), content_type.to_string());
    }

    pub fn add_override(&mut self, uri: &PartUri, content_type: &str) {
        self.overrides.insert(uri.clone(), content_type.to_string());
    }

    /// Get the content type for a part, overrides first
    pub fn get(&self, uri: &PartUri) -> Option<&str> {
        if let Some(ct) = self.overrides.get(uri) {
            return Some(ct);
        }
        uri.extension()
            .and_then(|ext| self.defaults.get(&ext.to_lowercase()))
            .map(|s| s.as_str())
    }
}

fn required_attr(element: &BytesStart, name: &str) -> Result<String> {
    xml::get_attr(element, name).ok_or_else(|| Error::MissingAttribute {
        element: String::from_utf8_lossy(element.name().as_ref()).to_string(),
        attr: name.to_string(),
    })
}

// Well-known content types
pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
pub const XML: &str = "application/xml";
pub const MAIN_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub const STYLES: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::well_known;

    #[test]
    fn test_parse_content_types() {
        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="XML" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

        let ct = ContentTypes::from_xml(content).unwrap();

        assert_eq!(ct.get(&well_known::document()), Some(MAIN_DOCUMENT));
        assert_eq!(ct.get(&well_known::styles()), Some(XML));
    }

    #[test]
    fn test_missing_attribute() {
        let content = r#"<Types><Default Extension="xml"/></Types>"#;
        assert!(matches!(
            ContentTypes::from_xml(content),
            Err(Error::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_write_is_sorted() {
        let mut ct = ContentTypes::new();
        ct.add_override(&well_known::styles(), STYLES);
        ct.add_override(&well_known::document(), MAIN_DOCUMENT);

        let mut buf = Vec::new();
        ct.write_to(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();

        let doc = out.find("/word/document.xml").unwrap();
        let styles = out.find("/word/styles.xml").unwrap();
        assert!(doc < styles);
        assert!(out.contains(r#"<Default Extension="rels""#));
    }
}
