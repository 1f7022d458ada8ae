//! Relationships (`.rels`) handling

use crate::error::{Error, Result};
use crate::xml;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

/// Target mode of a relationship
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetMode {
    #[default]
    Internal,
    External,
}

/// A single relationship
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub target_mode: TargetMode,
}

/// Ordered collection of relationships, IDs assigned as `rId1`, `rId2`, ...
#[derive(Clone, Debug, Default)]
pub struct Relationships {
    items: Vec<Relationship>,
}

impl Relationships {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from XML string
    pub fn from_xml(content: &str) -> Result<Self> {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(true);

        let mut rels = Self::new();
        loop {
            match reader.read_event()? {
                Event::Empty(e) | Event::Start(e) => {
                    if e.name().local_name().as_ref() == b"Relationship" {
                        rels.items.push(parse_relationship(&e)?);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(rels)
    }

    /// Write to a writer
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = Writer::new(writer);
        xml::write_declaration(&mut out)?;

        let mut root = BytesStart::new("Relationships");
        root.push_attribute(("xmlns", xml::PR));
        out.write_event(Event::Start(root))?;

        for rel in &self.items {
            let mut attrs = vec![
                ("Id", rel.id.as_str()),
                ("Type", rel.rel_type.as_str()),
                ("Target", rel.target.as_str()),
            ];
            if rel.target_mode == TargetMode::External {
                attrs.push(("TargetMode", "External"));
            }
            xml::write_empty(&mut out, "Relationship", &attrs)?;
        }

        out.write_event(Event::End(BytesEnd::new("Relationships")))?;
        Ok(())
    }

    /// Add an internal relationship, returning its generated ID
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = format!("rId{}", self.next_id());
        self.items.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode: TargetMode::Internal,
        });
        id
    }

    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    /// First relationship of a given type
    pub fn by_type(&self, rel_type: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.rel_type == rel_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn next_id(&self) -> u32 {
        self.items
            .iter()
            .filter_map(|r| r.id.strip_prefix("rId")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1
    }
}

fn parse_relationship(element: &BytesStart) -> Result<Relationship> {
    let required = |attr: &str| {
        xml::get_attr(element, attr).ok_or_else(|| Error::MissingAttribute {
            element: "Relationship".into(),
            attr: attr.into(),
        })
    };

    let target_mode = match xml::get_attr(element, "TargetMode").as_deref() {
        Some("External") => TargetMode::External,
        _ => TargetMode::Internal,
    };

    Ok(Relationship {
        id: required("Id")?,
        rel_type: required("Type")?,
        target: required("Target")?,
        target_mode,
    })
}

// Well-known relationship types
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relationships() {
        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId7" Type="http://example.com/link" Target="https://example.com" TargetMode="External"/>
</Relationships>"#;

        let mut rels = Relationships::from_xml(content).unwrap();
        assert_eq!(rels.len(), 2);
        assert_eq!(
            rels.by_type(rel_types::OFFICE_DOCUMENT).unwrap().target,
            "word/document.xml"
        );
        assert_eq!(rels.get("rId7").unwrap().target_mode, TargetMode::External);

        // IDs continue after the highest one already present
        assert_eq!(rels.add(rel_types::STYLES, "styles.xml"), "rId8");
    }

    #[test]
    fn test_auto_id() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add(rel_types::OFFICE_DOCUMENT, "word/document.xml"), "rId1");
        assert_eq!(rels.add(rel_types::CORE_PROPERTIES, "docProps/core.xml"), "rId2");
    }

    #[test]
    fn test_missing_target() {
        let content = r#"<Relationships><Relationship Id="rId1" Type="x"/></Relationships>"#;
        assert!(Relationships::from_xml(content).is_err());
    }
}
