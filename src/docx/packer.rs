//! Packs a [`WordDocument`] into an OPC package

use crate::docx::{serialize_document_xml, WordDocument};
use crate::error::Result;
use crate::opc::{
    rel_types, well_known, Package, Part, Relationships, CORE_PROPERTIES, MAIN_DOCUMENT, STYLES,
};
use crate::xml;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

/// DOCX serializer
pub struct Packer;

impl Packer {
    /// Build the OPC package for a document
    pub fn to_package(doc: &WordDocument) -> Result<Package> {
        let mut package = Package::new();

        let document_uri = well_known::document();
        let styles_uri = well_known::styles();
        let core_uri = well_known::core_props();

        let mut document_rels = Relationships::new();
        document_rels.add(rel_types::STYLES, &styles_uri.relative_to(&document_uri));

        package.add_part(
            Part::xml(document_uri.clone(), MAIN_DOCUMENT, serialize_document_xml(doc)?)
                .with_relationships(document_rels),
        );
        package.add_part(Part::xml(styles_uri, STYLES, styles_xml()?));
        package.add_part(Part::xml(core_uri.clone(), CORE_PROPERTIES, core_xml(doc)?));

        package.add_relationship(rel_types::OFFICE_DOCUMENT, document_uri.zip_path());
        package.add_relationship(rel_types::CORE_PROPERTIES, core_uri.zip_path());

        Ok(package)
    }

    /// Serialize a document to `.docx` bytes
    pub fn to_bytes(doc: &WordDocument) -> Result<Vec<u8>> {
        let bytes = Self::to_package(doc)?.to_bytes()?;
        log::debug!(
            "packed {} paragraph(s) into {} byte docx",
            doc.paragraph_count(),
            bytes.len()
        );
        Ok(bytes)
    }
}

/// Minimal `word/styles.xml`: document defaults and the Normal style
fn styles_xml() -> Result<String> {
    let mut w = Writer::new(Vec::new());
    xml::write_declaration(&mut w)?;

    let mut root = BytesStart::new("w:styles");
    for attr in xml::word_namespaces() {
        root.push_attribute(attr);
    }
    w.write_event(Event::Start(root))?;

    w.write_event(Event::Start(BytesStart::new("w:docDefaults")))?;
    w.write_event(Event::Start(BytesStart::new("w:rPrDefault")))?;
    w.write_event(Event::Start(BytesStart::new("w:rPr")))?;
    xml::write_empty(
        &mut w,
        "w:rFonts",
        &[("w:ascii", "Calibri"), ("w:hAnsi", "Calibri"), ("w:cs", "Calibri")],
    )?;
    xml::write_w_val(&mut w, "w:sz", "22")?;
    xml::write_w_val(&mut w, "w:szCs", "22")?;
    w.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    w.write_event(Event::End(BytesEnd::new("w:rPrDefault")))?;
    xml::write_empty(&mut w, "w:pPrDefault", &[])?;
    w.write_event(Event::End(BytesEnd::new("w:docDefaults")))?;

    let mut normal = BytesStart::new("w:style");
    normal.push_attribute(("w:type", "paragraph"));
    normal.push_attribute(("w:default", "1"));
    normal.push_attribute(("w:styleId", "Normal"));
    w.write_event(Event::Start(normal))?;
    xml::write_w_val(&mut w, "w:name", "Normal")?;
    xml::write_empty(&mut w, "w:qFormat", &[])?;
    w.write_event(Event::End(BytesEnd::new("w:style")))?;

    w.write_event(Event::End(BytesEnd::new("w:styles")))?;
    Ok(String::from_utf8_lossy(&w.into_inner()).into_owned())
}

/// `docProps/core.xml` with title and creator when set
fn core_xml(doc: &WordDocument) -> Result<String> {
    let mut w = Writer::new(Vec::new());
    xml::write_declaration(&mut w)?;

    let mut root = BytesStart::new("cp:coreProperties");
    for attr in xml::core_properties_namespaces() {
        root.push_attribute(attr);
    }
    w.write_event(Event::Start(root))?;
    if let Some(title) = &doc.title {
        xml::write_text_element(&mut w, "dc:title", &[], title)?;
    }
    if let Some(creator) = &doc.creator {
        xml::write_text_element(&mut w, "dc:creator", &[], creator)?;
    }
    w.write_event(Event::End(BytesEnd::new("cp:coreProperties")))?;

    Ok(String::from_utf8_lossy(&w.into_inner()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::{Paragraph, Section};
    use crate::opc::PartUri;

    #[test]
    fn test_package_layout() {
        let doc = WordDocument::with_section(Section::new(vec![Paragraph::new("Hello")]))
            .title("Notes")
            .creator("tester");
        let bytes = Packer::to_bytes(&doc).unwrap();

        let pkg = Package::from_bytes(&bytes).unwrap();
        let uris: Vec<&str> = pkg.part_uris().map(PartUri::as_str).collect();
        assert_eq!(
            uris,
            vec!["/docProps/core.xml", "/word/document.xml", "/word/styles.xml"]
        );

        let main = pkg.main_document_part().unwrap();
        assert!(main.data_as_str().unwrap().contains("<w:t>Hello</w:t>"));
        assert_eq!(
            main.relationships()
                .and_then(|r| r.by_type(rel_types::STYLES))
                .map(|r| r.target.as_str()),
            Some("styles.xml")
        );

        let core = pkg.part(&well_known::core_props()).unwrap();
        let core = core.data_as_str().unwrap();
        assert!(core.contains("<dc:title>Notes</dc:title>"));
        assert!(core.contains("<dc:creator>tester</dc:creator>"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let doc = WordDocument::with_section(Section::new(vec![Paragraph::new("same")]));
        assert_eq!(Packer::to_bytes(&doc).unwrap(), Packer::to_bytes(&doc).unwrap());
    }
}
