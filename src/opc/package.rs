//! OPC Package implementation
//!
//! Reads and writes DOCX files as ZIP packages

use crate::error::{Error, Result};
use crate::opc::relationships::rel_types;
use crate::opc::{ContentTypes, Part, PartUri, Relationships};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek, Write};
use zip::read::ZipArchive;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
const PACKAGE_RELS_PATH: &str = "_rels/.rels";

/// An OPC package (ZIP-based container)
///
/// Parts are kept sorted by URI so the same document always produces the
/// same archive layout.
#[derive(Debug)]
pub struct Package {
    parts: BTreeMap<PartUri, Part>,
    /// Package-level relationships (/_rels/.rels)
    relationships: Relationships,
    content_types: ContentTypes,
}

impl Package {
    /// Create a new empty package
    pub fn new() -> Self {
        Self {
            parts: BTreeMap::new(),
            relationships: Relationships::new(),
            content_types: ContentTypes::new(),
        }
    }

    /// Open a package from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Open a package from a reader
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let content_types = match read_entry(&mut archive, CONTENT_TYPES_PATH)? {
            Some(content) => ContentTypes::from_xml(&content)?,
            None => return Err(Error::MissingPart(CONTENT_TYPES_PATH.into())),
        };
        let relationships = match read_entry(&mut archive, PACKAGE_RELS_PATH)? {
            Some(content) => Relationships::from_xml(&content)?,
            None => Relationships::new(),
        };

        let mut package = Self {
            parts: BTreeMap::new(),
            relationships,
            content_types,
        };

        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        for name in names {
            if name.ends_with('/') || name == CONTENT_TYPES_PATH {
                continue;
            }
            let uri = PartUri::new(&name)?;
            if uri.is_relationships() {
                continue;
            }

            let mut data = Vec::new();
            archive.by_name(&name)?.read_to_end(&mut data)?;

            let content_type = package
                .content_types
                .get(&uri)
                .unwrap_or("application/octet-stream")
                .to_string();
            let mut part = Part::new(uri.clone(), content_type, data);

            let rels_uri = uri.relationships_uri();
            if let Some(content) = read_entry(&mut archive, rels_uri.zip_path())? {
                part.set_relationships(Relationships::from_xml(&content)?);
            }

            package.parts.insert(uri, part);
        }

        Ok(package)
    }

    /// Save the package to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Write the package to a writer
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        // Fixed timestamp so identical documents give identical archives
        let options: FileOptions<()> = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());

        zip.start_file(CONTENT_TYPES_PATH, options)?;
        self.content_types.write_to(&mut zip)?;

        if !self.relationships.is_empty() {
            zip.start_file(PACKAGE_RELS_PATH, options)?;
            self.relationships.write_to(&mut zip)?;
        }

        for (uri, part) in &self.parts {
            zip.start_file(uri.zip_path(), options)?;
            zip.write_all(part.data())?;

            if let Some(rels) = part.relationships().filter(|r| !r.is_empty()) {
                zip.start_file(uri.relationships_uri().zip_path(), options)?;
                rels.write_to(&mut zip)?;
            }
        }

        zip.finish()?;
        Ok(())
    }

    pub fn part(&self, uri: &PartUri) -> Option<&Part> {
        self.parts.get(uri)
    }

    /// Add a part, registering its content type as an override
    pub fn add_part(&mut self, part: Part) {
        let uri = part.uri().clone();
        self.content_types.add_override(&uri, part.content_type());
        self.parts.insert(uri, part);
    }

    pub fn part_uris(&self) -> impl Iterator<Item = &PartUri> {
        self.parts.keys()
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Add a package-level relationship
    pub fn add_relationship(&mut self, rel_type: &str, target: &str) -> String {
        self.relationships.add(rel_type, target)
    }

    /// Get the main document part
    pub fn main_document_part(&self) -> Option<&Part> {
        let rel = self.relationships.by_type(rel_types::OFFICE_DOCUMENT)?;
        let uri = PartUri::new(&rel.target).ok()?;
        self.parts.get(&uri)
    }
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a ZIP entry as UTF-8, `None` if the entry does not exist
fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(Some(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::{well_known, MAIN_DOCUMENT, STYLES};

    #[test]
    fn test_empty_package_roundtrip() {
        let bytes = Package::new().to_bytes().unwrap();
        let pkg = Package::from_bytes(&bytes).unwrap();
        assert_eq!(pkg.part_uris().count(), 0);
        assert!(pkg.relationships().is_empty());
    }

    #[test]
    fn test_roundtrip_with_parts() {
        let mut pkg = Package::new();
        let mut doc_rels = Relationships::new();
        doc_rels.add(rel_types::STYLES, "styles.xml");
        pkg.add_part(
            Part::xml(well_known::document(), MAIN_DOCUMENT, "<w:document/>".into())
                .with_relationships(doc_rels),
        );
        pkg.add_part(Part::xml(well_known::styles(), STYLES, "<w:styles/>".into()));
        pkg.add_relationship(rel_types::OFFICE_DOCUMENT, "word/document.xml");

        let pkg2 = Package::from_bytes(&pkg.to_bytes().unwrap()).unwrap();

        let doc = pkg2.main_document_part().unwrap();
        assert_eq!(doc.data_as_str().unwrap(), "<w:document/>");
        assert_eq!(doc.content_type(), MAIN_DOCUMENT);
        assert!(doc
            .relationships()
            .and_then(|r| r.by_type(rel_types::STYLES))
            .is_some());
        assert_eq!(
            pkg2.content_types().get(&well_known::styles()),
            Some(STYLES)
        );
        // .rels files are not surfaced as parts
        assert_eq!(pkg2.part_uris().count(), 2);
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            Package::from_bytes(b"not a zip"),
            Err(Error::Zip(_))
        ));
    }
}
