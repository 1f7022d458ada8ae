//! XML namespaces used in the generated OOXML parts

/// WordprocessingML main namespace
pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Relationships namespace
pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// Content Types namespace
pub const CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
/// Package Relationships namespace
pub const PR: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
/// Core Properties namespace
pub const CP: &str = "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
/// Dublin Core namespace
pub const DC: &str = "http://purl.org/dc/elements/1.1/";
/// Dublin Core Terms namespace
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
/// XML Schema instance namespace
pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Namespace declarations for document.xml and styles.xml
pub fn word_namespaces() -> [(&'static str, &'static str); 2] {
    [("xmlns:w", W), ("xmlns:r", R)]
}

/// Namespace declarations for docProps/core.xml
pub fn core_properties_namespaces() -> [(&'static str, &'static str); 4] {
    [
        ("xmlns:cp", CP),
        ("xmlns:dc", DC),
        ("xmlns:dcterms", DCTERMS),
        ("xmlns:xsi", XSI),
    ]
}
