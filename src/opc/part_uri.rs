//! Part URI handling for OPC packages

use crate::error::{Error, Result};
use std::fmt;

/// Absolute path of a part inside an OPC package, e.g. `/word/document.xml`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartUri {
    path: String,
}

impl PartUri {
    /// Create a new PartUri, ensuring a leading '/' and no trailing '/'.
    pub fn new(path: &str) -> Result<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::InvalidPartUri(format!("empty path '{}'", path)));
        }

        let normalized = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };

        if normalized.contains("//") {
            return Err(Error::InvalidPartUri(format!(
                "invalid path '{}': contains double slashes",
                path
            )));
        }
        if normalized.split('/').any(|segment| segment == "..") {
            return Err(Error::InvalidPartUri(format!(
                "invalid path '{}': parent segments are not allowed",
                path
            )));
        }

        Ok(Self { path: normalized })
    }

    pub(crate) fn from_static(path: &'static str) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Path inside the ZIP archive (no leading '/')
    pub fn zip_path(&self) -> &str {
        &self.path[1..]
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        let (_, ext) = name.rsplit_once('.')?;
        (!ext.is_empty()).then_some(ext)
    }

    /// Relationships URI for this part.
    ///
    /// For `/word/document.xml`, returns `/word/_rels/document.xml.rels`
    pub fn relationships_uri(&self) -> PartUri {
        let dir = match self.path.rfind('/') {
            Some(pos) => &self.path[..pos],
            None => "",
        };
        PartUri {
            path: format!("{}/_rels/{}.rels", dir, self.file_name()),
        }
    }

    /// Path of `self` relative to the directory holding `base`.
    ///
    /// Relationship targets in part-level `.rels` files are written this way.
    pub fn relative_to(&self, base: &PartUri) -> String {
        let dir = match base.path.rfind('/') {
            Some(pos) => &base.path[..=pos],
            None => "/",
        };
        match self.path.strip_prefix(dir) {
            Some(rest) => rest.to_string(),
            None => self.path.clone(),
        }
    }

    pub fn is_relationships(&self) -> bool {
        self.path.contains("/_rels/") && self.path.ends_with(".rels")
    }
}

impl fmt::Display for PartUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Part URIs of the parts a generated document consists of
pub mod well_known {
    use super::PartUri;

    pub fn document() -> PartUri {
        PartUri::from_static("/word/document.xml")
    }

    pub fn styles() -> PartUri {
        PartUri::from_static("/word/styles.xml")
    }

    pub fn core_props() -> PartUri {
        PartUri::from_static("/docProps/core.xml")
    }
}
