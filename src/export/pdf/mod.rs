//! PDF export: clone content into a page-sized container and render it
//!
//! The container mimics an A4 sheet (`180mm` wide, `10mm` margin,
//! `white-space: pre-wrap`). A [`PdfRenderer`] turns it into a blob.

mod layout;
mod metrics;
mod render;

pub use layout::{Block, FontFace};
pub use render::TextPdfRenderer;

use crate::error::Result;
use crate::export::{Blob, FileSaver, SavedFile};
use crate::html::{self, Element};

pub const PDF_MIME: &str = "application/pdf";

/// How the container treats whitespace in text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WhiteSpace {
    Normal,
    /// Spaces and newlines are kept, lines still wrap
    #[default]
    PreWrap,
}

/// Layout style of the detached container
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerStyle {
    pub white_space: WhiteSpace,
    pub width_mm: f32,
    pub margin_mm: f32,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        Self {
            white_space: WhiteSpace::PreWrap,
            width_mm: 180.0,
            margin_mm: 10.0,
        }
    }
}

/// Detached copy of the editor markup, sized like a page
#[derive(Clone, Debug)]
pub struct Container {
    pub root: Element,
    pub style: ContainerStyle,
}

impl Container {
    pub fn from_markup(markup: &str) -> Result<Self> {
        Ok(Self {
            root: html::parse_fragment(markup)?,
            style: ContainerStyle::default(),
        })
    }

    /// Block-level layout units in document order
    pub fn blocks(&self) -> Vec<Block> {
        layout::blocks(&self.root, self.style.white_space)
    }
}

/// Measurement unit of the options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Unit {
    #[default]
    Mm,
    Pt,
    In,
}

impl Unit {
    /// Points per unit
    pub fn to_pt(self) -> f32 {
        match self {
            Unit::Mm => 72.0 / 25.4,
            Unit::Pt => 1.0,
            Unit::In => 72.0,
        }
    }
}

/// Paper format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageFormat {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
}

impl PageFormat {
    /// Portrait width and height in millimetres
    pub fn size_mm(self) -> (f32, f32) {
        match self {
            PageFormat::A3 => (297.0, 420.0),
            PageFormat::A4 => (210.0, 297.0),
            PageFormat::A5 => (148.0, 210.0),
            PageFormat::Letter => (215.9, 279.4),
            PageFormat::Legal => (215.9, 355.6),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

/// PDF export settings
#[derive(Clone, Debug, PartialEq)]
pub struct PdfOptions {
    /// Page margins as `[top, left, bottom, right]` in `unit`
    pub margin: [f32; 4],
    pub filename: String,
    /// Rendering scale applied to text
    pub scale: f32,
    /// Accept cross-origin images. Carried for external renderers
    pub allow_taint: bool,
    /// Fetch images with CORS. Carried for external renderers
    pub use_cors: bool,
    pub unit: Unit,
    pub format: PageFormat,
    pub orientation: PageOrientation,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            margin: [20.0, 20.0, 20.0, 20.0],
            filename: "document.pdf".to_string(),
            scale: 1.0,
            allow_taint: true,
            use_cors: true,
            unit: Unit::Mm,
            format: PageFormat::A4,
            orientation: PageOrientation::Portrait,
        }
    }
}

impl PdfOptions {
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn margin(mut self, margin: [f32; 4]) -> Self {
        self.margin = margin;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn format(mut self, format: PageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn orientation(mut self, orientation: PageOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Page width and height in points, orientation applied
    pub fn page_size_pt(&self) -> (f32, f32) {
        let mm = Unit::Mm.to_pt();
        let (w, h) = self.format.size_mm();
        match self.orientation {
            PageOrientation::Portrait => (w * mm, h * mm),
            PageOrientation::Landscape => (h * mm, w * mm),
        }
    }

    /// Margins `[top, left, bottom, right]` in points
    pub fn margin_pt(&self) -> [f32; 4] {
        let factor = self.unit.to_pt();
        self.margin.map(|m| m * factor)
    }
}

/// Turns a container into PDF bytes
pub trait PdfRenderer {
    fn convert(&self, container: &Container, options: &PdfOptions) -> Result<Blob>;
}

/// Run the PDF export for serialized content and save the result
pub fn export_pdf<R, S>(
    markup: &str,
    renderer: &R,
    options: &PdfOptions,
    saver: &mut S,
) -> Result<SavedFile>
where
    R: PdfRenderer + ?Sized,
    S: FileSaver + ?Sized,
{
    let container = Container::from_markup(markup)?;
    let blob = renderer.convert(&container, options)?;
    log::debug!("pdf export: {} bytes", blob.len());
    saver.save_blob(&blob, &options.filename)
}
