//! Text-only PDF rendering with the standard Type1 fonts

use super::layout::{Block, FontFace};
use super::metrics::{encode_win_ansi, text_width, wrap};
use super::{Container, PdfOptions, PdfRenderer, Unit, PDF_MIME};
use crate::docx::Alignment;
use crate::error::{Error, Result};
use crate::export::Blob;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

const CATALOG_ID: Ref = Ref::new(1);
const PAGE_TREE_ID: Ref = Ref::new(2);
const FONTS: [(FontFace, &[u8], &[u8], Ref); 3] = [
    (FontFace::Regular, b"F1", b"Helvetica", Ref::new(3)),
    (FontFace::Bold, b"F2", b"Helvetica-Bold", Ref::new(4)),
    (FontFace::Mono, b"F3", b"Courier", Ref::new(5)),
];
const FIRST_FREE_ID: i32 = 6;

fn font_name(face: FontFace) -> Name<'static> {
    let name = FONTS
        .iter()
        .find(|(f, ..)| *f == face)
        .map_or(b"F1" as &[u8], |(_, name, ..)| *name);
    Name(name)
}

/// Renders the container's blocks as wrapped lines of text.
///
/// Text is scaled so the container width fits between the page margins,
/// then by `PdfOptions::scale`. Blocks flow onto new pages when the bottom
/// margin is reached.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPdfRenderer {
    /// Body font size before scaling
    pub base_font_size_pt: f32,
    /// Line advance as a multiple of the font size
    pub line_height: f32,
}

impl Default for TextPdfRenderer {
    fn default() -> Self {
        Self {
            base_font_size_pt: 12.0,
            line_height: 1.42,
        }
    }
}

impl TextPdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One positioned line on a page
struct Line {
    text: String,
    face: FontFace,
    size: f32,
    x: f32,
    y: f32,
}

struct Pages {
    top: f32,
    bottom: f32,
    cursor: f32,
    pages: Vec<Vec<Line>>,
}

impl Pages {
    fn new(top: f32, bottom: f32) -> Self {
        Self {
            top,
            bottom,
            cursor: top,
            pages: vec![Vec::new()],
        }
    }

    /// Baseline for a line of the given advance, breaking the page first
    /// when the line would cross the bottom margin
    fn advance(&mut self, advance: f32) -> f32 {
        let page_has_lines = self.pages.last().is_some_and(|p| !p.is_empty());
        if self.cursor - advance < self.bottom && page_has_lines {
            self.pages.push(Vec::new());
            self.cursor = self.top;
        }
        self.cursor -= advance;
        self.cursor
    }

    fn push(&mut self, line: Line) {
        if let Some(page) = self.pages.last_mut() {
            page.push(line);
        }
    }
}

impl TextPdfRenderer {
    fn lay_out(
        &self,
        blocks: &[Block],
        options: &PdfOptions,
        container_width_pt: f32,
    ) -> Result<Vec<Vec<Line>>> {
        if !options.scale.is_finite() || options.scale <= 0.0 {
            return Err(Error::Render(format!("invalid scale {}", options.scale)));
        }
        let (page_w, page_h) = options.page_size_pt();
        let [top, left, bottom, right] = options.margin_pt();
        let inner_w = page_w - left - right;
        let inner_h = page_h - top - bottom;
        if inner_w <= 0.0 || inner_h <= 0.0 {
            return Err(Error::Render(format!(
                "margins {:?} leave no room on a {}x{}pt page",
                options.margin, page_w, page_h
            )));
        }

        let fit = (inner_w / container_width_pt).min(1.0);
        let scale = options.scale * fit;
        let mut pages = Pages::new(page_h - top, bottom);

        for block in blocks {
            let size = self.base_font_size_pt * block.size * scale;
            let indent = block.indent as f32 * 1.5 * self.base_font_size_pt * scale;
            let width = (inner_w - indent).max(size);
            let advance = size * self.line_height;

            for text in wrap(&block.text, block.face, size, width) {
                let line_w = text_width(&text, block.face, size);
                let x = left
                    + indent
                    + match block.alignment {
                        Alignment::Start => 0.0,
                        Alignment::Center => ((width - line_w) / 2.0).max(0.0),
                        Alignment::End => (width - line_w).max(0.0),
                    };
                let y = pages.advance(advance);
                pages.push(Line {
                    text,
                    face: block.face,
                    size,
                    x,
                    y,
                });
            }
        }

        Ok(pages.pages)
    }

    fn write(&self, pages: &[Vec<Line>], options: &PdfOptions) -> Vec<u8> {
        let (page_w, page_h) = options.page_size_pt();
        let mut pdf = Pdf::new();
        // Each page takes a page object and a content stream
        let ids: Vec<(Ref, Ref)> = (0..pages.len() as i32)
            .map(|i| {
                let page_id = FIRST_FREE_ID + 2 * i;
                (Ref::new(page_id), Ref::new(page_id + 1))
            })
            .collect();

        pdf.catalog(CATALOG_ID).pages(PAGE_TREE_ID);
        pdf.pages(PAGE_TREE_ID)
            .kids(ids.iter().map(|(page_id, _)| *page_id))
            .count(ids.len() as i32);

        for (_, _, base_font, id) in FONTS {
            pdf.type1_font(id)
                .base_font(Name(base_font))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        for (lines, (page_id, content_id)) in pages.iter().zip(&ids) {
            let mut page = pdf.page(*page_id);
            page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
            page.parent(PAGE_TREE_ID);
            page.contents(*content_id);
            {
                let mut resources = page.resources();
                let mut fonts = resources.fonts();
                for (_, name, _, id) in FONTS {
                    fonts.pair(Name(name), id);
                }
            }
            page.finish();

            let mut content = Content::new();
            for line in lines.iter().filter(|l| !l.text.is_empty()) {
                content.begin_text();
                content.set_font(font_name(line.face), line.size);
                content.next_line(line.x, line.y);
                content.show(Str(&encode_win_ansi(&line.text)));
                content.end_text();
            }
            pdf.stream(*content_id, &content.finish());
        }

        pdf.finish()
    }
}

impl PdfRenderer for TextPdfRenderer {
    fn convert(&self, container: &Container, options: &PdfOptions) -> Result<Blob> {
        let blocks = container.blocks();
        let container_width_pt = container.style.width_mm * Unit::Mm.to_pt();
        let pages = self.lay_out(&blocks, options, container_width_pt)?;
        log::debug!("pdf: {} block(s) on {} page(s)", blocks.len(), pages.len());
        Ok(Blob::new(self.write(&pages, options), PDF_MIME))
    }
}
