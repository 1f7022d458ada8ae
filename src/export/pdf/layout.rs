//! Flattening a container into block-level layout units

use super::WhiteSpace;
use crate::docx::Alignment;
use crate::html::{style, Element, Node};

/// Font used for a block
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
    Mono,
}

/// A block of text laid out as one or more lines
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    /// Text with `\n` for forced line breaks; list markers already prefixed
    pub text: String,
    pub face: FontFace,
    /// Font size relative to body text
    pub size: f32,
    pub alignment: Alignment,
    /// Indentation steps from lists, quotes and `ql-indent-N`
    pub indent: u32,
}

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "dd", "dt", "figure", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "li", "main", "nav", "ol", "p", "pre",
    "section", "ul",
];

fn is_block(element: &Element) -> bool {
    BLOCK_ELEMENTS.contains(&element.name.as_str())
}

const QUILL_MAX_INDENT: u32 = 8;

/// Deepest indentation a block can reach; nesting beyond it stays level
const MAX_INDENT: u32 = 16;

/// Relative heading sizes, h1 through h6
const HEADING_SIZES: [f32; 6] = [2.0, 1.5, 1.17, 1.0, 0.83, 0.67];

fn heading_level(element: &Element) -> Option<usize> {
    let digit = element.name.strip_prefix('h')?;
    match digit.parse::<usize>() {
        Ok(level @ 1..=6) => Some(level),
        _ => None,
    }
}

#[derive(Clone, Copy)]
struct Inherited {
    face: FontFace,
    size: f32,
    indent: u32,
}

struct Flow {
    white_space: WhiteSpace,
    out: Vec<Block>,
}

pub(crate) fn blocks(root: &Element, white_space: WhiteSpace) -> Vec<Block> {
    let mut flow = Flow {
        white_space,
        out: Vec::new(),
    };
    let inherited = Inherited {
        face: FontFace::Regular,
        size: 1.0,
        indent: 0,
    };
    flow.block(root, &[], inherited, None, false);
    flow.out
}

impl Flow {
    /// Lay out one block-level element. Inline content between nested
    /// blocks forms anonymous blocks; an element that produced nothing
    /// still yields one empty line when `keep_empty` is set.
    fn block<'a>(
        &mut self,
        element: &'a Element,
        ancestors: &[&'a Element],
        parent: Inherited,
        mut marker: Option<String>,
        keep_empty: bool,
    ) {
        let (face, size) = match (heading_level(element), element.name.as_str()) {
            (Some(level), _) => (FontFace::Bold, HEADING_SIZES[level - 1]),
            (None, "pre") => (FontFace::Mono, parent.size),
            _ => (parent.face, parent.size),
        };
        let extra_indent = quill_indent(element) + u32::from(element.name == "blockquote");
        let here = Inherited {
            face,
            size,
            indent: parent.indent.saturating_add(extra_indent).min(MAX_INDENT),
        };
        let alignment =
            Alignment::from_text_align(style::computed_text_align(element, ancestors).as_deref());

        let mut chain = ancestors.to_vec();
        chain.push(element);

        let start = self.out.len();
        let mut pending = String::new();

        for child in &element.children {
            match child {
                Node::Text(t) => self.push_text(&mut pending, t),
                Node::Element(e) if e.name == "br" => pending.push('\n'),
                Node::Element(e) if is_block(e) => {
                    self.flush(&mut pending, &mut marker, here, alignment, false);
                    if e.name == "ul" || e.name == "ol" {
                        self.list(e, &chain, here);
                    } else {
                        self.block(e, &chain, here, None, true);
                    }
                }
                Node::Element(e) => self.inline(&mut pending, e),
            }
        }

        let nothing_emitted = self.out.len() == start;
        self.flush(&mut pending, &mut marker, here, alignment, keep_empty && nothing_emitted);
    }

    fn list<'a>(&mut self, list: &'a Element, ancestors: &[&'a Element], parent: Inherited) {
        let mut chain = ancestors.to_vec();
        chain.push(list);

        let nested = Inherited {
            indent: parent.indent.saturating_add(1).min(MAX_INDENT),
            ..parent
        };
        let mut number = list
            .attr("start")
            .and_then(|s| s.trim().parse::<i64>().ok())
            .unwrap_or(1);

        for item in list.child_elements() {
            if item.name != "li" {
                self.block(item, &chain, nested, None, is_block(item));
                continue;
            }
            let ordered = match item.attr("data-list") {
                Some("bullet") | Some("unchecked") | Some("checked") => false,
                Some("ordered") => true,
                _ => list.name == "ol",
            };
            let marker = if ordered {
                let m = format!("{}. ", number);
                number = number.saturating_add(1);
                m
            } else {
                "\u{2022} ".to_string()
            };
            self.block(item, &chain, nested, Some(marker), true);
        }
    }

    fn push_text(&self, pending: &mut String, text: &str) {
        match self.white_space {
            WhiteSpace::PreWrap => pending.push_str(text),
            WhiteSpace::Normal => {
                for ch in text.chars() {
                    if !ch.is_whitespace() {
                        pending.push(ch);
                    } else if !(pending.is_empty()
                        || pending.ends_with(' ')
                        || pending.ends_with('\n'))
                    {
                        pending.push(' ');
                    }
                }
            }
        }
    }

    fn inline(&self, pending: &mut String, element: &Element) {
        for child in &element.children {
            match child {
                Node::Text(t) => self.push_text(pending, t),
                Node::Element(e) if e.name == "br" => pending.push('\n'),
                Node::Element(e) => self.inline(pending, e),
            }
        }
    }

    fn flush(
        &mut self,
        pending: &mut String,
        marker: &mut Option<String>,
        inherited: Inherited,
        alignment: Alignment,
        keep_empty: bool,
    ) {
        let mut text = std::mem::take(pending);
        // A trailing <br> ends the line it is on without adding another
        if text.ends_with('\n') {
            text.pop();
        }
        if self.white_space == WhiteSpace::Normal {
            text = text.trim_matches(' ').to_string();
        }
        if text.trim().is_empty() && !keep_empty {
            return;
        }

        if let Some(marker) = marker.take() {
            text.insert_str(0, &marker);
        }
        self.out.push(Block {
            text,
            face: inherited.face,
            size: inherited.size,
            alignment,
            indent: inherited.indent,
        });
    }
}

/// Indent level from the editor's `ql-indent-N` class, at most the
/// editor's own maximum of 8
fn quill_indent(element: &Element) -> u32 {
    element
        .classes()
        .filter_map(|c| c.strip_prefix("ql-indent-")?.parse::<u32>().ok())
        .max()
        .map_or(0, |level| level.min(QUILL_MAX_INDENT))
}
