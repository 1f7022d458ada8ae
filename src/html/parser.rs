//! Tolerant HTML fragment parser on top of quick-xml
//!
//! Editor output is close to XML but not quite: void elements are never
//! closed, entities come from HTML, and attribute values may be bare.

use crate::error::{Error, Result};
use crate::html::{entities, Element, Node};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

/// Elements that never have content or an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose start tag implicitly closes an open `<p>`
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "figure", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre",
    "section", "table", "ul",
];

const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Parse serialized content into a detached tree under a synthetic `div` root
pub fn parse_fragment(markup: &str) -> Result<Element> {
    let mut reader = Reader::from_str(markup);
    {
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.trim_text(false);
    }

    let mut tree = TreeBuilder::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::Markup(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(e) => {
                let element = element_from_start(&e);
                if is_void(&element.name) {
                    tree.insert_void(element);
                } else {
                    tree.open(element);
                }
            }
            Event::Empty(e) => tree.insert_void(element_from_start(&e)),
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                tree.close(&name);
            }
            Event::Text(t) => tree.text(decode_text(&t)),
            Event::CData(c) => tree.text(String::from_utf8_lossy(&c).into_owned()),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tree.finish())
}

/// Stack of open elements; index 0 is the root
struct TreeBuilder {
    stack: Vec<Element>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Element::new("div")],
        }
    }

    fn current(&mut self) -> &mut Element {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn append(&mut self, node: Node) {
        self.current().children.push(node);
    }

    fn open(&mut self, element: Element) {
        self.implicit_close(&element.name);
        self.stack.push(element);
    }

    fn insert_void(&mut self, element: Element) {
        self.implicit_close(&element.name);
        self.append(Node::Element(element));
    }

    fn text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        // Merge with a preceding text node so text_content stays contiguous
        if let Some(Node::Text(prev)) = self.current().children.last_mut() {
            prev.push_str(&text);
        } else {
            self.append(Node::Text(text));
        }
    }

    /// Close the nearest open element named `name`; stray end tags are ignored
    fn close(&mut self, name: &str) {
        if let Some(index) = self.stack.iter().rposition(|e| e.name == name) {
            if index > 0 {
                self.pop_to(index);
            }
        }
    }

    fn implicit_close(&mut self, opening: &str) {
        if CLOSES_PARAGRAPH.contains(&opening) {
            self.close("p");
        }
        if HEADINGS.contains(&opening) && HEADINGS.contains(&self.current().name.as_str()) {
            let last = self.stack.len() - 1;
            self.pop_to(last);
        }
        if opening == "li" {
            // Only close an item of the innermost list
            let item = self.stack.iter().rposition(|e| e.name == "li");
            let list = self
                .stack
                .iter()
                .rposition(|e| e.name == "ul" || e.name == "ol");
            if let Some(item) = item {
                if list.map_or(true, |list| item > list) {
                    self.pop_to(item);
                }
            }
        }
    }

    /// Pop elements down to and including `index`, attaching each to its parent
    fn pop_to(&mut self, index: usize) {
        while self.stack.len() > index.max(1) {
            if let Some(element) = self.stack.pop() {
                self.append(Node::Element(element));
            }
        }
    }

    fn finish(mut self) -> Element {
        self.pop_to(1);
        self.stack.pop().unwrap_or_else(|| Element::new("div"))
    }
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

fn element_from_start(start: &BytesStart) -> Element {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let attrs = start
        .html_attributes()
        .filter_map(|a| a.ok())
        .map(|a| {
            let key = String::from_utf8_lossy(a.key.as_ref()).to_ascii_lowercase();
            let value = entities::decode(&String::from_utf8_lossy(&a.value)).into_owned();
            (key, value)
        })
        .collect();

    Element {
        name,
        attrs,
        children: Vec::new(),
    }
}

/// Decode character references; unknown ones and bare `&` stay literal
fn decode_text(text: &BytesText) -> String {
    entities::decode(&String::from_utf8_lossy(text)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(root: &Element) -> Vec<String> {
        let mut out = Vec::new();
        root.walk(&mut |el, ancestors| {
            out.push(format!("{}{}", "-".repeat(ancestors.len() - 1), el.name));
        });
        out
    }

    #[test]
    fn test_simple_fragment() {
        let root = parse_fragment(r#"<h1 class="x">Title</h1><p>Body <em>text</em></p>"#).unwrap();
        assert_eq!(root.name, "div");
        assert_eq!(names(&root), vec!["h1", "p", "-em"]);
        assert_eq!(root.text_content(), "TitleBody text");
        assert_eq!(root.child_elements().next().unwrap().attr("class"), Some("x"));
    }

    #[test]
    fn test_void_elements_are_leaves() {
        let root = parse_fragment("<p>one<br>two<img src=x.png>three</p><p><br></p>").unwrap();
        assert_eq!(names(&root), vec!["p", "-br", "-img", "p", "-br"]);
        assert_eq!(root.select(&["p"])[0].text_content(), "onetwothree");
        assert_eq!(root.select(&["img"])[0].attr("src"), Some("x.png"));
    }

    #[test]
    fn test_entities() {
        let root = parse_fragment("<p>a&nbsp;&amp;&#33; &copy; &bogus; b</p>").unwrap();
        // Only the unknown entity is kept as written
        assert_eq!(root.text_content(), "a\u{a0}&! \u{a9} &bogus; b");

        let root = parse_fragment(r#"<a title="R&D &rarr; x">R&D&nbsp;team</a>"#).unwrap();
        assert_eq!(root.text_content(), "R&D\u{a0}team");
        assert_eq!(root.select(&["a"])[0].attr("title"), Some("R&D \u{2192} x"));

        let root = parse_fragment(r#"<p title="&quot;q&quot;">a&nbsp;&amp;&#33; &copy;</p>"#).unwrap();
        assert_eq!(root.text_content(), "a\u{a0}&! \u{a9}");
        assert_eq!(root.select(&["p"])[0].attr("title"), Some("\"q\""));
    }

    #[test]
    fn test_implicit_paragraph_close() {
        let root = parse_fragment("<p>first<p>second<h2>head</h2>").unwrap();
        assert_eq!(names(&root), vec!["p", "p", "h2"]);
    }

    #[test]
    fn test_list_items_close_siblings() {
        let root = parse_fragment("<ul><li>a<li>b<ol><li>c</ol></ul>").unwrap();
        assert_eq!(names(&root), vec!["ul", "-li", "-li", "--ol", "---li"]);
    }

    #[test]
    fn test_stray_and_unclosed_tags() {
        let root = parse_fragment("</span><p>open <strong>bold</p>tail").unwrap();
        assert_eq!(names(&root), vec!["p", "-strong"]);
        assert_eq!(root.text_content(), "open boldtail");
    }

    #[test]
    fn test_uppercase_and_bare_attributes() {
        let root = parse_fragment("<P ALIGN=center data-x>x</P>").unwrap();
        let p = &root.select(&["p"])[0];
        assert_eq!(p.attr("align"), Some("center"));
        assert_eq!(p.attr("data-x"), Some(""));
    }

    #[test]
    fn test_comments_are_dropped() {
        let root = parse_fragment("<p>a<!-- note -->b</p>").unwrap();
        assert_eq!(root.text_content(), "ab");
    }

    #[test]
    fn test_empty_input() {
        let root = parse_fragment("").unwrap();
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_truncated_tag_is_an_error() {
        assert!(matches!(parse_fragment("<p>text</p><p"), Err(Error::Markup(_))));
    }
}
