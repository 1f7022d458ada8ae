//! Detached markup tree
//!
//! Serialized editor content is parsed into an owned [`Element`] tree.
//! Exports only ever read this copy, never the live widget.

mod entities;
mod parser;
pub mod style;

pub use parser::parse_fragment;

/// A node of the markup tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with lower-cased name and attribute keys
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Upper-cased element name, like DOM `tagName`
    pub fn tag_name(&self) -> String {
        self.name.to_ascii_uppercase()
    }

    /// Get an attribute value. The last duplicate wins.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Classes from the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Concatenated text of all descendant text nodes, like DOM `textContent`.
    /// Elements such as `<br>` contribute nothing.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Visit every descendant element in document order, along with its
    /// ancestors from `self` down to the direct parent.
    pub fn walk<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a Element, &[&'a Element]),
    {
        let mut ancestors = vec![self];
        walk_children(self, &mut ancestors, f);
    }

    /// Descendant elements whose name is one of `names`, in document order.
    /// Nested matches are included, `self` is not.
    pub fn select<'a>(&'a self, names: &[&str]) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.walk(&mut |element, _| {
            if names.iter().any(|n| element.name.eq_ignore_ascii_case(n)) {
                found.push(element);
            }
        });
        found
    }

    /// Child elements, skipping text
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(e, out),
        }
    }
}

fn walk_children<'a, F>(element: &'a Element, ancestors: &mut Vec<&'a Element>, f: &mut F)
where
    F: FnMut(&'a Element, &[&'a Element]),
{
    for child in element.child_elements() {
        f(child, ancestors.as_slice());
        ancestors.push(child);
        walk_children(child, ancestors, f);
        ancestors.pop();
    }
}
