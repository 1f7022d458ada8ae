//! Computed `text-align` for elements of a detached tree
//!
//! Sources are checked on each element, nearest first: the inline `style`
//! attribute, the editor's `ql-align-*` classes, then the legacy `align`
//! attribute. `text-align` is inherited, so an element without any of them
//! takes the value of its closest ancestor that has one.

use crate::html::Element;

/// Inline style declarations as `(property, value)`, property lower-cased
/// and `!important` stripped from values.
pub fn declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let mut value = value.trim();
            if let Some(stripped) = strip_important(value) {
                value = stripped;
            }
            if property.is_empty() || value.is_empty() {
                None
            } else {
                Some((property, value.to_string()))
            }
        })
        .collect()
}

fn strip_important(value: &str) -> Option<&str> {
    let lower = value.to_ascii_lowercase();
    let pos = lower.rfind('!')?;
    (lower[pos + 1..].trim() == "important").then(|| value[..pos].trim_end())
}

/// Value of one inline style property; the last declaration wins
pub fn inline_property(element: &Element, property: &str) -> Option<String> {
    let style = element.attr("style")?;
    declarations(style)
        .into_iter()
        .rev()
        .find(|(p, _)| p == property)
        .map(|(_, v)| v.to_ascii_lowercase())
}

/// `text-align` specified directly on an element, if any
pub fn specified_text_align(element: &Element) -> Option<String> {
    if let Some(value) = inline_property(element, "text-align") {
        return Some(value);
    }

    let from_class = element.classes().find_map(|class| match class {
        "ql-align-center" => Some("center"),
        "ql-align-right" => Some("right"),
        "ql-align-justify" => Some("justify"),
        _ => None,
    });
    if let Some(value) = from_class {
        return Some(value.to_string());
    }

    element
        .attr("align")
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
}

/// Computed `text-align` of `element` given its ancestors (outermost first).
/// `None` means unset everywhere.
pub fn computed_text_align(element: &Element, ancestors: &[&Element]) -> Option<String> {
    let chain = std::iter::once(element).chain(ancestors.iter().rev().copied());
    for candidate in chain {
        match specified_text_align(candidate).as_deref() {
            None | Some("inherit") | Some("unset") => continue,
            Some("initial") | Some("revert") => return Some("start".to_string()),
            Some(value) => return Some(value.to_string()),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declarations() {
        assert_eq!(
            declarations(" Text-Align : center ; color:red;; bad ; width: 1px !important"),
            vec![
                ("text-align".to_string(), "center".to_string()),
                ("color".to_string(), "red".to_string()),
                ("width".to_string(), "1px".to_string()),
            ]
        );
    }

    #[test]
    fn test_last_inline_declaration_wins() {
        let el = Element::new("p").with_attr("style", "text-align:right;text-align:CENTER");
        assert_eq!(specified_text_align(&el).as_deref(), Some("center"));
    }

    #[test]
    fn test_inline_beats_class_beats_attribute() {
        let el = Element::new("p")
            .with_attr("class", "ql-align-right")
            .with_attr("align", "left");
        assert_eq!(specified_text_align(&el).as_deref(), Some("right"));

        let el = el.with_attr("style", "text-align: justify");
        assert_eq!(specified_text_align(&el).as_deref(), Some("justify"));

        let el = Element::new("p").with_attr("align", " Center ");
        assert_eq!(specified_text_align(&el).as_deref(), Some("center"));
    }

    #[test]
    fn test_inherited_from_nearest_ancestor() {
        let outer = Element::new("div").with_attr("style", "text-align: right");
        let inner = Element::new("blockquote").with_attr("class", "ql-align-center");
        let target = Element::new("p");

        assert_eq!(
            computed_text_align(&target, &[&outer, &inner]).as_deref(),
            Some("center")
        );
        assert_eq!(computed_text_align(&target, &[&outer]).as_deref(), Some("right"));
        assert_eq!(computed_text_align(&target, &[]), None);
    }

    #[test]
    fn test_inherit_and_initial_keywords() {
        let outer = Element::new("div").with_attr("style", "text-align: center");
        let inherit = Element::new("p").with_attr("style", "text-align: inherit");
        let initial = Element::new("p").with_attr("style", "text-align: initial");

        assert_eq!(computed_text_align(&inherit, &[&outer]).as_deref(), Some("center"));
        assert_eq!(computed_text_align(&initial, &[&outer]).as_deref(), Some("start"));
    }
}
