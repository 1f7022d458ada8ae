//! XML helpers shared by the OPC and WordprocessingML writers

mod namespace;

pub use namespace::*;

use crate::error::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::Write;

/// Helper to get attribute value from BytesStart
pub fn get_attr(element: &BytesStart, name: &str) -> Option<String> {
    element
        .attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.as_ref() == name.as_bytes())
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

/// Write the standalone UTF-8 declaration every OOXML part starts with
pub fn write_declaration<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(())
}

/// Write `<name attr="..."/>`
pub fn write_empty<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    let mut elem = BytesStart::new(name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

/// Write `<name w:val="value"/>`, the shape of most WordprocessingML properties
pub fn write_w_val<W: Write>(writer: &mut Writer<W>, name: &str, value: &str) -> Result<()> {
    write_empty(writer, name, &[("w:val", value)])
}

/// Whether XML 1.0 allows `ch` in character data
fn is_xml_char(ch: char) -> bool {
    matches!(ch,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{d7ff}'
        | '\u{e000}'..='\u{fffd}'
        | '\u{10000}'..='\u{10ffff}')
}

/// Drop characters that cannot appear in an XML document
pub fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&ch| is_xml_char(ch)).collect())
    }
}

/// Write `<name attrs>text</name>`. Characters XML cannot carry are dropped.
pub fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    let mut start = BytesStart::new(name);
    for attr in attrs {
        start.push_attribute(*attr);
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(&xml_safe(text))))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Writer<Vec<u8>>) -> Result<()>) -> String {
        let mut writer = Writer::new(Vec::new());
        f(&mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_write_w_val() {
        let xml = render(|w| write_w_val(w, "w:jc", "center"));
        assert_eq!(xml, r#"<w:jc w:val="center"/>"#);
    }

    #[test]
    fn test_write_text_element_escapes() {
        let xml = render(|w| write_text_element(w, "w:t", &[], "a < b & c"));
        assert_eq!(xml, "<w:t>a &lt; b &amp; c</w:t>");
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let xml = render(|w| write_text_element(w, "w:t", &[], "a\u{1}b\u{1f}\tc\u{fffe}"));
        assert_eq!(xml, "<w:t>ab\tc</w:t>");
        assert!(matches!(xml_safe("plain\ntext"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_get_attr() {
        let mut start = BytesStart::new("Relationship");
        start.push_attribute(("Id", "rId1"));
        assert_eq!(get_attr(&start, "Id").as_deref(), Some("rId1"));
        assert_eq!(get_attr(&start, "Target"), None);
    }

    #[test]
    fn test_namespace_constants() {
        assert!(W.contains("wordprocessingml"));
        assert!(R.contains("relationships"));
    }
}
