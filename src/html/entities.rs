//! Character references found in editor output

use std::borrow::Cow;

/// Longest reference name looked at before `&` is taken literally
const MAX_REFERENCE_LEN: usize = 32;

/// Decode every character reference in `raw`. References that cannot be
/// resolved, and bare `&`, stay as written.
pub(crate) fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains('&') {
        return Cow::Borrowed(raw);
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let reference = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_REFERENCE_LEN)
            .and_then(|end| Some((end, resolve_reference(&after[..end])?)));
        match reference {
            Some((end, value)) => {
                out.push_str(&value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Resolve the text between `&` and `;`
fn resolve_reference(name: &str) -> Option<Cow<'static, str>> {
    let Some(number) = name.strip_prefix('#') else {
        return resolve(name).map(Cow::Borrowed);
    };
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse::<u32>().ok()?,
    };
    // NUL is not a character in HTML; it decodes to the replacement character
    let ch = match code {
        0 => '\u{fffd}',
        _ => char::from_u32(code)?,
    };
    Some(Cow::Owned(ch.to_string()))
}

/// Resolve a named entity (without `&` and `;`)
pub(crate) fn resolve(name: &str) -> Option<&'static str> {
    let value = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "shy" => "\u{ad}",
        "zwj" => "\u{200d}",
        "zwnj" => "\u{200c}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201a}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bdquo" => "\u{201e}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "bull" => "\u{2022}",
        "middot" => "\u{b7}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "deg" => "\u{b0}",
        "plusmn" => "\u{b1}",
        "times" => "\u{d7}",
        "divide" => "\u{f7}",
        "para" => "\u{b6}",
        "sect" => "\u{a7}",
        "euro" => "\u{20ac}",
        "pound" => "\u{a3}",
        "yen" => "\u{a5}",
        "cent" => "\u{a2}",
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "rarr" => "\u{2192}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",
        "lArr" => "\u{21d0}",
        "rArr" => "\u{21d2}",
        "hArr" => "\u{21d4}",
        "frac14" => "\u{bc}",
        "frac12" => "\u{bd}",
        "frac34" => "\u{be}",
        "sup1" => "\u{b9}",
        "sup2" => "\u{b2}",
        "sup3" => "\u{b3}",
        "micro" => "\u{b5}",
        "iexcl" => "\u{a1}",
        "iquest" => "\u{bf}",
        "not" => "\u{ac}",
        "ne" => "\u{2260}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "minus" => "\u{2212}",
        "infin" => "\u{221e}",
        "hearts" => "\u{2665}",
        "check" => "\u{2713}",
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_each_reference_on_its_own() {
        assert_eq!(decode("R&D&nbsp;team &rarr; 5 &lt; 6"), "R&D\u{a0}team \u{2192} 5 < 6");
        assert_eq!(decode("&bogus; &amp; &"), "&bogus; & &");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode("&#33;&#x41;&#X62;"), "!Ab");
        assert_eq!(decode("&#0;"), "\u{fffd}");
        // Surrogates and out-of-range code points are not characters
        assert_eq!(decode("&#xD800;&#99999999;"), "&#xD800;&#99999999;");
        assert_eq!(decode("&#;&#x;"), "&#;&#x;");
    }

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(decode("no references"), Cow::Borrowed(_)));
    }
}
