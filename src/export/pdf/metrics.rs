//! Glyph widths and encoding for the standard Type1 fonts

use super::FontFace;

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Width of one character at `size` points
pub(crate) fn char_width(ch: char, face: FontFace, size: f32) -> f32 {
    let units = match face {
        FontFace::Mono => 600.0,
        FontFace::Regular | FontFace::Bold => {
            let base = match ch as u32 {
                code @ 32..=126 => f32::from(HELVETICA[(code - 32) as usize]),
                // Tabs render as a space, everything else as an average glyph
                9 => 278.0,
                _ => 556.0,
            };
            // Helvetica-Bold runs about five percent wider
            if face == FontFace::Bold {
                base * 1.05
            } else {
                base
            }
        }
    };
    units * size / 1000.0
}

pub(crate) fn text_width(text: &str, face: FontFace, size: f32) -> f32 {
    text.chars().map(|ch| char_width(ch, face, size)).sum()
}

/// Encode text as WinAnsi bytes; unmappable characters become `?`
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\t' => b' ',
            ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

/// Greedy line breaking at spaces. Newlines force a break, words wider than
/// `max_width` are split between characters.
pub(crate) fn wrap(text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for hard_line in text.split('\n') {
        let mut line = String::new();
        let mut width = 0.0;

        for word in hard_line.split_inclusive(' ') {
            let visible_width = text_width(word.trim_end_matches(' '), face, size);
            if !line.is_empty() && width + visible_width > max_width {
                lines.push(std::mem::take(&mut line).trim_end_matches(' ').to_string());
                width = 0.0;
            }

            if visible_width > max_width {
                for ch in word.chars() {
                    let w = char_width(ch, face, size);
                    if !line.is_empty() && ch != ' ' && width + w > max_width {
                        lines.push(std::mem::take(&mut line));
                        width = 0.0;
                    }
                    line.push(ch);
                    width += w;
                }
            } else {
                line.push_str(word);
                width += text_width(word, face, size);
            }
        }

        lines.push(line.trim_end_matches(' ').to_string());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_widths() {
        assert_eq!(char_width('i', FontFace::Regular, 10.0), 2.22);
        assert_eq!(char_width('i', FontFace::Mono, 10.0), 6.0);
        assert!(char_width('W', FontFace::Bold, 10.0) > char_width('W', FontFace::Regular, 10.0));
        assert_eq!(text_width("", FontFace::Regular, 12.0), 0.0);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("a\u{e9}\u{2014}\u{4e2d}"), vec![b'a', 0xe9, 0x97, b'?']);
    }

    #[test]
    fn test_wrap_at_spaces() {
        // Mono at 10pt: 6pt per character, so 7 characters fit in 42pt
        let lines = wrap("aaa bbb ccc", FontFace::Mono, 10.0, 42.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_wrap_keeps_newlines_and_blank_lines() {
        let lines = wrap("one\n\ntwo", FontFace::Mono, 10.0, 600.0);
        assert_eq!(lines, vec!["one", "", "two"]);
        assert_eq!(wrap("", FontFace::Mono, 10.0, 600.0), vec![""]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap("abcdefghij", FontFace::Mono, 10.0, 24.0);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_preserves_leading_spaces() {
        let lines = wrap("  indented", FontFace::Mono, 10.0, 600.0);
        assert_eq!(lines, vec!["  indented"]);
    }
}
