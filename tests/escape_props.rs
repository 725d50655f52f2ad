//! Property tests for the JavaScript string escaper.

use proptest::prelude::*;
use smartsupp_snippet::escape;

/// True when `out` is only bare alphanumerics and complete `\xHH` / `\uHHHH` sequences.
fn tokens_are_well_formed(out: &str) -> bool {
    let bytes = out.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_alphanumeric() {
            i += 1;
            continue;
        }
        if b != b'\\' || i + 1 >= bytes.len() {
            return false;
        }
        let width = match bytes[i + 1] {
            b'x' => 2,
            b'u' => 4,
            _ => return false,
        };
        let digits = &bytes[i + 2..(i + 2 + width).min(bytes.len())];
        if digits.len() != width
            || !digits
                .iter()
                .all(|d| d.is_ascii_digit() || (b'a'..=b'f').contains(d))
        {
            return false;
        }
        i += 2 + width;
    }
    true
}

proptest! {
    #[test]
    fn output_is_alphanumeric_or_escape_sequences(s in any::<String>()) {
        let out = escape(&s);
        prop_assert!(tokens_are_well_formed(&out));
        prop_assert!(out.is_ascii());
    }

    #[test]
    fn latin1_input_only_uses_two_digit_escapes(s in "[\\x00-\\xff]*") {
        let out = escape(&s);
        prop_assert!(!out.contains("\\u"));
        prop_assert!(tokens_are_well_formed(&out));
    }

    #[test]
    fn alphanumerics_are_untouched(s in "[a-zA-Z0-9]*") {
        prop_assert_eq!(escape(&s), s);
    }

    #[test]
    fn letters_survive_in_order(s in any::<String>()) {
        let expected: String = s.chars().filter(char::is_ascii_alphanumeric).collect();
        let out = escape(&s);
        let mut kept = String::new();
        let mut rest = out.as_str();
        while let Some(c) = rest.chars().next() {
            if c == '\\' {
                let width = if rest.as_bytes()[1] == b'x' { 4 } else { 6 };
                rest = &rest[width..];
            } else {
                kept.push(c);
                rest = &rest[1..];
            }
        }
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn never_emits_breakout_characters(s in any::<String>()) {
        let out = escape(&s);
        for bad in ['\'', '"', '<', '>', '/', '\n', '\r'] {
            prop_assert!(!out.contains(bad));
        }
    }
}
