use std::fmt::Write;

/// Escapes `text` for use inside a single-quoted JavaScript string.
///
/// ASCII letters and digits are copied as-is. Every other character up to
/// U+00FF becomes `\xHH`; anything above becomes one `\uHHHH` per UTF-16
/// code unit. The output never contains a quote, `<` or `/`, so it cannot
/// close the surrounding literal or smuggle a `</script>` through.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 4);
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            continue;
        }

        let code = ch as u32;
        if code <= 0xff {
            // Writing into a String cannot fail.
            let _ = write!(out, "\\x{code:02x}");
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{unit:04x}");
            }
        }
    }
    out
}
