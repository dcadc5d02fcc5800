use unicode_normalization::UnicodeNormalization;

/// Replace every non-ASCII character with an ASCII transliteration.
///
/// The text is composed (NFC) first so decomposed accents fold together with
/// their base letter. Each remaining character is transliterated with
/// `deunicode`, so Greek, Cyrillic and CJK keep a readable spelling;
/// characters without a transliteration become `?`. Control characters other
/// than `\n` and `\t` are dropped. The result is always pure ASCII.
pub fn to_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfc() {
        fold_char(c, &mut out);
    }
    out
}

/// Append the ASCII transliteration of `c` to `out`
pub fn fold_char(c: char, out: &mut String) {
    if c.is_ascii() {
        if !c.is_ascii_control() || c == '\n' || c == '\t' {
            out.push(c);
        }
        return;
    }
    if c.is_control() || is_invisible(c) {
        return;
    }

    match deunicode::deunicode_char(c) {
        Some(ascii) => out.extend(ascii.chars().filter(|a| a.is_ascii() && !a.is_ascii_control())),
        None => out.push('?'),
    }
}

/// Format characters with no visible rendering
fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}')
}
