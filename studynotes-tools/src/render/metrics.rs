//! Helvetica advance widths and greedy word wrapping over encoded bytes.

/// Advance widths (1/1000 em) of Helvetica for bytes 0x20..=0x7E
const HELVETICA_ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Width used for WinAnsi bytes outside the ASCII range
const DEFAULT_WIDTH: u16 = 556;

pub fn glyph_width(byte: u8) -> u16 {
    match byte {
        0x20..=0x7E => HELVETICA_ASCII_WIDTHS[(byte - 0x20) as usize],
        0x00..=0x1F | 0x7F => 0,
        _ => DEFAULT_WIDTH,
    }
}

/// Width of an encoded string in points at `font_size`
pub fn text_width(bytes: &[u8], font_size: f32) -> f32 {
    let units: u32 = bytes.iter().map(|b| glyph_width(*b) as u32).sum();
    units as f32 * font_size / 1000.0
}

/// Break one encoded line into pieces no wider than `max_width`.
///
/// Words are separated by single spaces and kept whole when they fit; a word
/// wider than the line is split at byte boundaries. Leading indentation stays
/// on the first piece. An empty line yields one empty piece so blank lines
/// survive.
pub fn wrap_line(line: &[u8], max_width: f32, font_size: f32) -> Vec<Vec<u8>> {
    if line.is_empty() || text_width(line, font_size) <= max_width {
        return vec![line.to_vec()];
    }

    let indent_len = line.iter().take_while(|b| **b == b' ').count();
    let (indent, rest) = line.split_at(indent_len);

    let mut lines = Vec::new();
    let mut current: Vec<u8> = indent.to_vec();
    let mut has_word = false;

    for word in rest.split(|b| *b == b' ') {
        let mut candidate = current.clone();
        if has_word {
            candidate.push(b' ');
        }
        candidate.extend_from_slice(word);

        if text_width(&candidate, font_size) <= max_width {
            current = candidate;
            has_word = true;
            continue;
        }

        if has_word {
            lines.push(std::mem::take(&mut current));
        } else {
            // indentation that cannot share a line with the first word is dropped
            current.clear();
        }

        if text_width(word, font_size) <= max_width {
            current = word.to_vec();
        } else {
            for byte in word {
                if !current.is_empty()
                    && text_width(&current, font_size) + glyph_width(*byte) as f32 * font_size / 1000.0
                        > max_width
                {
                    lines.push(std::mem::take(&mut current));
                }
                current.push(*byte);
            }
        }
        has_word = true;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
