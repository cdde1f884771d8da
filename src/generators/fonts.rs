//! Standard PDF font metrics, WinAnsi text encoding and greedy line wrapping.
//!
//! Only the base-14 Helvetica family is used, so no font program is embedded
//! and widths come from the Adobe AFM tables (1/1000 em units).

/// Fonts available on the notice page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Helvetica, Font::HelveticaBold, Font::HelveticaOblique];

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Font::Helvetica | Font::HelveticaOblique => &HELVETICA,
            Font::HelveticaBold => &HELVETICA_BOLD,
        }
    }
}

// Glyph widths for WinAnsi codes 32..=126.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width of one character in 1/1000 em.
fn char_width(font: Font, ch: char) -> u16 {
    let code = ch as u32;
    if (32..=126).contains(&code) {
        return font.widths()[(code - 32) as usize];
    }
    // Accented Latin-1 letters share the advance of their base letter.
    // The accented i glyphs are the exception: their AFM width is 278.
    match ch {
        'í' | 'ì' | 'î' | 'ï' => 278,
        'Í' | 'Ì' | 'Î' | 'Ï' => 278,
        '\u{a0}' => char_width(font, ' '),
        _ => match base_letter(ch) {
            Some(base) => char_width(font, base),
            None => 556,
        },
    }
}

fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'Ñ' => 'N',
        'Ç' => 'C',
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        _ => return None,
    };
    Some(base)
}

/// Rendered width of `text` in points.
pub fn string_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|ch| char_width(font, ch) as u32).sum();
    units as f32 * size / 1000.0
}

/// Encode text for a `WinAnsiEncoding` font.
///
/// Latin-1 maps one to one; the few typographic characters WinAnsi adds are
/// translated and anything else becomes `?`.
pub fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch as u32 {
            0x20..=0x7e | 0xa0..=0xff => ch as u32 as u8,
            _ => match ch {
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
                _ => b'?',
            },
        })
        .collect()
}

/// Greedy line breaking.
///
/// Words are packed onto a line until the next one would push the measured
/// width past `max_width`; that word then starts the next line. A single word
/// wider than `max_width` still gets a line of its own.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{} {}", current, word);
        if string_width(&candidate, font, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        // "Hello" in Helvetica: 722 + 556 + 222 + 222 + 556 = 2278
        assert!((string_width("Hello", Font::Helvetica, 10.0) - 22.78).abs() < 1e-3);
        assert!(
            string_width("TRÁMITE", Font::HelveticaBold, 16.0)
                > string_width("TRAMITE", Font::Helvetica, 16.0)
        );
        assert_eq!(
            string_width("código", Font::Helvetica, 11.0),
            string_width("codigo", Font::Helvetica, 11.0)
        );
    }

    #[test]
    fn test_accented_i_uses_afm_width() {
        // iacute is 278 in both weights, wider than plain i (222 regular).
        assert_eq!(char_width(Font::Helvetica, 'í'), 278);
        assert_eq!(char_width(Font::Helvetica, 'i'), 222);
        assert_eq!(char_width(Font::HelveticaBold, 'Í'), 278);
        assert_eq!(char_width(Font::HelveticaBold, 'é'), char_width(Font::HelveticaBold, 'e'));
    }

    #[test]
    fn test_win_ansi_latin1() {
        assert_eq!(win_ansi_bytes("TRÁMITE"), b"TR\xc1MITE".to_vec());
        assert_eq!(win_ansi_bytes("ñ—✓"), vec![0xf1, 0x97, b'?']);
    }

    #[test]
    fn test_wrap_empty_and_single_word() {
        assert!(wrap_text("   ", Font::Helvetica, 11.0, 100.0).is_empty());
        let long = "Supercalifragilisticoespialidoso";
        assert_eq!(wrap_text(long, Font::Helvetica, 11.0, 10.0), vec![long]);
    }

    #[test]
    fn test_wrap_breaks_at_width() {
        let lines = wrap_text("uno dos tres cuatro", Font::Helvetica, 10.0, 40.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(string_width(line, Font::Helvetica, 10.0) <= 40.0);
        }
    }
}
