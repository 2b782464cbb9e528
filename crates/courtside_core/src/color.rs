//! Display-color lookup for profile personalization.

/// Default presentation color (basketball orange).
pub const DEFAULT_COLOR: u32 = 0xFF6B35;

/// Recognized color names (French and English) and their RGB values.
const COLOR_TABLE: [(&str, u32); 19] = [
    ("rouge", 0xFF0000),
    ("red", 0xFF0000),
    ("vert", 0x00FF00),
    ("green", 0x00FF00),
    ("bleu", 0x0000FF),
    ("blue", 0x0000FF),
    ("violet", 0x8A2BE2),
    ("purple", 0x8A2BE2),
    ("orange", 0xFF6B35),
    ("jaune", 0xFFFF00),
    ("yellow", 0xFFFF00),
    ("rose", 0xFF69B4),
    ("pink", 0xFF69B4),
    ("noir", 0x000000),
    ("black", 0x000000),
    ("blanc", 0xFFFFFF),
    ("white", 0xFFFFFF),
    ("cyan", 0x00FFFF),
    ("magenta", 0xFF00FF),
];

/// Look up a 24-bit RGB value by color name, case-insensitively.
///
/// Unknown names fall back to [`DEFAULT_COLOR`].
pub fn color_from_name(name: &str) -> u32 {
    let lowered = name.trim().to_lowercase();
    COLOR_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == lowered)
        .map(|(_, rgb)| *rgb)
        .unwrap_or(DEFAULT_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_and_english_names_agree() {
        assert_eq!(color_from_name("rouge"), color_from_name("red"));
        assert_eq!(color_from_name("bleu"), 0x0000FF);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(color_from_name("Violet"), 0x8A2BE2);
        assert_eq!(color_from_name("  NOIR "), 0x000000);
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        assert_eq!(color_from_name("turquoise"), DEFAULT_COLOR);
        assert_eq!(color_from_name(""), DEFAULT_COLOR);
    }
}
