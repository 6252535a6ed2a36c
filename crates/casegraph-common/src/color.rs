//! Colour name and hex parsing shared by the config validator and the renderer.

/// Named colours accepted in configuration (CSS names, matched case-insensitively).
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0, 0, 0)),
    ("white", (255, 255, 255)),
    ("brown", (165, 42, 42)),
    ("darkgreen", (0, 100, 0)),
    ("darkslategray", (47, 79, 79)),
    ("firebrick", (178, 34, 34)),
    ("lightgray", (211, 211, 211)),
    ("lightgreen", (144, 238, 144)),
    ("moccasin", (255, 228, 181)),
    ("navy", (0, 0, 128)),
    ("papayawhip", (255, 239, 213)),
    ("peachpuff", (255, 218, 185)),
    ("silver", (192, 192, 192)),
    ("thistle", (216, 191, 216)),
    ("whitesmoke", (245, 245, 245)),
];

/// Parses `#rrggbb` or a known colour name into an RGB triple.
pub fn parse_rgb(value: &str) -> Option<(u8, u8, u8)> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        return Some((channel(0..2)?, channel(2..4)?, channel(4..6)?));
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, rgb)| *rgb)
}
