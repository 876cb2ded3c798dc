//! Colour palette (Nord) and accent parsing.

use ratatui::style::Color;

// === Nord Palette ===

pub const NORD_POLAR_NIGHT_1: Color = Color::Rgb(46, 52, 64);
pub const NORD_POLAR_NIGHT_4: Color = Color::Rgb(76, 86, 106);
pub const NORD_SNOW_STORM_1: Color = Color::Rgb(216, 222, 233);
pub const NORD_FROST_2: Color = Color::Rgb(136, 192, 208);
pub const NORD_FROST_3: Color = Color::Rgb(129, 161, 193);
pub const NORD_RED: Color = Color::Rgb(191, 97, 106);
pub const NORD_YELLOW: Color = Color::Rgb(235, 203, 139);
pub const NORD_GREEN: Color = Color::Rgb(163, 190, 140);

// === Semantic Colours ===

pub const ACCENT_PRIMARY: Color = NORD_FROST_2;
pub const ACCENT_SECONDARY: Color = NORD_FROST_3;
pub const SUCCESS: Color = NORD_GREEN;
pub const WARNING: Color = NORD_YELLOW;
pub const ERROR: Color = NORD_RED;
pub const TEXT_PRIMARY: Color = NORD_SNOW_STORM_1;
pub const TEXT_SECONDARY: Color = Color::Rgb(140, 150, 170);
pub const INACTIVE: Color = Color::Rgb(110, 118, 135);
pub const BORDER_DEFAULT: Color = NORD_POLAR_NIGHT_4;
pub const BORDER_FOCUSED: Color = NORD_FROST_2;
pub const ROW_SELECTED_BG: Color = NORD_POLAR_NIGHT_1;
pub const ROW_SELECTED_FG: Color = NORD_FROST_2;

/// Parses `#rrggbb` (case-insensitive). Anything else yields `None`.
pub fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Accent colour with a fallback for unparsable user values.
pub fn accent(value: &str) -> Color {
    parse_hex(value).unwrap_or(ACCENT_PRIMARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#7cf6d2"), Some(Color::Rgb(0x7c, 0xf6, 0xd2)));
        assert_eq!(parse_hex("#FFFFFF"), Some(Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert_eq!(parse_hex("7cf6d2"), None);
        assert_eq!(parse_hex("#7cf6d"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
        assert_eq!(parse_hex("#ééé"), None);
    }

    #[test]
    fn test_accent_fallback() {
        assert_eq!(accent("teal"), ACCENT_PRIMARY);
    }
}
