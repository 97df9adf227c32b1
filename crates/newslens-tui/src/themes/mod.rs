//! Theme registry and loader

mod gruvbox;
mod nord;

use newslens_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;

use crate::theme::Theme;

pub(crate) use gruvbox::dark as gruvbox_dark;

/// Color from a packed 0xRRGGBB value
pub(crate) const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// "#RRGGBB" or "#RGB", leading '#' optional
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let packed = match digits.len() {
        // each short digit doubles: f50 -> ff5500
        3 => digits
            .chars()
            .try_fold(0u32, |acc, c| Some((acc << 8) | c.to_digit(16)? * 0x11))?,
        6 => u32::from_str_radix(digits, 16).ok()?,
        _ => return None,
    };
    Some(rgb(packed))
}

/// Load a theme by name from config, falling back to gruvbox-dark
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "nord" => nord::default(),
        "gruvbox-dark" | "gruvbox" => gruvbox::dark(),
        other => {
            tracing::warn!("Unknown theme '{}', using gruvbox-dark", other);
            gruvbox::dark()
        }
    };

    apply_overrides(base, &config.colors)
}

fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&Option<String>, &mut Color); 9] = [
        (&overrides.bg0, &mut theme.bg0),
        (&overrides.bg1, &mut theme.bg1),
        (&overrides.fg0, &mut theme.fg0),
        (&overrides.accent, &mut theme.accent),
        (&overrides.selection, &mut theme.selection),
        (&overrides.positive, &mut theme.positive),
        (&overrides.negative, &mut theme.negative),
        (&overrides.error, &mut theme.error),
        (&overrides.info, &mut theme.info),
    ];

    for (hex, slot) in slots {
        match hex.as_deref().map(parse_hex_color) {
            Some(Some(color)) => *slot = color,
            Some(None) => tracing::warn!("Ignoring invalid theme color {:?}", hex),
            None => {}
        }
    }

    theme
}

pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "nord"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_6digit() {
        let color = parse_hex_color("#ff5500").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_3digit() {
        let color = parse_hex_color("f50").unwrap();
        assert!(matches!(color, Color::Rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
        assert!(parse_hex_color("#ééé").is_none());
    }

    #[test]
    fn test_load_theme_default_and_unknown() {
        let theme = load_theme(&ThemeConfig::default());
        assert!(matches!(theme.bg0, Color::Rgb(0x28, 0x28, 0x28)));

        let config = ThemeConfig {
            name: "solarized".to_string(),
            colors: ThemeColorOverrides::default(),
        };
        assert!(matches!(load_theme(&config).bg0, Color::Rgb(0x28, 0x28, 0x28)));
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            colors: ThemeColorOverrides {
                positive: Some("#00ff00".to_string()),
                negative: Some("nonsense".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.positive, Color::Rgb(0, 255, 0)));
        assert!(matches!(theme.negative, Color::Rgb(0xbf, 0x61, 0x6a)));
    }
}
