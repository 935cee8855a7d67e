//! Theme catalog and resolution.
//!
//! Styling itself belongs to the presentation layer; this module only
//! answers "which colors does this card use" and turns a theme into the
//! CSS custom properties the page applies.

use serde::Serialize;

use super::CardData;

/// Sentinel theme id for cards carrying their own colors.
pub const CUSTOM_THEME_ID: &str = "custom";

/// Resolved palette of a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    /// `"r, g, b"` triple of `primary`, for rgba() usage.
    pub primary_rgb: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub colors: ThemeColors,
}

struct ThemeEntry {
    id: &'static str,
    name: &'static str,
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    primary_rgb: &'static str,
}

const CATALOG: [ThemeEntry; 6] = [
    ThemeEntry {
        id: "neon-dream",
        name: "Neon Dream",
        primary: "#EC4899",
        secondary: "#8B5CF6",
        accent: "#FDE047",
        primary_rgb: "236, 72, 153",
    },
    ThemeEntry {
        id: "oceanic-calm",
        name: "Oceanic Calm",
        primary: "#0EA5E9",
        secondary: "#14B8A6",
        accent: "#A3E635",
        primary_rgb: "14, 165, 233",
    },
    ThemeEntry {
        id: "sunset-glow",
        name: "Sunset Glow",
        primary: "#F97316",
        secondary: "#EF4444",
        accent: "#FACC15",
        primary_rgb: "249, 115, 22",
    },
    ThemeEntry {
        id: "forest-hues",
        name: "Forest Hues",
        primary: "#16A34A",
        secondary: "#65A30D",
        accent: "#FBBF24",
        primary_rgb: "22, 163, 74",
    },
    ThemeEntry {
        id: "lavender-bliss",
        name: "Lavender Bliss",
        primary: "#9333EA",
        secondary: "#C084FC",
        accent: "#F0ABFC",
        primary_rgb: "147, 51, 234",
    },
    ThemeEntry {
        id: "monochrome-sleek",
        name: "Monochrome Sleek",
        primary: "#6B7280",
        secondary: "#D1D5DB",
        accent: "#F9FAFB",
        primary_rgb: "107, 114, 128",
    },
];

/// Ids of the built-in themes, in catalog order.
pub const THEMES: [&str; 6] = [
    CATALOG[0].id,
    CATALOG[1].id,
    CATALOG[2].id,
    CATALOG[3].id,
    CATALOG[4].id,
    CATALOG[5].id,
];

impl ThemeEntry {
    fn to_theme(&self) -> Theme {
        Theme {
            id: self.id.to_string(),
            name: self.name.to_string(),
            colors: ThemeColors {
                primary: self.primary.to_string(),
                secondary: self.secondary.to_string(),
                accent: self.accent.to_string(),
                primary_rgb: self.primary_rgb.to_string(),
            },
        }
    }
}

/// Look up a built-in theme by id.
pub fn find_theme(id: &str) -> Option<Theme> {
    CATALOG.iter().find(|t| t.id == id).map(ThemeEntry::to_theme)
}

/// All built-in themes, in catalog order.
pub fn builtin_themes() -> Vec<Theme> {
    CATALOG.iter().map(ThemeEntry::to_theme).collect()
}

/// Theme a card renders with.
///
/// Unknown ids, and `custom` without colors, fall back to the first
/// catalog entry.
pub fn resolve_theme(card: &CardData) -> Theme {
    if card.is_custom_theme() {
        if let Some(colors) = &card.custom_colors {
            return Theme {
                id: CUSTOM_THEME_ID.to_string(),
                name: "Custom".to_string(),
                colors: ThemeColors {
                    primary: colors.primary.clone(),
                    secondary: colors.secondary.clone(),
                    accent: colors.accent.clone(),
                    primary_rgb: hex_to_rgb(&colors.primary),
                },
            };
        }
    }

    find_theme(&card.theme_id).unwrap_or_else(|| CATALOG[0].to_theme())
}

/// `"#RRGGBB"` (hash optional) to `"r, g, b"`; anything else is black.
pub fn hex_to_rgb(hex: &str) -> String {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return "0, 0, 0".to_string();
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).unwrap_or(0);
    format!("{}, {}, {}", channel(0..2), channel(2..4), channel(4..6))
}

/// CSS custom properties for a theme, in application order.
pub fn style_properties(theme: &Theme) -> Vec<(&'static str, String)> {
    vec![
        ("--primary-color", theme.colors.primary.clone()),
        ("--primary-color-rgb", theme.colors.primary_rgb.clone()),
        ("--secondary-color", theme.colors.secondary.clone()),
        ("--accent-color", theme.colors.accent.clone()),
    ]
}
