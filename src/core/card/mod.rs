//! Card Record Model
//!
//! The `CardData` record is the unit that gets encoded into share links,
//! stored by the card service and cached locally. Field names on the wire
//! are camelCase so tokens minted by older web builds keep decoding.

pub mod theme;
pub mod vcard;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use theme::{resolve_theme, style_properties, Theme, ThemeColors, CUSTOM_THEME_ID, THEMES};

/// Theme a blank card starts with.
pub const DEFAULT_THEME_ID: &str = "neon-dream";

/// Suggested questions offered when adding a fun fact.
pub const FUN_FACT_QUESTIONS: &[&str] = &[
    "What's your secret talent?",
    "What's your favorite productivity hack?",
    "Coffee or Tea?",
    "What's a book that changed your perspective?",
    "What's your go-to karaoke song?",
    "Favorite coding language?",
    "What's the most interesting project you've worked on?",
    "If you weren't in your current role, what would you be doing?",
    "What's a skill you're currently learning?",
];

// ============================================================================
// Social Links
// ============================================================================

/// Social network a link points at.
///
/// Labels outside the known set are kept verbatim in `Unrecognized` so a
/// card made by a newer client survives a round trip through this one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SocialNetwork {
    LinkedIn,
    Twitter,
    GitHub,
    Instagram,
    Facebook,
    Other,
    Unrecognized(String),
}

impl SocialNetwork {
    /// Networks offered by the editor, in display order.
    pub const KNOWN: [SocialNetwork; 6] = [
        SocialNetwork::LinkedIn,
        SocialNetwork::Twitter,
        SocialNetwork::GitHub,
        SocialNetwork::Instagram,
        SocialNetwork::Facebook,
        SocialNetwork::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SocialNetwork::LinkedIn => "LinkedIn",
            SocialNetwork::Twitter => "Twitter",
            SocialNetwork::GitHub => "GitHub",
            SocialNetwork::Instagram => "Instagram",
            SocialNetwork::Facebook => "Facebook",
            SocialNetwork::Other => "Other",
            SocialNetwork::Unrecognized(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SocialNetwork::Unrecognized(_))
    }
}

impl From<&str> for SocialNetwork {
    fn from(label: &str) -> Self {
        match label {
            "LinkedIn" => SocialNetwork::LinkedIn,
            "Twitter" => SocialNetwork::Twitter,
            "GitHub" => SocialNetwork::GitHub,
            "Instagram" => SocialNetwork::Instagram,
            "Facebook" => SocialNetwork::Facebook,
            "Other" => SocialNetwork::Other,
            other => SocialNetwork::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for SocialNetwork {
    fn from(label: String) -> Self {
        SocialNetwork::from(label.as_str())
    }
}

impl From<SocialNetwork> for String {
    fn from(network: SocialNetwork) -> Self {
        match network {
            SocialNetwork::Unrecognized(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SocialNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single social profile link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// List-item identity; unique within a card, never interpreted.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SocialNetwork,
    pub url: String,
}

impl SocialLink {
    pub fn new(id: impl Into<String>, kind: SocialNetwork, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            url: url.into(),
        }
    }
}

// ============================================================================
// Fun Facts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunFact {
    pub id: String,
    pub question: String,
    pub answer: String,
}

impl FunFact {
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

// ============================================================================
// Custom Colors
// ============================================================================

/// Color override carried only by cards on the `custom` theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for CustomColors {
    fn default() -> Self {
        Self {
            primary: "#EC4899".to_string(),
            secondary: "#8B5CF6".to_string(),
            accent: "#FDE047".to_string(),
        }
    }
}

// ============================================================================
// Card Data
// ============================================================================

/// The card being edited and shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    /// Data URI, bare base64 payload or remote URL; older builds used each.
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    pub social_links: Vec<SocialLink>,
    pub fun_facts: Vec<FunFact>,
    pub theme_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_colors: Option<CustomColors>,
}

impl Default for CardData {
    fn default() -> Self {
        Self {
            name: String::new(),
            title: String::new(),
            email: String::new(),
            phone: String::new(),
            website: String::new(),
            profile_picture: None,
            profile_picture_url: None,
            social_links: Vec::new(),
            fun_facts: Vec::new(),
            theme_id: DEFAULT_THEME_ID.to_string(),
            custom_colors: None,
        }
    }
}

impl CardData {
    /// Starter card shown to a first-time editor.
    pub fn sample() -> Self {
        Self {
            name: "Alex Doe".to_string(),
            title: "Software Engineer & Designer".to_string(),
            email: "alex.doe@example.com".to_string(),
            phone: "(123) 456-7890".to_string(),
            website: "alexdoe.dev".to_string(),
            profile_picture: None,
            profile_picture_url: None,
            social_links: vec![
                SocialLink::new(
                    "1",
                    SocialNetwork::LinkedIn,
                    "https://www.linkedin.com/in/alexdoe",
                ),
                SocialLink::new(
                    "2",
                    SocialNetwork::Instagram,
                    "https://www.instagram.com/alexdoe",
                ),
            ],
            fun_facts: vec![
                FunFact::new(
                    "1",
                    "Coffee or Tea?",
                    "Both! Espresso in the morning, Green Tea in the afternoon.",
                ),
                FunFact::new(
                    "2",
                    "Favorite coding language?",
                    "TypeScript for its safety and scalability.",
                ),
            ],
            theme_id: DEFAULT_THEME_ID.to_string(),
            custom_colors: None,
        }
    }

    pub fn is_custom_theme(&self) -> bool {
        self.theme_id == CUSTOM_THEME_ID
    }

    /// Switch theme, keeping `custom_colors` present only for `custom`.
    pub fn with_theme(mut self, theme_id: impl Into<String>) -> Self {
        self.theme_id = theme_id.into();
        if self.is_custom_theme() {
            self.custom_colors.get_or_insert_with(CustomColors::default);
        } else {
            self.custom_colors = None;
        }
        self
    }

    /// Switch to the `custom` theme with the given colors.
    pub fn with_custom_colors(mut self, colors: CustomColors) -> Self {
        self.theme_id = CUSTOM_THEME_ID.to_string();
        self.custom_colors = Some(colors);
        self
    }
}
