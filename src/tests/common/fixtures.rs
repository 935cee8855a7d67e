//! Test Fixtures
//!
//! Cards used across the suites, plus the legacy token builders the old web
//! builds used, so fallback decoding is tested against the real layouts.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::core::card::{CardData, CustomColors, FunFact, SocialLink, SocialNetwork};

/// The card from the share walkthrough: one link, two facts, unknown theme.
pub fn alexa_card() -> CardData {
    CardData {
        name: "Alexa Johnson".to_string(),
        title: "Product Designer".to_string(),
        email: "alexa@example.com".to_string(),
        phone: "+1 555 0100".to_string(),
        website: "alexa.design".to_string(),
        profile_picture: None,
        profile_picture_url: None,
        social_links: vec![SocialLink::new(
            "1",
            SocialNetwork::LinkedIn,
            "https://www.linkedin.com/in/alexa",
        )],
        fun_facts: vec![
            FunFact::new("1", "Coffee or Tea?", "Matcha, no contest."),
            FunFact::new("2", "What's your secret talent?", "Speed-solving Rubik's cubes."),
        ],
        theme_id: "synthwave".to_string(),
        custom_colors: None,
    }
}

/// A card on the custom theme with an inline profile picture.
pub fn custom_card() -> CardData {
    let mut card = CardData::sample().with_custom_colors(CustomColors {
        primary: "#112233".to_string(),
        secondary: "#445566".to_string(),
        accent: "#778899".to_string(),
    });
    card.profile_picture = Some(format!("data:image/webp;base64,{}", "UklGRh4AAABXRUJQ".repeat(80)));
    card
}

/// Token as minted by the uncompressed UTF-8 builds.
pub fn legacy_utf8_token(json: &str) -> String {
    STANDARD.encode(json.as_bytes())
}

/// Token as minted by the first builds: base64 of the percent-escaped JSON.
pub fn legacy_percent_token(json: &str) -> String {
    STANDARD.encode(urlencoding::encode(json).as_bytes())
}
