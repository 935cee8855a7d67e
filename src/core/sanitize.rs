//! Card Sanitizer
//!
//! Every card that arrives from outside the process (a decoded share token,
//! the card store, the local cache) goes through [`sanitize`]. It never
//! fails: missing keys and keys of the wrong type both fall back to the
//! blank card's value, malformed list entries are dropped, and the
//! theme/custom-color pairing is enforced.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::core::card::{CardData, CustomColors, FunFact, SocialLink, SocialNetwork, CUSTOM_THEME_ID};

/// Normalize arbitrary JSON into a valid card.
pub fn sanitize(candidate: &Value) -> CardData {
    let empty = Map::new();
    let fields = candidate.as_object().unwrap_or(&empty);
    let defaults = CardData::default();

    let text = |key: &str, default: String| -> String {
        fields
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(default)
    };
    let optional_text = |key: &str| -> Option<String> {
        fields.get(key).and_then(Value::as_str).map(str::to_string)
    };

    let theme_id = text("themeId", defaults.theme_id);
    let custom_colors = if theme_id == CUSTOM_THEME_ID {
        Some(custom_colors(fields.get("customColors")))
    } else {
        None
    };

    CardData {
        name: text("name", defaults.name),
        title: text("title", defaults.title),
        email: text("email", defaults.email),
        phone: text("phone", defaults.phone),
        website: text("website", defaults.website),
        profile_picture: optional_text("profilePicture"),
        profile_picture_url: optional_text("profilePictureUrl"),
        social_links: social_links(fields.get("socialLinks")),
        fun_facts: fun_facts(fields.get("funFacts")),
        theme_id,
        custom_colors,
    }
}

/// Sanitize a card that is already typed, e.g. one built in-process.
pub fn sanitize_card(card: &CardData) -> CardData {
    match serde_json::to_value(card) {
        Ok(value) => sanitize(&value),
        Err(_) => CardData::default(),
    }
}

fn entries(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn string_field<'a>(entry: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    entry.get(key).and_then(Value::as_str)
}

fn social_links(value: Option<&Value>) -> Vec<SocialLink> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for entry in entries(value) {
        let Some(entry) = entry.as_object() else {
            continue;
        };
        let (Some(id), Some(kind), Some(url)) = (
            string_field(entry, "id"),
            string_field(entry, "type"),
            string_field(entry, "url"),
        ) else {
            debug!("Dropping malformed social link");
            continue;
        };
        if !seen.insert(id) {
            debug!(id, "Dropping social link with duplicate id");
            continue;
        }
        links.push(SocialLink::new(id, SocialNetwork::from(kind), url));
    }

    links
}

fn fun_facts(value: Option<&Value>) -> Vec<FunFact> {
    let mut seen = HashSet::new();
    let mut facts = Vec::new();

    for entry in entries(value) {
        let Some(entry) = entry.as_object() else {
            continue;
        };
        let (Some(id), Some(question), Some(answer)) = (
            string_field(entry, "id"),
            string_field(entry, "question"),
            string_field(entry, "answer"),
        ) else {
            debug!("Dropping malformed fun fact");
            continue;
        };
        if !seen.insert(id) {
            debug!(id, "Dropping fun fact with duplicate id");
            continue;
        }
        facts.push(FunFact::new(id, question, answer));
    }

    facts
}

/// Field-level defaulting of the custom palette.
fn custom_colors(value: Option<&Value>) -> CustomColors {
    let defaults = CustomColors::default();
    let Some(colors) = value.and_then(Value::as_object) else {
        return defaults;
    };

    let pick = |key: &str, default: String| {
        string_field(colors, key).map(str::to_string).unwrap_or(default)
    };
    CustomColors {
        primary: pick("primary", defaults.primary),
        secondary: pick("secondary", defaults.secondary),
        accent: pick("accent", defaults.accent),
    }
}
