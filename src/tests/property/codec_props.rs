//! Property-based tests for the share token codec
//!
//! Tests invariants:
//! - `decode(encode(card)) == card` for every well-formed card
//! - Tokens are URL-fragment safe without escaping
//! - Uncompressed and percent-escaped legacy tokens decode to the same card
//! - The decoder is total over arbitrary strings

use proptest::prelude::*;

use crate::core::card::{CardData, CustomColors, FunFact, SocialLink, SocialNetwork, CUSTOM_THEME_ID, THEMES};
use crate::core::codec::{decode, decode_value, encode, TokenFormat};
use crate::tests::common::fixtures::{legacy_percent_token, legacy_utf8_token};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Free text, including non-ASCII, the way people fill in their cards.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .,'!?&@()+-]{0,40}",
        "\\PC{0,24}",
    ]
}

fn arb_network() -> impl Strategy<Value = SocialNetwork> {
    prop_oneof![
        prop::sample::select(SocialNetwork::KNOWN.to_vec()),
        "[A-Z][a-z]{2,10}".prop_map(SocialNetwork::from),
    ]
}

fn arb_theme_id() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(THEMES.to_vec()).prop_map(str::to_string),
        Just(CUSTOM_THEME_ID.to_string()),
        "[a-z]{3,12}(-[a-z]{3,8})?",
    ]
}

fn arb_color() -> impl Strategy<Value = String> {
    "#[0-9A-F]{6}"
}

/// Cards as the editor produces them: unique ids and a consistent
/// theme/custom-color pairing.
fn arb_card() -> impl Strategy<Value = CardData> {
    (
        (arb_text(), arb_text(), arb_text(), arb_text(), arb_text()),
        proptest::option::of("[A-Za-z0-9+/]{8,64}={0,2}"),
        proptest::option::of("https://[a-z]{3,10}\\.example/[a-z0-9]{1,12}\\.png"),
        prop::collection::vec((arb_network(), arb_text()), 0..6),
        prop::collection::vec((arb_text(), arb_text()), 0..6),
        arb_theme_id(),
        (arb_color(), arb_color(), arb_color()),
    )
        .prop_map(
            |((name, title, email, phone, website), picture, picture_url, links, facts, theme_id, (primary, secondary, accent))| {
                let card = CardData {
                    name,
                    title,
                    email,
                    phone,
                    website,
                    profile_picture: picture,
                    profile_picture_url: picture_url,
                    social_links: links
                        .into_iter()
                        .enumerate()
                        .map(|(i, (kind, url))| SocialLink::new(i.to_string(), kind, url))
                        .collect(),
                    fun_facts: facts
                        .into_iter()
                        .enumerate()
                        .map(|(i, (question, answer))| FunFact::new(i.to_string(), question, answer))
                        .collect(),
                    ..CardData::default()
                };
                if theme_id == CUSTOM_THEME_ID {
                    card.with_custom_colors(CustomColors {
                        primary,
                        secondary,
                        accent,
                    })
                } else {
                    card.with_theme(theme_id)
                }
            },
        )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: a fresh token decodes back to exactly the encoded card
    #[test]
    fn prop_encode_decode_round_trip(card in arb_card()) {
        let token = encode(&card).unwrap();
        let decoded = decode_value(&token).unwrap();
        prop_assert_eq!(decoded.format, TokenFormat::Compressed);
        prop_assert_eq!(decode(&token).unwrap(), card);
    }

    /// Property: tokens need no escaping inside a URL fragment
    #[test]
    fn prop_token_is_url_safe(card in arb_card()) {
        let token = encode(&card).unwrap();
        prop_assert!(!token.is_empty());
        prop_assert!(
            token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "token has unsafe characters: {}",
            token
        );
    }

    /// Property: encoding is deterministic
    #[test]
    fn prop_encode_is_deterministic(card in arb_card()) {
        prop_assert_eq!(encode(&card).unwrap(), encode(&card).unwrap());
    }

    /// Property: uncompressed legacy tokens still open
    #[test]
    fn prop_legacy_utf8_tokens_decode(card in arb_card()) {
        let json = serde_json::to_string(&card).unwrap();
        let token = legacy_utf8_token(&json);
        prop_assert_eq!(decode_value(&token).unwrap().format, TokenFormat::Utf8);
        prop_assert_eq!(decode(&token).unwrap(), card);
    }

    /// Property: percent-escaped legacy tokens still open
    #[test]
    fn prop_legacy_percent_tokens_decode(card in arb_card()) {
        let json = serde_json::to_string(&card).unwrap();
        let token = legacy_percent_token(&json);
        prop_assert_eq!(decode(&token).unwrap(), card);
    }

    /// Property: the decoder never panics, and whatever it accepts is a
    /// well-formed card
    #[test]
    fn prop_decode_is_total(token in "\\PC{0,200}") {
        if let Ok(card) = decode(&token) {
            prop_assert_eq!(card.custom_colors.is_some(), card.theme_id == CUSTOM_THEME_ID);
        }
    }

    /// Property: mangling a valid token never panics the decoder
    #[test]
    fn prop_truncated_token_is_handled(card in arb_card(), cut in 0usize..64) {
        let token = encode(&card).unwrap();
        let truncated = &token[..token.len().saturating_sub(cut + 1)];
        let _ = decode(truncated);
    }
}
