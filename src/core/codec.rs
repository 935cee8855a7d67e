//! Share Token Codec
//!
//! Converts a card to and from the compact token carried in a share URL
//! fragment. Tokens carry no version tag, so decoding walks every format
//! the web app has ever minted, newest first, and keeps the first that
//! parses to a JSON object:
//!
//! 1. `Compressed` - URL-safe base64 (no padding) of a zlib stream of the
//!    JSON text. This is what [`encode`] produces.
//! 2. `Utf8` - standard base64 of the UTF-8 JSON bytes, uncompressed.
//! 3. `PercentEscaped` - standard base64 of the percent-escaped JSON text,
//!    from the very first builds.
//!
//! The decoded JSON is untrusted; [`decode`] always hands it to
//! [`sanitize`](crate::core::sanitize::sanitize) before returning a card.

use std::io::{Read, Write};

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::card::CardData;
use crate::core::sanitize::sanitize;

/// Standard alphabet that, like the browser's `atob`, takes padded and
/// unpadded input alike.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

// ============================================================================
// Errors
// ============================================================================

/// Failure of a single decode step.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("inflate failed: {0}")]
    Inflate(#[source] std::io::Error),

    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed, but to a scalar or array rather than a card object.
    #[error("decoded JSON is not an object")]
    NotAnObject,
}

/// Errors from encoding or decoding a share token.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to serialize card: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to compress card: {0}")]
    Compress(#[from] std::io::Error),

    #[error("share token is empty")]
    EmptyToken,

    /// No known format accepted the token.
    #[error("invalid or corrupted share link")]
    Unrecognized {
        /// Per-format failures, in the order they were attempted.
        attempts: Vec<(TokenFormat, FormatError)>,
    },
}

// ============================================================================
// Formats
// ============================================================================

/// Every token layout the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenFormat {
    Compressed,
    Utf8,
    PercentEscaped,
}

impl TokenFormat {
    /// Decode attempt order.
    pub const PRECEDENCE: [TokenFormat; 3] = [
        TokenFormat::Compressed,
        TokenFormat::Utf8,
        TokenFormat::PercentEscaped,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TokenFormat::Compressed => "compressed",
            TokenFormat::Utf8 => "utf8",
            TokenFormat::PercentEscaped => "percent-escaped",
        }
    }

    /// Decode `token` under this format alone, yielding the raw JSON object.
    pub fn decode(self, token: &str) -> Result<Value, FormatError> {
        let text = match self {
            TokenFormat::Compressed => {
                let compressed = STANDARD.decode(restore_standard_alphabet(token))?;
                let mut text = String::new();
                ZlibDecoder::new(compressed.as_slice())
                    .read_to_string(&mut text)
                    .map_err(FormatError::Inflate)?;
                text
            }
            TokenFormat::Utf8 => String::from_utf8(LENIENT_STANDARD.decode(token)?)?,
            TokenFormat::PercentEscaped => {
                // Bytes map 1:1 onto code points, the way `atob` hands them out.
                let binary: String = LENIENT_STANDARD.decode(token)?.into_iter().map(char::from).collect();
                urlencoding::decode(&binary)?.into_owned()
            }
        };

        let value: Value = serde_json::from_str(&text)?;
        if !value.is_object() {
            return Err(FormatError::NotAnObject);
        }
        Ok(value)
    }
}

/// A successfully decoded token, before sanitizing.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    pub format: TokenFormat,
    pub value: Value,
}

// ============================================================================
// Encode / Decode
// ============================================================================

/// Encode a card as a URL-safe share token.
pub fn encode(card: &CardData) -> Result<String, CodecError> {
    let json = serde_json::to_string(card)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(json.as_bytes())?;
    let compressed = encoder.finish()?;

    let token = URL_SAFE_NO_PAD.encode(compressed);
    debug!(json_len = json.len(), token_len = token.len(), "Encoded card token");
    Ok(token)
}

/// Decode a share token into raw JSON, trying each format in
/// [`TokenFormat::PRECEDENCE`] order.
pub fn decode_value(token: &str) -> Result<DecodedToken, CodecError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CodecError::EmptyToken);
    }

    let mut attempts = Vec::new();
    for format in TokenFormat::PRECEDENCE {
        match format.decode(token) {
            Ok(value) => {
                if !attempts.is_empty() {
                    debug!(format = format.name(), "Decoded share token with legacy format");
                }
                return Ok(DecodedToken { format, value });
            }
            Err(e) => {
                debug!(format = format.name(), error = %e, "Share token format rejected");
                attempts.push((format, e));
            }
        }
    }

    warn!(token_len = token.len(), "All share token formats failed");
    Err(CodecError::Unrecognized { attempts })
}

/// Decode a share token into a sanitized card.
pub fn decode(token: &str) -> Result<CardData, CodecError> {
    decode_value(token).map(|decoded| sanitize(&decoded.value))
}

/// Undo the URL-safe substitutions and put the padding back.
fn restore_standard_alphabet(token: &str) -> String {
    let mut standard: String = token
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let padding = (4 - standard.len() % 4) % 4;
    standard.extend(std::iter::repeat('=').take(padding));
    standard
}
