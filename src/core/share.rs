//! Share Links
//!
//! A shared card travels in the URL fragment, either inline as a codec
//! token (`#<token>`) or by reference to the card service
//! (`#card=<id>`). Short cards go inline; cards whose token would push the
//! URL past [`ShareSettings::max_inline_len`] are stored remotely.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::core::card::CardData;
use crate::core::client::{ClientError, RemoteCardStore};
use crate::core::codec::{self, CodecError};

/// Fragment prefix of a stored-card link.
pub const STORED_PREFIX: &str = "card=";

/// Default longest inline token before switching to the card service.
pub const DEFAULT_MAX_INLINE_LEN: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareLink {
    /// Card encoded directly in the fragment.
    Inline(String),
    /// Card held by the card service under this id.
    Stored(String),
}

impl ShareLink {
    /// Parse a URL fragment, with or without its leading `#`.
    pub fn from_fragment(fragment: &str) -> Option<Self> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment).trim();
        if fragment.is_empty() {
            return None;
        }
        match fragment.strip_prefix(STORED_PREFIX) {
            Some("") => None,
            Some(id) => Some(ShareLink::Stored(id.to_string())),
            None => Some(ShareLink::Inline(fragment.to_string())),
        }
    }

    /// Share link carried by a full URL, if any.
    pub fn from_url(url: &Url) -> Option<Self> {
        url.fragment().and_then(Self::from_fragment)
    }

    /// Fragment text, without the leading `#`.
    pub fn to_fragment(&self) -> String {
        match self {
            ShareLink::Inline(token) => token.clone(),
            ShareLink::Stored(id) => format!("{STORED_PREFIX}{id}"),
        }
    }

    /// `base` with its fragment replaced by this link.
    pub fn to_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.set_fragment(Some(&self.to_fragment()));
        url
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareSettings {
    /// Page the share links point at.
    pub base_url: String,
    /// Longest token embedded inline.
    pub max_inline_len: usize,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173/".to_string(),
            max_inline_len: DEFAULT_MAX_INLINE_LEN,
        }
    }
}

/// Errors while preparing a share link.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Remote(#[from] ClientError),

    #[error("Invalid share base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Outcome of opening a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCard {
    Found(CardData),
    /// The card service has no card under the id.
    NotFound,
    /// The inline token matched no known format.
    Invalid,
}

/// Build the share link for `card`: inline when the token fits, otherwise
/// stored through `remote`.
pub async fn prepare(
    card: &CardData,
    settings: &ShareSettings,
    remote: Option<&RemoteCardStore>,
) -> Result<ShareLink, ShareError> {
    let token = codec::encode(card)?;
    if token.len() <= settings.max_inline_len {
        return Ok(ShareLink::Inline(token));
    }

    match remote {
        Some(remote) => {
            info!(
                token_len = token.len(),
                max_inline_len = settings.max_inline_len,
                "Token too long for inline link, storing card remotely"
            );
            let id = remote.save(card).await?;
            Ok(ShareLink::Stored(id))
        }
        None => {
            warn!(token_len = token.len(), "No card service configured, using long inline link");
            Ok(ShareLink::Inline(token))
        }
    }
}

/// Full share URL for `card` under `settings.base_url`.
pub async fn share_url(
    card: &CardData,
    settings: &ShareSettings,
    remote: Option<&RemoteCardStore>,
) -> Result<Url, ShareError> {
    let base = Url::parse(&settings.base_url)?;
    let link = prepare(card, settings, remote).await?;
    Ok(link.to_url(&base))
}

/// Open a share link.
///
/// Bad tokens and unknown ids are ordinary outcomes; only transport
/// failures from the card service come back as errors.
pub async fn resolve(
    link: &ShareLink,
    remote: Option<&RemoteCardStore>,
) -> Result<ResolvedCard, ClientError> {
    match link {
        ShareLink::Inline(token) => match codec::decode(token) {
            Ok(card) => Ok(ResolvedCard::Found(card)),
            Err(e) => {
                debug!(error = %e, "Inline share token rejected");
                Ok(ResolvedCard::Invalid)
            }
        },
        ShareLink::Stored(id) => {
            let remote = remote.ok_or_else(|| {
                ClientError::Config("No card service configured for stored links".to_string())
            })?;
            Ok(match remote.fetch(id).await? {
                Some(card) => ResolvedCard::Found(card),
                None => ResolvedCard::NotFound,
            })
        }
    }
}
