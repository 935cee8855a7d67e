/// FancyFam Cards - shareable digital business cards
///
/// Core library providing the card record model, the share-token codec
/// with its legacy formats, the card sanitizer, and the id-addressed card
/// store service with its client.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub use crate::core::card::CardData;
pub use crate::core::codec::{decode, encode};
pub use crate::core::sanitize::sanitize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
