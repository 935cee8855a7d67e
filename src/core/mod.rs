pub mod card;
pub mod logging;

// Share-link pipeline: codec + sanitizer, with the card service as the
// fallback transport for cards too large to inline
pub mod codec;
pub mod sanitize;
pub mod share;

// Card service (server side) and its client
pub mod storage;
pub mod server;
pub mod client;

// Editor state persisted between sessions
pub mod local;
