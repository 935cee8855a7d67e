//! Property-based tests for the share-link pipeline
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Test Modules
//!
//! - `codec_props`: Tests for the share token codec
//!   - Encode then decode returns the same card
//!   - Tokens only use URL-safe characters
//!   - Legacy layouts decode to the same card as fresh tokens
//!   - Arbitrary input never panics the decoder
//!
//! - `sanitize_props`: Tests for the card sanitizer
//!   - Any JSON value yields a card
//!   - `customColors` is present exactly when the theme is `custom`
//!   - List ids are unique
//!   - Sanitizing a sanitized card changes nothing
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod codec_props;
