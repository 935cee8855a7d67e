//! Crate-level test suites.
//!
//! - `common`: shared card fixtures
//! - `property`: proptest invariants of the codec and sanitizer
//! - `integration`: the card client against mocked HTTP and a live service

mod common;
mod property;
