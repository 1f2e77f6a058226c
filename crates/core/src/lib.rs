//! Jungle Park Core - Shared types library.
//!
//! This crate provides common types used across all Jungle Park components:
//! - `site` - Public café site and admin panel
//! - `cli` - Command-line tools for seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types and logic - no I/O, no file access,
//! no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, localized
//!   text with fallback resolution, staff roles, and the shopping cart
//!   state machine with its delivery pricing rules.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
