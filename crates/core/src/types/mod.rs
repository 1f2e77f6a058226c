//! Core types for Jungle Park.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod lang;
pub mod price;
pub mod role;

pub use cart::{Cart, CartEntry, CartTotals, DELIVERY_FEE, FREE_DELIVERY_FROM};
pub use id::*;
pub use lang::{Lang, LocalizedText};
pub use price::Tenge;
pub use role::Role;
