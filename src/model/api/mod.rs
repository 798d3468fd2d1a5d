//! API-compatible types.
//!
//! The types in this module are serialised in the shape the trivia frontend
//! expects, e.g.:
//!
//! - IDs are serialised as `id` rather than `_id`.
//! - Category mappings are objects keyed by the stringified category ID.
//! - Numeric request fields may arrive as numbers or numeric strings.

pub mod category;
pub mod envelope;
pub mod lenient;
pub mod pagination;
pub mod question;
pub mod quiz;
