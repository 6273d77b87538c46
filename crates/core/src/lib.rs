//! Domain logic for the game collection API.
//!
//! Everything here is pure: no database, no HTTP. The `api` crate composes
//! these pieces into the request/response pipeline.

pub mod envelope;
pub mod error;
pub mod hateoas;
pub mod i18n;
pub mod negotiation;
pub mod platform;
pub mod render;
pub mod types;
pub mod validation;
