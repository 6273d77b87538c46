//! Row models.
//!
//! Each struct is a `FromRow` + `Serialize` mirror of one table. Field names
//! serialize in camelCase, which is the wire shape clients see. Create and
//! update inputs are the validated types from `gameshelf_core::validation`.

pub mod game;
pub mod review;
pub mod studio;
