//! Game collection API server library.
//!
//! Exposes the building blocks (config, state, error mapping, request
//! negotiation, handlers, routes) so integration tests and the binary
//! entrypoint share one router.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
