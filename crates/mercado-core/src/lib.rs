//! Domain layer of the Mercado Fácil back-office toolkit.
//!
//! Holds the shared data model, the document store seams, the pure
//! migration logic and the auth/notification contracts. Nothing in this
//! crate performs I/O.

pub mod auth;
pub mod config;
pub mod document;
pub mod error;
pub mod migration;
pub mod model;
pub mod notification;

pub use error::MercadoError;
