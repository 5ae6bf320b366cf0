//! Application layer for Mercado Fácil.
//!
//! Use cases that sequence calls against the injected document store,
//! identity provider and push gateway.

pub mod auth_service;
pub mod migration;
pub mod notification_service;

pub use auth_service::{AuthService, Subscription};
pub use migration::{BatchWriter, DataMigration, MigrationReport};
pub use notification_service::NotificationService;
