#![warn(clippy::all, missing_docs)]

//! Core domain logic for the card book client.
//!
//! This crate hosts the wire models, card identity rules, the card-name
//! registry, catalog filtering, session state with its navigation gate,
//! the HTTP façade over the bookings API and the storage port they all
//! persist through.

pub mod api;
pub mod card;
pub mod catalog;
pub mod config;
pub mod models;
pub mod session;
pub mod storage;
pub mod validation;
pub mod workflow;

pub use api::{ApiClient, ApiError};
pub use card::{classify, validate_length, CardNameRegistry};
pub use catalog::FilterState;
pub use config::AppConfig;
pub use models::{CardRecord, NetworkTag};
pub use session::{navigation_gate, AuthStatus, GateView, SessionStore};
pub use storage::{SharedStorage, Storage, StorageError};
pub use validation::ValidationError;
pub use workflow::{AuthFlow, WorkflowError};
