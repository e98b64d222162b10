//! Authentication state, its rehydration from storage and the navigation
//! gate built on top of it.

pub mod gate;
pub mod loader;
mod models;
/// The injectable [`SessionStore`].
pub mod store;

pub use gate::{navigation_gate, GateView, Screen, PROTECTED_SCREENS, PUBLIC_SCREENS};
pub use loader::SessionLoader;
pub use models::{reduce, AuthStatus, PersistedSession, SessionAction, SessionState, UserProfile};
pub use store::SessionStore;
