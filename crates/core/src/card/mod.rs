//! Card identity and card-name suggestions.

pub mod identity;
pub mod names;

pub use identity::{classify, digits_only, format_card_number, validate_length};
pub use names::{CardNameRegistry, DEFAULT_CARD_NAMES};
