//! Core data model definitions shared across reel crates.
#![allow(missing_docs)]

pub mod entry;
pub mod error;
pub mod settings;
pub mod ticket;

pub use entry::Entry;
pub use error::{ModelError, Result as ModelResult};
pub use settings::{Deceleration, SpinDuration};
pub use ticket::{TicketKey, TicketSortKey, tickets_match};
