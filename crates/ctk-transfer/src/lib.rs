//! Property transfer between instances.
//!
//! Copies the values of same-named, type-compatible properties from a source
//! instance onto a target instance, optionally excluding names listed in a
//! case-insensitive [`SkipSet`]. Types describe their properties through
//! [`ctk_model::Properties`]; dynamic [`ctk_model::Record`]s follow the same
//! matching rules.
//!
//! Transfers are shallow: shared (`Arc`) properties end up pointing at the
//! same allocation on both instances.

#![deny(unsafe_code)]

pub mod cache;
pub mod error;
pub mod format;
pub mod plan;
pub mod skip;
mod transfer;

pub use cache::PlanCache;
pub use error::{FormatError, Result, TransferError};
pub use format::{format_record, format_with};
pub use plan::{
    PropertyOutcome, SkipReason, SkippedProperty, TransferPlan, TransferReport, match_properties,
};
pub use skip::SkipSet;
pub use transfer::{transfer, transfer_into, transfer_new, transfer_records};
