//! Row sources, records and select lists.
//!
//! Converts tabular data into ordered [`ctk_model::Record`]s and builds
//! option lists for select controls from arbitrary items or enumerations.

#![deny(unsafe_code)]

pub mod error;
pub mod rows;
pub mod select;

pub use error::{Result, RowError};
pub use rows::{CsvRowSource, RowSource, to_records};
pub use select::{
    SelectEnum, SelectListItem, enum_select_list, enum_select_list_bits, to_select_list,
    to_select_list_items, to_select_list_items_with_selection,
};
