//! Value model and property descriptors shared by the common tasks kit.

#![deny(unsafe_code)]

pub mod error;
pub mod property;
pub mod record;
pub mod value;

pub use error::{Result, ValueError};
pub use property::{Getter, Properties, Property, PropertyDescriptor, Setter};
pub use record::{Field, Record};
pub use value::{PropertyValue, SharedType, SharedValue, Value, ValueType};
