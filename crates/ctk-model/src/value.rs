//! Dynamically typed property values.
//!
//! Property getters produce a [`Value`] and setters consume one. The declared
//! type of a property is a [`ValueType`]; assignability between declared types
//! decides which properties a transfer may copy.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::error::ValueError;

/// Identity of a shared (reference-like) property type.
#[derive(Debug, Clone, Copy)]
pub struct SharedType {
    id: TypeId,
    name: &'static str,
}

impl SharedType {
    /// Describes the shared type `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for SharedType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SharedType {}

impl std::hash::Hash for SharedType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Declared type of a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Accepts a value of any type.
    Any,
    Bool,
    Int32,
    Int64,
    UInt64,
    Float64,
    Text,
    Date,
    DateTime,
    /// A value that may be absent.
    Optional(Box<ValueType>),
    /// A reference-counted value shared between instances.
    Shared(SharedType),
}

impl ValueType {
    /// Wraps `inner` as an optional type.
    pub fn optional(inner: ValueType) -> Self {
        ValueType::Optional(Box::new(inner))
    }

    /// Returns true if a property of this type can accept values of `source`.
    ///
    /// Identical types are assignable, `Any` accepts everything, and an
    /// optional type accepts both the optional and the plain form of any type
    /// its inner type accepts. There is no numeric widening and a plain type
    /// never accepts an optional one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ctk_model::ValueType;
    ///
    /// let text = ValueType::Text;
    /// let maybe_text = ValueType::optional(ValueType::Text);
    ///
    /// assert!(maybe_text.is_assignable_from(&text));
    /// assert!(!text.is_assignable_from(&maybe_text));
    /// assert!(!ValueType::Int64.is_assignable_from(&ValueType::Int32));
    /// assert!(ValueType::Any.is_assignable_from(&maybe_text));
    /// ```
    pub fn is_assignable_from(&self, source: &ValueType) -> bool {
        if self == source {
            return true;
        }
        match (self, source) {
            (ValueType::Any, _) => true,
            (ValueType::Optional(target), ValueType::Optional(source)) => {
                target.is_assignable_from(source)
            }
            (ValueType::Optional(target), source) => target.is_assignable_from(source),
            _ => false,
        }
    }

    /// Returns true if values of this type may be `Null`.
    pub fn is_nullable(&self) -> bool {
        matches!(self, ValueType::Any | ValueType::Optional(_))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Any => f.write_str("any"),
            ValueType::Bool => f.write_str("bool"),
            ValueType::Int32 => f.write_str("i32"),
            ValueType::Int64 => f.write_str("i64"),
            ValueType::UInt64 => f.write_str("u64"),
            ValueType::Float64 => f.write_str("f64"),
            ValueType::Text => f.write_str("text"),
            ValueType::Date => f.write_str("date"),
            ValueType::DateTime => f.write_str("datetime"),
            ValueType::Optional(inner) => write!(f, "optional {inner}"),
            ValueType::Shared(shared) => write!(f, "shared {}", shared.name()),
        }
    }
}

impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A reference-counted value of any `Send + Sync` type.
///
/// Cloning a `SharedValue` clones the handle, so two properties holding
/// clones point at the same allocation.
#[derive(Clone)]
pub struct SharedValue {
    inner: Arc<dyn Any + Send + Sync>,
    ty: SharedType,
}

impl SharedValue {
    pub fn new<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            ty: SharedType::of::<T>(),
        }
    }

    pub fn shared_type(&self) -> SharedType {
        self.ty
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Recovers the typed handle, or returns `self` unchanged on a type mismatch.
    pub fn downcast<T: Any + Send + Sync>(self) -> Result<Arc<T>, Self> {
        let ty = self.ty;
        self.inner
            .downcast::<T>()
            .map_err(|inner| Self { inner, ty })
    }

    /// Returns true if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &SharedValue) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedValue")
            .field("type", &self.ty.name())
            .finish_non_exhaustive()
    }
}

impl PartialEq for SharedValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// A property value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    UInt64(u64),
    Float64(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Shared(SharedValue),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value's variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int32(_) => "i32",
            Value::Int64(_) => "i64",
            Value::UInt64(_) => "u64",
            Value::Float64(_) => "f64",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Shared(shared) => shared.shared_type().name(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Renders the value for display; `Null` renders as an empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::UInt64(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Date(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{v}"),
            Value::Shared(shared) => write!(f, "<{}>", shared.shared_type().name()),
        }
    }
}

/// Conversion between a Rust field type and [`Value`].
///
/// Implemented for the scalar types, `String`, chrono dates, `Option<T>`,
/// `Arc<T>` (shared by reference) and `Value` itself (the `Any` type).
pub trait PropertyValue: Sized {
    /// Declared type of properties holding this type.
    fn value_type() -> ValueType;

    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Result<Self, ValueError>;
}

macro_rules! scalar_property_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                fn value_type() -> ValueType {
                    ValueType::$variant
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(ValueError::mismatch(ValueType::$variant, &other)),
                    }
                }
            }
        )*
    };
}

scalar_property_value! {
    bool => Bool,
    i32 => Int32,
    i64 => Int64,
    u64 => UInt64,
    f64 => Float64,
    String => Text,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
}

impl PropertyValue for Value {
    fn value_type() -> ValueType {
        ValueType::Any
    }

    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl<T: PropertyValue> PropertyValue for Option<T> {
    fn value_type() -> ValueType {
        ValueType::optional(T::value_type())
    }

    fn into_value(self) -> Value {
        self.map_or(Value::Null, PropertyValue::into_value)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Any + Send + Sync> PropertyValue for Arc<T> {
    fn value_type() -> ValueType {
        ValueType::Shared(SharedType::of::<T>())
    }

    fn into_value(self) -> Value {
        Value::Shared(SharedValue::new(self))
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        let expected = Self::value_type();
        match value {
            Value::Shared(shared) => shared
                .downcast::<T>()
                .map_err(|shared| ValueError::mismatch(expected, &Value::Shared(shared))),
            other => Err(ValueError::mismatch(expected, &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Address {
        city: String,
    }

    #[test]
    fn optional_round_trips_null() {
        assert_eq!(Option::<String>::from_value(Value::Null).unwrap(), None);
        assert_eq!(Some(7_i32).into_value(), Value::Int32(7));
        assert_eq!(Option::<i32>::None.into_value(), Value::Null);
    }

    #[test]
    fn scalar_rejects_other_variant() {
        let error = i64::from_value(Value::Int32(1)).unwrap_err();
        assert_eq!(error.to_string(), "expected a i64 value, found i32");
    }

    #[test]
    fn unsigned_is_its_own_type() {
        assert_eq!(u64::MAX.into_value(), Value::UInt64(u64::MAX));
        assert_eq!(u64::from_value(Value::UInt64(3)).unwrap(), 3);
        assert!(!ValueType::Int64.is_assignable_from(&ValueType::UInt64));
        assert_eq!(Value::UInt64(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn shared_value_keeps_allocation() {
        let address = Arc::new(Address {
            city: "Lima".to_string(),
        });
        let value = Arc::clone(&address).into_value();
        let back = Arc::<Address>::from_value(value).unwrap();
        assert!(Arc::ptr_eq(&address, &back));
        assert_eq!(back.city, "Lima");
    }

    #[test]
    fn shared_value_rejects_other_type() {
        let value = Arc::new(5_u8).into_value();
        assert!(Arc::<Address>::from_value(value).is_err());
    }

    #[test]
    fn shared_types_compare_by_identity() {
        let address = ValueType::Shared(SharedType::of::<Address>());
        let number = ValueType::Shared(SharedType::of::<u8>());
        assert!(address.is_assignable_from(&address.clone()));
        assert!(!address.is_assignable_from(&number));
        assert!(ValueType::optional(address.clone()).is_assignable_from(&address));
    }

    #[test]
    fn display_renders_null_as_empty() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Text("Hi".to_string()).to_string(), "Hi");
        assert_eq!(
            ValueType::optional(ValueType::Text).to_string(),
            "optional text"
        );
    }
}
