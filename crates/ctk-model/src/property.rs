//! Property descriptors.
//!
//! A type exposes its public properties by implementing [`Properties`],
//! usually through the [`properties!`](crate::properties) macro. Each
//! [`Property`] pairs a name and declared [`ValueType`] with an optional
//! getter and setter; their presence makes the property readable or writable.

use serde::Serialize;

use crate::error::ValueError;
use crate::value::{Value, ValueType};

/// Reads a property from an instance.
pub type Getter<T> = fn(&T) -> Value;

/// Writes a property on an instance.
pub type Setter<T> = fn(&mut T, Value) -> Result<(), ValueError>;

/// A named, typed property of `T`.
pub struct Property<T> {
    name: &'static str,
    value_type: ValueType,
    getter: Option<Getter<T>>,
    setter: Option<Setter<T>>,
}

impl<T> Property<T> {
    /// Creates a property that is neither readable nor writable.
    pub fn new(name: &'static str, value_type: ValueType) -> Self {
        Self {
            name,
            value_type,
            getter: None,
            setter: None,
        }
    }

    /// Creates a read-only property.
    pub fn read_only(name: &'static str, value_type: ValueType, getter: Getter<T>) -> Self {
        Self::new(name, value_type).with_getter(getter)
    }

    /// Creates a write-only property.
    pub fn write_only(name: &'static str, value_type: ValueType, setter: Setter<T>) -> Self {
        Self::new(name, value_type).with_setter(setter)
    }

    #[must_use]
    pub fn with_getter(mut self, getter: Getter<T>) -> Self {
        self.getter = Some(getter);
        self
    }

    #[must_use]
    pub fn with_setter(mut self, setter: Setter<T>) -> Self {
        self.setter = Some(setter);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    pub fn getter(&self) -> Option<Getter<T>> {
        self.getter
    }

    pub fn setter(&self) -> Option<Setter<T>> {
        self.setter
    }

    /// Reads the property, or `None` if it is not readable.
    pub fn get(&self, instance: &T) -> Option<Value> {
        self.getter.map(|getter| getter(instance))
    }

    pub fn descriptor(&self) -> PropertyDescriptor<'_> {
        PropertyDescriptor {
            name: self.name,
            value_type: &self.value_type,
            readable: self.is_readable(),
            writable: self.is_writable(),
        }
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            value_type: self.value_type.clone(),
            getter: self.getter,
            setter: self.setter,
        }
    }
}

impl<T> std::fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.descriptor().fmt(f)
    }
}

/// Borrowed view of a property: name, declared type and access flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor<'a> {
    pub name: &'a str,
    pub value_type: &'a ValueType,
    pub readable: bool,
    pub writable: bool,
}

/// Types that expose public instance properties.
pub trait Properties: Sized + 'static {
    /// Property list in declaration order.
    fn properties() -> Vec<Property<Self>>;

    /// Creates a default instance, or `None` if the type has no
    /// parameterless constructor.
    fn construct() -> Option<Self> {
        None
    }

    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Implements [`Properties`] for a struct whose fields are read/write
/// properties.
///
/// Each field is listed as `field: Type`, optionally followed by
/// `as "Name"` to expose it under a different property name. Field types
/// must implement [`PropertyValue`](crate::PropertyValue) and `Clone`.
/// Writing `Type with Default` makes the type constructible through its
/// `Default` implementation.
///
/// ```
/// use ctk_model::{Properties, properties};
///
/// #[derive(Debug, Clone, Default)]
/// struct Contact {
///     name: Option<String>,
///     age: i32,
/// }
///
/// properties!(Contact with Default {
///     name: Option<String> as "Name",
///     age: i32 as "Age",
/// });
///
/// let names: Vec<_> = Contact::properties().iter().map(|p| p.name()).collect();
/// assert_eq!(names, ["Name", "Age"]);
/// assert!(Contact::construct().is_some());
/// ```
#[macro_export]
macro_rules! properties {
    ($ty:ident with Default { $($fields:tt)* }) => {
        $crate::properties!(
            @impl $ty,
            ::core::option::Option::Some(<$ty as ::core::default::Default>::default()),
            $($fields)*
        );
    };
    ($ty:ident { $($fields:tt)* }) => {
        $crate::properties!(@impl $ty, ::core::option::Option::None, $($fields)*);
    };
    (@impl $ty:ident, $construct:expr, $($field:ident : $fty:ty $(as $name:literal)?),* $(,)?) => {
        impl $crate::Properties for $ty {
            fn properties() -> ::std::vec::Vec<$crate::Property<Self>> {
                ::std::vec![$(
                    $crate::Property::new(
                        $crate::properties!(@name $field $($name)?),
                        <$fty as $crate::PropertyValue>::value_type(),
                    )
                    .with_getter(|source: &Self| {
                        <$fty as $crate::PropertyValue>::into_value(
                            ::core::clone::Clone::clone(&source.$field),
                        )
                    })
                    .with_setter(|target: &mut Self, value: $crate::Value| {
                        target.$field = <$fty as $crate::PropertyValue>::from_value(value)?;
                        ::core::result::Result::Ok(())
                    })
                ),*]
            }

            fn construct() -> ::core::option::Option<Self> {
                $construct
            }
        }
    };
    (@name $field:ident) => {
        ::core::stringify!($field)
    };
    (@name $field:ident $name:literal) => {
        $name
    };
}
