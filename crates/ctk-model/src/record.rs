//! Ordered name-to-value records.
//!
//! A [`Record`] is the dynamic counterpart of a [`Properties`](crate::Properties)
//! type: every field is a readable and writable property with a declared type.

use crate::property::PropertyDescriptor;
use crate::value::{Value, ValueType};

/// A named field of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    value_type: ValueType,
    value: Value,
}

impl Field {
    pub fn new(name: impl Into<String>, value_type: ValueType, value: Value) -> Self {
        Self {
            name: name.into(),
            value_type,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn descriptor(&self) -> PropertyDescriptor<'_> {
        PropertyDescriptor {
            name: &self.name,
            value_type: &self.value_type,
            readable: true,
            writable: true,
        }
    }
}

/// Fields in insertion order, unique by exact name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// A record with the same field names and types as `shape`, every value `Null`.
    pub fn blank_like(shape: &Record) -> Self {
        Self {
            fields: shape
                .fields
                .iter()
                .map(|field| Field::new(field.name.clone(), field.value_type.clone(), Value::Null))
                .collect(),
        }
    }

    /// Inserts a field, replacing any existing field of the same name in place.
    ///
    /// Returns the previous value when a field was replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value_type: ValueType,
        value: Value,
    ) -> Option<Value> {
        let field = Field::new(name, value_type, value);
        match self.position(&field.name) {
            Some(index) => Some(std::mem::replace(&mut self.fields[index], field).into_value()),
            None => {
                self.fields.push(field);
                None
            }
        }
    }

    /// Index of the field called exactly `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field(name).map(Field::value)
    }

    pub fn field_at(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Replaces the value of the field at `index`, keeping its declared type.
    ///
    /// Returns the previous value, or `None` if `index` is out of range.
    pub fn set_value_at(&mut self, index: usize, value: Value) -> Option<Value> {
        self.fields
            .get_mut(index)
            .map(|field| std::mem::replace(&mut field.value, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::name)
    }

    pub fn descriptors(&self) -> Vec<PropertyDescriptor<'_>> {
        self.fields.iter().map(Field::descriptor).collect()
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl FromIterator<Field> for Record {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut record = Record::new();
        for field in iter {
            record.insert(field.name, field.value_type, field.value);
        }
        record
    }
}
