//! Conversion between JSON objects and records.
//!
//! Scalars map onto the record value model: strings become text, integers
//! become `i64`, other numbers become `f64` and `null` becomes an untyped
//! null. Arrays and nested objects are kept whole as shared JSON values, so a
//! transfer moves them by reference.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use ctk_model::{Field, Record, SharedType, SharedValue, Value, ValueType};
use ctk_transfer::{SkipSet, TransferReport, transfer_records};
use serde_json::{Map, Number, Value as Json};

/// Reads a JSON document from `path`.
pub fn read_json(path: &Path) -> Result<Json> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse JSON from {}", path.display()))
}

/// Writes `json` pretty-printed to `output`, or to stdout when `None`.
pub fn write_json(json: &Json, output: Option<&Path>) -> Result<()> {
    let mut rendered = serde_json::to_string_pretty(json).context("serialize JSON")?;
    rendered.push('\n');
    match output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("write {}", path.display())),
        None => io::stdout()
            .lock()
            .write_all(rendered.as_bytes())
            .context("write to stdout"),
    }
}

/// Builds a record from a JSON object, one field per member.
pub fn record_from_json(json: &Json) -> Result<Record> {
    let Json::Object(members) = json else {
        bail!("expected a JSON object, found {}", json_kind(json));
    };
    Ok(members
        .iter()
        .map(|(name, member)| {
            let (value_type, value) = field_from_json(member);
            Field::new(name.clone(), value_type, value)
        })
        .collect())
}

/// Builds one record per object of a JSON array, or a single record from an
/// object.
pub fn records_from_json(json: &Json) -> Result<Vec<Record>> {
    match json {
        Json::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                record_from_json(item).with_context(|| format!("element {index}"))
            })
            .collect(),
        other => Ok(vec![record_from_json(other)?]),
    }
}

/// Field type and value for one JSON member.
pub fn field_from_json(json: &Json) -> (ValueType, Value) {
    match json {
        Json::Null => (ValueType::Any, Value::Null),
        Json::Bool(flag) => (ValueType::Bool, Value::Bool(*flag)),
        Json::Number(number) => {
            if let Some(integer) = number.as_i64() {
                (ValueType::Int64, Value::Int64(integer))
            } else if let Some(integer) = number.as_u64() {
                (ValueType::UInt64, Value::UInt64(integer))
            } else {
                (
                    ValueType::Float64,
                    Value::Float64(number.as_f64().unwrap_or(f64::NAN)),
                )
            }
        }
        Json::String(text) => (ValueType::Text, Value::Text(text.clone())),
        nested @ (Json::Array(_) | Json::Object(_)) => (
            ValueType::Shared(SharedType::of::<Json>()),
            Value::Shared(SharedValue::new(Arc::new(nested.clone()))),
        ),
    }
}

/// Renders a record as a JSON object.
pub fn record_to_json(record: &Record) -> Json {
    let members: Map<String, Json> = record
        .fields()
        .iter()
        .map(|field| (field.name().to_string(), value_to_json(field.value())))
        .collect();
    Json::Object(members)
}

/// Renders a value as JSON.
///
/// Dates use ISO 8601. Shared values holding JSON are emitted as-is; other
/// shared values render as their type name.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(flag) => Json::Bool(*flag),
        Value::Int32(integer) => Json::from(*integer),
        Value::Int64(integer) => Json::from(*integer),
        Value::UInt64(integer) => Json::from(*integer),
        Value::Float64(float) => Number::from_f64(*float).map_or(Json::Null, Json::Number),
        Value::Text(text) => Json::String(text.clone()),
        Value::Date(date) => Json::String(date.format("%Y-%m-%d").to_string()),
        Value::DateTime(datetime) => {
            Json::String(datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
        }
        Value::Shared(shared) => shared
            .downcast_ref::<Json>()
            .cloned()
            .unwrap_or_else(|| Json::String(value.to_string())),
    }
}

/// Transfers `source` onto `target`, or onto a blank copy of `source` when no
/// target is given. Returns the resulting object and the transfer report.
///
/// Both sides must be JSON objects; see [`transfer_json_each`] for arrays.
pub fn transfer_json(
    source: &Json,
    target: Option<&Json>,
    skip: &SkipSet,
) -> Result<(Json, TransferReport)> {
    let source = record_from_json(source).context("read source object")?;
    let mut target = match target {
        Some(json) => record_from_json(json).context("read target object")?,
        None => Record::blank_like(&source),
    };
    let report = transfer_records(&source, &mut target, skip);
    Ok((record_to_json(&target), report))
}

/// Transfers every object of `source` and returns the results with one report
/// per object.
///
/// A `source` array yields an array. Each element is copied onto the element
/// of a `target` array at the same index, onto its own copy of a `target`
/// object, or onto a blank copy of itself when no target is given. A single
/// `source` object behaves like [`transfer_json`].
pub fn transfer_json_each(
    source: &Json,
    target: Option<&Json>,
    skip: &SkipSet,
) -> Result<(Json, Vec<TransferReport>)> {
    if !source.is_array() {
        let (result, report) = transfer_json(source, target, skip)?;
        return Ok((result, vec![report]));
    }
    let sources = records_from_json(source).context("read source array")?;
    let targets = match target {
        None => sources.iter().map(Record::blank_like).collect(),
        Some(array @ Json::Array(_)) => {
            let targets = records_from_json(array).context("read target array")?;
            if targets.len() != sources.len() {
                bail!(
                    "source has {} objects but target has {}",
                    sources.len(),
                    targets.len()
                );
            }
            targets
        }
        Some(object) => {
            let template = record_from_json(object).context("read target object")?;
            vec![template; sources.len()]
        }
    };
    let mut results = Vec::with_capacity(sources.len());
    let mut reports = Vec::with_capacity(sources.len());
    for (source, mut target) in sources.iter().zip(targets) {
        reports.push(transfer_records(source, &mut target, skip));
        results.push(record_to_json(&target));
    }
    Ok((Json::Array(results), reports))
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn members_map_to_typed_fields() {
        let json = serde_json::json!({
            "name": "Ana",
            "age": 30,
            "score": 1.5,
            "active": true,
            "note": null,
            "tags": ["a", "b"],
        });
        let record = record_from_json(&json).unwrap();

        assert_eq!(record.field("name").unwrap().value_type(), &ValueType::Text);
        assert_eq!(record.get("age"), Some(&Value::Int64(30)));
        assert_eq!(record.get("score"), Some(&Value::Float64(1.5)));
        assert_eq!(record.field("note").unwrap().value_type(), &ValueType::Any);
        assert_eq!(
            record.field("tags").unwrap().value_type(),
            &ValueType::Shared(SharedType::of::<Json>())
        );
        assert_eq!(record_to_json(&record), json);
    }

    #[test]
    fn non_objects_are_rejected() {
        let error = record_from_json(&serde_json::json!([1, 2])).unwrap_err();
        assert_eq!(error.to_string(), "expected a JSON object, found an array");
    }

    #[test]
    fn arrays_yield_one_record_per_element() {
        let json = serde_json::json!([{ "a": 1 }, { "a": 2 }]);
        let records = records_from_json(&json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("a"), Some(&Value::Int64(2)));

        let error = records_from_json(&serde_json::json!([{ "a": 1 }, 3])).unwrap_err();
        assert_eq!(error.to_string(), "element 1");
    }

    #[test]
    fn integers_beyond_i64_keep_their_value() {
        let json = serde_json::json!({ "Id": u64::MAX, "Small": -1 });
        let record = record_from_json(&json).unwrap();
        assert_eq!(record.get("Id"), Some(&Value::UInt64(u64::MAX)));
        assert_eq!(record.field("Id").unwrap().value_type(), &ValueType::UInt64);
        assert_eq!(record.get("Small"), Some(&Value::Int64(-1)));
        assert_eq!(record_to_json(&record), json);
    }

    #[test]
    fn dates_render_as_iso_strings() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let datetime = date.and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(value_to_json(&Value::Date(date)), Json::from("2024-03-15"));
        assert_eq!(
            value_to_json(&Value::DateTime(datetime)),
            Json::from("2024-03-15T09:30:00")
        );
        assert_eq!(value_to_json(&Value::Float64(f64::NAN)), Json::Null);
    }
}
