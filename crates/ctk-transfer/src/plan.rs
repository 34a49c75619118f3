//! Property matching and per-type-pair transfer plans.

use std::collections::BTreeMap;
use std::fmt;

use ctk_model::{Getter, Properties, Property, PropertyDescriptor, Setter};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Result, TransferError};
use crate::skip::SkipSet;

/// Why a source property was not transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The source property has no getter.
    NotReadable,
    /// The property is listed in the skip set.
    Excluded,
    /// The target has no property with the same name.
    MissingOnTarget,
    /// The target property has no setter.
    NotWritable,
    /// The target property type cannot accept the source property type.
    IncompatibleType,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotReadable => "not readable",
            Self::Excluded => "excluded",
            Self::MissingOnTarget => "missing on target",
            Self::NotWritable => "not writable",
            Self::IncompatibleType => "incompatible type",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of matching one source property against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyOutcome {
    /// Copy source property `source` into target property `target` (indices).
    Transfer { source: usize, target: usize },
    Skipped { source: usize, reason: SkipReason },
}

impl PropertyOutcome {
    pub fn source(&self) -> usize {
        match self {
            Self::Transfer { source, .. } | Self::Skipped { source, .. } => *source,
        }
    }
}

/// Matches every source property against the target properties.
///
/// Returns one outcome per source property, in source order. A property is
/// transferred when it is readable, not in `skip` (case-insensitive), and the
/// target has a writable property of exactly the same name whose type is
/// assignable from the source type. Checks run in that order and the first
/// failing check names the skip reason.
pub fn match_properties(
    source: &[PropertyDescriptor<'_>],
    target: &[PropertyDescriptor<'_>],
    skip: &SkipSet,
) -> Vec<PropertyOutcome> {
    source
        .iter()
        .enumerate()
        .map(|(index, property)| {
            let resolved = if !property.readable {
                Err(SkipReason::NotReadable)
            } else if skip.contains(property.name) {
                Err(SkipReason::Excluded)
            } else {
                resolve_target(property, target)
            };
            match resolved {
                Ok(target) => PropertyOutcome::Transfer {
                    source: index,
                    target,
                },
                Err(reason) => PropertyOutcome::Skipped {
                    source: index,
                    reason,
                },
            }
        })
        .collect()
}

fn resolve_target(
    property: &PropertyDescriptor<'_>,
    target: &[PropertyDescriptor<'_>],
) -> std::result::Result<usize, SkipReason> {
    let index = target
        .iter()
        .position(|candidate| candidate.name == property.name)
        .ok_or(SkipReason::MissingOnTarget)?;
    let candidate = &target[index];
    if !candidate.writable {
        return Err(SkipReason::NotWritable);
    }
    if !candidate.value_type.is_assignable_from(property.value_type) {
        return Err(SkipReason::IncompatibleType);
    }
    Ok(index)
}

/// A source property that was not transferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedProperty {
    pub name: String,
    pub reason: SkipReason,
}

/// Names transferred and skipped by a single transfer, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub transferred: Vec<String>,
    pub skipped: Vec<SkippedProperty>,
}

impl TransferReport {
    pub(crate) fn record(&mut self, name: &str, reason: Option<SkipReason>) {
        match reason {
            None => {
                trace!(property = name, "transferred property");
                self.transferred.push(name.to_string());
            }
            Some(reason) => {
                debug!(property = name, %reason, "skipped property");
                self.skipped.push(SkippedProperty {
                    name: name.to_string(),
                    reason,
                });
            }
        }
    }

    pub fn transferred_count(&self) -> usize {
        self.transferred.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn was_transferred(&self, name: &str) -> bool {
        self.transferred.iter().any(|n| n == name)
    }

    pub fn skip_reason(&self, name: &str) -> Option<SkipReason> {
        self.skipped
            .iter()
            .find(|skipped| skipped.name == name)
            .map(|skipped| skipped.reason)
    }

    pub fn count_by_reason(&self) -> BTreeMap<SkipReason, usize> {
        let mut counts = BTreeMap::new();
        for skipped in &self.skipped {
            *counts.entry(skipped.reason).or_insert(0) += 1;
        }
        counts
    }
}

enum PlanAction<S, T> {
    Copy { get: Getter<S>, set: Setter<T> },
    Skip(SkipReason),
}

struct PlanEntry<S, T> {
    name: &'static str,
    action: PlanAction<S, T>,
}

/// Precomputed getter/setter pairs for copying `S` into `T`.
///
/// A plan depends only on the two types, so it can be built once and applied
/// to any number of instance pairs with any skip set.
pub struct TransferPlan<S, T> {
    entries: Vec<PlanEntry<S, T>>,
}

impl<S: Properties, T: Properties> TransferPlan<S, T> {
    pub fn build() -> Self {
        let source = S::properties();
        let target = T::properties();
        let outcomes = match_properties(
            &descriptors(&source),
            &descriptors(&target),
            &SkipSet::new(),
        );
        let entries = outcomes
            .into_iter()
            .map(|outcome| {
                let property = &source[outcome.source()];
                let action = match outcome {
                    PropertyOutcome::Transfer {
                        source: s,
                        target: t,
                    } => match (source[s].getter(), target[t].setter()) {
                        (Some(get), Some(set)) => PlanAction::Copy { get, set },
                        (None, _) => PlanAction::Skip(SkipReason::NotReadable),
                        (_, None) => PlanAction::Skip(SkipReason::NotWritable),
                    },
                    PropertyOutcome::Skipped { reason, .. } => PlanAction::Skip(reason),
                };
                PlanEntry {
                    name: property.name(),
                    action,
                }
            })
            .collect();
        Self { entries }
    }

    /// Number of properties the plan copies when nothing is excluded.
    pub fn copy_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.action, PlanAction::Copy { .. }))
            .count()
    }

    /// Copies every planned property from `source` onto `target`, except
    /// those listed in `skip`.
    pub fn apply(&self, source: &S, target: &mut T, skip: &SkipSet) -> Result<TransferReport> {
        let mut report = TransferReport::default();
        for entry in &self.entries {
            let reason = match &entry.action {
                PlanAction::Skip(SkipReason::NotReadable) => Some(SkipReason::NotReadable),
                _ if skip.contains(entry.name) => Some(SkipReason::Excluded),
                PlanAction::Skip(reason) => Some(*reason),
                PlanAction::Copy { get, set } => {
                    set(target, get(source)).map_err(|source| TransferError::Conversion {
                        property: entry.name.to_string(),
                        source,
                    })?;
                    None
                }
            };
            report.record(entry.name, reason);
        }
        Ok(report)
    }
}

impl<S, T> fmt::Debug for TransferPlan<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for entry in &self.entries {
            match &entry.action {
                PlanAction::Copy { .. } => list.entry(&(entry.name, "copy")),
                PlanAction::Skip(reason) => list.entry(&(entry.name, reason.as_str())),
            };
        }
        list.finish()
    }
}

fn descriptors<T>(properties: &[Property<T>]) -> Vec<PropertyDescriptor<'_>> {
    properties.iter().map(Property::descriptor).collect()
}

#[cfg(test)]
mod tests {
    use ctk_model::ValueType;

    use super::*;

    fn descriptor<'a>(
        name: &'a str,
        value_type: &'a ValueType,
        readable: bool,
        writable: bool,
    ) -> PropertyDescriptor<'a> {
        PropertyDescriptor {
            name,
            value_type,
            readable,
            writable,
        }
    }

    #[test]
    fn first_failing_check_names_the_reason() {
        let text = ValueType::Text;
        let int = ValueType::Int32;
        let source = [
            descriptor("Hidden", &text, false, true),
            descriptor("Skipped", &text, true, true),
            descriptor("Orphan", &text, true, true),
            descriptor("Locked", &text, true, true),
            descriptor("Count", &text, true, true),
            descriptor("Name", &text, true, true),
        ];
        let target = [
            descriptor("Hidden", &text, true, true),
            descriptor("Skipped", &text, true, true),
            descriptor("Locked", &text, true, false),
            descriptor("Count", &int, true, true),
            descriptor("Name", &text, false, true),
        ];
        let outcomes = match_properties(&source, &target, &SkipSet::parse("skipped"));
        assert_eq!(
            outcomes,
            vec![
                PropertyOutcome::Skipped {
                    source: 0,
                    reason: SkipReason::NotReadable
                },
                PropertyOutcome::Skipped {
                    source: 1,
                    reason: SkipReason::Excluded
                },
                PropertyOutcome::Skipped {
                    source: 2,
                    reason: SkipReason::MissingOnTarget
                },
                PropertyOutcome::Skipped {
                    source: 3,
                    reason: SkipReason::NotWritable
                },
                PropertyOutcome::Skipped {
                    source: 4,
                    reason: SkipReason::IncompatibleType
                },
                PropertyOutcome::Transfer {
                    source: 5,
                    target: 4
                },
            ]
        );
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let text = ValueType::Text;
        let source = [descriptor("name", &text, true, true)];
        let target = [descriptor("Name", &text, true, true)];
        let outcomes = match_properties(&source, &target, &SkipSet::new());
        assert_eq!(
            outcomes,
            vec![PropertyOutcome::Skipped {
                source: 0,
                reason: SkipReason::MissingOnTarget
            }]
        );
    }

    #[test]
    fn report_counts_by_reason() {
        let mut report = TransferReport::default();
        report.record("A", None);
        report.record("B", Some(SkipReason::Excluded));
        report.record("C", Some(SkipReason::Excluded));
        report.record("D", Some(SkipReason::MissingOnTarget));
        let counts = report.count_by_reason();
        assert_eq!(counts.get(&SkipReason::Excluded), Some(&2));
        assert_eq!(counts.get(&SkipReason::MissingOnTarget), Some(&1));
        assert!(report.was_transferred("A"));
        assert_eq!(report.skip_reason("D"), Some(SkipReason::MissingOnTarget));
    }
}
