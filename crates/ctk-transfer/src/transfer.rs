//! Transfer entry points.

use std::sync::Arc;

use ctk_model::{Properties, Record};
use tracing::debug_span;

use crate::error::{Result, TransferError};
use crate::plan::{PropertyOutcome, TransferPlan, TransferReport, match_properties};
use crate::skip::SkipSet;

/// Copies same-named, compatible properties from `source` onto `target`.
///
/// Properties that are not readable on the source, excluded by `skip`,
/// missing or read-only on the target, or of an incompatible type are left
/// untouched and listed in the returned report.
pub fn transfer<S: Properties, T: Properties>(
    source: &S,
    target: &mut T,
    skip: &SkipSet,
) -> Result<TransferReport> {
    transfer_with_plan(&TransferPlan::build(), source, target, skip)
}

/// Creates a `T` through its parameterless constructor and copies `source` into it.
pub fn transfer_new<S: Properties, T: Properties>(source: &S, skip: &SkipSet) -> Result<T> {
    let mut target = construct::<T>()?;
    transfer(source, &mut target, skip)?;
    Ok(target)
}

/// Copies `source` into the instance held by `target`, constructing one first
/// when `target` is `None`.
///
/// `skip` is a comma-separated list of property names to leave untouched.
/// Fails with [`TransferError::MissingSource`] when `source` is `None`
/// (nothing is constructed or mutated), and with
/// [`TransferError::Construction`] when a target must be created but `T` has
/// no parameterless constructor.
pub fn transfer_into<'t, S: Properties, T: Properties>(
    source: Option<&S>,
    target: &'t mut Option<T>,
    skip: Option<&str>,
) -> Result<&'t mut T> {
    into_with_plan(source, target, skip, || Arc::new(TransferPlan::build()))
}

/// Applies the same matching rules to two dynamic records.
pub fn transfer_records(source: &Record, target: &mut Record, skip: &SkipSet) -> TransferReport {
    let _span = debug_span!("transfer_records", fields = source.len()).entered();
    let outcomes = match_properties(&source.descriptors(), &target.descriptors(), skip);
    let mut report = TransferReport::default();
    for outcome in outcomes {
        let Some(field) = source.field_at(outcome.source()) else {
            continue;
        };
        match outcome {
            PropertyOutcome::Transfer {
                target: index, ..
            } => {
                target.set_value_at(index, field.value().clone());
                report.record(field.name(), None);
            }
            PropertyOutcome::Skipped { reason, .. } => report.record(field.name(), Some(reason)),
        }
    }
    report
}

pub(crate) fn transfer_with_plan<S: Properties, T: Properties>(
    plan: &TransferPlan<S, T>,
    source: &S,
    target: &mut T,
    skip: &SkipSet,
) -> Result<TransferReport> {
    let _span = debug_span!(
        "transfer",
        source_type = S::type_name(),
        target_type = T::type_name(),
        excluded = skip.len()
    )
    .entered();
    plan.apply(source, target, skip)
}

pub(crate) fn into_with_plan<'t, S: Properties, T: Properties>(
    source: Option<&S>,
    target: &'t mut Option<T>,
    skip: Option<&str>,
    plan: impl FnOnce() -> Arc<TransferPlan<S, T>>,
) -> Result<&'t mut T> {
    let source = source.ok_or(TransferError::MissingSource)?;
    let instance = match target.take() {
        Some(instance) => instance,
        None => construct::<T>()?,
    };
    let instance = target.insert(instance);
    let skip = skip.map(SkipSet::parse).unwrap_or_default();
    transfer_with_plan(&plan(), source, instance, &skip)?;
    Ok(instance)
}

pub(crate) fn construct<T: Properties>() -> Result<T> {
    T::construct().ok_or(TransferError::Construction {
        type_name: T::type_name(),
    })
}
