//! Caller-owned cache of transfer plans.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use ctk_model::Properties;
use tracing::debug;

use crate::error::Result;
use crate::plan::{TransferPlan, TransferReport};
use crate::skip::SkipSet;
use crate::transfer::{construct, into_with_plan, transfer_with_plan};

type PlanKey = (TypeId, TypeId);

/// Transfer plans keyed by `(source type, target type)`.
///
/// Each plan is built on first use and reused afterwards. The cache is
/// `Send + Sync` and can be shared between threads.
#[derive(Default)]
pub struct PlanCache {
    plans: RwLock<HashMap<PlanKey, Arc<dyn Any + Send + Sync>>>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the plan for copying `S` into `T`, building it if needed.
    pub fn plan<S: Properties, T: Properties>(&self) -> Arc<TransferPlan<S, T>> {
        let key = (TypeId::of::<S>(), TypeId::of::<T>());
        let cached = self
            .plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(plan) = cached.and_then(|plan| plan.downcast().ok()) {
            return plan;
        }

        let mut plans = self.plans.write().unwrap_or_else(PoisonError::into_inner);
        let entry = plans.entry(key).or_insert_with(|| {
            debug!(
                source_type = S::type_name(),
                target_type = T::type_name(),
                "building transfer plan"
            );
            Arc::new(TransferPlan::<S, T>::build()) as Arc<dyn Any + Send + Sync>
        });
        Arc::clone(entry)
            .downcast()
            .unwrap_or_else(|_| Arc::new(TransferPlan::build()))
    }

    /// Number of cached type pairs.
    pub fn len(&self) -> usize {
        self.plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.plans
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Cached counterpart of [`transfer`](crate::transfer).
    pub fn transfer<S: Properties, T: Properties>(
        &self,
        source: &S,
        target: &mut T,
        skip: &SkipSet,
    ) -> Result<TransferReport> {
        transfer_with_plan(&self.plan::<S, T>(), source, target, skip)
    }

    /// Cached counterpart of [`transfer_new`](crate::transfer_new).
    pub fn transfer_new<S: Properties, T: Properties>(
        &self,
        source: &S,
        skip: &SkipSet,
    ) -> Result<T> {
        let mut target = construct::<T>()?;
        self.transfer(source, &mut target, skip)?;
        Ok(target)
    }

    /// Cached counterpart of [`transfer_into`](crate::transfer_into).
    pub fn transfer_into<'t, S: Properties, T: Properties>(
        &self,
        source: Option<&S>,
        target: &'t mut Option<T>,
        skip: Option<&str>,
    ) -> Result<&'t mut T> {
        into_with_plan(source, target, skip, || self.plan::<S, T>())
    }
}

impl std::fmt::Debug for PlanCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanCache")
            .field("plans", &self.len())
            .finish()
    }
}
