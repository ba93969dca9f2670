use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{CoverageCatalog, CoverageClass, PolicyForm};

/// The resolved set of limits for one tower. Resolver output is total: every
/// catalog id appears, excluded coverages carry an explicit zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSchedule {
    pub policy_form: PolicyForm,
    pub aggregate_limit: u64,
    /// Full-limit style coverages, each <= aggregate_limit.
    pub aggregate_coverages: BTreeMap<String, u64>,
    /// Capped/variable coverages, each <= aggregate_limit.
    pub sublimit_coverages: BTreeMap<String, u64>,
}

impl CoverageSchedule {
    /// Look up a limit across both maps.
    pub fn limit_for(&self, coverage_id: &str) -> Option<u64> {
        self.aggregate_coverages
            .get(coverage_id)
            .or_else(|| self.sublimit_coverages.get(coverage_id))
            .copied()
    }

    pub fn has_any_coverage(&self) -> bool {
        self.aggregate_coverages
            .values()
            .chain(self.sublimit_coverages.values())
            .any(|limit| *limit > 0)
    }
}

/// Materialize concrete dollar limits for a policy form at a given aggregate
/// limit. Total function: always returns a fully populated schedule.
pub fn resolve(
    catalog: &CoverageCatalog,
    policy_form: PolicyForm,
    aggregate_limit: u64,
) -> CoverageSchedule {
    let mut aggregate_coverages = BTreeMap::new();
    let mut sublimit_coverages = BTreeMap::new();

    for definition in &catalog.coverages {
        match definition.class_for(policy_form) {
            CoverageClass::Aggregate => {
                aggregate_coverages.insert(definition.id.clone(), aggregate_limit);
            }
            CoverageClass::Sublimit => {
                sublimit_coverages.insert(
                    definition.id.clone(),
                    definition.default_sublimit.min(aggregate_limit),
                );
            }
            CoverageClass::Excluded => {
                sublimit_coverages.insert(definition.id.clone(), 0);
            }
        }
    }

    CoverageSchedule {
        policy_form,
        aggregate_limit,
        aggregate_coverages,
        sublimit_coverages,
    }
}

/// Clamp a caller-supplied sublimit into [0, aggregate_limit].
pub fn validate_sublimit(value: i64, aggregate_limit: u64) -> u64 {
    if value <= 0 {
        return 0;
    }
    (value as u64).min(aggregate_limit)
}

/// Replace limits for ids already present in `base`, clamping each override.
/// Ids absent from the base schedule are ignored so an override map can never
/// introduce a coverage the form does not carry.
pub fn merge_overrides(
    base: &CoverageSchedule,
    overrides: &BTreeMap<String, i64>,
) -> CoverageSchedule {
    let mut merged = base.clone();

    for (coverage_id, raw) in overrides {
        let clamped = validate_sublimit(*raw, merged.aggregate_limit);
        if let Some(limit) = merged.aggregate_coverages.get_mut(coverage_id) {
            *limit = clamped;
        } else if let Some(limit) = merged.sublimit_coverages.get_mut(coverage_id) {
            *limit = clamped;
        }
    }

    merged
}
