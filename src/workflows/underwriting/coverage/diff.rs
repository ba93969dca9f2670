use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::schedule::CoverageSchedule;

/// Before/after pair for one value that actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageChange {
    pub old: u64,
    pub new: u64,
}

/// Delta between two coverage schedules, keyed by coverage id so repeated
/// diffing is naturally idempotent. Endorsement and bulk-edit workflows store
/// this instead of full schedule snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageChangeSet {
    pub aggregate_limit: Option<CoverageChange>,
    pub aggregate_coverages: BTreeMap<String, CoverageChange>,
    pub sublimit_coverages: BTreeMap<String, CoverageChange>,
}

impl CoverageChangeSet {
    pub fn is_empty(&self) -> bool {
        self.aggregate_limit.is_none()
            && self.aggregate_coverages.is_empty()
            && self.sublimit_coverages.is_empty()
    }
}

/// Compare two schedules, emitting entries only for values that changed.
/// An id absent from one side is treated as 0.
pub fn diff(original: &CoverageSchedule, updated: &CoverageSchedule) -> CoverageChangeSet {
    let aggregate_limit = if original.aggregate_limit != updated.aggregate_limit {
        Some(CoverageChange {
            old: original.aggregate_limit,
            new: updated.aggregate_limit,
        })
    } else {
        None
    };

    CoverageChangeSet {
        aggregate_limit,
        aggregate_coverages: diff_map(&original.aggregate_coverages, &updated.aggregate_coverages),
        sublimit_coverages: diff_map(&original.sublimit_coverages, &updated.sublimit_coverages),
    }
}

fn diff_map(
    original: &BTreeMap<String, u64>,
    updated: &BTreeMap<String, u64>,
) -> BTreeMap<String, CoverageChange> {
    let mut changes = BTreeMap::new();

    for (coverage_id, old) in original {
        let new = updated.get(coverage_id).copied().unwrap_or(0);
        if *old != new {
            changes.insert(coverage_id.clone(), CoverageChange { old: *old, new });
        }
    }

    for (coverage_id, new) in updated {
        if !original.contains_key(coverage_id) && *new != 0 {
            changes.insert(coverage_id.clone(), CoverageChange { old: 0, new: *new });
        }
    }

    changes
}

/// Re-apply a recorded change set onto a base schedule. Left inverse of
/// `diff`: `apply(base, diff(base, updated)) == updated`, and applying an
/// empty change set returns the base unchanged.
pub fn apply(base: &CoverageSchedule, change_set: &CoverageChangeSet) -> CoverageSchedule {
    let mut result = base.clone();

    if let Some(change) = change_set.aggregate_limit {
        result.aggregate_limit = change.new;
    }

    for (coverage_id, change) in &change_set.aggregate_coverages {
        result
            .aggregate_coverages
            .insert(coverage_id.clone(), change.new);
    }

    for (coverage_id, change) in &change_set.sublimit_coverages {
        result
            .sublimit_coverages
            .insert(coverage_id.clone(), change.new);
    }

    result
}

pub fn has_changes(original: &CoverageSchedule, updated: &CoverageSchedule) -> bool {
    !diff(original, updated).is_empty()
}
