use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::catalog::{CoverageCatalog, CoverageClass};
use super::schedule::{self, CoverageSchedule};
use super::PolicyForm;

/// The three historically-accumulated shapes coverage selections were stored
/// under, normalized on read into one canonical `CoverageSchedule` before any
/// rule runs. Corrupt payloads become `Missing`: a damaged record must not
/// crash the validation of an otherwise-valid quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CoverageInput {
    /// Oldest shape: coverage id -> included flag.
    Flags(BTreeMap<String, bool>),
    /// Interim shape: coverage id -> `{ "include": bool }`.
    Included(BTreeMap<String, IncludeFlag>),
    /// Current shape: explicit dollar limits split by classification.
    Limits {
        aggregate_coverages: BTreeMap<String, u64>,
        sublimit_coverages: BTreeMap<String, u64>,
    },
    /// Nothing stored, or a payload none of the shapes could absorb.
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeFlag {
    pub include: bool,
}

impl Default for CoverageInput {
    fn default() -> Self {
        CoverageInput::Missing
    }
}

impl CoverageInput {
    /// Classify a raw stored payload. Never fails: unrecognized or corrupt
    /// structures are treated as absence.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                let has_limit_keys = map.contains_key("aggregate_coverages")
                    || map.contains_key("sublimit_coverages");
                if has_limit_keys {
                    return CoverageInput::Limits {
                        aggregate_coverages: limit_map(map.get("aggregate_coverages")),
                        sublimit_coverages: limit_map(map.get("sublimit_coverages")),
                    };
                }

                if map.values().all(|entry| entry.is_boolean()) {
                    let flags = map
                        .into_iter()
                        .filter_map(|(id, entry)| entry.as_bool().map(|flag| (id, flag)))
                        .collect();
                    return CoverageInput::Flags(flags);
                }

                if map.values().all(is_include_object) {
                    let included = map
                        .into_iter()
                        .filter_map(|(id, entry)| {
                            entry
                                .get("include")
                                .and_then(Value::as_bool)
                                .map(|include| (id, IncludeFlag { include }))
                        })
                        .collect();
                    return CoverageInput::Included(included);
                }

                CoverageInput::Missing
            }
            _ => CoverageInput::Missing,
        }
    }

    /// Whether any coverage is selected, across all three shapes: any true
    /// flag, any `{include: true}`, or any non-zero limit.
    pub fn includes_any_coverage(&self) -> bool {
        match self {
            CoverageInput::Flags(flags) => flags.values().any(|flag| *flag),
            CoverageInput::Included(included) => included.values().any(|entry| entry.include),
            CoverageInput::Limits {
                aggregate_coverages,
                sublimit_coverages,
            } => aggregate_coverages
                .values()
                .chain(sublimit_coverages.values())
                .any(|limit| *limit > 0),
            CoverageInput::Missing => false,
        }
    }

    /// Migrate into the canonical schedule. Flag-style shapes route each
    /// included id through the catalog classification; the limit shape clamps
    /// every stored value; `Missing` resolves to an all-zero schedule.
    pub fn normalize(
        &self,
        catalog: &CoverageCatalog,
        policy_form: PolicyForm,
        aggregate_limit: u64,
    ) -> CoverageSchedule {
        let mut resolved = schedule::resolve(catalog, policy_form, aggregate_limit);

        match self {
            CoverageInput::Flags(flags) => {
                zero_unselected(&mut resolved, |id| flags.get(id).copied().unwrap_or(false));
            }
            CoverageInput::Included(included) => {
                zero_unselected(&mut resolved, |id| {
                    included.get(id).map(|entry| entry.include).unwrap_or(false)
                });
            }
            CoverageInput::Limits {
                aggregate_coverages,
                sublimit_coverages,
            } => {
                for definition in &catalog.coverages {
                    let stored = aggregate_coverages
                        .get(&definition.id)
                        .or_else(|| sublimit_coverages.get(&definition.id))
                        .copied()
                        .unwrap_or(0);
                    let clamped = if definition.class_for(policy_form) == CoverageClass::Excluded {
                        0
                    } else {
                        stored.min(aggregate_limit)
                    };
                    if let Some(limit) = resolved.aggregate_coverages.get_mut(&definition.id) {
                        *limit = clamped;
                    } else if let Some(limit) = resolved.sublimit_coverages.get_mut(&definition.id)
                    {
                        *limit = clamped;
                    }
                }
            }
            CoverageInput::Missing => {
                zero_unselected(&mut resolved, |_| false);
            }
        }

        resolved
    }
}

fn zero_unselected<F: Fn(&str) -> bool>(resolved: &mut CoverageSchedule, selected: F) {
    for (id, limit) in resolved.aggregate_coverages.iter_mut() {
        if !selected(id) {
            *limit = 0;
        }
    }
    for (id, limit) in resolved.sublimit_coverages.iter_mut() {
        if !selected(id) {
            *limit = 0;
        }
    }
}

fn limit_map(value: Option<&Value>) -> BTreeMap<String, u64> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(id, entry)| (id.clone(), numeric_limit(entry)))
                .collect()
        })
        .unwrap_or_default()
}

fn numeric_limit(value: &Value) -> u64 {
    if let Some(amount) = value.as_u64() {
        return amount;
    }
    value
        .as_f64()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .map(|amount| amount as u64)
        .unwrap_or(0)
}

fn is_include_object(value: &Value) -> bool {
    value
        .as_object()
        .map(|entry| entry.get("include").map(Value::is_boolean).unwrap_or(false))
        .unwrap_or(false)
}

impl<'de> Deserialize<'de> for CoverageInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(CoverageInput::from_value(value))
    }
}
