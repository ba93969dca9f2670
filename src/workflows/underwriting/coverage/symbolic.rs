use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Coverage value captured before a concrete aggregate limit is known.
/// Rate sheets are authored against the option, not the limit, so resolution
/// is deferred until an aggregate limit is available per option. Consumers
/// only ever see the resolved concrete schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolicCoverageValue {
    /// Full aggregate limit.
    Aggregate,
    /// Half the aggregate limit, integer floor.
    HalfAggregate,
    /// Coverage switched off.
    None,
    /// A fixed dollar amount, capped at the aggregate limit on resolution.
    Fixed(u64),
}

impl SymbolicCoverageValue {
    /// Parse a rate-sheet cell. Accepts "aggregate", "50%", "none"/"0", or a
    /// dollar amount (commas and a leading "$" tolerated).
    pub fn parse(text: &str) -> Result<Self, SymbolicParseError> {
        let trimmed = text.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "aggregate" | "full" => return Ok(SymbolicCoverageValue::Aggregate),
            "50%" | "half" => return Ok(SymbolicCoverageValue::HalfAggregate),
            "none" | "" => return Ok(SymbolicCoverageValue::None),
            _ => {}
        }

        let digits: String = trimmed
            .chars()
            .filter(|ch| *ch != ',' && *ch != '$')
            .collect();
        match digits.parse::<u64>() {
            Ok(0) => Ok(SymbolicCoverageValue::None),
            Ok(amount) => Ok(SymbolicCoverageValue::Fixed(amount)),
            Err(_) => Err(SymbolicParseError {
                value: trimmed.to_string(),
            }),
        }
    }

    /// Resolve into a concrete dollar limit once an aggregate limit is known.
    pub fn resolve(self, aggregate_limit: u64) -> u64 {
        match self {
            SymbolicCoverageValue::Aggregate => aggregate_limit,
            SymbolicCoverageValue::HalfAggregate => aggregate_limit / 2,
            SymbolicCoverageValue::None => 0,
            SymbolicCoverageValue::Fixed(amount) => amount.min(aggregate_limit),
        }
    }
}

/// Resolve a symbolic override map into the concrete form `merge_overrides`
/// consumes.
pub fn resolve_overrides(
    symbolics: &BTreeMap<String, SymbolicCoverageValue>,
    aggregate_limit: u64,
) -> BTreeMap<String, i64> {
    symbolics
        .iter()
        .map(|(coverage_id, value)| {
            (coverage_id.clone(), value.resolve(aggregate_limit) as i64)
        })
        .collect()
}

/// A cell that is neither a keyword nor a dollar amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized coverage value {value:?}")]
pub struct SymbolicParseError {
    pub value: String,
}
