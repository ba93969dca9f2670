use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use crate::workflows::underwriting::coverage::{SymbolicCoverageValue, SymbolicParseError};

#[derive(Debug, Deserialize)]
struct RateSheetRow {
    #[serde(rename = "Coverage")]
    coverage: String,
    #[serde(rename = "Value", default)]
    value: String,
}

pub(crate) fn parse_overrides<R: Read>(
    reader: R,
) -> Result<BTreeMap<String, SymbolicCoverageValue>, RowError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut overrides = BTreeMap::new();

    for record in csv_reader.deserialize::<RateSheetRow>() {
        let row = record?;
        let coverage_id = normalize_coverage_id(&row.coverage);
        if coverage_id.is_empty() {
            continue;
        }
        let value = SymbolicCoverageValue::parse(&row.value)?;
        overrides.insert(coverage_id, value);
    }

    Ok(overrides)
}

/// Rate sheets are authored by hand; fold labels like "Cyber Extortion" down
/// to catalog ids like "cyber_extortion".
pub(crate) fn normalize_coverage_id(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect::<String>()
        .split('_')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug)]
pub(crate) enum RowError {
    Csv(csv::Error),
    Value(SymbolicParseError),
}

impl From<csv::Error> for RowError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<SymbolicParseError> for RowError {
    fn from(err: SymbolicParseError) -> Self {
        Self::Value(err)
    }
}

#[cfg(test)]
pub(crate) fn normalize_for_tests(raw: &str) -> String {
    normalize_coverage_id(raw)
}
