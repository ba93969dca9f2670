//! Batch rate-sheet configuration. A rate sheet captures coverage values
//! symbolically ("aggregate", "50%", a dollar amount) before any concrete
//! per-option aggregate limit exists; resolution happens later, once per
//! quote option.

mod parser;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::workflows::underwriting::coverage::{
    merge_overrides, resolve, resolve_overrides, CoverageCatalog, CoverageSchedule, PolicyForm,
    SymbolicCoverageValue, SymbolicParseError,
};

#[derive(Debug)]
pub enum RateSheetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Value(SymbolicParseError),
}

impl std::fmt::Display for RateSheetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateSheetImportError::Io(err) => write!(f, "failed to read rate sheet: {}", err),
            RateSheetImportError::Csv(err) => write!(f, "invalid rate sheet CSV data: {}", err),
            RateSheetImportError::Value(err) => {
                write!(f, "could not interpret rate sheet cell: {}", err)
            }
        }
    }
}

impl std::error::Error for RateSheetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RateSheetImportError::Io(err) => Some(err),
            RateSheetImportError::Csv(err) => Some(err),
            RateSheetImportError::Value(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RateSheetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<parser::RowError> for RateSheetImportError {
    fn from(err: parser::RowError) -> Self {
        match err {
            parser::RowError::Csv(err) => Self::Csv(err),
            parser::RowError::Value(err) => Self::Value(err),
        }
    }
}

/// Symbolic coverage overrides for one policy form, awaiting an aggregate
/// limit per option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSheet {
    pub policy_form: PolicyForm,
    pub overrides: BTreeMap<String, SymbolicCoverageValue>,
}

impl RateSheet {
    /// Resolve against a concrete aggregate limit: symbolic values become
    /// dollars, then merge over the form's default schedule. Override ids the
    /// catalog does not know are dropped by the merge.
    pub fn resolve(&self, catalog: &CoverageCatalog, aggregate_limit: u64) -> CoverageSchedule {
        let base = resolve(catalog, self.policy_form, aggregate_limit);
        let concrete = resolve_overrides(&self.overrides, aggregate_limit);
        merge_overrides(&base, &concrete)
    }
}

pub struct RateSheetImporter;

impl RateSheetImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        policy_form: PolicyForm,
    ) -> Result<RateSheet, RateSheetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, policy_form)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        policy_form: PolicyForm,
    ) -> Result<RateSheet, RateSheetImportError> {
        let overrides = parser::parse_overrides(reader)?;
        Ok(RateSheet {
            policy_form,
            overrides,
        })
    }
}
