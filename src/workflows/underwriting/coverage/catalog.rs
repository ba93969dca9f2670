use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Policy forms offered on the program.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PolicyForm {
    Cyber,
    CyberTech,
    Tech,
}

impl PolicyForm {
    pub const fn label(self) -> &'static str {
        match self {
            PolicyForm::Cyber => "cyber",
            PolicyForm::CyberTech => "cyber_tech",
            PolicyForm::Tech => "tech",
        }
    }
}

/// How a coverage participates under a given policy form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageClass {
    /// Pays up to the full aggregate limit.
    Aggregate,
    /// Carries its own capped limit, always <= the aggregate.
    Sublimit,
    /// Not offered under the form; always resolves to zero.
    Excluded,
}

/// One entry in the coverage definition catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageDefinition {
    pub id: String,
    pub label: String,
    pub default_sublimit: u64,
    pub forms: BTreeMap<PolicyForm, CoverageClass>,
}

impl CoverageDefinition {
    pub fn class_for(&self, form: PolicyForm) -> CoverageClass {
        self.forms
            .get(&form)
            .copied()
            .unwrap_or(CoverageClass::Excluded)
    }
}

/// Versioned coverage definition catalog: labels, default sublimits, and the
/// per-form classification driving schedule resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageCatalog {
    pub version: u32,
    pub coverages: Vec<CoverageDefinition>,
    /// Amounts offered in the sublimit dropdown, smallest first.
    pub sublimit_options: Vec<u64>,
}

impl CoverageCatalog {
    pub fn definition(&self, coverage_id: &str) -> Option<&CoverageDefinition> {
        self.coverages.iter().find(|entry| entry.id == coverage_id)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        serde_json::from_reader(reader).map_err(CatalogError::Parse)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = fs::File::open(path.as_ref()).map_err(|source| CatalogError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// The catalog shipped with the engine, used when no file is configured.
    pub fn builtin() -> Self {
        fn entry(
            id: &str,
            label: &str,
            default_sublimit: u64,
            forms: &[(PolicyForm, CoverageClass)],
        ) -> CoverageDefinition {
            CoverageDefinition {
                id: id.to_string(),
                label: label.to_string(),
                default_sublimit,
                forms: forms.iter().copied().collect(),
            }
        }

        use CoverageClass::{Aggregate, Sublimit};
        use PolicyForm::{Cyber, CyberTech, Tech};

        CoverageCatalog {
            version: 1,
            coverages: vec![
                entry(
                    "network_business_interruption",
                    "Network Business Interruption",
                    0,
                    &[(Cyber, Aggregate), (CyberTech, Aggregate)],
                ),
                entry(
                    "privacy_liability",
                    "Privacy & Network Security Liability",
                    0,
                    &[(Cyber, Aggregate), (CyberTech, Aggregate)],
                ),
                entry(
                    "data_recovery",
                    "Data Recovery & Restoration",
                    0,
                    &[(Cyber, Aggregate), (CyberTech, Aggregate)],
                ),
                entry(
                    "tech_errors_omissions",
                    "Technology Errors & Omissions",
                    0,
                    &[(Tech, Aggregate), (CyberTech, Aggregate)],
                ),
                entry(
                    "media_liability",
                    "Media Liability",
                    1_000_000,
                    &[(Tech, Sublimit), (CyberTech, Sublimit)],
                ),
                entry(
                    "regulatory_defense",
                    "Regulatory Defense & Penalties",
                    1_000_000,
                    &[(Cyber, Sublimit), (CyberTech, Sublimit)],
                ),
                entry(
                    "cyber_extortion",
                    "Cyber Extortion & Ransomware",
                    500_000,
                    &[(Cyber, Sublimit), (CyberTech, Sublimit)],
                ),
                entry(
                    "social_engineering",
                    "Social Engineering Fraud",
                    250_000,
                    &[(Cyber, Sublimit), (CyberTech, Sublimit)],
                ),
                entry(
                    "reputational_harm",
                    "Reputational Harm",
                    500_000,
                    &[(Cyber, Sublimit), (CyberTech, Sublimit)],
                ),
                entry(
                    "hardware_bricking",
                    "Hardware Replacement (Bricking)",
                    250_000,
                    &[(Cyber, Sublimit), (CyberTech, Sublimit)],
                ),
                entry(
                    "pci_fines",
                    "PCI Fines & Assessments",
                    100_000,
                    &[(Cyber, Sublimit), (CyberTech, Sublimit)],
                ),
            ],
            sublimit_options: vec![0, 100_000, 250_000, 500_000, 1_000_000, 2_500_000],
        }
    }
}

/// Catalog load/parse failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("could not read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid catalog document: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Source of catalog snapshots, injected into the service so refresh and
/// versioning stay under caller control.
pub trait CatalogProvider: Send + Sync {
    fn catalog(&self) -> Result<CoverageCatalog, CatalogError>;
}

/// Provider serving one owned snapshot; refresh means constructing a new one.
#[derive(Debug, Clone)]
pub struct FixedCatalog {
    catalog: CoverageCatalog,
}

impl FixedCatalog {
    pub fn new(catalog: CoverageCatalog) -> Self {
        Self { catalog }
    }

    pub fn builtin() -> Self {
        Self::new(CoverageCatalog::builtin())
    }
}

impl CatalogProvider for FixedCatalog {
    fn catalog(&self) -> Result<CoverageCatalog, CatalogError> {
        Ok(self.catalog.clone())
    }
}

/// Provider that re-reads the catalog file on every call, so edits to the
/// configuration resource take effect without restarting callers.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogProvider for CatalogFile {
    fn catalog(&self) -> Result<CoverageCatalog, CatalogError> {
        CoverageCatalog::from_path(&self.path)
    }
}
