//! Coverage schedule resolution: symbolic configuration in, concrete dollar
//! limits out, plus the change differ endorsements rely on.

pub mod catalog;
pub mod diff;
pub mod legacy;
pub mod schedule;
pub mod symbolic;

pub use catalog::{
    CatalogError, CatalogFile, CatalogProvider, CoverageCatalog, CoverageClass,
    CoverageDefinition, FixedCatalog, PolicyForm,
};
pub use diff::{apply, diff, has_changes, CoverageChange, CoverageChangeSet};
pub use legacy::{CoverageInput, IncludeFlag};
pub use schedule::{merge_overrides, resolve, validate_sublimit, CoverageSchedule};
pub use symbolic::{resolve_overrides, SymbolicCoverageValue, SymbolicParseError};
