mod rules;

use serde::{Deserialize, Serialize};

use super::domain::{Submission, Tower, TowerId};

/// Which quote-form tab a failing field lives on. The engine never navigates
/// anywhere itself; callers translate this into UI routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteTab {
    Account,
    Broker,
    Policy,
    Tower,
    Coverages,
    Subjectivities,
}

impl QuoteTab {
    pub const fn label(self) -> &'static str {
        match self {
            QuoteTab::Account => "account",
            QuoteTab::Broker => "broker",
            QuoteTab::Policy => "policy",
            QuoteTab::Tower => "tower",
            QuoteTab::Coverages => "coverages",
            QuoteTab::Subjectivities => "subjectivities",
        }
    }
}

/// Stable identifiers for each bind readiness rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindRuleCode {
    ApplicantNameMissing,
    AccountMissing,
    AccountStreetMissing,
    AccountStateMissing,
    BrokerMissing,
    EffectiveDateMissing,
    ExpirationDateMissing,
    ExpirationNotAfterEffective,
    TowerLimitMissing,
    RetentionRequired,
    CoverageMissing,
    SoldPremiumMissing,
    OpenSubjectivities,
}

/// One itemized finding, with routing metadata for the quote form.
/// Verdicts are transient outputs, serialized for callers but never read
/// back in, so the `field` literal can stay borrowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub code: BindRuleCode,
    pub message: String,
    pub field: &'static str,
    pub tab: QuoteTab,
}

/// Verdict of the bind readiness validator. Validation failures are the
/// normal, expected output for an incomplete quote: every rule runs, nothing
/// short-circuits, so the caller can surface the full list at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub can_bind: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// Readiness of one quote tower within a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteReadiness {
    pub tower_id: TowerId,
    pub result: ValidationResult,
}

/// Submission-level readiness view: per-quote verdicts plus whether at least
/// one quote could bind today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindReadiness {
    pub any_can_bind: bool,
    pub quotes: Vec<QuoteReadiness>,
}

/// Validate one quote tower against the full bind rule set. Pure function of
/// the denormalized record the caller assembled; performs no data access.
pub fn validate_can_bind(submission: &Submission, tower: &Tower) -> ValidationResult {
    let errors = rules::collect_errors(submission, tower);
    let warnings = rules::collect_warnings(submission, tower);

    ValidationResult {
        can_bind: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Map `validate_can_bind` over every quote of a submission. No additional
/// validation logic lives here.
pub fn bind_readiness(submission: &Submission) -> BindReadiness {
    let quotes: Vec<QuoteReadiness> = submission
        .towers
        .iter()
        .map(|tower| QuoteReadiness {
            tower_id: tower.id.clone(),
            result: validate_can_bind(submission, tower),
        })
        .collect();

    BindReadiness {
        any_can_bind: quotes.iter().any(|quote| quote.result.can_bind),
        quotes,
    }
}
