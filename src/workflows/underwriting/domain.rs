use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::coverage::legacy::CoverageInput;
use super::coverage::PolicyForm;

/// Identifier wrapper for underwriting submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

/// Identifier wrapper for quote towers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TowerId(pub String);

/// Workflow status tracked on every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Received,
    PendingInfo,
    Quoted,
    Declined,
    RenewalExpected,
    RenewalNotReceived,
}

impl SubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionStatus::Received => "received",
            SubmissionStatus::PendingInfo => "pending_info",
            SubmissionStatus::Quoted => "quoted",
            SubmissionStatus::Declined => "declined",
            SubmissionStatus::RenewalExpected => "renewal_expected",
            SubmissionStatus::RenewalNotReceived => "renewal_not_received",
        }
    }
}

/// Commercial outcome of a submission, tracked alongside its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Pending,
    Bound,
    Lost,
    Declined,
    WaitingForResponse,
}

impl SubmissionOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionOutcome::Pending => "pending",
            SubmissionOutcome::Bound => "bound",
            SubmissionOutcome::Lost => "lost",
            SubmissionOutcome::Declined => "declined",
            SubmissionOutcome::WaitingForResponse => "waiting_for_response",
        }
    }

    /// Outcomes that must carry an explanatory reason.
    pub const fn requires_reason(self) -> bool {
        matches!(self, SubmissionOutcome::Lost | SubmissionOutcome::Declined)
    }
}

/// Raised when a status change would leave status and outcome inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum StatusConflict {
    #[error("status {status} does not permit outcome {outcome}")]
    OutcomeMismatch {
        status: &'static str,
        outcome: &'static str,
    },
    #[error("outcome {0} requires a reason")]
    MissingReason(&'static str),
}

/// Linked account snapshot, denormalized onto the submission by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub id: String,
    pub name: String,
    pub street: Option<String>,
    pub state: Option<String>,
}

/// Broker linkage: either an employment reference or a bare contact email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerContact {
    pub employment_ref: Option<String>,
    pub email: Option<String>,
}

impl BrokerContact {
    pub fn is_present(&self) -> bool {
        self.employment_ref
            .as_deref()
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false)
            || self
                .email
                .as_deref()
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false)
    }
}

/// Whether a tower sits at the bottom of the stack or attaches above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerPosition {
    Primary,
    Excess,
}

impl TowerPosition {
    pub const fn label(self) -> &'static str {
        match self {
            TowerPosition::Primary => "primary",
            TowerPosition::Excess => "excess",
        }
    }
}

/// One layer of a quote tower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerLayer {
    pub carrier: String,
    pub limit: u64,
    pub attachment: u64,
    pub premium: Option<u64>,
}

/// One priced option for a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub id: TowerId,
    pub layers: Vec<TowerLayer>,
    pub retention: Option<u64>,
    pub position: TowerPosition,
    pub policy_form: PolicyForm,
    pub aggregate_limit: u64,
    pub coverages: CoverageInput,
    pub sold_premium: Option<u64>,
    pub is_bound: bool,
}

impl Tower {
    /// Sum of layer limits across the stack.
    pub fn total_limit(&self) -> u64 {
        self.layers.iter().map(|layer| layer.limit).sum()
    }
}

/// Status of a historical claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Open,
    Closed,
}

/// One historical claim tied to a bound submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossRecord {
    pub loss_date: NaiveDate,
    pub paid: u64,
    pub reserve: u64,
    pub status: ClaimStatus,
    pub carrier: String,
}

impl LossRecord {
    pub fn incurred(&self) -> u64 {
        self.paid + self.reserve
    }
}

/// Resolution state of an outstanding bind condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectivityStatus {
    Pending,
    Received,
    Waived,
}

/// Outstanding condition that must be resolved before or at bind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subjectivity {
    pub description: String,
    pub status: SubjectivityStatus,
}

impl Subjectivity {
    pub fn is_open(&self) -> bool {
        matches!(self.status, SubjectivityStatus::Pending)
    }
}

/// One underwriting case for one applicant in one policy period, denormalized
/// with its account, broker, towers, and loss history by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub applicant_name: String,
    pub account: Option<AccountRef>,
    pub broker: BrokerContact,
    pub effective_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub annual_revenue: Option<u64>,
    pub employee_count: Option<u32>,
    pub status: SubmissionStatus,
    pub outcome: SubmissionOutcome,
    pub outcome_reason: Option<String>,
    pub prior_submission_id: Option<SubmissionId>,
    pub towers: Vec<Tower>,
    pub loss_history: Vec<LossRecord>,
    pub subjectivities: Vec<Subjectivity>,
}

impl Submission {
    /// The at-most-one tower flagged bound.
    pub fn bound_tower(&self) -> Option<&Tower> {
        self.towers.iter().find(|tower| tower.is_bound)
    }

    /// Sold premium of the bound tower, when one exists and was priced.
    pub fn bound_premium(&self) -> Option<u64> {
        self.bound_tower().and_then(|tower| tower.sold_premium)
    }

    pub fn is_bound(&self) -> bool {
        self.outcome == SubmissionOutcome::Bound || self.bound_tower().is_some()
    }

    /// Record a status change, enforcing the status/outcome invariant.
    /// Submissions are historical records; callers update, never delete.
    pub fn record_outcome(
        &mut self,
        status: SubmissionStatus,
        outcome: SubmissionOutcome,
        reason: Option<String>,
    ) -> Result<(), StatusConflict> {
        check_outcome_consistency(status, outcome)?;
        if outcome.requires_reason()
            && reason
                .as_deref()
                .map(|text| text.trim().is_empty())
                .unwrap_or(true)
        {
            return Err(StatusConflict::MissingReason(outcome.label()));
        }

        self.status = status;
        self.outcome = outcome;
        self.outcome_reason = reason;
        Ok(())
    }

    /// Verify the stored status/outcome pair against the invariant.
    pub fn outcome_consistency(&self) -> Result<(), StatusConflict> {
        check_outcome_consistency(self.status, self.outcome)
    }
}

fn check_outcome_consistency(
    status: SubmissionStatus,
    outcome: SubmissionOutcome,
) -> Result<(), StatusConflict> {
    let permitted = match status {
        SubmissionStatus::Declined => outcome == SubmissionOutcome::Declined,
        SubmissionStatus::Quoted => matches!(
            outcome,
            SubmissionOutcome::Bound
                | SubmissionOutcome::Lost
                | SubmissionOutcome::WaitingForResponse
        ),
        SubmissionStatus::Received
        | SubmissionStatus::PendingInfo
        | SubmissionStatus::RenewalExpected
        | SubmissionStatus::RenewalNotReceived => matches!(
            outcome,
            SubmissionOutcome::Pending | SubmissionOutcome::WaitingForResponse
        ),
    };

    if permitted {
        Ok(())
    } else {
        Err(StatusConflict::OutcomeMismatch {
            status: status.label(),
            outcome: outcome.label(),
        })
    }
}
