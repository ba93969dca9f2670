use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::underwriting::coverage::{
    CoverageCatalog, CoverageInput, FixedCatalog, PolicyForm,
};
use crate::workflows::underwriting::domain::{
    AccountRef, BrokerContact, ClaimStatus, LossRecord, Subjectivity, SubjectivityStatus,
    Submission, SubmissionId, SubmissionOutcome, SubmissionStatus, Tower, TowerId, TowerLayer,
    TowerPosition,
};
use crate::workflows::underwriting::repository::{StoreError, SubmissionStore};
use crate::workflows::underwriting::service::UnderwritingService;

pub(super) fn catalog() -> CoverageCatalog {
    CoverageCatalog::builtin()
}

pub(super) fn limits(entries: &[(&str, u64)]) -> BTreeMap<String, u64> {
    entries
        .iter()
        .map(|(id, limit)| (id.to_string(), *limit))
        .collect()
}

pub(super) fn account() -> AccountRef {
    AccountRef {
        id: "acct-301".to_string(),
        name: "Prairie Analytics LLC".to_string(),
        street: Some("212 Court Ave".to_string()),
        state: Some("IA".to_string()),
    }
}

pub(super) fn broker() -> BrokerContact {
    BrokerContact {
        employment_ref: Some("emp-44".to_string()),
        email: Some("broker@midwestins.example".to_string()),
    }
}

pub(super) fn primary_tower(id: &str) -> Tower {
    Tower {
        id: TowerId(id.to_string()),
        layers: vec![TowerLayer {
            carrier: "Argo Re".to_string(),
            limit: 3_000_000,
            attachment: 0,
            premium: Some(48_000),
        }],
        retention: Some(25_000),
        position: TowerPosition::Primary,
        policy_form: PolicyForm::Cyber,
        aggregate_limit: 3_000_000,
        coverages: CoverageInput::Limits {
            aggregate_coverages: limits(&[("privacy_liability", 3_000_000)]),
            sublimit_coverages: limits(&[("cyber_extortion", 500_000)]),
        },
        sold_premium: Some(52_000),
        is_bound: false,
    }
}

/// A quote missing every required field, one violation per rule.
pub(super) fn empty_tower(id: &str) -> Tower {
    Tower {
        id: TowerId(id.to_string()),
        layers: Vec::new(),
        retention: None,
        position: TowerPosition::Primary,
        policy_form: PolicyForm::Cyber,
        aggregate_limit: 0,
        coverages: CoverageInput::Missing,
        sold_premium: None,
        is_bound: false,
    }
}

pub(super) fn complete_submission(id: &str) -> Submission {
    Submission {
        id: SubmissionId(id.to_string()),
        applicant_name: "Prairie Analytics LLC".to_string(),
        account: Some(account()),
        broker: broker(),
        effective_date: NaiveDate::from_ymd_opt(2026, 1, 1),
        expiration_date: NaiveDate::from_ymd_opt(2027, 1, 1),
        annual_revenue: Some(8_000_000),
        employee_count: Some(60),
        status: SubmissionStatus::Quoted,
        outcome: SubmissionOutcome::WaitingForResponse,
        outcome_reason: None,
        prior_submission_id: None,
        towers: vec![primary_tower(&format!("{id}-t1"))],
        loss_history: Vec::new(),
        subjectivities: vec![Subjectivity {
            description: "Signed application".to_string(),
            status: SubjectivityStatus::Received,
        }],
    }
}

pub(super) fn empty_submission(id: &str) -> Submission {
    Submission {
        id: SubmissionId(id.to_string()),
        applicant_name: String::new(),
        account: None,
        broker: BrokerContact::default(),
        effective_date: None,
        expiration_date: None,
        annual_revenue: None,
        employee_count: None,
        status: SubmissionStatus::Received,
        outcome: SubmissionOutcome::Pending,
        outcome_reason: None,
        prior_submission_id: None,
        towers: vec![empty_tower(&format!("{id}-t1"))],
        loss_history: Vec::new(),
        subjectivities: Vec::new(),
    }
}

/// A historical bound year with the given sold premium and loss records.
pub(super) fn bound_submission(
    id: &str,
    premium: u64,
    losses: Vec<LossRecord>,
    prior: Option<&str>,
) -> Submission {
    let mut submission = complete_submission(id);
    submission.status = SubmissionStatus::Quoted;
    submission.outcome = SubmissionOutcome::Bound;
    submission.prior_submission_id = prior.map(|prior_id| SubmissionId(prior_id.to_string()));
    submission.towers[0].is_bound = true;
    submission.towers[0].sold_premium = Some(premium);
    submission.loss_history = losses;
    submission
}

pub(super) fn loss(paid: u64, reserve: u64) -> LossRecord {
    LossRecord {
        loss_date: NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date"),
        paid,
        reserve,
        status: ClaimStatus::Open,
        carrier: "Argo Re".to_string(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<SubmissionId, Submission>>>,
}

impl MemoryStore {
    pub(super) fn insert(&self, submission: Submission) {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .insert(submission.id.clone(), submission);
    }
}

impl SubmissionStore for MemoryStore {
    fn fetch(&self, id: &SubmissionId) -> Result<Option<Submission>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableStore;

impl SubmissionStore for UnavailableStore {
    fn fetch(&self, _id: &SubmissionId) -> Result<Option<Submission>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    UnderwritingService<MemoryStore, FixedCatalog>,
    Arc<MemoryStore>,
) {
    let store = Arc::new(MemoryStore::default());
    let service = UnderwritingService::new(store.clone(), Arc::new(FixedCatalog::builtin()));
    (service, store)
}
