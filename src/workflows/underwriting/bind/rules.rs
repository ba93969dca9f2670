use super::{BindRuleCode, QuoteTab, ValidationIssue};
use crate::workflows::underwriting::domain::{Submission, Tower, TowerPosition};

fn issue(
    code: BindRuleCode,
    message: impl Into<String>,
    field: &'static str,
    tab: QuoteTab,
) -> ValidationIssue {
    ValidationIssue {
        code,
        message: message.into(),
        field,
        tab,
    }
}

/// Run every blocking rule; each failing rule appends exactly one error.
pub(crate) fn collect_errors(submission: &Submission, tower: &Tower) -> Vec<ValidationIssue> {
    let mut errors = Vec::new();

    if submission.applicant_name.trim().is_empty() {
        errors.push(issue(
            BindRuleCode::ApplicantNameMissing,
            "applicant name is required",
            "applicant_name",
            QuoteTab::Account,
        ));
    }

    match &submission.account {
        None => {
            errors.push(issue(
                BindRuleCode::AccountMissing,
                "submission is not linked to an account",
                "account_id",
                QuoteTab::Account,
            ));
        }
        Some(account) => {
            if account
                .street
                .as_deref()
                .map(|street| street.trim().is_empty())
                .unwrap_or(true)
            {
                errors.push(issue(
                    BindRuleCode::AccountStreetMissing,
                    "account street address is required",
                    "account_street",
                    QuoteTab::Account,
                ));
            }
            if account
                .state
                .as_deref()
                .map(|state| state.trim().is_empty())
                .unwrap_or(true)
            {
                errors.push(issue(
                    BindRuleCode::AccountStateMissing,
                    "account state is required",
                    "account_state",
                    QuoteTab::Account,
                ));
            }
        }
    }

    if !submission.broker.is_present() {
        errors.push(issue(
            BindRuleCode::BrokerMissing,
            "a broker employment or broker email is required",
            "broker",
            QuoteTab::Broker,
        ));
    }

    match (submission.effective_date, submission.expiration_date) {
        (None, None) => {
            errors.push(issue(
                BindRuleCode::EffectiveDateMissing,
                "effective date is required",
                "effective_date",
                QuoteTab::Policy,
            ));
            errors.push(issue(
                BindRuleCode::ExpirationDateMissing,
                "expiration date is required",
                "expiration_date",
                QuoteTab::Policy,
            ));
        }
        (None, Some(_)) => {
            errors.push(issue(
                BindRuleCode::EffectiveDateMissing,
                "effective date is required",
                "effective_date",
                QuoteTab::Policy,
            ));
        }
        (Some(_), None) => {
            errors.push(issue(
                BindRuleCode::ExpirationDateMissing,
                "expiration date is required",
                "expiration_date",
                QuoteTab::Policy,
            ));
        }
        (Some(effective), Some(expiration)) => {
            if expiration <= effective {
                errors.push(issue(
                    BindRuleCode::ExpirationNotAfterEffective,
                    format!("expiration date {expiration} must fall after effective date {effective}"),
                    "expiration_date",
                    QuoteTab::Policy,
                ));
            }
        }
    }

    if tower.layers.is_empty() || tower.total_limit() == 0 {
        errors.push(issue(
            BindRuleCode::TowerLimitMissing,
            "tower needs at least one layer with a positive limit",
            "layers",
            QuoteTab::Tower,
        ));
    }

    if tower.position == TowerPosition::Primary && tower.retention.unwrap_or(0) == 0 {
        errors.push(issue(
            BindRuleCode::RetentionRequired,
            "primary towers require a retention greater than zero",
            "retention",
            QuoteTab::Tower,
        ));
    }

    if !tower.coverages.includes_any_coverage() {
        errors.push(issue(
            BindRuleCode::CoverageMissing,
            "at least one coverage must carry a non-zero limit",
            "coverages",
            QuoteTab::Coverages,
        ));
    }

    errors
}

/// Non-blocking findings; these never affect `can_bind`.
pub(crate) fn collect_warnings(submission: &Submission, tower: &Tower) -> Vec<ValidationIssue> {
    let mut warnings = Vec::new();

    if tower.sold_premium.unwrap_or(0) == 0 {
        warnings.push(issue(
            BindRuleCode::SoldPremiumMissing,
            "sold premium is zero or has not been entered",
            "sold_premium",
            QuoteTab::Tower,
        ));
    }

    let open = submission
        .subjectivities
        .iter()
        .filter(|subjectivity| subjectivity.is_open())
        .count();
    if open > 0 {
        warnings.push(issue(
            BindRuleCode::OpenSubjectivities,
            format!("{open} subjectivit{} still outstanding", if open == 1 { "y" } else { "ies" }),
            "subjectivities",
            QuoteTab::Subjectivities,
        ));
    }

    warnings
}
