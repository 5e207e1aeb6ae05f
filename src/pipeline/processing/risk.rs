use chrono::NaiveDate;
use once_cell::sync::Lazy;

use crate::domain::{ClaimRecord, ClaimStatus, Priority};

/// Fallback weight for statuses outside the enumerated table. Not an error;
/// unknown statuses are expected from upstream.
const DEFAULT_STATUS_WEIGHT: f64 = 0.5;

/// Pending claims older than this many whole days escalate.
const ESCALATION_AGE_DAYS: i64 = 7;
/// Claims above this amount escalate unconditionally.
const ESCALATION_AMOUNT: f64 = 2000.0;

/// Status weight lookup, in table form rather than inline literals.
static STATUS_WEIGHTS: Lazy<Vec<(ClaimStatus, f64)>> = Lazy::new(|| {
    vec![
        (ClaimStatus::Rejected, 0.8),
        (ClaimStatus::Pending, 0.6),
        (ClaimStatus::Approved, 0.2),
        (ClaimStatus::Closed, 0.1),
    ]
});

/// Business-risk signals derived from a standardized claim.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub priority: Priority,
    pub risk_score: f64,
    pub requires_escalation: bool,
}

/// Computes priority class, risk score, and the escalation flag. Never fails:
/// every enumerable input maps to a value, with explicit fallbacks.
pub struct RiskEngine;

impl RiskEngine {
    pub fn assess(claim: &ClaimRecord, as_of: NaiveDate) -> RiskAssessment {
        let amount = claim.claim_amount.unwrap_or(0.0);

        RiskAssessment {
            priority: Self::classify_priority(amount),
            risk_score: Self::status_weight(&claim.status) * Self::amount_multiplier(amount),
            requires_escalation: Self::requires_escalation(claim, as_of),
        }
    }

    /// Amount-only partition of [0, inf) with inclusive upper bounds:
    /// 100.0 is LOW, 100.01 is MEDIUM.
    pub fn classify_priority(amount: f64) -> Priority {
        if amount <= 100.0 {
            Priority::Low
        } else if amount <= 500.0 {
            Priority::Medium
        } else if amount <= 2000.0 {
            Priority::High
        } else {
            Priority::Critical
        }
    }

    pub fn status_weight(status: &ClaimStatus) -> f64 {
        STATUS_WEIGHTS
            .iter()
            .find(|(s, _)| s == status)
            .map(|(_, w)| *w)
            .unwrap_or(DEFAULT_STATUS_WEIGHT)
    }

    /// Strict `>` at both boundaries: 5000 takes 1.2, not 1.5.
    pub fn amount_multiplier(amount: f64) -> f64 {
        if amount > 5000.0 {
            1.5
        } else if amount > 1000.0 {
            1.2
        } else {
            1.0
        }
    }

    /// Two independent triggers, either one escalates:
    /// a pending claim aged more than seven whole days, or an amount above
    /// the critical threshold regardless of status or age.
    pub fn requires_escalation(claim: &ClaimRecord, as_of: NaiveDate) -> bool {
        let aged_pending = claim.status == ClaimStatus::Pending
            && claim
                .claim_date
                .map(|d| (as_of - d).num_days() > ESCALATION_AGE_DAYS)
                .unwrap_or(false);

        let critical_amount = claim
            .claim_amount
            .map(|a| a > ESCALATION_AMOUNT)
            .unwrap_or(false);

        aged_pending || critical_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claim(status: ClaimStatus, amount: Option<f64>, date: Option<NaiveDate>) -> ClaimRecord {
        ClaimRecord {
            claim_id: Some("CLM-1".to_string()),
            customer_id: Some("CUST-1".to_string()),
            store_id: None,
            description: None,
            status,
            claim_amount: amount,
            claim_date: date,
            field_issues: Vec::new(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn priority_boundaries_are_inclusive_below() {
        assert_eq!(RiskEngine::classify_priority(50.0), Priority::Low);
        assert_eq!(RiskEngine::classify_priority(100.0), Priority::Low);
        assert_eq!(RiskEngine::classify_priority(100.01), Priority::Medium);
        assert_eq!(RiskEngine::classify_priority(500.0), Priority::Medium);
        assert_eq!(RiskEngine::classify_priority(500.01), Priority::High);
        assert_eq!(RiskEngine::classify_priority(2000.0), Priority::High);
        assert_eq!(RiskEngine::classify_priority(2000.01), Priority::Critical);
        assert_eq!(RiskEngine::classify_priority(3000.0), Priority::Critical);
    }

    #[test]
    fn missing_amount_classifies_low() {
        let c = claim(ClaimStatus::Pending, None, None);
        assert_eq!(RiskEngine::assess(&c, today()).priority, Priority::Low);
    }

    #[test]
    fn risk_score_is_multiplicative() {
        let cases = [
            (ClaimStatus::Rejected, 5000.0, 0.8 * 1.2), // 5000 is not > 5000
            (ClaimStatus::Rejected, 5000.01, 0.8 * 1.5),
            (ClaimStatus::Pending, 1500.0, 0.6 * 1.2),
            (ClaimStatus::Pending, 1000.0, 0.6 * 1.0), // 1000 is not > 1000
            (ClaimStatus::Approved, 100.0, 0.2 * 1.0),
            (ClaimStatus::Closed, 300.0, 0.1 * 1.0),
        ];

        for (status, amount, expected) in cases {
            let c = claim(status.clone(), Some(amount), None);
            let got = RiskEngine::assess(&c, today()).risk_score;
            assert!(
                (got - expected).abs() < 0.01,
                "status {:?} amount {}: got {} expected {}",
                status,
                amount,
                got,
                expected
            );
        }
    }

    #[test]
    fn unknown_status_uses_fallback_weight() {
        let c = claim(ClaimStatus::Other("IN_REVIEW".to_string()), Some(100.0), None);
        let got = RiskEngine::assess(&c, today()).risk_score;
        assert!((got - 0.5).abs() < 0.01);
    }

    #[test]
    fn aged_pending_claim_escalates() {
        let c = claim(
            ClaimStatus::Pending,
            Some(100.0),
            Some(today() - Duration::days(8)),
        );
        assert!(RiskEngine::requires_escalation(&c, today()));
    }

    #[test]
    fn recent_pending_claim_does_not_escalate() {
        let c = claim(
            ClaimStatus::Pending,
            Some(100.0),
            Some(today() - Duration::days(3)),
        );
        assert!(!RiskEngine::requires_escalation(&c, today()));
    }

    #[test]
    fn seven_days_exactly_is_not_aged() {
        let c = claim(
            ClaimStatus::Pending,
            Some(100.0),
            Some(today() - Duration::days(7)),
        );
        assert!(!RiskEngine::requires_escalation(&c, today()));
    }

    #[test]
    fn critical_amount_escalates_regardless_of_status() {
        let c = claim(ClaimStatus::Approved, Some(2500.0), Some(today()));
        assert!(RiskEngine::requires_escalation(&c, today()));
    }

    #[test]
    fn amount_boundary_does_not_escalate() {
        let c = claim(ClaimStatus::Approved, Some(2000.0), Some(today()));
        assert!(!RiskEngine::requires_escalation(&c, today()));
    }

    #[test]
    fn missing_date_disables_age_trigger_only() {
        let pending_no_date = claim(ClaimStatus::Pending, Some(100.0), None);
        assert!(!RiskEngine::requires_escalation(&pending_no_date, today()));

        let big_no_date = claim(ClaimStatus::Pending, Some(3000.0), None);
        assert!(RiskEngine::requires_escalation(&big_no_date, today()));
    }
}
