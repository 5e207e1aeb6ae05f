use sha2::{Digest, Sha256};

use crate::domain::ClaimRecord;

/// Quality score for records with all key fields present and a positive amount.
const QUALITY_FULL: f64 = 1.0;
/// Quality score for everything else. A hard two-level flag, not a metric.
const QUALITY_DEGRADED: f64 = 0.5;

/// Derives the deterministic content hash and the per-record data-quality
/// flag used for downstream deduplication and idempotence checks.
pub struct Fingerprinter;

impl Fingerprinter {
    /// Content fingerprint over `claim_id|customer_id|claim_amount`, in that
    /// order, pipe-joined. Missing fields render as the empty string; the
    /// amount renders in its canonical decimal form. Any change to field
    /// order or formatting changes the hash.
    pub fn fingerprint(claim: &ClaimRecord) -> String {
        let mut preimage = String::new();
        preimage.push_str(claim.claim_id.as_deref().unwrap_or(""));
        preimage.push('|');
        preimage.push_str(claim.customer_id.as_deref().unwrap_or(""));
        preimage.push('|');
        if let Some(amount) = claim.claim_amount {
            preimage.push_str(&canonical_amount(amount));
        }

        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// 1.0 iff claim_id and customer_id are present and the amount is
    /// positive; 0.5 otherwise. Exactly two values, never interpolated.
    pub fn quality_score(claim: &ClaimRecord) -> f64 {
        let complete = claim.claim_id.is_some()
            && claim.customer_id.is_some()
            && claim.claim_amount.map(|a| a > 0.0).unwrap_or(false);
        if complete {
            QUALITY_FULL
        } else {
            QUALITY_DEGRADED
        }
    }
}

/// Shortest round-trip decimal rendering: `100` for 100.0, `99.5` for 99.5.
fn canonical_amount(amount: f64) -> String {
    format!("{}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClaimStatus;

    fn claim(id: Option<&str>, customer: Option<&str>, amount: Option<f64>) -> ClaimRecord {
        ClaimRecord {
            claim_id: id.map(String::from),
            customer_id: customer.map(String::from),
            store_id: None,
            description: None,
            status: ClaimStatus::Pending,
            claim_amount: amount,
            claim_date: None,
            field_issues: Vec::new(),
        }
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = claim(Some("CLM-1"), Some("CUST-1"), Some(100.0));
        let b = claim(Some("CLM-1"), Some("CUST-1"), Some(100.0));
        assert_eq!(Fingerprinter::fingerprint(&a), Fingerprinter::fingerprint(&b));
    }

    #[test]
    fn fingerprint_is_sensitive_to_each_field() {
        let base = claim(Some("CLM-1"), Some("CUST-1"), Some(100.0));
        let base_hash = Fingerprinter::fingerprint(&base);

        let changed_id = claim(Some("CLM-2"), Some("CUST-1"), Some(100.0));
        let changed_customer = claim(Some("CLM-1"), Some("CUST-2"), Some(100.0));
        let changed_amount = claim(Some("CLM-1"), Some("CUST-1"), Some(100.01));

        assert_ne!(base_hash, Fingerprinter::fingerprint(&changed_id));
        assert_ne!(base_hash, Fingerprinter::fingerprint(&changed_customer));
        assert_ne!(base_hash, Fingerprinter::fingerprint(&changed_amount));
    }

    #[test]
    fn fingerprint_handles_missing_fields() {
        let sparse = claim(None, None, None);
        // empty preimage fields still hash deterministically
        assert_eq!(
            Fingerprinter::fingerprint(&sparse),
            Fingerprinter::fingerprint(&claim(None, None, None))
        );
    }

    #[test]
    fn quality_score_is_binary() {
        assert_eq!(
            Fingerprinter::quality_score(&claim(Some("CLM-1"), Some("CUST-1"), Some(0.01))),
            1.0
        );
        assert_eq!(
            Fingerprinter::quality_score(&claim(None, Some("CUST-1"), Some(100.0))),
            0.5
        );
        assert_eq!(
            Fingerprinter::quality_score(&claim(Some("CLM-1"), None, Some(100.0))),
            0.5
        );
        // zero and negative amounts both degrade
        assert_eq!(
            Fingerprinter::quality_score(&claim(Some("CLM-1"), Some("CUST-1"), Some(0.0))),
            0.5
        );
        assert_eq!(
            Fingerprinter::quality_score(&claim(Some("CLM-1"), Some("CUST-1"), Some(-10.0))),
            0.5
        );
        assert_eq!(
            Fingerprinter::quality_score(&claim(Some("CLM-1"), Some("CUST-1"), None)),
            0.5
        );
    }
}
