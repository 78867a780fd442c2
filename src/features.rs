//! # Feature extraction
//! Pure mapping `RawListing` → `FeatureVector`, laid out exactly as the
//! model's persisted feature-name list dictates.
//!
//! Unknown names requested by the model are filled with 0; computed fields
//! the model does not ask for are dropped. No error ever escapes: unparseable
//! input has already been defaulted to 0 by `signals`.

use serde::Serialize;

use crate::listing::RawListing;
use crate::signals::{EmailType, Signals};

pub const HAS_REGISTRATION_FEE: &str = "has_registration_fee";
pub const STIPEND_NUMERIC: &str = "stipend_numeric";
pub const DURATION_MONTHS: &str = "duration_months";
pub const IS_REMOTE: &str = "is_remote";
pub const HAS_VALID_WEBSITE: &str = "has_valid_website";
pub const SUSPICIOUS_KEYWORDS: &str = "suspicious_keywords";
pub const EMAIL_TYPE_FREE: &str = "email_type_free_email";
pub const EMAIL_TYPE_PROFESSIONAL: &str = "email_type_professional_email";

/// Fields the extractor knows how to compute, in training order.
pub const KNOWN_FEATURES: [&str; 8] = [
    HAS_REGISTRATION_FEE,
    STIPEND_NUMERIC,
    DURATION_MONTHS,
    IS_REMOTE,
    HAS_VALID_WEBSITE,
    SUSPICIOUS_KEYWORDS,
    EMAIL_TYPE_FREE,
    EMAIL_TYPE_PROFESSIONAL,
];

/// Ordered (name, value) pairs consumed by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Value of a known feature for the given signals; `None` for names the
/// extractor does not compute.
fn computed_value(name: &str, s: &Signals) -> Option<f64> {
    let v = match name {
        HAS_REGISTRATION_FEE => flag(s.has_registration_fee),
        STIPEND_NUMERIC => s.stipend,
        DURATION_MONTHS => s.duration_months,
        IS_REMOTE => flag(s.is_remote),
        HAS_VALID_WEBSITE => flag(s.has_valid_website),
        SUSPICIOUS_KEYWORDS => s.suspicious_keyword_count() as f64,
        EMAIL_TYPE_FREE => flag(s.email_type == EmailType::FreeEmail),
        EMAIL_TYPE_PROFESSIONAL => flag(s.email_type == EmailType::ProfessionalEmail),
        _ => return None,
    };
    Some(v)
}

/// Build the feature vector for an already evaluated listing.
pub fn vector_from_signals<S: AsRef<str>>(signals: &Signals, feature_names: &[S]) -> FeatureVector {
    let names: Vec<String> = feature_names.iter().map(|n| n.as_ref().to_string()).collect();
    let values = names
        .iter()
        .map(|n| computed_value(n, signals).unwrap_or(0.0))
        .collect();
    FeatureVector { names, values }
}

/// Extract the model's feature vector from a raw listing.
pub fn extract<S: AsRef<str>>(raw: &RawListing, feature_names: &[S]) -> FeatureVector {
    vector_from_signals(&Signals::evaluate(raw), feature_names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scam_listing() -> RawListing {
        RawListing::builder()
            .stipend(0.0)
            .duration("2 weeks")
            .location("Remote")
            .registration_fee("Yes")
            .email("intern@gmail.com")
            .website("")
            .description(
                "Urgent! Limited seats. Registration fee required. Certificate guaranteed, no interview.",
            )
            .build()
    }

    #[test]
    fn scam_listing_features() {
        let v = extract(&scam_listing(), &KNOWN_FEATURES);
        assert_eq!(v.get(HAS_REGISTRATION_FEE), Some(1.0));
        assert_eq!(v.get(STIPEND_NUMERIC), Some(0.0));
        assert_eq!(v.get(DURATION_MONTHS), Some(0.5));
        assert_eq!(v.get(IS_REMOTE), Some(1.0));
        assert_eq!(v.get(HAS_VALID_WEBSITE), Some(0.0));
        assert!(v.get(SUSPICIOUS_KEYWORDS).unwrap() >= 5.0);
        assert_eq!(v.get(EMAIL_TYPE_FREE), Some(1.0));
        assert_eq!(v.get(EMAIL_TYPE_PROFESSIONAL), Some(0.0));
    }

    #[test]
    fn order_follows_requested_names() {
        let names = ["is_remote", "unknown_feature", "stipend_numeric"];
        let raw = RawListing::builder().stipend("1200").location("remote-first").build();
        let v = extract(&raw, &names);
        assert_eq!(v.names(), &["is_remote", "unknown_feature", "stipend_numeric"]);
        assert_eq!(v.values(), &[1.0, 0.0, 1200.0]);
    }

    #[test]
    fn unrequested_fields_are_dropped() {
        let v = extract(&scam_listing(), &[DURATION_MONTHS]);
        assert_eq!(v.len(), 1);
        assert_eq!(v.get(HAS_REGISTRATION_FEE), None);
    }

    #[test]
    fn email_one_hot_pairs() {
        let pair = |email: &str| {
            let v = extract(
                &RawListing::builder().email(email).build(),
                &[EMAIL_TYPE_FREE, EMAIL_TYPE_PROFESSIONAL],
            );
            (v.values()[0], v.values()[1])
        };
        assert_eq!(pair("hr@gmail.com"), (1.0, 0.0));
        assert_eq!(pair("hr@acme.io"), (0.0, 1.0));
        assert_eq!(pair("no-at-sign"), (0.0, 0.0));
    }

    #[test]
    fn empty_name_list_gives_empty_vector() {
        let names: [&str; 0] = [];
        assert!(extract(&scam_listing(), &names).is_empty());
    }
}
