//! # Listing signals
//! One evaluation of every raw-field predicate, shared by the feature
//! extractor (numeric effects) and the report generator (explanations).
//!
//! All matching is literal, case-insensitive substring containment on the
//! lower-cased field. "pay" therefore also matches "payment"; this mirrors
//! how the classifier's training features were computed, so do not tokenize.

use serde::Serialize;

use crate::listing::RawListing;

/// Keywords counted into `suspicious_keywords` (each at most once).
pub const SUSPICIOUS_KEYWORDS: [&str; 9] = [
    "pay",
    "fee",
    "registration",
    "deposit",
    "urgent",
    "limited seats",
    "certificate",
    "guaranteed",
    "no interview",
];

/// Providers that classify an address as `free_email` for the model.
pub const FREE_EMAIL_PROVIDERS: [&str; 5] = ["gmail", "yahoo", "hotmail", "outlook", "rediff"];

/// Providers called out in the report. Narrower than the model list.
pub const REPORTED_FREE_EMAIL_PROVIDERS: [&str; 3] = ["gmail", "yahoo", "hotmail"];

pub const URGENCY_PHRASES: [&str; 3] = ["urgent", "limited seats", "hurry"];

pub const NO_SCREENING_PHRASES: [&str; 2] = ["certificate guaranteed", "no interview"];

/// Website values (lower-cased, trimmed) that mean "no website".
pub const ABSENT_WEBSITE_VALUES: [&str; 3] = ["", "not provided", "none"];

/// Contact email category, one-hot encoded for the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailType {
    FreeEmail,
    ProfessionalEmail,
    NoEmail,
}

impl EmailType {
    pub fn classify(email: &str) -> Self {
        let e = email.to_lowercase();
        if contains_any(&e, &FREE_EMAIL_PROVIDERS) {
            Self::FreeEmail
        } else if e.contains('@') {
            Self::ProfessionalEmail
        } else {
            Self::NoEmail
        }
    }
}

/// Human-readable risk indicator emitted in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    RegistrationFee,
    RemoteInternship,
    FreeEmailDomain,
    NoWebsite,
    UrgentHiring,
    NoScreening,
}

impl RiskFactor {
    /// Report order.
    pub const ALL: [RiskFactor; 6] = [
        RiskFactor::RegistrationFee,
        RiskFactor::RemoteInternship,
        RiskFactor::FreeEmailDomain,
        RiskFactor::NoWebsite,
        RiskFactor::UrgentHiring,
        RiskFactor::NoScreening,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::RegistrationFee => "Registration fee required",
            Self::RemoteInternship => "Remote internship",
            Self::FreeEmailDomain => "Free email domain",
            Self::NoWebsite => "No website provided",
            Self::UrgentHiring => "Urgent hiring mentioned",
            Self::NoScreening => "Certificate/no interview mentioned",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::RegistrationFee => "⚠️",
            Self::RemoteInternship => "📍",
            Self::FreeEmailDomain => "📧",
            Self::NoWebsite => "🌐",
            Self::UrgentHiring => "⏰",
            Self::NoScreening => "📜",
        }
    }

    fn detected(&self, s: &Signals) -> bool {
        match self {
            Self::RegistrationFee => s.has_registration_fee,
            Self::RemoteInternship => s.is_remote,
            Self::FreeEmailDomain => s.reported_free_email,
            Self::NoWebsite => !s.has_valid_website,
            Self::UrgentHiring => s.mentions_urgency,
            Self::NoScreening => s.mentions_no_screening,
        }
    }
}

/// Everything derived from a `RawListing`, computed once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signals {
    pub has_registration_fee: bool,
    pub stipend: f64,
    pub duration_months: f64,
    pub is_remote: bool,
    pub has_valid_website: bool,
    /// Matched entries of `SUSPICIOUS_KEYWORDS`, in list order.
    pub keyword_hits: Vec<&'static str>,
    pub email_type: EmailType,
    pub reported_free_email: bool,
    pub mentions_urgency: bool,
    pub mentions_no_screening: bool,
}

impl Signals {
    pub fn evaluate(raw: &RawListing) -> Self {
        let location = raw.location.to_lowercase();
        let email = raw.email.to_lowercase();
        let description = raw.description.to_lowercase();

        Self {
            has_registration_fee: raw.registration_fee == "Yes",
            stipend: raw.stipend.as_number(),
            duration_months: duration_months(&raw.duration),
            is_remote: location.contains("remote"),
            has_valid_website: !website_absent(&raw.website),
            keyword_hits: SUSPICIOUS_KEYWORDS
                .iter()
                .copied()
                .filter(|k| description.contains(k))
                .collect(),
            email_type: EmailType::classify(&raw.email),
            reported_free_email: contains_any(&email, &REPORTED_FREE_EMAIL_PROVIDERS),
            mentions_urgency: contains_any(&description, &URGENCY_PHRASES),
            mentions_no_screening: contains_any(&description, &NO_SCREENING_PHRASES),
        }
    }

    pub fn suspicious_keyword_count(&self) -> usize {
        self.keyword_hits.len()
    }

    /// Detected risk factors in report order.
    pub fn risk_factors(&self) -> Vec<RiskFactor> {
        RiskFactor::ALL
            .iter()
            .copied()
            .filter(|f| f.detected(self))
            .collect()
    }
}

/// Months-equivalent of a free-text duration.
///
/// "week" is checked before "month", so "4 weeks (1 month)" reads as 41/4.
/// Values without a unit token ("Full Time") are 0.
pub fn duration_months(duration: &str) -> f64 {
    let d = duration.to_lowercase();
    if d.contains("week") {
        digits_value(&d) / 4.0
    } else if d.contains("month") {
        digits_value(&d)
    } else {
        0.0
    }
}

/// All ASCII digits of `s` concatenated and read as one number; 0 when none.
/// Other Unicode digits ("٣") are ignored.
fn digits_value(s: &str) -> f64 {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0.0;
    }
    digits.parse::<f64>().unwrap_or(0.0)
}

pub fn website_absent(website: &str) -> bool {
    let w = website.trim().to_lowercase();
    ABSENT_WEBSITE_VALUES.contains(&w.as_str())
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
