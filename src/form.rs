//! Form metadata served to the UI: enumerated choices, default listing and
//! the guidance text shown next to the result.

use serde::Serialize;

use crate::listing::RawListing;

pub const DURATION_CHOICES: [&str; 9] = [
    "1 week", "2 weeks", "1 month", "2 months", "3 months", "4 months", "5 months", "6 months",
    "Full Time",
];

pub const LOCATION_CHOICES: [&str; 9] = [
    "Remote",
    "Bangalore",
    "Delhi",
    "Mumbai",
    "Hyderabad",
    "Chennai",
    "Pune",
    "Gurgaon",
    "Hybrid",
];

pub const REGISTRATION_FEE_CHOICES: [&str; 2] = ["Yes", "No"];

/// Stipend input range (monthly, ₹).
pub const STIPEND_MIN: f64 = 0.0;
pub const STIPEND_MAX: f64 = 100_000.0;
pub const STIPEND_STEP: f64 = 1_000.0;

pub const COMMON_FRAUD_INDICATORS: [&str; 6] = [
    "Registration/enrollment fees",
    "Free email domains (Gmail, Yahoo, Hotmail)",
    "No proper company website",
    "\"Urgent hiring\" or \"Limited seats\"",
    "\"Certificate guaranteed\" or \"No interview required\"",
    "Unrealistically high stipends for short durations",
];

pub const SAFETY_CHECKLIST: [&str; 7] = [
    "Research the company on LinkedIn and Google",
    "Verify email domain matches company website",
    "Never pay money for internships",
    "Look for proper selection process (interviews/tests)",
    "Check employee reviews on Glassdoor",
    "Contact via official company channels",
    "Trust your instincts",
];

/// Pre-filled values of a fresh form.
pub fn default_listing() -> RawListing {
    RawListing::builder()
        .stipend(15000.0)
        .duration("3 months")
        .location("Remote")
        .registration_fee("No")
        .email("hr@company.com")
        .website("https://www.company.com")
        .description(
            "Work on real projects with senior developers. Learn cutting-edge technologies. \
             Interview process includes technical assessment.",
        )
        .build()
}

#[derive(Debug, Clone, Serialize)]
pub struct StipendRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormSpec {
    pub durations: Vec<&'static str>,
    pub locations: Vec<&'static str>,
    pub registration_fee: Vec<&'static str>,
    pub stipend: StipendRange,
    pub defaults: RawListing,
    pub indicators: Vec<&'static str>,
    pub checklist: Vec<&'static str>,
}

impl FormSpec {
    pub fn current() -> Self {
        Self {
            durations: DURATION_CHOICES.to_vec(),
            locations: LOCATION_CHOICES.to_vec(),
            registration_fee: REGISTRATION_FEE_CHOICES.to_vec(),
            stipend: StipendRange {
                min: STIPEND_MIN,
                max: STIPEND_MAX,
                step: STIPEND_STEP,
            },
            defaults: default_listing(),
            indicators: COMMON_FRAUD_INDICATORS.to_vec(),
            checklist: SAFETY_CHECKLIST.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{duration_months, Signals};

    #[test]
    fn every_duration_choice_parses_as_expected() {
        let months: Vec<f64> = DURATION_CHOICES.iter().map(|d| duration_months(d)).collect();
        assert_eq!(months, vec![0.25, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0]);
    }

    #[test]
    fn default_listing_has_no_red_flags_besides_remote() {
        let s = Signals::evaluate(&default_listing());
        assert!(s.is_remote);
        assert!(s.has_valid_website);
        assert!(!s.has_registration_fee);
        assert!(s.keyword_hits.is_empty());
    }
}
