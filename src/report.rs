//! # Report generation
//! Pure mapping `(listing, verdict, probability)` → `RiskReport`.
//!
//! Risk factors are explanatory only: they come from the same `Signals`
//! evaluation as the model features but never influence the verdict.

use serde::Serialize;
use std::fmt::Write as _;

use crate::listing::RawListing;
use crate::model::{Prediction, Verdict};
use crate::signals::{RiskFactor, Signals};

pub const NO_FACTORS_LINE: &str = "No major risk factors identified";

const HIGH_RISK_HEADLINE: &str = "HIGH RISK: Potentially Fraudulent";
const LOW_RISK_HEADLINE: &str = "LOW RISK: Likely Legitimate";
const HIGH_RISK_ADVICE: &str = "RECOMMENDATIONS: Verify company legitimacy, never pay upfront fees, check for proper selection process";
const LOW_RISK_ADVICE: &str = "RECOMMENDATIONS: Still verify company details, check reviews, ensure proper selection process";

/// Coarse reading of the risk score (percent scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    /// 0–30 %
    Low,
    /// 31–60 %
    Medium,
    /// 61–100 %
    High,
}

impl RiskBand {
    pub fn from_percent(pct: f64) -> Self {
        if pct <= 30.0 {
            Self::Low
        } else if pct <= 60.0 {
            Self::Medium
        } else {
            Self::High
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk - Likely legitimate",
            Self::Medium => "Medium Risk - Exercise caution",
            Self::High => "High Risk - Potentially fraudulent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub verdict: Verdict,
    /// Fraud probability on the 0–100 scale.
    pub probability_pct: f64,
    pub band: RiskBand,
    pub headline: String,
    /// Factor descriptions in report order; never empty.
    pub factors: Vec<String>,
    pub matched: Vec<RiskFactor>,
    pub recommendation: String,
}

impl RiskReport {
    /// Probability formatted for display, e.g. `87.3%`.
    pub fn risk_score_text(&self) -> String {
        format!("{:.1}%", self.probability_pct)
    }

    /// Markdown narrative shown in the form's result panel.
    pub fn to_markdown(&self) -> String {
        let icon = match self.verdict {
            Verdict::Fraudulent => "🛑",
            Verdict::Legitimate => "✅",
        };
        let advice_icon = match self.verdict {
            Verdict::Fraudulent => "❗",
            Verdict::Legitimate => "✅",
        };

        let mut bullets = String::new();
        if self.matched.is_empty() {
            let _ = write!(bullets, "• {NO_FACTORS_LINE}");
        } else {
            for f in &self.matched {
                let _ = writeln!(bullets, "• {} {}", f.icon(), f.label());
            }
        }

        format!(
            "\n## {icon} {}\n\n### Risk Score: {}\n*{}*\n\n### Identified Risk Factors:\n{bullets}\n\n### {advice_icon} {}\n",
            self.headline,
            self.risk_score_text(),
            self.band.description(),
            self.recommendation
        )
    }
}

/// Build a report from an already evaluated listing.
pub fn report_from_signals(signals: &Signals, prediction: Prediction) -> RiskReport {
    let probability_pct = prediction.probability * 100.0;
    let matched = signals.risk_factors();
    let factors = if matched.is_empty() {
        vec![NO_FACTORS_LINE.to_string()]
    } else {
        matched.iter().map(|f| f.label().to_string()).collect()
    };

    let (headline, recommendation) = match prediction.verdict {
        Verdict::Fraudulent => (HIGH_RISK_HEADLINE, HIGH_RISK_ADVICE),
        Verdict::Legitimate => (LOW_RISK_HEADLINE, LOW_RISK_ADVICE),
    };

    RiskReport {
        verdict: prediction.verdict,
        probability_pct,
        band: RiskBand::from_percent(probability_pct),
        headline: headline.to_string(),
        factors,
        matched,
        recommendation: recommendation.to_string(),
    }
}

/// Build the report for a raw listing and the classifier's output.
pub fn build_report(raw: &RawListing, verdict: Verdict, probability: f64) -> RiskReport {
    report_from_signals(
        &Signals::evaluate(raw),
        Prediction {
            verdict,
            probability,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_listing() -> RawListing {
        RawListing::builder()
            .stipend(15000.0)
            .duration("3 months")
            .location("Bangalore")
            .registration_fee("No")
            .email("hr@company.com")
            .website("https://www.company.com")
            .description("Work on real projects with senior developers.")
            .build()
    }

    #[test]
    fn all_six_factors_in_order() {
        let raw = RawListing::builder()
            .location("Remote")
            .registration_fee("Yes")
            .email("intern@gmail.com")
            .website("")
            .description(
                "Urgent! Limited seats. Registration fee required. Certificate guaranteed, no interview.",
            )
            .build();
        let r = build_report(&raw, Verdict::Fraudulent, 0.91);
        assert_eq!(r.matched, RiskFactor::ALL.to_vec());
        assert_eq!(r.factors.len(), 6);
        assert_eq!(r.factors[0], "Registration fee required");
        assert_eq!(r.headline, HIGH_RISK_HEADLINE);
        assert_eq!(r.band, RiskBand::High);
        assert_eq!(r.risk_score_text(), "91.0%");
    }

    #[test]
    fn clean_listing_gets_single_no_factor_line() {
        let r = build_report(&clean_listing(), Verdict::Legitimate, 0.0421);
        assert!(r.matched.is_empty());
        assert_eq!(r.factors, vec![NO_FACTORS_LINE.to_string()]);
        assert_eq!(r.headline, LOW_RISK_HEADLINE);
        assert!(r.recommendation.contains("check reviews"));
        assert_eq!(r.risk_score_text(), "4.2%");
        assert_eq!(r.band, RiskBand::Low);
    }

    #[test]
    fn headline_follows_label_not_probability() {
        // label and probability come from separate classifier calls
        let r = build_report(&clean_listing(), Verdict::Fraudulent, 0.2);
        assert_eq!(r.headline, HIGH_RISK_HEADLINE);
        assert_eq!(r.band, RiskBand::Low);
    }

    #[test]
    fn hurry_counts_as_urgency_but_certificate_alone_does_not() {
        let raw = RawListing::builder()
            .website("acme.io")
            .description("Hurry up and get your certificate")
            .build();
        let r = build_report(&raw, Verdict::Legitimate, 0.5);
        assert_eq!(r.matched, vec![RiskFactor::UrgentHiring]);
        assert_eq!(r.band, RiskBand::Medium);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(RiskBand::from_percent(30.0), RiskBand::Low);
        assert_eq!(RiskBand::from_percent(30.05), RiskBand::Medium);
        assert_eq!(RiskBand::from_percent(60.0), RiskBand::Medium);
        assert_eq!(RiskBand::from_percent(61.0), RiskBand::High);
    }

    #[test]
    fn markdown_layout() {
        let md = build_report(&clean_listing(), Verdict::Legitimate, 0.123).to_markdown();
        assert!(md.contains("## ✅ LOW RISK: Likely Legitimate"));
        assert!(md.contains("### Risk Score: 12.3%"));
        assert!(md.contains("*Low Risk - Likely legitimate*"));
        assert!(md.contains("• No major risk factors identified"));
        assert!(md.contains("### ✅ RECOMMENDATIONS:"));
    }
}
