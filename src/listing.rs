//! Raw listing input as collected by the form.
//!
//! Every field is accepted as-is; interpretation (lower-casing, digit
//! extraction, keyword scans) happens in `signals`. Missing fields
//! deserialize to empty values so partial payloads are still scored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Stipend as sent by the client. Any JSON value is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum StipendInput {
    Number(f64),
    Text(String),
    Flag(bool),
    #[default]
    Missing,
    /// Arrays and objects; scored as 0.
    Other(Value),
}

impl StipendInput {
    /// Numeric value of the stipend. Anything that does not parse is 0.
    /// No clamping: negative amounts pass through. Booleans read as 1/0.
    ///
    /// Text goes through `str::parse::<f64>`, so digit separators are not
    /// understood: "1_000" and "1,000" are 0.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Self::Flag(b) => f64::from(u8::from(*b)),
            Self::Missing | Self::Other(_) => 0.0,
        }
    }
}

/// Text field that tolerates any JSON type: null is empty, other
/// non-strings are their JSON text (`3` → "3").
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl From<f64> for StipendInput {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for StipendInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One internship listing, immutable for the lifetime of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RawListing {
    #[serde(default)]
    pub stipend: StipendInput,
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    /// "Yes" | "No"; only the exact string "Yes" counts as a fee.
    #[serde(default, deserialize_with = "lenient_text")]
    pub registration_fee: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
}

impl RawListing {
    pub fn builder() -> RawListingBuilder {
        RawListingBuilder::default()
    }
}

/// Builder used by tests and the form defaults.
#[derive(Debug, Default)]
pub struct RawListingBuilder {
    inner: RawListing,
}

impl RawListingBuilder {
    pub fn stipend(mut self, s: impl Into<StipendInput>) -> Self {
        self.inner.stipend = s.into();
        self
    }
    pub fn duration(mut self, s: impl Into<String>) -> Self {
        self.inner.duration = s.into();
        self
    }
    pub fn location(mut self, s: impl Into<String>) -> Self {
        self.inner.location = s.into();
        self
    }
    pub fn registration_fee(mut self, s: impl Into<String>) -> Self {
        self.inner.registration_fee = s.into();
        self
    }
    pub fn email(mut self, s: impl Into<String>) -> Self {
        self.inner.email = s.into();
        self
    }
    pub fn website(mut self, s: impl Into<String>) -> Self {
        self.inner.website = s.into();
        self
    }
    pub fn description(mut self, s: impl Into<String>) -> Self {
        self.inner.description = s.into();
        self
    }
    pub fn build(self) -> RawListing {
        self.inner
    }
}
