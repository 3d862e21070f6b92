use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::api::CaseStatus;
use crate::error::DashboardError;

/// Worldwide statistics with the per-country breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Summary {
    pub date: DateTime<Utc>,
    pub countries: Vec<CountryStat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountryStat {
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    pub slug: String,
    #[serde(default)]
    pub new_confirmed: i64,
    pub total_confirmed: u64,
    #[serde(default)]
    pub new_deaths: i64,
    pub total_deaths: u64,
    #[serde(default)]
    pub new_recovered: i64,
    pub total_recovered: u64,
}

impl CountryStat {
    pub const fn total(&self, status: CaseStatus) -> u64 {
        match status {
            CaseStatus::Confirmed => self.total_confirmed,
            CaseStatus::Deaths => self.total_deaths,
            CaseStatus::Recovered => self.total_recovered,
        }
    }
}

/// One day of a country series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CaseEntry {
    #[serde(deserialize_with = "case_count")]
    pub cases: u64,
    pub date: DateTime<Utc>,
}

/// Daily entries for one country, oldest first.
pub type CountrySeries = Vec<CaseEntry>;

pub fn decode_summary(body: &str) -> Result<Summary, DashboardError> {
    serde_json::from_str(body).map_err(|source| DashboardError::Decode {
        document: "summary",
        source,
    })
}

pub fn decode_series(body: &str) -> Result<CountrySeries, DashboardError> {
    serde_json::from_str(body).map_err(|source| DashboardError::Decode {
        document: "country series",
        source,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Number(u64),
    Text(String),
}

// The API sends counts as strings; accept plain numbers as well.
fn case_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawCount::deserialize(deserializer)? {
        RawCount::Number(value) => Ok(value),
        RawCount::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid case count {text:?}"))),
    }
}
