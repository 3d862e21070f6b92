use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://ts-covid-api.vercel.app";

/// The remote API only serves country detail for these slugs.
pub const SUPPORTED_DETAIL_SLUGS: &[&str] = &["spain", "switzerland"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStatus {
    Confirmed,
    Recovered,
    Deaths,
}

impl CaseStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Recovered => "recovered",
            Self::Deaths => "deaths",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Recovered => "Recovered",
            Self::Deaths => "Deaths",
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn summary_url(&self) -> String {
        format!("{}/api/summary", self.base_url)
    }

    /// Confirmed cases use the bare country path; other statuses add a query parameter.
    pub fn country_url(&self, slug: &str, status: CaseStatus) -> String {
        let slug = urlencoding::encode(slug);
        match status {
            CaseStatus::Confirmed => format!("{}/api/country/{slug}", self.base_url),
            CaseStatus::Deaths | CaseStatus::Recovered => {
                format!("{}/api/country/{slug}?status={status}", self.base_url)
            }
        }
    }
}

pub fn is_supported_detail(slug: &str) -> bool {
    SUPPORTED_DETAIL_SLUGS.contains(&slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_summary_url_without_double_slash() {
        let api = ApiConfig::new("http://localhost:3000/");
        assert_eq!(api.summary_url(), "http://localhost:3000/api/summary");
    }

    #[test]
    fn confirmed_series_uses_bare_country_path() {
        let api = ApiConfig::default();
        assert_eq!(
            api.country_url("spain", CaseStatus::Confirmed),
            "https://ts-covid-api.vercel.app/api/country/spain"
        );
    }

    #[test]
    fn breakdown_series_add_status_parameter() {
        let api = ApiConfig::new("http://api.test");
        assert_eq!(
            api.country_url("switzerland", CaseStatus::Deaths),
            "http://api.test/api/country/switzerland?status=deaths"
        );
        assert_eq!(
            api.country_url("switzerland", CaseStatus::Recovered),
            "http://api.test/api/country/switzerland?status=recovered"
        );
    }

    #[test]
    fn slugs_are_percent_encoded() {
        let api = ApiConfig::new("http://api.test");
        assert_eq!(
            api.country_url("a b/c", CaseStatus::Confirmed),
            "http://api.test/api/country/a%20b%2Fc"
        );
    }

    #[test]
    fn only_documented_slugs_are_supported() {
        assert!(is_supported_detail("spain"));
        assert!(is_supported_detail("switzerland"));
        assert!(!is_supported_detail("france"));
    }
}
