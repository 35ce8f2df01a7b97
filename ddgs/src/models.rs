//! Data models for search options and results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SearchError;

/// A single text search result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Result URL.
    #[serde(rename = "href")]
    pub url: String,
    /// Result snippet.
    #[serde(rename = "body")]
    pub snippet: String,
}

impl SearchResult {
    /// Creates a new search result.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

/// Safe search level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    /// Strict filtering.
    On,
    /// Moderate filtering.
    #[default]
    Moderate,
    /// No filtering.
    Off,
}

impl FromStr for SafeSearch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "on" => Ok(Self::On),
            "moderate" => Ok(Self::Moderate),
            "off" => Ok(Self::Off),
            other => Err(format!("invalid safesearch value '{other}'")),
        }
    }
}

/// Time range filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeLimit {
    /// Past day.
    Day,
    /// Past week.
    Week,
    /// Past month.
    Month,
    /// Past year.
    Year,
    /// No time restriction.
    #[default]
    None,
}

impl TimeLimit {
    /// The upstream `df` parameter value, absent for [`TimeLimit::None`].
    #[must_use]
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            Self::Day => Some("d"),
            Self::Week => Some("w"),
            Self::Month => Some("m"),
            Self::Year => Some("y"),
            Self::None => None,
        }
    }
}

impl FromStr for TimeLimit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "d" | "day" => Ok(Self::Day),
            "w" | "week" => Ok(Self::Week),
            "m" | "month" => Ok(Self::Month),
            "y" | "year" => Ok(Self::Year),
            "none" => Ok(Self::None),
            other => Err(format!("invalid timelimit value '{other}'")),
        }
    }
}

/// Search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Structured `d.js` feed, paged by fixed offsets.
    #[default]
    Api,
    /// Server-rendered HTML, paged by hidden form fields.
    Html,
    /// The lite frontend. Recognised but not implemented.
    Lite,
}

impl Backend {
    /// The backend name as accepted by [`FromStr`].
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Html => "html",
            Self::Lite => "lite",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api" => Ok(Self::Api),
            "html" => Ok(Self::Html),
            "lite" => Ok(Self::Lite),
            other => Err(SearchError::UnknownBackend(other.to_string())),
        }
    }
}

/// Options for a text search. Unset fields take defaults when the search runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchOptions {
    /// Region code such as `wt-wt`, `us-en` or `uk-en`.
    #[serde(default)]
    pub region: Option<String>,
    /// Safe search level.
    #[serde(default)]
    pub safesearch: Option<SafeSearch>,
    /// Time range filter.
    #[serde(default)]
    pub timelimit: Option<TimeLimit>,
    /// Backend to query.
    #[serde(default)]
    pub backend: Option<Backend>,
}

impl SearchOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the safe search level.
    #[must_use]
    pub fn with_safesearch(mut self, safesearch: SafeSearch) -> Self {
        self.safesearch = Some(safesearch);
        self
    }

    /// Sets the time range filter.
    #[must_use]
    pub fn with_timelimit(mut self, timelimit: TimeLimit) -> Self {
        self.timelimit = Some(timelimit);
        self
    }

    /// Sets the backend.
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Applies defaults, producing the options a search call runs with.
    #[must_use]
    pub fn resolve(&self) -> ResolvedOptions {
        ResolvedOptions {
            region: self
                .region
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            safesearch: self.safesearch.unwrap_or_default(),
            timelimit: self.timelimit.unwrap_or_default(),
            backend: self.backend.unwrap_or_default(),
        }
    }
}

/// Region used when none is given.
pub const DEFAULT_REGION: &str = "wt-wt";

/// Search options with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Region code.
    pub region: String,
    /// Safe search level.
    pub safesearch: SafeSearch,
    /// Time range filter.
    pub timelimit: TimeLimit,
    /// Backend to query.
    pub backend: Backend,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        SearchOptions::default().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_defaults() {
        let resolved = SearchOptions::new().resolve();
        assert_eq!(
            resolved,
            ResolvedOptions {
                region: "wt-wt".to_string(),
                safesearch: SafeSearch::Moderate,
                timelimit: TimeLimit::None,
                backend: Backend::Api,
            }
        );
    }

    #[test]
    fn test_resolve_keeps_explicit_values() {
        let resolved = SearchOptions::new()
            .with_region("uk-en")
            .with_safesearch(SafeSearch::Off)
            .with_timelimit(TimeLimit::Week)
            .with_backend(Backend::Html)
            .resolve();

        assert_eq!(resolved.region, "uk-en");
        assert_eq!(resolved.safesearch, SafeSearch::Off);
        assert_eq!(resolved.timelimit, TimeLimit::Week);
        assert_eq!(resolved.backend, Backend::Html);
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("api".parse::<Backend>().unwrap(), Backend::Api);
        assert_eq!("html".parse::<Backend>().unwrap(), Backend::Html);
        assert_eq!("lite".parse::<Backend>().unwrap(), Backend::Lite);

        let err = "bogus".parse::<Backend>().unwrap_err();
        assert!(matches!(err, SearchError::UnknownBackend(name) if name == "bogus"));
    }

    #[test]
    fn test_timelimit_params() {
        assert_eq!(TimeLimit::Day.as_param(), Some("d"));
        assert_eq!(TimeLimit::Year.as_param(), Some("y"));
        assert_eq!(TimeLimit::None.as_param(), None);
        assert_eq!("w".parse::<TimeLimit>().unwrap(), TimeLimit::Week);
        assert!("fortnight".parse::<TimeLimit>().is_err());
    }

    #[test]
    fn test_result_serializes_with_upstream_names() {
        let result = SearchResult::new("Rust", "https://www.rust-lang.org/", "A language");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Rust",
                "href": "https://www.rust-lang.org/",
                "body": "A language",
            })
        );
    }

    #[test]
    fn test_options_deserialize() {
        let options: SearchOptions =
            serde_json::from_str(r#"{"safesearch": "on", "backend": "html"}"#).unwrap();
        assert_eq!(options.safesearch, Some(SafeSearch::On));
        assert_eq!(options.backend, Some(Backend::Html));
        assert_eq!(options.region, None);
    }
}
