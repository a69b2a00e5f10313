//! Small closed vocabularies shared across the Pharmalert crates.
//!
//! Each type here is a validated enumeration: once a value exists it is one of the known
//! variants, so downstream code never has to re-check free-form strings. Strings coming from
//! outside (CLI arguments, environment, a future backend feed) go through `parse` or
//! [`FromStr`](std::str::FromStr) and are rejected with [`TypesError`] when unknown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing one of the shared vocabularies.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypesError {
    /// The value is not one of the two pharmacy responses.
    #[error("invalid response: '{0}' (expected 'available' or 'unavailable')")]
    InvalidResponse(String),
    /// The value is not a known outcome filter.
    #[error("invalid outcome filter: '{0}' (expected 'all', 'available' or 'unavailable')")]
    InvalidOutcomeFilter(String),
    /// The value is not a known feed filter.
    #[error("invalid feed filter: '{0}' (expected 'all', 'active' or 'responded')")]
    InvalidFeedFilter(String),
    /// The value is not a supported locale.
    #[error("unsupported locale: '{0}' (expected 'en' or 'fr')")]
    InvalidLocale(String),
}

/// The answer a pharmacy gives to a medication-availability request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    /// The medication is in stock.
    Available,
    /// The medication is not in stock.
    Unavailable,
}

impl Response {
    /// Parses a response from its string representation (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`TypesError::InvalidResponse`] for anything other than `available` or
    /// `unavailable`.
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(TypesError::InvalidResponse(s.to_owned())),
        }
    }

    /// Returns the string representation of this response.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Response {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Filter applied to answered requests when browsing the history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeFilter {
    /// Keep everything.
    #[default]
    All,
    /// Keep only requests answered "available".
    Available,
    /// Keep only requests answered "unavailable".
    Unavailable,
}

impl OutcomeFilter {
    /// Parses an outcome filter from its string representation (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(TypesError::InvalidOutcomeFilter(s.to_owned())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }

    /// Returns true if a request carrying `response` passes this filter.
    ///
    /// Unanswered requests (`None`) only pass [`OutcomeFilter::All`].
    pub fn matches(&self, response: Option<Response>) -> bool {
        match self {
            Self::All => true,
            Self::Available => response == Some(Response::Available),
            Self::Unavailable => response == Some(Response::Unavailable),
        }
    }
}

impl fmt::Display for OutcomeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutcomeFilter {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Which slice of the notification feed to show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFilter {
    /// Active and processed requests together, newest first.
    #[default]
    All,
    /// Only requests still awaiting a response.
    Active,
    /// Only requests that have been answered.
    Responded,
}

impl FeedFilter {
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "responded" => Ok(Self::Responded),
            _ => Err(TypesError::InvalidFeedFilter(s.to_owned())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Responded => "responded",
        }
    }
}

impl fmt::Display for FeedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedFilter {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Language used for human-readable strings (elapsed time, date headers).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// Parses a locale tag. Accepts bare language codes and region-qualified tags
    /// (`fr`, `fr-FR`, `fr_FR`, `en-GB`, ...).
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        let lowered = s.trim().to_lowercase();
        let language = lowered
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        match language {
            "en" => Ok(Self::En),
            "fr" => Ok(Self::Fr),
            _ => Err(TypesError::InvalidLocale(s.to_owned())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parse_is_case_insensitive() {
        assert_eq!(Response::parse("Available").unwrap(), Response::Available);
        assert_eq!(Response::parse(" UNAVAILABLE ").unwrap(), Response::Unavailable);
    }

    #[test]
    fn response_parse_rejects_unknown_value() {
        let err = Response::parse("maybe").unwrap_err();
        assert_eq!(err, TypesError::InvalidResponse("maybe".into()));
        assert!(err.to_string().contains("expected 'available' or 'unavailable'"));
    }

    #[test]
    fn response_serialises_lowercase() {
        let json = serde_json::to_string(&Response::Unavailable).unwrap();
        assert_eq!(json, "\"unavailable\"");

        let parsed: Response = serde_json::from_str("\"available\"").unwrap();
        assert_eq!(parsed, Response::Available);
    }

    #[test]
    fn outcome_filter_matches() {
        assert!(OutcomeFilter::All.matches(None));
        assert!(OutcomeFilter::All.matches(Some(Response::Unavailable)));
        assert!(OutcomeFilter::Available.matches(Some(Response::Available)));
        assert!(!OutcomeFilter::Available.matches(Some(Response::Unavailable)));
        assert!(!OutcomeFilter::Available.matches(None));
        assert!(!OutcomeFilter::Unavailable.matches(None));
    }

    #[test]
    fn outcome_filter_from_str() {
        let filter: OutcomeFilter = "unavailable".parse().unwrap();
        assert_eq!(filter, OutcomeFilter::Unavailable);
        assert!("responded".parse::<OutcomeFilter>().is_err());
    }

    #[test]
    fn feed_filter_parse() {
        assert_eq!(FeedFilter::parse("Active").unwrap(), FeedFilter::Active);
        assert_eq!(FeedFilter::parse("responded").unwrap(), FeedFilter::Responded);
        assert!(matches!(
            FeedFilter::parse("available"),
            Err(TypesError::InvalidFeedFilter(_))
        ));
    }

    #[test]
    fn locale_parse_accepts_region_tags() {
        assert_eq!(Locale::parse("fr-FR").unwrap(), Locale::Fr);
        assert_eq!(Locale::parse("fr_fr").unwrap(), Locale::Fr);
        assert_eq!(Locale::parse("en").unwrap(), Locale::En);
        assert_eq!(Locale::parse("EN-gb").unwrap(), Locale::En);
    }

    #[test]
    fn locale_parse_rejects_unsupported() {
        assert!(Locale::parse("de").is_err());
        assert!(Locale::parse("").is_err());
    }

    #[test]
    fn defaults() {
        assert_eq!(OutcomeFilter::default(), OutcomeFilter::All);
        assert_eq!(FeedFilter::default(), FeedFilter::All);
        assert_eq!(Locale::default(), Locale::En);
    }
}
