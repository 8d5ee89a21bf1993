//! crates/flixr_core/src/domain.rs
//!
//! Defines the pure, core data structures for the frontend.
//! Backend payloads that the frontend only passes through to views are kept as
//! opaque JSON items; the fields the core acts on are typed.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier the backend assigns to an account.
pub type UserId = i64;

/// A single entry of a backend list (a movie, a prediction, a stats row).
/// The frontend never inspects these, it only slices and forwards them.
pub type Item = serde_json::Value;

/// A signed-in user bound to one browser session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub user_id: UserId,
    pub rating_cursor: u64,
}

impl Principal {
    /// A freshly authenticated principal always starts at the head of its queue.
    pub fn new(username: impl Into<String>, user_id: UserId) -> Self {
        Self {
            username: username.into(),
            user_id,
            rating_cursor: 0,
        }
    }

    /// Moves the rating cursor by `delta`.
    ///
    /// Underflow clamps to zero. There is no upper bound besides the integer
    /// maximum; the queue length is only known to the backend.
    pub fn advance(&mut self, delta: i64) -> u64 {
        self.rating_cursor = if delta.is_negative() {
            self.rating_cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.rating_cursor.saturating_add(delta.unsigned_abs())
        };
        self.rating_cursor
    }

    pub fn reset(&mut self) {
        self.rating_cursor = 0;
    }

    pub fn seek(&mut self, position: u64) -> u64 {
        self.rating_cursor = position;
        self.rating_cursor
    }
}

/// Sign-in form data forwarded to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up form data forwarded to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub fullname: String,
    pub age: String,
    pub country: String,
}

/// The account payload returned by sign-in, sign-up, logout and status checks.
///
/// The backend is inconsistent about how it spells the id (`user_id` on
/// account objects, `userId` as a string on logout), so both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AccountStatus {
    #[serde(default, alias = "userId", deserialize_with = "lenient_user_id")]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl AccountStatus {
    /// Only an explicit "off" marks an account inactive.
    pub fn is_active(&self) -> bool {
        !matches!(self.status.as_deref(), Some(s) if s.eq_ignore_ascii_case("off"))
    }
}

fn lenient_user_id<'de, D>(deserializer: D) -> Result<Option<UserId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(UserId),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(id)) => Ok(Some(id)),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A single movie grade submitted from the rating view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingSubmission {
    pub user_id: UserId,
    pub movie_id: i64,
    pub grade: u8,
}

impl RatingSubmission {
    /// Converts the five star checkboxes into a grade.
    /// The lowest checked star wins; nothing checked is a grade of 0.
    pub fn grade_from_stars(stars: [bool; 5]) -> u8 {
        stars
            .iter()
            .position(|checked| *checked)
            .map_or(0, |index| index as u8 + 1)
    }
}

/// Orderings the backend offers for a user's recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendSort {
    #[default]
    Top10,
    Top25,
    Top50,
    Top100,
    Alphabetical,
}

impl RecommendSort {
    /// Unknown values fall back to the default, as the backend does.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "top25" => Self::Top25,
            "top50" => Self::Top50,
            "top100" => Self::Top100,
            "a~z" => Self::Alphabetical,
            _ => Self::Top10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top10 => "top10",
            Self::Top25 => "top25",
            Self::Top50 => "top50",
            Self::Top100 => "top100",
            Self::Alphabetical => "a~z",
        }
    }
}

impl fmt::Display for RecommendSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orderings for the admin movie statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminSort {
    #[default]
    Rating,
    Count,
    AtoZ,
    ZtoA,
}

impl AdminSort {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "count" => Self::Count,
            "a~z" => Self::AtoZ,
            "z~a" => Self::ZtoA,
            _ => Self::Rating,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Count => "count",
            Self::AtoZ => "a~z",
            Self::ZtoA => "z~a",
        }
    }
}

impl fmt::Display for AdminSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
