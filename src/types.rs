use crate::constants::{ALL_FILTER, NO_COMMENT_FALLBACK};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single restaurant entry as found in the catalog file.
///
/// Records are identified by `name` alone; two entries with the same name are
/// treated as the same restaurant by the repeat checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub name: String,
    pub cuisine: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RestaurantRecord {
    pub fn new(name: impl Into<String>, cuisine: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cuisine: cuisine.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Comment text if present and not blank
    pub fn comment_text(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.trim().is_empty())
    }

    pub fn comment_or_fallback(&self) -> &str {
        self.comment_text().unwrap_or(NO_COMMENT_FALLBACK)
    }

    pub fn same_restaurant(&self, other: &RestaurantRecord) -> bool {
        self.name == other.name
    }
}

/// Which restaurants a pick is drawn from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterKey {
    #[default]
    All,
    Cuisine(String),
}

impl FilterKey {
    pub fn cuisine(name: impl Into<String>) -> Self {
        FilterKey::Cuisine(name.into())
    }

    pub fn matches(&self, record: &RestaurantRecord) -> bool {
        match self {
            FilterKey::All => true,
            FilterKey::Cuisine(cuisine) => record.cuisine == *cuisine,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilterKey::All => ALL_FILTER,
            FilterKey::Cuisine(cuisine) => cuisine,
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_FILTER {
            Ok(FilterKey::All)
        } else {
            Ok(FilterKey::Cuisine(s.to_string()))
        }
    }
}

impl From<&str> for FilterKey {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(key) => key,
            Err(never) => match never {},
        }
    }
}
