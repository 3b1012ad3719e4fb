//! Travel category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::DomainError;

/// The closed set of trip types a conversation can plan for.
///
/// Selected once when the conversation starts and never changed afterward;
/// each category drives its own required-question sequence (see
/// [`policy_for`](super::policy_for)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelCategory {
    /// Family trip with children.
    Family,
    /// Traveling with pets.
    Pets,
    /// Photography-focused destinations.
    Photo,
    /// Budget-constrained trip.
    Budget,
    /// Active/outdoor holiday.
    Active,
}

impl TravelCategory {
    /// All categories, in menu order.
    pub const ALL: [TravelCategory; 5] = [
        TravelCategory::Family,
        TravelCategory::Pets,
        TravelCategory::Photo,
        TravelCategory::Budget,
        TravelCategory::Active,
    ];

    /// Stable wire identifier for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelCategory::Family => "family",
            TravelCategory::Pets => "pets",
            TravelCategory::Photo => "photo",
            TravelCategory::Budget => "budget",
            TravelCategory::Active => "active",
        }
    }

    /// Human-readable name shown to users.
    pub fn display_name(&self) -> &'static str {
        super::policy_for(*self).display_name
    }
}

impl fmt::Display for TravelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "family" => Ok(TravelCategory::Family),
            "pets" => Ok(TravelCategory::Pets),
            "photo" => Ok(TravelCategory::Photo),
            "budget" => Ok(TravelCategory::Budget),
            "active" => Ok(TravelCategory::Active),
            other => Err(DomainError::invalid_category(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&TravelCategory::Family).unwrap();
        assert_eq!(json, "\"family\"");
    }

    #[test]
    fn parses_every_known_category() {
        for category in TravelCategory::ALL {
            let parsed: TravelCategory = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "cruise".parse::<TravelCategory>().unwrap_err();
        assert_eq!(err, DomainError::invalid_category("cruise"));
    }

    #[test]
    fn display_matches_wire_identifier() {
        assert_eq!(TravelCategory::Budget.to_string(), "budget");
    }
}
