//! Player model.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::field::Field;
use crate::models::{Entity, EntityKind};

/// A squad member, as listed by `teams/{id}/players`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Player ID (not reported by every API version).
    #[serde(default)]
    pub id: Field<u64>,

    /// Full name.
    #[serde(default)]
    pub name: Field<String>,

    /// Playing position (e.g., "Keeper", "Centre-Back").
    #[serde(default)]
    pub position: Field<String>,

    /// Shirt number.
    #[serde(default)]
    pub jersey_number: Field<u32>,

    #[serde(default)]
    pub date_of_birth: Field<NaiveDate>,

    #[serde(default)]
    pub nationality: Field<String>,

    /// Last day of the current contract.
    #[serde(default)]
    pub contract_until: Field<NaiveDate>,

    /// Market value as reported (e.g., "25,000,000 €").
    #[serde(default)]
    pub market_value: Field<String>,
}

impl Player {
    /// Age in whole years on the given day.
    pub fn age_on(&self, day: NaiveDate) -> Option<u32> {
        self.date_of_birth.value().and_then(|dob| day.years_since(*dob))
    }

    /// Whether the contract has run out by the given day.
    pub fn contract_expired_on(&self, day: NaiveDate) -> Option<bool> {
        self.contract_until.value().map(|until| *until < day)
    }
}

impl Entity for Player {
    const KIND: EntityKind = EntityKind::Player;

    fn id(&self) -> Option<u64> {
        self.id.value().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_deserialize() {
        let json = r#"{
            "name": "David De Gea",
            "position": "Keeper",
            "jerseyNumber": 1,
            "dateOfBirth": "1990-11-07",
            "nationality": "Spain",
            "contractUntil": "2019-06-30",
            "marketValue": null
        }"#;
        let player: Player = serde_json::from_str(json).expect("Failed to deserialize");

        assert!(player.id.is_absent());
        assert_eq!(player.name.as_deref(), Some("David De Gea"));
        assert_eq!(player.jersey_number, Field::Value(1));
        assert!(player.market_value.is_null());
        assert_eq!(
            player.date_of_birth,
            Field::Value(NaiveDate::from_ymd_opt(1990, 11, 7).unwrap())
        );
    }

    #[test]
    fn test_player_minimal() {
        let player: Player = serde_json::from_str(r#"{}"#).expect("Failed to deserialize");
        assert!(player.name.is_absent());
        assert!(player.position.is_absent());
        assert!(player.date_of_birth.is_absent());
        assert_eq!(player.id(), None);
    }

    #[test]
    fn test_player_bad_date_fails() {
        let result: Result<Player, _> = serde_json::from_str(r#"{"dateOfBirth": "yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_player_age_and_contract() {
        let player: Player = serde_json::from_str(
            r#"{"dateOfBirth": "1990-11-07", "contractUntil": "2019-06-30"}"#,
        )
        .expect("Failed to deserialize");

        let day = NaiveDate::from_ymd_opt(2017, 11, 6).unwrap();
        assert_eq!(player.age_on(day), Some(26));
        assert_eq!(player.contract_expired_on(day), Some(false));

        let later = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(player.age_on(later), Some(29));
        assert_eq!(player.contract_expired_on(later), Some(true));
    }
}
