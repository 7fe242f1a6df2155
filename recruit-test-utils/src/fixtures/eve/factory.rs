//! ESI response models with fixed test values.

use chrono::{DateTime, Utc};
use eve_esi::model::{
    character::{Character, CharacterAffiliation},
    corporation::Corporation,
};

/// Corporation info as returned by `GET /corporations/{id}`.
pub fn mock_corporation(name: &str) -> Corporation {
    Corporation {
        alliance_id: None,
        ceo_id: 2114794365,
        creator_id: 2114794365,
        date_founded: Some(
            DateTime::parse_from_rfc3339("2024-10-07T21:43:09Z")
                .unwrap()
                .with_timezone(&Utc),
        ),
        description: None,
        home_station_id: Some(60003760),
        member_count: 21,
        name: name.to_string(),
        shares: Some(1000),
        tax_rate: 0.0,
        ticker: "TEST".to_string(),
        url: None,
        war_eligible: Some(true),
        faction_id: None,
    }
}

/// Character info as returned by `GET /characters/{id}`.
pub fn mock_character(name: &str, corporation_id: i64) -> Character {
    Character {
        alliance_id: None,
        birthday: DateTime::parse_from_rfc3339("2018-12-20T16:11:54Z")
            .unwrap()
            .with_timezone(&Utc),
        bloodline_id: 7,
        corporation_id,
        description: None,
        faction_id: None,
        gender: "male".to_string(),
        name: name.to_string(),
        race_id: 8,
        security_status: Some(0.0),
        title: None,
    }
}

pub fn mock_character_affiliation(character_id: i64, corporation_id: i64) -> CharacterAffiliation {
    CharacterAffiliation {
        character_id,
        corporation_id,
        alliance_id: None,
        faction_id: None,
    }
}
