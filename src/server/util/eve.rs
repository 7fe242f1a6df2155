//! EVE Online identifiers, limits and image links.

use std::collections::HashSet;

/// ESI accepts at most 1000 character IDs per `/characters/affiliation/` request.
pub const ESI_AFFILIATION_REQUEST_LIMIT: usize = 1000;

/// The Order of Autumn, the nullsec division.
pub const AUTUMN_NULLSEC_CORPORATION_ID: i64 = 98785281;
pub const AUTUMN_NULLSEC_CORPORATION_NAME: &str = "The Order of Autumn";

/// Autumn Highsec Division.
pub const AUTUMN_HIGHSEC_CORPORATION_ID: i64 = 98784256;
pub const AUTUMN_HIGHSEC_CORPORATION_NAME: &str = "Autumn Highsec Division";

/// Corporations whose members count as having joined.
pub const AUTUMN_CORPORATION_IDS: [i64; 2] =
    [AUTUMN_NULLSEC_CORPORATION_ID, AUTUMN_HIGHSEC_CORPORATION_ID];

pub fn is_autumn_corporation(corporation_id: i64) -> bool {
    AUTUMN_CORPORATION_IDS.contains(&corporation_id)
}

pub fn character_portrait_url(character_id: i64) -> String {
    format!(
        "https://images.evetech.net/characters/{}/portrait?size=32",
        character_id
    )
}

pub fn corporation_logo_url(corporation_id: i64) -> String {
    format!(
        "https://images.evetech.net/corporations/{}/logo?size=32",
        corporation_id
    )
}

pub fn character_zkillboard_url(character_id: i64) -> String {
    format!("https://zkillboard.com/character/{}/", character_id)
}

/// Drops IDs outside the documented character ranges and duplicates, keeping first-seen order.
///
/// A single invalid ID makes ESI reject an entire affiliation request.
pub fn sanitize_character_ids(character_ids: Vec<i64>) -> Vec<i64> {
    let mut seen = HashSet::new();

    character_ids
        .into_iter()
        .filter(|&id| is_valid_character_id(id) && seen.insert(id))
        .collect()
}

/// Validates whether a character ID falls within official EVE Online character ID ranges.
///
/// - `90,000,000 - 97,999,999`: characters created between 2010-11-03 and 2016-05-30
/// - `100,000,000 - 2,099,999,999`: characters created before 2010-11-03
/// - `2,100,000,000 - 2,111,999,999`: EVE / DUST characters created after 2016-05-30
/// - `2,112,000,000 - 2,129,999,999`: characters created after 2016-05-30
pub fn is_valid_character_id(id: i64) -> bool {
    matches!(
        id,
        90_000_000..=97_999_999
            | 100_000_000..=2_099_999_999
            | 2_100_000_000..=2_111_999_999
            | 2_112_000_000..=2_129_999_999
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_range_bounds() {
        let input = vec![
            90_000_000,
            97_999_999,
            100_000_000,
            2_099_999_999,
            2_100_000_000,
            2_111_999_999,
            2_112_000_000,
            2_129_999_999,
        ];

        assert_eq!(sanitize_character_ids(input.clone()), input);
    }

    #[test]
    fn sanitize_drops_out_of_range_ids() {
        let input = vec![1, 89_999_999, 98_000_000, 99_999_999, 2_130_000_000];

        assert_eq!(sanitize_character_ids(input), Vec::<i64>::new());
    }

    #[test]
    fn sanitize_drops_duplicates_in_order() {
        let input = vec![2_114_000_002, 95_000_000, 2_114_000_002, 99_000_000, 95_000_000];

        assert_eq!(
            sanitize_character_ids(input),
            vec![2_114_000_002, 95_000_000]
        );
    }

    #[test]
    fn recognises_autumn_corporations() {
        assert!(is_autumn_corporation(98785281));
        assert!(is_autumn_corporation(98784256));
        assert!(!is_autumn_corporation(1000001));
    }
}
