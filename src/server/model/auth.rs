/// Identity of a character that just completed EVE SSO, taken from the validated JWT.
#[derive(Clone, Debug)]
pub struct SsoCharacter {
    pub character_id: i64,
    pub character_name: String,
    pub owner_hash: String,
}
