use crate::error::{FarthingError, Result};

/// Query key that carries the user identifier.
pub const USER_KEY: &str = "user_id";

/// Pick the user id out of the request's query pairs.
///
/// Pairs arrive in request order with duplicates preserved; the first
/// `user_id` wins. A missing key denies access, a non-integer value is
/// rejected. Either failure halts the render before any query is issued.
pub fn identify_user(pairs: &[(String, String)]) -> Result<i64> {
    let raw = pairs
        .iter()
        .find(|(key, _)| key == USER_KEY)
        .map(|(_, value)| value.as_str())
        .ok_or(FarthingError::MissingUser)?;
    parse_user_id(raw)
}

/// Parse a user identifier from its string form. Shared by the web
/// handler and the CLI commands so both reject the same inputs.
pub fn parse_user_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| FarthingError::InvalidUser(raw.to_string()))
}
