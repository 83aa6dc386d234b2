use settree::{Key, PlainMap, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidAssignment(String),

    #[error("Key cannot be empty in assignment '{0}'.")]
    EmptyKey(String),
}

/// Splits `KEY=VALUE` at the first `=`. Whitespace around the key is ignored.
pub fn parse_assignment(assignment: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = assignment
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidAssignment(assignment.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey(assignment.to_string()));
    }
    Ok((key, value))
}

/// Interprets a command-line value as a TOML literal, falling back to a bare string.
///
/// `5` is an integer, `0.5` a float, `true` a boolean, `[1, 2]` a list and `{ a = 1 }`
/// a node, and a datetime stays a string. Anything that does not parse (e.g. `energy`) is taken verbatim.
pub fn parse_value(text: &str) -> Value {
    let trimmed = text.trim();
    let document = format!("value = {}", trimmed);
    toml::from_str::<PlainMap>(&document)
        .ok()
        .and_then(|mut map| map.remove(&Key::from("value")))
        .map_or_else(|| Value::from(text), Value::from)
}
