use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A key of a [`Settings`](super::settings::Settings) node.
///
/// Keys are usually strings, but integer keys are allowed as well (configuration
/// formats that index blocks by number produce them). The derived ordering compares
/// integers numerically and strings lexicographically; mixed key sets are ordered by
/// [`sort_keys`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            Key::Int(_) => None,
        }
    }

    fn same_kind(&self, other: &Key) -> bool {
        matches!(
            (self, other),
            (Key::Int(_), Key::Int(_)) | (Key::Str(_), Key::Str(_))
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Str(s.clone())
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

/// Indices above `i64::MAX` have no key form.
impl TryFrom<usize> for Key {
    type Error = std::num::TryFromIntError;

    fn try_from(i: usize) -> Result<Self, Self::Error> {
        i64::try_from(i).map(Key::Int)
    }
}

/// Sorts keys into iteration order.
///
/// When every key has the same kind they are compared directly. A mixed set falls back
/// to comparing string forms, so `10` sorts before `"9"` and before `9`. The fallback is
/// decided for the whole set, which keeps the result a total order.
pub fn sort_keys(keys: &mut [&Key]) {
    let homogeneous = keys
        .split_first()
        .is_none_or(|(first, rest)| rest.iter().all(|k| first.same_kind(k)));

    if homogeneous {
        keys.sort();
    } else {
        keys.sort_by(|a, b| match a.to_string().cmp(&b.to_string()) {
            Ordering::Equal => a.cmp(b),
            ord => ord,
        });
    }
}

/// A key as used for a lookup.
///
/// `Exact` keys are used verbatim. `IgnoreCase` keys are first resolved against the
/// existing keys of the node with [`Settings::find_case`](super::settings::Settings::find_case).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    Exact(Key),
    IgnoreCase(String),
}

/// Builds a case-insensitive lookup key.
///
/// ```
/// use settree::{Settings, ig};
///
/// let mut s = Settings::new();
/// s.set("System", 1);
/// assert_eq!(s.get(ig("system")).and_then(|v| v.as_i64()), Some(1));
/// ```
pub fn ig(key: impl Into<String>) -> Query {
    Query::IgnoreCase(key.into())
}

impl Query {
    /// The key text as written by the caller, before any case resolution.
    pub fn raw(&self) -> String {
        match self {
            Query::Exact(k) => k.to_string(),
            Query::IgnoreCase(s) => s.clone(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Exact(k) => write!(f, "{}", k),
            Query::IgnoreCase(s) => write!(f, "{} (ignoring case)", s),
        }
    }
}

macro_rules! exact_query_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Query {
                fn from(key: $t) -> Self {
                    Query::Exact(Key::from(key))
                }
            }
        )*
    };
}

exact_query_from!(&str, String, &String, i64, i32);

impl From<Key> for Query {
    fn from(key: Key) -> Self {
        Query::Exact(key)
    }
}

impl From<&Key> for Query {
    fn from(key: &Key) -> Self {
        Query::Exact(key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(keys: &[Key]) -> Vec<Key> {
        let mut refs: Vec<&Key> = keys.iter().collect();
        sort_keys(&mut refs);
        refs.into_iter().cloned().collect()
    }

    #[test]
    fn string_keys_sort_lexicographically() {
        let keys = vec![Key::from("b"), Key::from("A"), Key::from("c")];
        assert_eq!(
            sorted(&keys),
            vec![Key::from("A"), Key::from("b"), Key::from("c")]
        );
    }

    #[test]
    fn integer_keys_sort_numerically() {
        let keys = vec![Key::Int(12), Key::Int(2), Key::Int(-1)];
        assert_eq!(sorted(&keys), vec![Key::Int(-1), Key::Int(2), Key::Int(12)]);
    }

    #[test]
    fn mixed_keys_fall_back_to_string_form() {
        let keys = vec![Key::from("9"), Key::Int(10), Key::Int(9), Key::from("a")];
        assert_eq!(
            sorted(&keys),
            vec![Key::Int(10), Key::Int(9), Key::from("9"), Key::from("a")]
        );
    }

    #[test]
    fn usize_keys_convert_only_within_range() {
        assert_eq!(Key::try_from(7usize), Ok(Key::Int(7)));
        assert!(Key::try_from(usize::MAX).is_err());
    }

    #[test]
    fn ig_builds_case_insensitive_query() {
        assert_eq!(ig("System"), Query::IgnoreCase("System".to_string()));
        assert_eq!(Query::from("System"), Query::Exact(Key::from("System")));
        assert_eq!(Query::from(3), Query::Exact(Key::Int(3)));
    }
}
