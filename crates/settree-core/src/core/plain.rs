use super::key::Key;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field name under which the `toml` crate hands out datetimes as one-entry maps.
const TOML_DATETIME_FIELD: &str = "$__toml_private_datetime";

/// A plain map: the node-free form of a settings tree.
pub type PlainMap = BTreeMap<Key, Plain>;

/// A plain, self-contained value tree.
///
/// This is what serialization formats produce and consume, and what
/// [`Settings::as_plain`](super::settings::Settings::as_plain) returns. Unlike
/// [`Value`](super::value::Value) it owns all of its sequences and holds raw maps.
///
/// Deserializing accepts any self-describing format. Values without a counterpart,
/// such as TOML datetimes, are kept as their string form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Plain {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Plain>),
    Map(PlainMap),
}

impl<'de> Deserialize<'de> for Plain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(PlainVisitor)
    }
}

struct PlainVisitor;

impl<'de> Visitor<'de> for PlainVisitor {
    type Value = Plain;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar, a sequence or a map")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Plain, E> {
        Ok(Plain::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Plain, E> {
        Ok(Plain::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Plain, D::Error>
    where
        D: Deserializer<'de>,
    {
        Plain::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Plain, E> {
        Ok(Plain::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<Plain, E> {
        Ok(Plain::Int(i))
    }

    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Plain, E> {
        Ok(i64::try_from(u).map_or(Plain::Float(u as f64), Plain::Int))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Plain, E> {
        Ok(Plain::Float(f))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Plain, E> {
        Ok(Plain::Str(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Plain, E> {
        Ok(Plain::Str(s))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Plain, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Plain::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Plain, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = PlainMap::new();
        while let Some((key, value)) = map.next_entry::<Key, Plain>()? {
            entries.insert(key, value);
        }
        let datetime = Key::from(TOML_DATETIME_FIELD);
        if entries.len() == 1 && matches!(entries.get(&datetime), Some(Plain::Str(_))) {
            if let Some(stamp) = entries.remove(&datetime) {
                return Ok(stamp);
            }
        }
        Ok(Plain::Map(entries))
    }
}

impl From<bool> for Plain {
    fn from(b: bool) -> Self {
        Plain::Bool(b)
    }
}

impl From<i64> for Plain {
    fn from(i: i64) -> Self {
        Plain::Int(i)
    }
}

impl From<i32> for Plain {
    fn from(i: i32) -> Self {
        Plain::Int(i64::from(i))
    }
}

impl From<f64> for Plain {
    fn from(f: f64) -> Self {
        Plain::Float(f)
    }
}

impl From<&str> for Plain {
    fn from(s: &str) -> Self {
        Plain::Str(s.to_string())
    }
}

impl From<String> for Plain {
    fn from(s: String) -> Self {
        Plain::Str(s)
    }
}

impl From<PlainMap> for Plain {
    fn from(map: PlainMap) -> Self {
        Plain::Map(map)
    }
}

impl<T: Into<Plain>> From<Vec<T>> for Plain {
    fn from(items: Vec<T>) -> Self {
        Plain::List(items.into_iter().map(Into::into).collect())
    }
}

/// Builds a [`PlainMap`] from `key => value` pairs.
///
/// ```
/// use settree::plain_map;
///
/// let map = plain_map! { "a" => 1, "x" => plain_map! { "y" => "deep" } };
/// assert_eq!(map.len(), 2);
/// ```
#[macro_export]
macro_rules! plain_map {
    () => {
        $crate::PlainMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::PlainMap::new();
        $(
            map.insert($crate::Key::from($key), $crate::Plain::from($value));
        )+
        map
    }};
}
