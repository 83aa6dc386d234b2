use super::key::Key;
use super::plain::{Plain, PlainMap};
use super::settings::Settings;
use super::value::Value;
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        3 => "[a-zA-Z_][a-zA-Z0-9_]{0,6}".prop_map(Key::from),
        1 => (-50i64..50).prop_map(Key::Int),
    ]
}

fn plain_strategy() -> impl Strategy<Value = Plain> {
    let leaf = prop_oneof![
        Just(Plain::Null),
        any::<bool>().prop_map(Plain::Bool),
        any::<i64>().prop_map(Plain::Int),
        (-1.0e6f64..1.0e6).prop_map(Plain::Float),
        "[a-z ]{0,8}".prop_map(Plain::Str),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Plain::List),
            prop::collection::btree_map(key_strategy(), inner, 0..5).prop_map(Plain::Map),
        ]
    })
}

fn map_strategy() -> impl Strategy<Value = PlainMap> {
    prop::collection::btree_map(key_strategy(), plain_strategy(), 0..6)
}

proptest! {
    #[test]
    fn construct_then_as_plain_round_trips(map in map_strategy()) {
        prop_assert_eq!(Settings::from_plain(map.clone()).as_plain(), map);
    }

    #[test]
    fn render_ignores_insertion_order(map in map_strategy()) {
        let forward: Settings = map
            .clone()
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect();
        let mut backward = Settings::new();
        for (k, v) in map.into_iter().rev() {
            backward.set(k, Value::from(v));
        }
        prop_assert_eq!(forward.render(0), backward.render(0));
    }

    #[test]
    fn soft_update_keeps_existing_leaves(a in map_strategy(), b in map_strategy()) {
        let original = Settings::from_plain(a);
        let other = Settings::from_plain(b);
        let mut merged = original.copy();
        merged.soft_update(&other);

        for (key, value) in original.iter() {
            if !value.is_node() {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        for (key, _) in other.iter() {
            prop_assert!(merged.contains(key));
        }
    }

    #[test]
    fn update_takes_incoming_leaves(a in map_strategy(), b in map_strategy()) {
        let mut target = Settings::from_plain(a);
        let other = Settings::from_plain(b);
        target.update(&other);

        for (key, value) in other.iter() {
            if !value.is_node() {
                prop_assert_eq!(target.get(key), Some(value));
            }
        }
    }

    #[test]
    fn merge_is_pure(a in map_strategy(), b in map_strategy()) {
        let left = Settings::from_plain(a.clone());
        let right = Settings::from_plain(b.clone());

        let merged = left.merge(&right);
        let mut manual = left.copy();
        manual.soft_update(&right);

        prop_assert_eq!(merged, manual);
        prop_assert_eq!(left.as_plain(), a);
        prop_assert_eq!(right.as_plain(), b);
    }
}
