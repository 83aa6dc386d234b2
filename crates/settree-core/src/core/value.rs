use super::key::Query;
use super::plain::Plain;
use super::settings::Settings;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::rc::Rc;

/// A value stored under a key of a [`Settings`] node.
///
/// Mappings never appear here as raw maps: every nested mapping is a
/// [`Value::Node`]. Sequences are [`List`] handles shared between copies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Plain", into = "Plain")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(List),
    Node(Settings),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Node(_) => "node",
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Value::Node(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers are widened, so `1` and `1.0` both read as `1.0`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Settings> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Settings> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    /// Converts to the plain mirror, replacing nodes (also inside lists) by maps.
    pub fn to_plain(&self) -> Plain {
        match self {
            Value::Null => Plain::Null,
            Value::Bool(b) => Plain::Bool(*b),
            Value::Int(i) => Plain::Int(*i),
            Value::Float(f) => Plain::Float(*f),
            Value::Str(s) => Plain::Str(s.clone()),
            Value::List(l) => Plain::List(l.borrow().iter().map(Value::to_plain).collect()),
            Value::Node(n) => Plain::Map(n.as_plain()),
        }
    }

    /// Element form used inside rendered lists: strings are quoted.
    fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{:?}", s),
            other => write!(f, "{}", other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => f.write_str(s),
            Value::List(l) => {
                f.write_str("[")?;
                for (i, item) in l.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_element(f)?;
                }
                f.write_str("]")
            }
            Value::Node(n) => f.write_str(&n.render(0)),
        }
    }
}

impl From<Plain> for Value {
    fn from(plain: Plain) -> Self {
        match plain {
            Plain::Null => Value::Null,
            Plain::Bool(b) => Value::Bool(b),
            Plain::Int(i) => Value::Int(i),
            Plain::Float(f) => Value::Float(f),
            Plain::Str(s) => Value::Str(s),
            Plain::List(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Plain::Map(map) => Value::Node(Settings::from_plain(map)),
        }
    }
}

impl From<Value> for Plain {
    fn from(value: Value) -> Self {
        value.to_plain()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

impl From<Settings> for Value {
    fn from(n: Settings) -> Self {
        Value::Node(n)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Indexing through a non-node value panics, like indexing a missing map key.
impl<Q: Into<Query>> Index<Q> for Value {
    type Output = Value;

    fn index(&self, query: Q) -> &Value {
        match self {
            Value::Node(n) => &n[query],
            other => panic!("cannot index into a value of type {}", other.type_name()),
        }
    }
}

/// Auto-vivifies missing keys on the node being indexed.
impl<Q: Into<Query>> IndexMut<Q> for Value {
    fn index_mut(&mut self, query: Q) -> &mut Value {
        match self {
            Value::Node(n) => n.get_or_create(query),
            other => panic!("cannot index into a value of type {}", other.type_name()),
        }
    }
}

/// A sequence leaf.
///
/// Cloning a `List` clones the handle, not the items: a pushed item is visible through
/// every copy of the tree that holds the same list. Reassigning the key breaks the link.
#[derive(Clone, Default)]
pub struct List(Rc<RefCell<Vec<Value>>>);

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Value>> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same underlying sequence.
    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}

impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        List(Rc::new(RefCell::new(items)))
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        List::from(iter.into_iter().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::key::Key;

    #[test]
    fn scalars_display_in_plain_form() {
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from("text").to_string(), "text");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn lists_display_with_quoted_strings() {
        let value = Value::from(vec![Value::from("l"), Value::from("i"), Value::from(3)]);
        assert_eq!(value.to_string(), r#"["l", "i", 3]"#);
    }

    #[test]
    fn cloned_list_handles_share_items() {
        let list = List::from(vec![Value::from(1)]);
        let alias = list.clone();
        alias.push(2);
        assert_eq!(list.len(), 2);
        assert!(list.ptr_eq(&alias));
        assert_eq!(list.get(1), Some(Value::Int(2)));
    }

    #[test]
    fn equal_contents_compare_equal_across_handles() {
        let a = List::from(vec![Value::from("x")]);
        let b = List::from(vec![Value::from("x")]);
        assert!(!a.ptr_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn plain_maps_inside_lists_become_nodes() {
        let plain = Plain::List(vec![
            Plain::Int(1),
            Plain::Map([(Key::from("k"), Plain::Str("v".to_string()))].into()),
        ]);
        let value = Value::from(plain);
        let list = value.as_list().unwrap();
        assert_eq!(list.get(0), Some(Value::Int(1)));
        let node = list.get(1).unwrap();
        assert_eq!(node["k"].as_str(), Some("v"));
    }

    #[test]
    fn index_mut_auto_creates_nested_nodes() {
        let mut value = Value::Node(Settings::new());
        value["a"]["b"] = Value::from(5);
        assert_eq!(value["a"]["b"], Value::Int(5));
    }

    #[test]
    #[should_panic(expected = "cannot index into a value of type int")]
    fn indexing_through_a_scalar_panics() {
        let mut value = Value::from(1);
        value["a"] = Value::from(2);
    }

    #[test]
    fn float_accessor_widens_integers() {
        assert_eq!(Value::from(3).as_f64(), Some(3.0));
        assert_eq!(Value::from("3").as_f64(), None);
    }
}
