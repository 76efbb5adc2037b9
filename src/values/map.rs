use std::fmt::{Display, Formatter};
use std::iter::once;
use std::sync::Arc;

use indexmap::IndexMap;
use itertools::Itertools;

use super::{EResult, EvalError, Kind, OptionalValue, Value};
use crate::State;

/// Storage: canonical key -> (original key, value)
type Entries = IndexMap<String, (Value, Value)>;

/// Immutable map whose keys all share one kind and whose values all
/// share one kind.
///
/// The kinds are inferred from the first entry at construction. An empty
/// map has no kinds and combines with maps of any kinds under `+`.
///
/// Every "mutating" operation returns a new map. Entry storage sits
/// behind an `Arc`, so clones share it and the identity-returning cases
/// of [`MapValue::union`] hand back the very same storage.
#[derive(Debug, Clone)]
pub struct MapValue {
    entries: Arc<Entries>,
    key_kind: Option<Kind>,
    value_kind: Option<Kind>,
    state: State,
}

impl MapValue {
    /// Build a map from `(key, value)` pairs.
    ///
    /// The first pair fixes the key and value kinds; any later pair that
    /// disagrees is a `TypeMismatch`. Pairs whose keys canonicalize
    /// identically collapse, the later one winning.
    pub fn new<I>(pairs: I, state: State) -> EResult<Self>
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        let mut pairs = pairs.into_iter().peekable();
        let Some((first_key, first_value)) = pairs.peek() else {
            return Ok(MapValue::empty(state));
        };
        let key_kind = first_key.kind();
        let value_kind = first_value.kind();

        let mut entries = Entries::new();
        for (key, value) in pairs {
            check_kind("key", key_kind, &key)?;
            check_kind("value", value_kind, &value)?;
            entries.insert(key.canonical_key(), (key, value));
        }

        log::trace!(
            "built map[{key_kind} -> {value_kind}] with {} entries",
            entries.len()
        );
        Ok(MapValue {
            entries: Arc::new(entries),
            key_kind: Some(key_kind),
            value_kind: Some(value_kind),
            state,
        })
    }

    pub fn empty(state: State) -> Self {
        MapValue {
            entries: Arc::new(Entries::new()),
            key_kind: None,
            value_kind: None,
            state,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry count as a runtime integer
    pub fn size(&self) -> Value {
        Value::Int(i64::try_from(self.len()).unwrap_or(i64::MAX))
    }

    pub fn key_kind(&self) -> Option<Kind> {
        self.key_kind
    }

    pub fn value_kind(&self) -> Option<Kind> {
        self.value_kind
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Entries in traversal order
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries
            .values()
            .map(|(key, value)| (key, value))
    }

    /// True if both maps share the same entry storage
    pub fn ptr_eq(&self, other: &MapValue) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    pub fn get(&self, key: &Value) -> EResult<OptionalValue> {
        self.check_key(key)?;
        let found = self
            .entries
            .get(&key.canonical_key())
            .map(|(_, value)| value.clone());
        Ok(OptionalValue::new(found, self.state.clone()))
    }

    pub fn contains(&self, key: &Value) -> EResult<bool> {
        self.check_key(key)?;
        Ok(self
            .entries
            .contains_key(&key.canonical_key()))
    }

    /// New map without `key`. Removing an absent key is not an error,
    /// but a key of the wrong kind is.
    pub fn delete(&self, key: &Value) -> EResult<MapValue> {
        self.check_key(key)?;
        let target = key.canonical_key();
        log::trace!("delete {target:?} from map of {}", self.len());

        self.rebuild(
            self.entries
                .iter()
                .filter(|(canonical, _)| **canonical != target)
                .map(|(_, (key, value))| (key.clone(), value.clone())),
        )
    }

    /// New map with `key` bound to `value`, replacing any existing
    /// binding. An empty map takes on the kinds of the new pair.
    pub fn set(&self, key: Value, value: Value) -> EResult<MapValue> {
        self.check_key(&key)?;
        if let Some(kind) = self.value_kind {
            check_kind("value", kind, &value)?;
        }
        log::trace!("set {:?} in map of {}", key.canonical_key(), self.len());

        self.rebuild(self.cloned_pairs().chain(once((key, value))))
    }

    /// The `=` operator.
    ///
    /// Only checks that every entry of `self` exists in `other` with an
    /// equal value. Keys that only `other` has are not looked at, so a
    /// map equals any superset of itself.
    pub fn equals(&self, other: &Value) -> EResult<bool> {
        let Value::Map(other) = other else {
            return Err(EvalError::type_mismatch("map", other.kind().name()));
        };

        for (canonical, (_, value)) in self.entries.iter() {
            let Some((_, theirs)) = other.entries.get(canonical) else {
                return Ok(false);
            };
            if !value.equals(theirs)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// The `+` operator: entries of both maps, `other` winning on
    /// shared keys. An empty operand is an identity and the other operand
    /// is returned as is.
    pub fn union(&self, other: &Value) -> EResult<MapValue> {
        let Value::Map(other) = other else {
            return Err(EvalError::type_mismatch("map", other.kind().name()));
        };

        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }

        if self.key_kind != other.key_kind {
            return Err(EvalError::type_mismatch(
                format!("keys of type {}", kind_name(self.key_kind)),
                kind_name(other.key_kind),
            ));
        }
        if self.value_kind != other.value_kind {
            return Err(EvalError::type_mismatch(
                format!("values of type {}", kind_name(self.value_kind)),
                kind_name(other.value_kind),
            ));
        }

        log::trace!("union of maps of {} and {}", self.len(), other.len());
        self.rebuild(
            self.cloned_pairs()
                .chain(other.cloned_pairs()),
        )
    }

    /// Order-independent encoding, so equal maps are the same key
    pub(crate) fn canonical_key(&self) -> String {
        let body = self
            .entries
            .values()
            .map(|(key, value)| key.tagged_key() + &value.tagged_key())
            .sorted()
            .join("");
        format!("{{{body}}}")
    }

    /***********\
    |* Helpers *|
    \***********/
    fn check_key(&self, key: &Value) -> EResult<()> {
        match self.key_kind {
            Some(kind) => check_kind("key", kind, key),
            None => Ok(()),
        }
    }

    fn cloned_pairs(&self) -> impl Iterator<Item = (Value, Value)> + '_ {
        self.entries
            .values()
            .cloned()
    }

    fn rebuild<I>(&self, pairs: I) -> EResult<MapValue>
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        MapValue::new(pairs, self.state.clone())
    }
}

fn check_kind(role: &str, expected: Kind, value: &Value) -> EResult<()> {
    if value.kind() == expected {
        Ok(())
    } else {
        Err(EvalError::type_mismatch(
            format!("{role} of type {expected}"),
            value.kind().name(),
        ))
    }
}

fn kind_name(kind: Option<Kind>) -> &'static str {
    kind.map(|k| k.name())
        .unwrap_or("nothing")
}

// Same kinds, same keys, same values. Storage order and state are ignored.
impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.key_kind == other.key_kind
            && self.value_kind == other.value_kind
            && self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(canonical, (key, value))| {
                    other
                        .entries
                        .get(canonical)
                        .is_some_and(|(their_key, theirs)| {
                            key == their_key && value == theirs
                        })
                })
    }
}

impl Display for MapValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let body = self
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .join(", ");
        write!(f, "{{{body}}}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::*;

    fn int_map(pairs: &[(i64, i64)]) -> MapValue {
        MapValue::new(
            pairs
                .iter()
                .map(|(k, v)| (Value::Int(*k), Value::Int(*v))),
            State::default(),
        )
        .unwrap()
    }

    #[test]
    fn empty_map_has_no_kinds() {
        let map = MapValue::new(Vec::new(), State::default()).unwrap();
        assert_eq!(map.size(), Value::Int(0));
        assert_eq!(map.key_kind(), None);
        assert_eq!(map.value_kind(), None);
        assert_eq!(map.to_string(), "{}");
    }

    #[test]
    fn first_pair_fixes_kinds() {
        let map = int_map(&[(1, 2)]);
        assert_eq!(map.key_kind(), Some(Kind::Integer));
        assert_eq!(map.value_kind(), Some(Kind::Integer));
    }

    #[test]
    fn mismatch_against_first_pair() {
        let result = MapValue::new(
            vec![
                (Value::Int(1), Value::Str("one".into())),
                (Value::Int(2), Value::Int(2)),
            ],
            State::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            EvalError::TypeMismatch {
                expected: "value of type string".into(),
                actual: "integer".into(),
            }
        );
    }

    #[test]
    fn duplicate_keys_last_wins() {
        let map = int_map(&[(1, 10), (2, 20), (1, 11)]);
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get(&Value::Int(1))
                .unwrap()
                .into_inner(),
            Some(Value::Int(11))
        );
    }

    #[test]
    fn set_replaces_and_keeps_receiver() {
        let map = int_map(&[(1, 10)]);
        let updated = map
            .set(Value::Int(1), Value::Int(99))
            .unwrap();

        assert_eq!(updated, int_map(&[(1, 99)]));
        assert_eq!(map, int_map(&[(1, 10)]));
    }

    #[test]
    fn set_on_empty_adopts_kinds() {
        let map = MapValue::empty(State::default())
            .set(Value::Str("k".into()), Value::Bool(true))
            .unwrap();
        assert_eq!(map.key_kind(), Some(Kind::String));
        assert_eq!(map.value_kind(), Some(Kind::Boolean));
    }

    #[test]
    fn delete_last_entry_resets_kinds() {
        let map = int_map(&[(1, 10)])
            .delete(&Value::Int(1))
            .unwrap();
        assert!(map.is_empty());
        assert_eq!(map.key_kind(), None);
    }

    #[test]
    fn delete_absent_is_fresh_copy() {
        let map = int_map(&[(1, 10), (2, 20)]);
        let copy = map.delete(&Value::Int(3)).unwrap();
        assert_eq!(copy, map);
        assert!(!copy.ptr_eq(&map));
    }

    #[test]
    fn delete_checks_key_kind() {
        let map = int_map(&[(1, 10)]);
        assert!(matches!(
            map.delete(&Value::Str("1".into())),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn union_identity_returns_same_storage() {
        let map = int_map(&[(1, 10)]);
        let empty = Value::Map(MapValue::empty(State::default()));

        assert!(map.union(&empty).unwrap().ptr_eq(&map));
        let Value::Map(empty_map) = &empty else {
            unreachable!()
        };
        assert!(empty_map
            .union(&Value::Map(map.clone()))
            .unwrap()
            .ptr_eq(&map));
    }

    #[test]
    fn map_keys_are_order_independent() {
        let state = State::default();
        let ab = int_map(&[(1, 10), (2, 20)]);
        let ba = int_map(&[(2, 20), (1, 10)]);
        assert_eq!(ab.canonical_key(), ba.canonical_key());

        let outer = MapValue::new(
            vec![(Value::Map(ab), Value::Str("first".into()))],
            state,
        )
        .unwrap()
        .set(Value::Map(ba), Value::Str("second".into()))
        .unwrap();
        assert_eq!(outer.len(), 1);
    }

    #[test]
    fn key_kind_is_part_of_host_equality() {
        let str_keyed = MapValue::new(
            vec![(Value::Str("1".into()), Value::Int(1))],
            State::default(),
        )
        .unwrap();
        let int_keyed = int_map(&[(1, 1)]);

        // both store their entry under "1"
        assert_eq!(
            Value::Str("1".into()).canonical_key(),
            Value::Int(1).canonical_key()
        );
        assert!(str_keyed != int_keyed);
        assert!(int_keyed != str_keyed);
    }

    #[test]
    fn values_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MapValue>();
        assert_send_sync::<Value>();
    }

    proptest! {
        #[test]
        fn size_counts_distinct_keys(pairs in vec(any::<(i64, i64)>(), 0..50)) {
            let distinct: HashSet<i64> = pairs.iter().map(|(k, _)| *k).collect();
            let map = int_map(&pairs);
            prop_assert_eq!(map.size(), Value::Int(distinct.len() as i64));
        }

        #[test]
        fn set_then_get(pairs in vec(any::<(i64, i64)>(), 0..20), key: i64, value: i64) {
            let map = int_map(&pairs)
                .set(Value::Int(key), Value::Int(value))
                .unwrap();
            let found = map.get(&Value::Int(key)).unwrap().into_inner();
            prop_assert_eq!(found, Some(Value::Int(value)));
        }

        #[test]
        fn union_prefers_right(lhs in vec(any::<(i8, i64)>(), 1..20), rhs in vec(any::<(i8, i64)>(), 1..20)) {
            let widen = |pairs: &[(i8, i64)]| {
                pairs.iter().map(|(k, v)| (*k as i64, *v)).collect::<Vec<_>>()
            };
            let left = int_map(&widen(&lhs));
            let right = int_map(&widen(&rhs));
            let merged = left.union(&Value::Map(right.clone())).unwrap();

            for (key, value) in right.iter() {
                let found = merged.get(key).unwrap().into_inner();
                prop_assert_eq!(found.as_ref(), Some(value));
            }
            prop_assert!(merged.len() >= left.len().max(right.len()));
        }
    }
}
