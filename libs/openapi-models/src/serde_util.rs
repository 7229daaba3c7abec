//! `skip_serializing_if` predicates for `Arc`-shared sections

use std::collections::BTreeMap;
use std::sync::Arc;

pub(crate) fn is_empty_list<T>(list: &Arc<Vec<T>>) -> bool {
    list.is_empty()
}

pub(crate) fn is_empty_map<K, V>(map: &Arc<BTreeMap<K, V>>) -> bool {
    map.is_empty()
}
