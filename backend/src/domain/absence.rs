//! Absence is never stored: a child is absent for a day when the roster
//! contains them and no attendance record does.

use std::collections::{BTreeSet, HashSet};

/// Children in `all_child_ids` that do not appear in `present_child_ids`.
///
/// Ids in `present_child_ids` that are not on the roster are ignored.
pub fn derive_absent<'a, A, P>(all_child_ids: A, present_child_ids: P) -> BTreeSet<String>
where
    A: IntoIterator<Item = &'a str>,
    P: IntoIterator<Item = &'a str>,
{
    let present: HashSet<&str> = present_child_ids.into_iter().collect();

    all_child_ids
        .into_iter()
        .filter(|id| !present.contains(id))
        .map(str::to_string)
        .collect()
}
