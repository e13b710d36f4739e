// Copyright 2019 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::{btree_map, BTreeMap, BTreeSet};

pub mod fmt;

/// Repeatedly applies `apply` until its output equals its input.
pub fn fixed_point<T: Eq>(start: T, mut apply: impl FnMut(&T) -> T) -> T {
  let mut curr = start;
  loop {
    let next = apply(&curr);
    if next == curr {
      break curr;
    }
    curr = next;
  }
}

pub trait ToDoc {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA, ()>
  where
    DA::Doc: Clone;
}

/// Renders any `ToDoc` value to a string of the given line width.
pub fn to_pretty(value: &impl ToDoc, width: usize) -> String {
  let arena: pretty::Arena<()> = pretty::Arena::new();
  format!("{}", value.to_doc(&arena).into_doc().pretty(width))
}

pub fn breadth_first_search<T, InitI, StepI, F>(
  initial: InitI,
  mut f: F,
) -> BTreeSet<T>
where
  T: Ord + Clone,
  InitI: IntoIterator<Item = T>,
  StepI: IntoIterator<Item = T>,
  F: FnMut(&T) -> StepI,
{
  let mut next_set = BTreeSet::new();
  let mut curr_set: BTreeSet<_> = initial.into_iter().collect();
  let mut seen_set = curr_set.clone();

  while !curr_set.is_empty() {
    for next_item in &curr_set {
      for step_item in f(next_item) {
        if !seen_set.contains(&step_item) {
          next_set.insert(step_item.clone());
          seen_set.insert(step_item);
        }
      }
    }

    std::mem::swap(&mut curr_set, &mut next_set);
    next_set.clear();
  }

  seen_set
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum WasChanged {
  Changed,
  Unchanged,
}

impl WasChanged {
  pub fn from_changed(changed: bool) -> Self {
    if changed {
      WasChanged::Changed
    } else {
      WasChanged::Unchanged
    }
  }

  pub fn join(self, other: Self) -> Self {
    match (self, other) {
      (WasChanged::Changed, _) | (_, WasChanged::Changed) => {
        WasChanged::Changed
      }
      _ => WasChanged::Unchanged,
    }
  }

  pub fn merge(&mut self, other: Self) {
    *self = self.join(other);
  }
}

pub fn change_loop<F>(mut func: F)
where
  F: FnMut() -> WasChanged,
{
  while let WasChanged::Changed = func() {}
}

pub fn change_iter<I, F>(iter: I, mut func: F) -> WasChanged
where
  I: Iterator,
  F: FnMut(I::Item) -> WasChanged,
{
  let mut changed = WasChanged::Unchanged;
  for item in iter {
    changed = changed.join(func(item));
  }

  changed
}

/// A map from keys to sets of values, where inserting reports whether the
/// map grew.
#[derive(Clone, Debug)]
pub struct CollectMap<K, V>(BTreeMap<K, BTreeSet<V>>);

impl<K, V> CollectMap<K, V>
where
  K: Ord,
  V: Ord,
{
  pub fn new() -> Self {
    CollectMap(BTreeMap::new())
  }

  pub fn get(&self, key: &K) -> Option<&BTreeSet<V>> {
    self.0.get(key)
  }

  /// Ensures `key` is present, even if no value is ever inserted for it.
  pub fn touch(&mut self, key: K) {
    self.0.entry(key).or_insert_with(BTreeSet::new);
  }

  pub fn insert(&mut self, key: K, value: V) -> WasChanged {
    match self.0.entry(key) {
      btree_map::Entry::Occupied(mut occ) => {
        WasChanged::from_changed(occ.get_mut().insert(value))
      }
      btree_map::Entry::Vacant(vac) => {
        let mut new_set = BTreeSet::new();
        new_set.insert(value);
        vac.insert(new_set);
        WasChanged::Changed
      }
    }
  }

  pub fn into_inner(self) -> BTreeMap<K, BTreeSet<V>> {
    self.0
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_fixed_point_stops_when_stable() {
    let result = fixed_point(1u32, |v| std::cmp::min(v * 2, 40));
    assert_eq!(result, 40);
  }

  #[test]
  fn test_breadth_first_search_includes_initial() {
    let edges: BTreeMap<u8, Vec<u8>> =
      vec![(0, vec![1]), (1, vec![2, 0]), (2, vec![]), (3, vec![0])]
        .into_iter()
        .collect();
    let seen = breadth_first_search(std::iter::once(0u8), |n| {
      edges.get(n).cloned().unwrap_or_default()
    });
    assert_eq!(seen, vec![0, 1, 2].into_iter().collect());
  }

  #[test]
  fn test_collect_map_reports_changes() {
    let mut map = CollectMap::new();
    assert_eq!(map.insert("a", 1), WasChanged::Changed);
    assert_eq!(map.insert("a", 1), WasChanged::Unchanged);
    assert_eq!(map.insert("a", 2), WasChanged::Changed);
    map.touch("b");
    assert!(map.get(&"b").unwrap().is_empty());

    let mut changed = WasChanged::Unchanged;
    changed.merge(map.insert("b", 3));
    assert_eq!(changed, WasChanged::Changed);
  }
}
