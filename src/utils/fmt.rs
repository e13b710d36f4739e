//! Helper functions for running formatting rule.

use std::fmt::{Debug, Formatter, Result};

#[derive(Clone)]
struct DebugListFormatted<C>(C);

impl<C: IntoIterator + Clone> Debug for DebugListFormatted<C>
where
  C::Item: Debug,
{
  fn fmt(&self, fmt: &mut Formatter) -> Result {
    let mut list = fmt.debug_list();
    list.entries(self.0.clone().into_iter());
    list.finish()
  }
}

#[derive(Clone)]
struct DebugMapFormatted<C>(C);

impl<C, K, V> Debug for DebugMapFormatted<C>
where
  C: IntoIterator<Item = (K, V)> + Clone,
  K: Debug,
  V: Debug,
{
  fn fmt(&self, fmt: &mut Formatter) -> Result {
    let mut dbg_map = fmt.debug_map();
    dbg_map.entries(self.0.clone().into_iter());
    dbg_map.finish()
  }
}

pub fn list_fmt<C>(items: C) -> impl Debug
where
  C: IntoIterator + Clone,
  C::Item: Debug,
{
  DebugListFormatted(items)
}

pub fn map_fmt<C, K, V>(items: C) -> impl Debug
where
  C: IntoIterator<Item = (K, V)> + Clone,
  K: Debug,
  V: Debug,
{
  DebugMapFormatted(items)
}
