// Copyright 2020 Google LLC
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

//! Bounded terminal sequences used as FIRST/FOLLOW members and as lookahead
//! keys.
//!
//! A `KSeq` only stores real terminals. A sequence shorter than `k` is the
//! same key as the `k`-slot array whose trailing slots hold the epsilon
//! marker, so truncating a lookahead window to `j` terminals is equivalent to
//! overwriting its last `k - j` slots with epsilon.

use crate::{grammar::Terminal, utils::ToDoc};

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct KSeq(Vec<Terminal>);

impl KSeq {
  /// The empty sequence (a derivation of epsilon).
  pub fn empty() -> Self {
    KSeq(Vec::new())
  }

  /// Builds a sequence from the given terminals, dropping epsilon markers and
  /// anything after the first `END`.
  pub fn from_terms(terms: impl IntoIterator<Item = Terminal>) -> Self {
    let mut seq = KSeq::empty();
    for t in terms {
      if t.is_empty() {
        continue;
      }
      seq.0.push(t);
      if t.is_end() {
        break;
      }
    }
    seq
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn terms(&self) -> &[Terminal] {
    &self.0
  }

  pub fn first(&self) -> Option<Terminal> {
    self.0.first().copied()
  }

  /// Returns true if this sequence ends with `END`. Nothing can follow it.
  pub fn is_terminated(&self) -> bool {
    self.0.last().map_or(false, |t| t.is_end())
  }

  /// Returns true if no further terminal can be appended under lookahead
  /// `k`.
  pub fn is_complete(&self, k: usize) -> bool {
    self.0.len() >= k || self.is_terminated()
  }

  /// Appends `t` unless the sequence is already complete. Returns whether the
  /// terminal was appended.
  pub fn push_bounded(&mut self, t: Terminal, k: usize) -> bool {
    if t.is_empty() || self.is_complete(k) {
      return false;
    }
    self.0.push(t);
    true
  }

  /// The `k`-bounded concatenation of `self` and `other`.
  pub fn concat(&self, other: &KSeq, k: usize) -> KSeq {
    let mut result = self.clone();
    for t in other.terms() {
      if !result.push_bounded(*t, k) {
        break;
      }
    }
    result
  }

  /// Returns the first `len` terminals of this sequence.
  pub fn truncated(&self, len: usize) -> KSeq {
    KSeq(self.0.iter().take(len).copied().collect())
  }

  /// Returns true if `self` is a prefix of `other`.
  pub fn is_prefix_of(&self, other: &[Terminal]) -> bool {
    other.len() >= self.0.len() && other[..self.0.len()] == self.0[..]
  }
}

impl std::fmt::Display for KSeq {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    fmt.write_str("(")?;
    for (i, t) in self.0.iter().enumerate() {
      if i > 0 {
        fmt.write_str(", ")?;
      }
      write!(fmt, "{}", t)?;
    }
    if self.0.is_empty() {
      fmt.write_str("ε")?;
    }
    fmt.write_str(")")
  }
}

impl std::fmt::Debug for KSeq {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    std::fmt::Display::fmt(self, fmt)
  }
}

impl ToDoc for KSeq {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    da.text(self.to_string())
  }
}

impl std::iter::FromIterator<Terminal> for KSeq {
  fn from_iter<I: IntoIterator<Item = Terminal>>(iter: I) -> Self {
    KSeq::from_terms(iter)
  }
}
