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

//! The predictive table: a map from a nonterminal and a lookahead sequence to
//! the production to expand it with.

use std::{
  collections::{btree_map, BTreeMap},
  rc::Rc,
};

use crate::{
  grammar::{
    passes::{
      firsts::Firsts, follows::Follows, nullable::Nullable, Pass, PassContext,
    },
    Elem, GrammarError, KSeq, NonTerminal, Production, ProductionId,
    ProductionSet, Terminal,
  },
  utils::{fmt::map_fmt, ToDoc},
};

#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug)]
pub enum TableError {
  #[error(transparent)]
  Grammar(#[from] GrammarError),
  #[error("production {0} does not match any lookahead sequence")]
  UnreachableProduction(ProductionId),
  #[error(
    "productions {existing} and {new} of {nonterm} both claim lookahead {seq}"
  )]
  TableConflict {
    nonterm: NonTerminal,
    seq: KSeq,
    existing: ProductionId,
    new: ProductionId,
  },
}

#[derive(Clone, PartialEq, Eq)]
pub struct PredictiveTable {
  k: usize,
  entries: BTreeMap<(NonTerminal, KSeq), ProductionId>,
}

impl PredictiveTable {
  /// Builds the table for `productions` with `k` terminals of lookahead.
  pub fn build(
    productions: &ProductionSet,
    k: usize,
  ) -> Result<Self, TableError> {
    let pass_map = PassContext::new(productions, k)?;
    let table = pass_map.get_pass::<PredictiveTable>()?;
    drop(pass_map);
    Ok(Rc::try_unwrap(table).unwrap_or_else(|shared| (*shared).clone()))
  }

  pub fn k(&self) -> usize {
    self.k
  }

  /// Returns the production registered for exactly `(nt, seq)`.
  pub fn get(&self, nt: NonTerminal, seq: &KSeq) -> Option<ProductionId> {
    self.entries.get(&(nt, seq.clone())).copied()
  }

  /// Looks up `nt` with the full lookahead window first, then with the window
  /// cut down to `len - 1`, ..., `1` terminals. A cut window is the same key
  /// as the window with its trailing slots set to epsilon.
  pub fn lookup(
    &self,
    nt: NonTerminal,
    window: &KSeq,
  ) -> Option<ProductionId> {
    (1..=window.len())
      .rev()
      .find_map(|len| self.get(nt, &window.truncated(len)))
  }

  pub fn entries(
    &self,
  ) -> impl Iterator<Item = (NonTerminal, &KSeq, ProductionId)> {
    self.entries.iter().map(|((nt, seq), id)| (*nt, seq, *id))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn to_pretty(&self) -> String {
    crate::utils::to_pretty(self, 80)
  }

  fn register(
    &mut self,
    productions: &ProductionSet,
    nonterm: NonTerminal,
    seq: &KSeq,
    prod: &Production,
  ) -> Result<(), TableError> {
    match self.entries.entry((nonterm, seq.clone())) {
      btree_map::Entry::Vacant(vac) => {
        vac.insert(prod.id());
      }
      btree_map::Entry::Occupied(mut occ) => {
        let existing = *occ.get();
        let existing_is_epsilon = productions
          .get(existing)
          .map_or(false, Production::is_epsilon);
        match (existing_is_epsilon, prod.is_epsilon()) {
          // Epsilon only applies where nothing else does.
          (true, false) => {
            log::trace!(
              "{} replaces {} at {} {}",
              prod.id(),
              existing,
              nonterm,
              seq
            );
            occ.insert(prod.id());
          }
          (false, true) => {}
          _ => {
            return Err(TableError::TableConflict {
              nonterm,
              seq: seq.clone(),
              existing,
              new: prod.id(),
            })
          }
        }
      }
    }
    Ok(())
  }
}

impl std::fmt::Debug for PredictiveTable {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    fmt
      .debug_struct("PredictiveTable")
      .field("k", &self.k)
      .field(
        "entries",
        &map_fmt(
          self
            .entries
            .iter()
            .map(|((nt, seq), id)| (format!("{} {}", nt, seq), id)),
        ),
      )
      .finish()
  }
}

impl ToDoc for PredictiveTable {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    da.intersperse(
      self.entries.iter().map(|((nt, seq), id)| {
        nt.to_doc(da)
          .append(da.text(": "))
          .append(seq.to_doc(da))
          .append(da.text(" -> "))
          .append(id.to_doc(da))
      }),
      da.hardline(),
    )
  }
}

/// Decides whether a right hand side can generate a given candidate
/// sequence, using the FIRST sets of the nonterminals it contains.
struct AlternativeMatcher<'a> {
  firsts: &'a Firsts,
  nullable: &'a Nullable,
  // Whether the whole candidate is complete. An incomplete candidate must
  // end together with the derivation.
  complete: bool,
}

impl<'a> AlternativeMatcher<'a> {
  fn generates(&self, rhs: &[Elem], target: &[Terminal]) -> bool {
    if target.is_empty() {
      return self.complete || self.nullable.is_seq_nullable(rhs);
    }

    let (first, rest) = match rhs.split_first() {
      Some(split) => split,
      None => return false,
    };

    match first {
      Elem::Term(t) if t.is_empty() => self.generates(rest, target),
      Elem::Term(t) => *t == target[0] && self.generates(rest, &target[1..]),
      Elem::NonTerm(nt) => {
        if self.nullable.is_nullable(*nt) && self.generates(rest, target) {
          return true;
        }
        self
          .firsts
          .get(*nt)
          .filter(|seq| !seq.is_empty())
          .any(|seq| {
            let terms = seq.terms();
            if terms.len() < target.len() {
              seq.is_prefix_of(target)
                && self.generates(rest, &target[terms.len()..])
            } else if terms[..target.len()] != *target {
              false
            } else if terms.len() > target.len() {
              self.complete
            } else {
              self.complete || self.nullable.is_seq_nullable(rest)
            }
          })
      }
    }
  }
}

impl Pass for PredictiveTable {
  type Error = TableError;

  fn run_pass(pass_map: &PassContext) -> Result<Self, TableError> {
    let productions = pass_map.productions();
    let k = pass_map.k();
    let firsts = pass_map.get_pass::<Firsts>()?;
    let follows = pass_map.get_pass::<Follows>()?;
    let nullable = pass_map.get_pass::<Nullable>()?;

    let mut table = PredictiveTable {
      k,
      entries: BTreeMap::new(),
    };

    for prod in productions.prods() {
      let head = prod.head();
      if prod.is_epsilon() {
        for seq in follows.get(head) {
          table.register(productions, head, seq, prod)?;
        }
        continue;
      }

      let mut matched = false;
      for seq in firsts.get(head) {
        let matcher = AlternativeMatcher {
          firsts: &firsts,
          nullable: &nullable,
          complete: seq.is_complete(k),
        };
        if !matcher.generates(prod.elements(), seq.terms()) {
          continue;
        }
        matched = true;
        if seq.is_empty() {
          // The alternative only derives epsilon here. The lookahead then
          // comes from whatever follows the head.
          for follow in follows.get(head) {
            table.register(productions, head, &seq.concat(follow, k), prod)?;
          }
        } else {
          table.register(productions, head, seq, prod)?;
        }
      }

      if !matched {
        return Err(TableError::UnreachableProduction(prod.id()));
      }
    }

    log::debug!("Predictive table (k = {}):\n{}", k, table.to_pretty());
    Ok(table)
  }
}
