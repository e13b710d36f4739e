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

use std::collections::BTreeSet;

use crate::{
  grammar::{Elem, GrammarError, NonTerminal, Production},
  utils::{change_iter, change_loop, WasChanged},
};

use super::{Pass, PassContext};

/// The nonterminals that can derive the empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nullable(BTreeSet<NonTerminal>);

impl Nullable {
  pub fn is_nullable(&self, nt: NonTerminal) -> bool {
    self.0.contains(&nt)
  }

  /// Returns true if every element of `elems` can derive the empty string.
  pub fn is_seq_nullable(&self, elems: &[Elem]) -> bool {
    elems.iter().all(|elem| match elem {
      Elem::Term(t) => t.is_empty(),
      Elem::NonTerm(nt) => self.is_nullable(*nt),
    })
  }

  pub fn is_prod_nullable(&self, prod: &Production) -> bool {
    self.is_seq_nullable(prod.elements())
  }

  pub fn get_nullable_set(&self) -> &BTreeSet<NonTerminal> {
    &self.0
  }
}

impl Pass for Nullable {
  type Error = GrammarError;

  fn run_pass(pass_map: &PassContext) -> Result<Self, GrammarError> {
    let productions = pass_map.productions();
    let mut nullable = Nullable(BTreeSet::new());

    change_loop(|| {
      change_iter(productions.prods(), |prod| {
        if !nullable.is_nullable(prod.head()) && nullable.is_prod_nullable(prod)
        {
          nullable.0.insert(prod.head());
          WasChanged::Changed
        } else {
          WasChanged::Unchanged
        }
      })
    });

    log::trace!("Nullable nonterminals: {:?}", nullable.0);
    Ok(nullable)
  }
}
