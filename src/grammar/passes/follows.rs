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

use std::collections::{BTreeMap, BTreeSet};

use im::{OrdMap, OrdSet};

use crate::{
  grammar::{Elem, GrammarError, KSeq, NonTerminal, Terminal},
  utils::{fixed_point, ToDoc},
};

use super::{firsts::Firsts, nullable::Nullable, Pass, PassContext};

type Snapshot = OrdMap<NonTerminal, OrdSet<KSeq>>;

/// FOLLOW_k sets: the bounded terminal sequences that can appear right after
/// each nonterminal in a derivation from the start symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Follows(BTreeMap<NonTerminal, BTreeSet<KSeq>>);

impl Follows {
  /// Returns FOLLOW_k of `nt`. Empty for a nonterminal that is unreachable
  /// from the start symbol.
  pub fn get(&self, nt: NonTerminal) -> impl Iterator<Item = &KSeq> {
    self.0.get(&nt).into_iter().flatten()
  }

  pub fn contains(&self, nt: NonTerminal, seq: &KSeq) -> bool {
    self.0.get(&nt).map_or(false, |seqs| seqs.contains(seq))
  }

  pub fn sets(&self) -> &BTreeMap<NonTerminal, BTreeSet<KSeq>> {
    &self.0
  }
}

impl ToDoc for Follows {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    super::seq_sets_to_doc(da, &self.0)
  }
}

/// The k-bounded FIRST set of a symbol string. A nullable nonterminal also
/// contributes the empty sequence, so the result holds every prefix that can
/// precede whatever follows the string.
fn string_firsts(
  elems: &[Elem],
  firsts: &Firsts,
  nullable: &Nullable,
  k: usize,
) -> BTreeSet<KSeq> {
  let mut result = BTreeSet::new();
  result.insert(KSeq::empty());

  for elem in elems {
    if result.iter().all(|seq| seq.is_complete(k)) {
      break;
    }
    let options: Vec<KSeq> = match elem {
      Elem::Term(t) if t.is_empty() => continue,
      Elem::Term(t) => vec![KSeq::from_terms(Some(*t))],
      Elem::NonTerm(nt) => {
        let mut options: Vec<_> = firsts.get(*nt).cloned().collect();
        if nullable.is_nullable(*nt) {
          options.push(KSeq::empty());
        }
        options
      }
    };
    result = result
      .iter()
      .flat_map(|prefix| options.iter().map(move |opt| prefix.concat(opt, k)))
      .collect();
  }

  result
}

impl Pass for Follows {
  type Error = GrammarError;

  fn run_pass(pass_map: &PassContext) -> Result<Self, GrammarError> {
    let productions = pass_map.productions();
    let k = pass_map.k();
    let firsts = pass_map.get_pass::<Firsts>()?;
    let nullable = pass_map.get_pass::<Nullable>()?;

    // The trailing string of every nonterminal occurrence does not change
    // between iterations, so its FIRST set is computed once.
    let mut occurrences = Vec::new();
    for prod in productions.prods() {
      let elems = prod.elements();
      for (i, elem) in elems.iter().enumerate() {
        if let Elem::NonTerm(nt) = elem {
          let trailing = string_firsts(&elems[i + 1..], &firsts, &nullable, k);
          occurrences.push((prod.head(), *nt, trailing));
        }
      }
    }

    let mut initial = Snapshot::new();
    initial.insert(
      productions.start_nt(),
      OrdSet::unit(KSeq::from_terms(Some(Terminal::END))),
    );

    let result = fixed_point(initial, |prev| {
      let mut next = prev.clone();
      for (head, nt, trailing) in &occurrences {
        let head_follow = prev.get(head).cloned().unwrap_or_default();
        let mut nt_follow = next.get(nt).cloned().unwrap_or_default();
        for prefix in trailing {
          if prefix.is_complete(k) {
            nt_follow.insert(prefix.clone());
          } else {
            for suffix in &head_follow {
              nt_follow.insert(prefix.concat(suffix, k));
            }
          }
        }
        next.insert(*nt, nt_follow);
      }
      next
    });

    let mut sets: BTreeMap<_, BTreeSet<_>> = productions
      .nonterminals()
      .map(|nt| (nt, BTreeSet::new()))
      .collect();
    for (nt, seqs) in result {
      sets.entry(nt).or_default().extend(seqs);
    }

    let follows = Follows(sets);
    log::debug!(
      "FOLLOW_{} table:\n{}",
      k,
      crate::utils::to_pretty(&follows, 80)
    );
    Ok(follows)
  }
}
