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

//! FIRST_k sets.
//!
//! Each production contributes exactly one sequence to the FIRST set of its
//! head. The sequence is built by scanning the right hand side left to right.
//! A nonterminal is replaced in place by its first alternative that is not
//! the epsilon production, and is skipped if it only has epsilon
//! alternatives. Scanning stops after `k` terminals, after `END`, or when
//! the right hand side runs out.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
  grammar::{
    Elem, GrammarError, KSeq, NonTerminal, Production, ProductionId,
    ProductionSet,
  },
  utils::{CollectMap, ToDoc},
};

use super::{Pass, PassContext};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Firsts {
  by_nonterm: BTreeMap<NonTerminal, BTreeSet<KSeq>>,
  by_prod: BTreeMap<ProductionId, KSeq>,
}

impl Firsts {
  /// Returns FIRST_k of `nt`. Empty if `nt` has no productions.
  pub fn get(&self, nt: NonTerminal) -> impl Iterator<Item = &KSeq> {
    self.by_nonterm.get(&nt).into_iter().flatten()
  }

  pub fn contains(&self, nt: NonTerminal, seq: &KSeq) -> bool {
    self
      .by_nonterm
      .get(&nt)
      .map_or(false, |seqs| seqs.contains(seq))
  }

  /// The sequence contributed by a single production.
  pub fn of_prod(&self, id: ProductionId) -> Option<&KSeq> {
    self.by_prod.get(&id)
  }

  pub fn sets(&self) -> &BTreeMap<NonTerminal, BTreeSet<KSeq>> {
    &self.by_nonterm
  }
}

impl ToDoc for Firsts {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    super::seq_sets_to_doc(da, &self.by_nonterm)
  }
}

struct Frame<'g> {
  head: NonTerminal,
  rest: &'g [Elem],
  // Length of the output sequence when this frame was entered.
  start_len: usize,
}

fn production_first(
  productions: &ProductionSet,
  prod: &Production,
  k: usize,
) -> Result<KSeq, GrammarError> {
  let mut seq = KSeq::empty();
  if prod.is_epsilon() {
    return Ok(seq);
  }

  let mut frames = vec![Frame {
    head: prod.head(),
    rest: prod.elements(),
    start_len: 0,
  }];

  loop {
    let next = match frames.last_mut() {
      None => break,
      Some(frame) => match frame.rest.split_first() {
        Some((elem, tail)) => {
          frame.rest = tail;
          Some(*elem)
        }
        None => None,
      },
    };

    let elem = match next {
      Some(elem) => elem,
      None => {
        frames.pop();
        continue;
      }
    };

    match elem {
      Elem::Term(t) => {
        seq.push_bounded(t, k);
        if seq.is_complete(k) {
          break;
        }
      }
      Elem::NonTerm(nt) => {
        let expansion = productions
          .try_alternatives(nt)?
          .find(|alt| !alt.is_epsilon());
        if let Some(alt) = expansion {
          // Reaching a nonterminal again before any terminal was produced
          // means the expansion would never make progress.
          if frames
            .iter()
            .any(|f| f.head == nt && f.start_len == seq.len())
          {
            return Err(GrammarError::LeftRecursion(nt));
          }
          frames.push(Frame {
            head: nt,
            rest: alt.elements(),
            start_len: seq.len(),
          });
        }
      }
    }
  }

  Ok(seq)
}

impl Pass for Firsts {
  type Error = GrammarError;

  fn run_pass(pass_map: &PassContext) -> Result<Self, GrammarError> {
    let productions = pass_map.productions();
    let k = pass_map.k();

    let mut by_nonterm = CollectMap::new();
    let mut by_prod = BTreeMap::new();
    for nt in productions.nonterminals() {
      by_nonterm.touch(nt);
    }

    for prod in productions.prods() {
      let seq = production_first(productions, prod, k)?;
      log::trace!("FIRST({}) = {}", prod, seq);
      by_nonterm.insert(prod.head(), seq.clone());
      by_prod.insert(prod.id(), seq);
    }

    let firsts = Firsts {
      by_nonterm: by_nonterm.into_inner(),
      by_prod,
    };
    log::debug!(
      "FIRST_{} table:\n{}",
      k,
      crate::utils::to_pretty(&firsts, 80)
    );
    Ok(firsts)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::{
    examples::{self, ONE, ZERO},
    Terminal,
  };

  fn seq(terms: &[Terminal]) -> KSeq {
    KSeq::from_terms(terms.iter().copied())
  }

  #[test]
  fn test_one_sequence_per_production() {
    let g = examples::make_prefix_ops();
    let pass_map = PassContext::new(&g, 1).unwrap();
    let firsts = pass_map.get_pass::<Firsts>().unwrap();

    let s: BTreeSet<_> = firsts.get(examples::OPS_S).cloned().collect();
    let expected: BTreeSet<_> = vec![
      seq(&[examples::PLUS]),
      seq(&[examples::MINUS]),
      seq(&[examples::ATOM]),
    ]
    .into_iter()
    .collect();
    assert_eq!(s, expected);
  }

  #[test]
  fn test_recursive_production_keeps_only_its_own_expansion() {
    let g = examples::make_prefix_ops();
    let pass_map = PassContext::new(&g, 2).unwrap();
    let firsts = pass_map.get_pass::<Firsts>().unwrap();

    use examples::{ATOM, MINUS, PLUS};
    // S -> + S S expands the inner S through S -> + S S again, so (+, a) is
    // not a member even though the input + a a derives from S.
    assert_eq!(
      firsts.of_prod(ProductionId::new(0)),
      Some(&seq(&[PLUS, PLUS]))
    );
    assert_eq!(
      firsts.of_prod(ProductionId::new(1)),
      Some(&seq(&[MINUS, PLUS]))
    );
    assert!(!firsts.contains(examples::OPS_S, &seq(&[PLUS, ATOM])));
  }

  #[test]
  fn test_nonterminals_expand_through_first_alternative() {
    let g = examples::make_ll2();
    let pass_map = PassContext::new(&g, 2).unwrap();
    let firsts = pass_map.get_pass::<Firsts>().unwrap();

    use examples::{LL2_A, LL2_ONE, LL2_S};
    assert!(firsts.contains(LL2_S, &seq(&[ZERO, ZERO])));
    assert!(firsts.contains(LL2_S, &seq(&[ZERO, ONE])));
    assert!(firsts.contains(LL2_A, &seq(&[ZERO, ZERO])));
    assert!(firsts.contains(LL2_A, &seq(&[ZERO, ONE])));
    assert_eq!(
      firsts.get(LL2_ONE).cloned().collect::<Vec<_>>(),
      vec![seq(&[ONE])]
    );
  }

  #[test]
  fn test_epsilon_and_end() {
    let g = examples::make_nullable_wrapped();
    let pass_map = PassContext::new(&g, 2).unwrap();
    let firsts = pass_map.get_pass::<Firsts>().unwrap();

    use examples::{EPS_A, EPS_S};
    assert_eq!(
      firsts.of_prod(examples::EPS_A_EMPTY),
      Some(&KSeq::empty())
    );
    assert!(firsts.contains(EPS_A, &seq(&[ZERO, ZERO])));
    assert!(!firsts.contains(EPS_A, &seq(&[ZERO, ONE])));
    assert_eq!(
      firsts.get(EPS_S).cloned().collect::<Vec<_>>(),
      vec![seq(&[ZERO, ZERO])]
    );
  }

  #[test]
  fn test_end_terminates_the_sequence() {
    let g = examples::make_nullable_wrapped();
    let pass_map = PassContext::new(&g, 3).unwrap();
    let firsts = pass_map.get_pass::<Firsts>().unwrap();
    // S -> A $ with A -> 0 A 1 expands to 0 0 0 at k = 3.
    assert!(firsts.contains(examples::EPS_S, &seq(&[ZERO, ZERO, ZERO])));

    let g = examples::make_end_only();
    let pass_map = PassContext::new(&g, 3).unwrap();
    let firsts = pass_map.get_pass::<Firsts>().unwrap();
    assert_eq!(
      firsts.get(examples::END_S).cloned().collect::<Vec<_>>(),
      vec![seq(&[ZERO, Terminal::END])]
    );
  }

  #[test]
  fn test_left_recursion_is_an_error() {
    let g = examples::make_left_recursive();
    let pass_map = PassContext::new(&g, 1).unwrap();
    assert_eq!(
      pass_map.get_pass::<Firsts>().unwrap_err(),
      GrammarError::LeftRecursion(examples::LR_E)
    );
  }
}
