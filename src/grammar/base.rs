// Copyright 2018 Google LLC
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

pub mod builder;
mod element_types;

use {
  crate::utils::{breadth_first_search, ToDoc},
  std::collections::{btree_map, BTreeMap, BTreeSet},
};

pub use element_types::{NonTerminal, ProductionId, Terminal};

/// A single grammar symbol (terminal or non-terminal).
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Elem {
  Term(Terminal),
  NonTerm(NonTerminal),
}

impl Elem {
  /// If this element is a terminal, returns a `Some` value containing a
  /// terminal datum. Returns `None` otherwise.
  pub fn as_term(&self) -> Option<Terminal> {
    match self {
      Elem::NonTerm(_) => None,
      Elem::Term(t) => Some(*t),
    }
  }

  /// Gets an element as a nonterm. Returns a `None` value otherwise.
  pub fn as_nonterm(&self) -> Option<NonTerminal> {
    match self {
      Elem::NonTerm(nt) => Some(*nt),
      Elem::Term(_) => None,
    }
  }

  pub fn is_empty(&self) -> bool {
    matches!(self, Elem::Term(t) if t.is_empty())
  }

  pub fn is_end(&self) -> bool {
    matches!(self, Elem::Term(t) if t.is_end())
  }
}

impl From<Terminal> for Elem {
  fn from(t: Terminal) -> Elem {
    Elem::Term(t)
  }
}

impl From<NonTerminal> for Elem {
  fn from(nt: NonTerminal) -> Elem {
    Elem::NonTerm(nt)
  }
}

impl ToDoc for Elem {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    match self {
      Elem::NonTerm(nt) => {
        da.text("<").append(nt.to_doc(da)).append(da.text(">"))
      }
      Elem::Term(t) => t.to_doc(da),
    }
  }
}

impl std::fmt::Debug for Elem {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Elem::Term(term) => write!(fmt, "{:?}", term),
      Elem::NonTerm(nt) => write!(fmt, "<{:?}>", nt),
    }
  }
}

impl std::fmt::Display for Elem {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    std::fmt::Debug::fmt(self, fmt)
  }
}

/// Errors raised while defining a grammar or analysing it.
///
/// None of these leave a partially built result behind.
#[derive(thiserror::Error, Clone, PartialEq, Eq, Debug)]
pub enum GrammarError {
  #[error("symbol {elem} is outside the declared vocabulary ({num_terminals} terminals, {num_nonterminals} nonterminals)")]
  InvalidSymbol {
    elem: Elem,
    num_terminals: u16,
    num_nonterminals: u16,
  },
  #[error("production {prod} is malformed: {reason}")]
  MalformedProduction {
    prod: ProductionId,
    reason: &'static str,
  },
  #[error("production id {0} is already in use")]
  DuplicateProduction(ProductionId),
  #[error("nonterminal {0} is referenced but has no productions")]
  UndefinedNonterminal(NonTerminal),
  #[error("nonterminal {0} is left recursive")]
  LeftRecursion(NonTerminal),
  #[error("lookahead must be at least one terminal, got {0}")]
  InvalidLookahead(usize),
}

/// The declared number of terminals and nonterminals of a grammar. Symbol ids
/// must be below these counts.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Vocabulary {
  num_terminals: u16,
  num_nonterminals: u16,
}

impl Vocabulary {
  /// Creates a vocabulary. The terminal count includes the reserved `EMPTY`
  /// and `END` terminals.
  pub fn new(
    num_terminals: u16,
    num_nonterminals: u16,
  ) -> Result<Self, GrammarError> {
    let vocab = Vocabulary {
      num_terminals,
      num_nonterminals,
    };
    if num_terminals <= Terminal::END.id() {
      return Err(vocab.invalid(Terminal::END.into()));
    }
    if num_nonterminals == 0 {
      return Err(vocab.invalid(NonTerminal::new(0).into()));
    }
    Ok(vocab)
  }

  pub fn num_terminals(&self) -> u16 {
    self.num_terminals
  }

  pub fn num_nonterminals(&self) -> u16 {
    self.num_nonterminals
  }

  pub fn contains(&self, elem: Elem) -> bool {
    match elem {
      Elem::Term(t) => t.id() < self.num_terminals,
      Elem::NonTerm(nt) => nt.id() < self.num_nonterminals,
    }
  }

  pub fn check(&self, elem: Elem) -> Result<Elem, GrammarError> {
    if self.contains(elem) {
      Ok(elem)
    } else {
      Err(self.invalid(elem))
    }
  }

  fn invalid(&self, elem: Elem) -> GrammarError {
    GrammarError::InvalidSymbol {
      elem,
      num_terminals: self.num_terminals,
      num_nonterminals: self.num_nonterminals,
    }
  }
}

/// One rewrite rule `head -> elements`.
///
/// The right hand side is never empty. An epsilon production consists of the
/// single element `EMPTY`; no other production contains `EMPTY`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Production {
  id: ProductionId,
  head: NonTerminal,
  elements: Vec<Elem>,
}

impl Production {
  pub fn id(&self) -> ProductionId {
    self.id
  }

  /// Returns the head of this production.
  pub fn head(&self) -> NonTerminal {
    self.head
  }

  /// Returns the right hand side of this production.
  pub fn elements(&self) -> &[Elem] {
    &self.elements
  }

  pub fn num_elements(&self) -> usize {
    self.elements.len()
  }

  /// Returns true if this is the epsilon production of its head.
  pub fn is_epsilon(&self) -> bool {
    self.elements.first().map_or(false, Elem::is_empty)
  }
}

impl ToDoc for Production {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    self
      .id
      .to_doc(da)
      .append(da.text(": "))
      .append(self.head.to_doc(da))
      .append(da.text(" ->"))
      .append(da.softline())
      .append(da.intersperse(
        self.elements.iter().map(|e| e.to_doc(da)),
        da.softline(),
      ))
      .group()
  }
}

impl std::fmt::Display for Production {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(fmt, "{}: {} ->", self.id, self.head)?;
    for elem in &self.elements {
      write!(fmt, " {}", elem)?;
    }
    Ok(())
  }
}

/// The productions of a grammar, grouped by head nonterminal.
///
/// Productions are held in an arena in insertion order. The per-nonterminal
/// alternative lists store arena indices, so a clone is a fully independent
/// copy.
#[derive(Clone, Debug)]
pub struct ProductionSet {
  vocab: Vocabulary,
  start_symbol: NonTerminal,
  arena: Vec<Production>,
  by_id: BTreeMap<ProductionId, usize>,
  rules: BTreeMap<NonTerminal, Vec<usize>>,
}

impl ProductionSet {
  pub fn new(
    vocab: Vocabulary,
    start: NonTerminal,
  ) -> Result<Self, GrammarError> {
    vocab.check(start.into())?;
    Ok(ProductionSet {
      vocab,
      start_symbol: start,
      arena: Vec::new(),
      by_id: BTreeMap::new(),
      rules: BTreeMap::new(),
    })
  }

  pub fn vocabulary(&self) -> Vocabulary {
    self.vocab
  }

  /// Returns the start nonterminal for this grammar.
  pub fn start_nt(&self) -> NonTerminal {
    self.start_symbol
  }

  /// Creates a production with a one element right hand side. The production
  /// is not part of the set until passed to `add_alternative`.
  pub fn new_production(
    &self,
    id: ProductionId,
    head: NonTerminal,
    first: impl Into<Elem>,
  ) -> Result<Production, GrammarError> {
    self.vocab.check(head.into())?;
    let first = self.vocab.check(first.into())?;
    Ok(Production {
      id,
      head,
      elements: vec![first],
    })
  }

  /// Extends the right hand side of `prod` with `elem`.
  pub fn append_symbol(
    &self,
    prod: &mut Production,
    elem: impl Into<Elem>,
  ) -> Result<(), GrammarError> {
    let elem = self.vocab.check(elem.into())?;
    if prod.is_epsilon() {
      return Err(GrammarError::MalformedProduction {
        prod: prod.id,
        reason: "an epsilon production cannot be extended",
      });
    }
    if elem.is_empty() {
      return Err(GrammarError::MalformedProduction {
        prod: prod.id,
        reason: "epsilon may only appear alone",
      });
    }
    prod.elements.push(elem);
    Ok(())
  }

  /// Appends `prod` to the ordered alternatives of `head`.
  pub fn add_alternative(
    &mut self,
    head: NonTerminal,
    prod: Production,
  ) -> Result<(), GrammarError> {
    if prod.head != head {
      return Err(GrammarError::MalformedProduction {
        prod: prod.id,
        reason: "head does not match the nonterminal it is added to",
      });
    }
    let index = self.arena.len();
    match self.by_id.entry(prod.id) {
      btree_map::Entry::Occupied(_) => {
        return Err(GrammarError::DuplicateProduction(prod.id))
      }
      btree_map::Entry::Vacant(vac) => {
        vac.insert(index);
      }
    }
    self.rules.entry(head).or_insert_with(Vec::new).push(index);
    self.arena.push(prod);
    Ok(())
  }

  /// Returns an independent copy of this set.
  pub fn deep_copy(&self) -> Self {
    self.clone()
  }

  /// Gets an iterator over all productions in insertion order.
  pub fn prods(&self) -> impl Iterator<Item = &Production> {
    self.arena.iter()
  }

  pub fn len(&self) -> usize {
    self.arena.len()
  }

  pub fn is_empty(&self) -> bool {
    self.arena.is_empty()
  }

  pub fn get(&self, id: ProductionId) -> Option<&Production> {
    self.by_id.get(&id).map(|index| &self.arena[*index])
  }

  /// Returns the alternatives of `nt` in the order they were added. Empty if
  /// `nt` has none.
  pub fn alternatives(
    &self,
    nt: NonTerminal,
  ) -> impl Iterator<Item = &Production> {
    self
      .rules
      .get(&nt)
      .into_iter()
      .flatten()
      .map(move |index| &self.arena[*index])
  }

  /// Like `alternatives`, but fails if `nt` has none.
  pub fn try_alternatives(
    &self,
    nt: NonTerminal,
  ) -> Result<impl Iterator<Item = &Production>, GrammarError> {
    if self.rules.contains_key(&nt) {
      Ok(self.alternatives(nt))
    } else {
      Err(GrammarError::UndefinedNonterminal(nt))
    }
  }

  /// Returns the nonterminals that have at least one production.
  pub fn nonterminals(&self) -> impl Iterator<Item = NonTerminal> + '_ {
    self.rules.keys().copied()
  }

  fn referenced_nonterminals(&self) -> impl Iterator<Item = NonTerminal> + '_ {
    std::iter::once(self.start_symbol).chain(
      self
        .arena
        .iter()
        .flat_map(|p| p.elements.iter())
        .filter_map(Elem::as_nonterm),
    )
  }

  fn reachable_nonterms(&self) -> BTreeSet<NonTerminal> {
    breadth_first_search(std::iter::once(self.start_symbol), |nt| {
      self
        .alternatives(*nt)
        .flat_map(|p| p.elements.iter())
        .filter_map(Elem::as_nonterm)
        .collect::<BTreeSet<_>>()
    })
  }

  /// Verifies that every referenced nonterminal, including the start symbol,
  /// has at least one production.
  pub fn check(&self) -> Result<(), GrammarError> {
    if let Some(nt) = self
      .referenced_nonterminals()
      .find(|nt| !self.rules.contains_key(nt))
    {
      return Err(GrammarError::UndefinedNonterminal(nt));
    }

    let reachable = self.reachable_nonterms();
    for nt in self.nonterminals().filter(|nt| !reachable.contains(nt)) {
      log::warn!("Nonterminal {} is unreachable from {}.", nt, self.start_symbol);
    }
    Ok(())
  }

  pub fn to_pretty(&self) -> String {
    crate::utils::to_pretty(self, 80)
  }
}

impl ToDoc for ProductionSet {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    let start_entry = da
      .text("Start =")
      .append(da.space())
      .append(self.start_symbol.to_doc(da));
    let rules = self.rules.values().map(|indices| {
      da.intersperse(
        indices.iter().map(|index| self.arena[*index].to_doc(da)),
        da.hardline(),
      )
    });

    start_entry
      .append(da.hardline())
      .append(da.intersperse(rules, da.hardline()))
  }
}

#[cfg(test)]
mod test {
  use super::*;

  const S: NonTerminal = NonTerminal::new(0);
  const A: NonTerminal = NonTerminal::new(1);
  const ZERO: Terminal = Terminal::new(2);

  fn empty_set() -> ProductionSet {
    ProductionSet::new(Vocabulary::new(3, 2).unwrap(), S).unwrap()
  }

  #[test]
  fn test_vocabulary_rejects_missing_reserved_terminals() {
    assert!(matches!(
      Vocabulary::new(1, 1),
      Err(GrammarError::InvalidSymbol { .. })
    ));
    assert!(Vocabulary::new(2, 1).is_ok());
  }

  #[test]
  fn test_new_production_validates_symbols() {
    let set = empty_set();
    let err = set
      .new_production(ProductionId::new(0), S, Terminal::new(3))
      .unwrap_err();
    assert!(matches!(err, GrammarError::InvalidSymbol { .. }));

    let err = set
      .new_production(ProductionId::new(0), NonTerminal::new(2), ZERO)
      .unwrap_err();
    assert!(matches!(err, GrammarError::InvalidSymbol { .. }));
  }

  #[test]
  fn test_epsilon_productions_have_one_symbol() {
    let set = empty_set();
    let mut eps = set
      .new_production(ProductionId::new(0), A, Terminal::EMPTY)
      .unwrap();
    assert!(eps.is_epsilon());
    assert!(matches!(
      set.append_symbol(&mut eps, ZERO),
      Err(GrammarError::MalformedProduction { .. })
    ));

    let mut prod = set.new_production(ProductionId::new(1), A, ZERO).unwrap();
    assert!(matches!(
      set.append_symbol(&mut prod, Terminal::EMPTY),
      Err(GrammarError::MalformedProduction { .. })
    ));
    set.append_symbol(&mut prod, A).unwrap();
    assert_eq!(prod.elements(), &[Elem::Term(ZERO), Elem::NonTerm(A)]);
    assert!(matches!(
      set.append_symbol(&mut prod, NonTerminal::new(9)),
      Err(GrammarError::InvalidSymbol { .. })
    ));
  }

  #[test]
  fn test_alternatives_keep_insertion_order() {
    let mut set = empty_set();
    for id in &[4, 2, 7] {
      let prod = set.new_production(ProductionId::new(*id), S, ZERO).unwrap();
      set.add_alternative(S, prod).unwrap();
    }
    let ids: Vec<_> = set.alternatives(S).map(|p| p.id().id()).collect();
    assert_eq!(ids, vec![4, 2, 7]);
    assert_eq!(set.get(ProductionId::new(2)).unwrap().head(), S);
  }

  #[test]
  fn test_add_alternative_rejects_bad_input() {
    let mut set = empty_set();
    let prod = set.new_production(ProductionId::new(0), S, ZERO).unwrap();
    assert!(matches!(
      set.add_alternative(A, prod.clone()),
      Err(GrammarError::MalformedProduction { .. })
    ));
    set.add_alternative(S, prod.clone()).unwrap();
    assert_eq!(
      set.add_alternative(S, prod),
      Err(GrammarError::DuplicateProduction(ProductionId::new(0)))
    );
  }

  #[test]
  fn test_check_requires_closure() {
    let mut set = empty_set();
    assert_eq!(set.check(), Err(GrammarError::UndefinedNonterminal(S)));

    let mut prod = set.new_production(ProductionId::new(0), S, ZERO).unwrap();
    set.append_symbol(&mut prod, A).unwrap();
    set.add_alternative(S, prod).unwrap();
    assert_eq!(set.check(), Err(GrammarError::UndefinedNonterminal(A)));

    let eps = set
      .new_production(ProductionId::new(1), A, Terminal::EMPTY)
      .unwrap();
    set.add_alternative(A, eps).unwrap();
    assert_eq!(set.check(), Ok(()));
  }

  #[test]
  fn test_deep_copy_is_independent() {
    let mut set = empty_set();
    let prod = set.new_production(ProductionId::new(0), S, ZERO).unwrap();
    set.add_alternative(S, prod).unwrap();

    let copy = set.deep_copy();
    let extra = set.new_production(ProductionId::new(1), S, ZERO).unwrap();
    set.add_alternative(S, extra).unwrap();

    assert_eq!(copy.alternatives(S).count(), 1);
    assert_eq!(set.alternatives(S).count(), 2);
  }

  #[test]
  fn test_display() {
    let set = empty_set();
    let mut prod = set.new_production(ProductionId::new(3), S, ZERO).unwrap();
    set.append_symbol(&mut prod, A).unwrap();
    set.append_symbol(&mut prod, Terminal::END).unwrap();
    assert_eq!(prod.to_string(), "P3: NT0 -> T2 <NT1> $");
  }
}
