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

use super::{
  Elem, GrammarError, NonTerminal, Production, ProductionId, ProductionSet,
  Terminal, Vocabulary,
};

/// Accumulates the first error seen while a builder closure runs. Builder
/// methods keep chaining after a failure; the error surfaces from `build`.
#[derive(Default)]
struct ErrorSlot(Option<GrammarError>);

impl ErrorSlot {
  fn record<T>(&mut self, result: Result<T, GrammarError>) -> Option<T> {
    match result {
      Ok(v) => Some(v),
      Err(e) => {
        if self.0.is_none() {
          self.0 = Some(e);
        }
        None
      }
    }
  }
}

pub struct ProductionBuilder<'a> {
  set: &'a ProductionSet,
  errors: &'a mut ErrorSlot,
  id: ProductionId,
  head: NonTerminal,
  prod: Option<Production>,
}

impl<'a> ProductionBuilder<'a> {
  fn push(&mut self, elem: Elem) -> &mut Self {
    let result = match &mut self.prod {
      None => self.set.new_production(self.id, self.head, elem).map(Some),
      Some(prod) => self.set.append_symbol(prod, elem).map(|_| None),
    };
    if let Some(Some(prod)) = self.errors.record(result) {
      self.prod = Some(prod);
    }
    self
  }

  pub fn add_term(&mut self, term: Terminal) -> &mut Self {
    self.push(Elem::Term(term))
  }

  pub fn add_nonterm(&mut self, nonterm: NonTerminal) -> &mut Self {
    self.push(Elem::NonTerm(nonterm))
  }

  pub fn add_elem(&mut self, elem: impl Into<Elem>) -> &mut Self {
    self.push(elem.into())
  }
}

// ----------------

pub struct RuleBuilder<'a> {
  set: &'a mut ProductionSet,
  errors: &'a mut ErrorSlot,
  head: NonTerminal,
}

impl<'a> RuleBuilder<'a> {
  /// Adds a production to this rule. A production with no elements becomes
  /// the epsilon production.
  pub fn add_prod(
    &mut self,
    id: u16,
    build_fn: impl FnOnce(&mut ProductionBuilder),
  ) -> &mut Self {
    let id = ProductionId::new(id);
    let prod = {
      let mut builder = ProductionBuilder {
        set: &*self.set,
        errors: &mut *self.errors,
        id,
        head: self.head,
        prod: None,
      };
      build_fn(&mut builder);
      builder.prod
    };

    let prod = match prod {
      Some(prod) => Some(prod),
      None if self.errors.0.is_some() => None,
      None => self.errors.record(self.set.new_production(
        id,
        self.head,
        Terminal::EMPTY,
      )),
    };

    if let Some(prod) = prod {
      let result = self.set.add_alternative(self.head, prod);
      self.errors.record(result);
    }
    self
  }

  /// Adds the epsilon production to this rule.
  pub fn add_empty(&mut self, id: u16) -> &mut Self {
    self.add_prod(id, |pb| {
      pb.add_term(Terminal::EMPTY);
    })
  }
}

// ----------------

pub struct GrammarBuilder {
  set: ProductionSet,
  errors: ErrorSlot,
}

impl GrammarBuilder {
  pub fn add_rule<F>(&mut self, head: NonTerminal, build_fn: F) -> &mut Self
  where
    F: FnOnce(&mut RuleBuilder),
  {
    let mut rule_builder = RuleBuilder {
      set: &mut self.set,
      errors: &mut self.errors,
      head,
    };
    build_fn(&mut rule_builder);
    self
  }

  fn build(self) -> Result<ProductionSet, GrammarError> {
    let GrammarBuilder { set, errors } = self;
    match errors.0 {
      Some(err) => Err(err),
      None => set.check().map(|_| set),
    }
  }
}

/// Builds a checked production set using a builder function.
///
/// Example:
///
/// ```rust
/// # use llk::grammar::{NonTerminal, Terminal, Vocabulary};
/// let s = NonTerminal::new(0);
/// let zero = Terminal::new(2);
/// let one = Terminal::new(3);
/// let set = llk::grammar::build(Vocabulary::new(4, 1)?, s, |gb| {
///   gb.add_rule(s, |rb| {
///     rb.add_prod(0, |pb| {
///       pb.add_term(zero).add_nonterm(s).add_term(one);
///     })
///     .add_prod(1, |pb| {
///       pb.add_term(zero).add_term(one);
///     });
///   });
/// })?;
/// assert_eq!(set.len(), 2);
/// # Ok::<(), llk::grammar::GrammarError>(())
/// ```
pub fn build(
  vocab: Vocabulary,
  start: NonTerminal,
  build_fn: impl FnOnce(&mut GrammarBuilder),
) -> Result<ProductionSet, GrammarError> {
  let mut builder = GrammarBuilder {
    set: ProductionSet::new(vocab, start)?,
    errors: ErrorSlot::default(),
  };
  build_fn(&mut builder);
  builder.build()
}
