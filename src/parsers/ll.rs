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

//! A table-driven LL(k) parser.

use std::{collections::VecDeque, marker::PhantomData, sync::Arc};

use crate::{
  grammar::{Elem, KSeq, ProductionSet, Terminal},
  utils::fmt::list_fmt,
};

use super::{
  table::{PredictiveTable, TableError},
  ParseError, SemanticAction, TokenSource,
};

/// A parser for one grammar and lookahead length. The production set and the
/// table are shared, so a parser is cheap to clone and can run any number of
/// independent parses.
#[derive(Derivative)]
#[derivative(Clone(bound = "A: Clone"), Debug(bound = ""))]
pub struct Parser<T, A> {
  productions: Arc<ProductionSet>,
  table: Arc<PredictiveTable>,
  #[derivative(Debug = "ignore")]
  action: A,
  k: usize,
  _tree: PhantomData<fn() -> T>,
}

impl<T, A> Parser<T, A>
where
  A: SemanticAction<T>,
{
  /// Builds the predictive table for `productions` and wraps it in a parser.
  /// Fails if the grammar is not LL(`k`).
  pub fn new(
    productions: impl Into<Arc<ProductionSet>>,
    action: A,
    k: usize,
  ) -> Result<Self, TableError> {
    let productions = productions.into();
    let table = PredictiveTable::build(&productions, k)?;
    Ok(Parser {
      productions,
      table: Arc::new(table),
      action,
      k,
      _tree: PhantomData,
    })
  }

  pub fn productions(&self) -> &ProductionSet {
    &self.productions
  }

  pub fn table(&self) -> &PredictiveTable {
    &self.table
  }

  pub fn k(&self) -> usize {
    self.k
  }

  /// Starts a parse of `tokens` that is driven one step at a time.
  pub fn start<S: TokenSource>(&self, tokens: S) -> ParseRun<'_, T, A, S> {
    ParseRun::new(self, tokens)
  }

  /// Parses all of `tokens`, returning the tree the semantic action built.
  pub fn parse<S: TokenSource>(
    &self,
    tokens: S,
  ) -> Result<Option<T>, ParseError> {
    let mut run = self.start(tokens);
    loop {
      if let ParseStatus::Accepted = run.step()? {
        return Ok(run.into_root());
      }
    }
  }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ParseStatus {
  Running,
  Accepted,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum RunState {
  Running,
  Accepted,
  Failed,
}

/// The state of a single parse: the symbol stack, the lookahead window and
/// the tree built so far.
pub struct ParseRun<'p, T, A, S> {
  parser: &'p Parser<T, A>,
  tokens: S,
  source_done: bool,
  empty_token: bool,
  window: VecDeque<Terminal>,
  stack: Vec<Elem>,
  root: Option<T>,
  state: RunState,
}

impl<'p, T, A, S> ParseRun<'p, T, A, S>
where
  A: SemanticAction<T>,
  S: TokenSource,
{
  fn new(parser: &'p Parser<T, A>, tokens: S) -> Self {
    let mut run = ParseRun {
      parser,
      tokens,
      source_done: false,
      empty_token: false,
      window: VecDeque::with_capacity(parser.k),
      stack: vec![
        Elem::Term(Terminal::END),
        Elem::NonTerm(parser.productions.start_nt()),
      ],
      root: None,
      state: RunState::Running,
    };
    for _ in 0..parser.k {
      let next = run.pull();
      run.window.push_back(next);
    }
    run
  }

  fn pull(&mut self) -> Terminal {
    while !self.source_done {
      match self.tokens.next_terminal() {
        Some(t) if t.is_empty() => {
          self.empty_token = true;
          self.source_done = true;
        }
        Some(t) if !t.is_end() => return t,
        _ => self.source_done = true,
      }
    }
    Terminal::END
  }

  fn advance(&mut self) {
    self.window.pop_front();
    let next = self.pull();
    self.window.push_back(next);
  }

  fn front(&self) -> Terminal {
    self.window.front().copied().unwrap_or(Terminal::END)
  }

  /// The current lookahead window as a sequence.
  pub fn lookahead(&self) -> KSeq {
    self.window.iter().copied().collect()
  }

  /// The tree built so far.
  pub fn root(&self) -> Option<&T> {
    self.root.as_ref()
  }

  pub fn into_root(self) -> Option<T> {
    self.root
  }

  fn fail(&mut self, err: ParseError) -> Result<ParseStatus, ParseError> {
    log::trace!("Parse failed: {}", err);
    self.state = RunState::Failed;
    self.stack.clear();
    self.root = None;
    Err(err)
  }

  /// Pops one symbol off the stack and acts on it.
  pub fn step(&mut self) -> Result<ParseStatus, ParseError> {
    match self.state {
      RunState::Running => {}
      RunState::Accepted => return Ok(ParseStatus::Accepted),
      RunState::Failed => return Err(ParseError::Halted),
    }
    if self.empty_token {
      return self.fail(ParseError::EmptyToken);
    }

    let top = match self.stack.pop() {
      Some(top) => top,
      None => {
        self.state = RunState::Accepted;
        return Ok(ParseStatus::Accepted);
      }
    };
    log::trace!(
      "Step: top = {}, lookahead = {}, stack = {:?}",
      top,
      self.lookahead(),
      list_fmt(&self.stack)
    );

    match top {
      Elem::Term(t) if t.is_end() => {
        if !self.front().is_end() {
          let lookahead = self.lookahead();
          return self.fail(ParseError::TrailingInput { lookahead });
        }
        if self.stack.iter().all(Elem::is_end) {
          log::debug!("Input accepted.");
          self.stack.clear();
          self.state = RunState::Accepted;
          return Ok(ParseStatus::Accepted);
        }
        Ok(ParseStatus::Running)
      }
      Elem::Term(t) => {
        if t == self.front() {
          self.advance();
          Ok(ParseStatus::Running)
        } else {
          let lookahead = self.lookahead();
          self.fail(ParseError::UnexpectedToken {
            expected: top,
            lookahead,
          })
        }
      }
      Elem::NonTerm(nt) => {
        let lookahead = self.lookahead();
        let parser = self.parser;
        let prod = match parser
          .table
          .lookup(nt, &lookahead)
          .and_then(|id| parser.productions.get(id))
        {
          Some(prod) => prod,
          None => {
            return self.fail(ParseError::UnexpectedToken {
              expected: top,
              lookahead,
            })
          }
        };
        log::trace!("Expanding with {}", prod);

        if let Err(source) = parser.action.apply(&mut self.root, prod.id()) {
          return self.fail(ParseError::ActionFailed {
            production: prod.id(),
            source,
          });
        }

        if !prod.is_epsilon() {
          self.stack.extend(prod.elements().iter().rev().copied());
        }
        Ok(ParseStatus::Running)
      }
    }
  }
}

impl<'p, T, A, S> std::fmt::Debug for ParseRun<'p, T, A, S>
where
  T: std::fmt::Debug,
{
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    fmt
      .debug_struct("ParseRun")
      .field("state", &self.state)
      .field("window", &list_fmt(&self.window))
      .field("stack", &list_fmt(&self.stack))
      .field("root", &self.root)
      .finish()
  }
}
