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

use crate::grammar::{Elem, KSeq, ProductionId, Terminal};

pub mod ll;
pub mod table;
pub mod tree;

/// A stream of already tokenized terminals.
pub trait TokenSource {
  /// Returns the next terminal, or `None` once the source is exhausted. An
  /// exhausted source reads as an endless run of `Terminal::END`.
  /// `Terminal::EMPTY` is not a token; a source that yields it fails the
  /// parse with `ParseError::EmptyToken`.
  fn next_terminal(&mut self) -> Option<Terminal>;
}

impl<I> TokenSource for I
where
  I: Iterator<Item = Terminal>,
{
  fn next_terminal(&mut self) -> Option<Terminal> {
    self.next()
  }
}

/// Caller supplied logic run once for every production the parser applies,
/// in leftmost derivation order. The action owns the shape of the tree kept
/// in `root`; the parser never looks inside it.
pub trait SemanticAction<T> {
  fn apply(&self, root: &mut Option<T>, prod: ProductionId)
    -> anyhow::Result<()>;
}

impl<T, F> SemanticAction<T> for F
where
  F: Fn(&mut Option<T>, ProductionId) -> anyhow::Result<()>,
{
  fn apply(
    &self,
    root: &mut Option<T>,
    prod: ProductionId,
  ) -> anyhow::Result<()> {
    self(root, prod)
  }
}

/// A semantic action that does nothing. Parsing with it only recognizes the
/// input.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAction;

impl<T> SemanticAction<T> for NoAction {
  fn apply(&self, _: &mut Option<T>, _: ProductionId) -> anyhow::Result<()> {
    Ok(())
  }
}

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
  #[error("expected {expected}, but the lookahead is {lookahead}")]
  UnexpectedToken { expected: Elem, lookahead: KSeq },
  #[error("input continues after the start symbol was derived: {lookahead}")]
  TrailingInput { lookahead: KSeq },
  #[error("semantic action for {production} failed")]
  ActionFailed {
    production: ProductionId,
    #[source]
    source: anyhow::Error,
  },
  #[error("the token source produced the epsilon marker")]
  EmptyToken,
  #[error("the parse has already failed")]
  Halted,
}
