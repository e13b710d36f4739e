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

//! Table-driven LL(k) parsing.
//!
//! A grammar is assembled as a `grammar::ProductionSet`, analysed into FIRST
//! and FOLLOW sets of bounded terminal sequences, and compiled into a
//! `parsers::table::PredictiveTable`. A `parsers::ll::Parser` then drives a
//! stack-based parse of a terminal stream against that table, calling a
//! semantic action on every production it applies.

#[macro_use]
extern crate derivative;

pub mod grammar;
pub mod parsers;
pub mod utils;

pub use grammar::{
  Elem, GrammarError, KSeq, NonTerminal, ProductionId, ProductionSet,
  Terminal, Vocabulary,
};
pub use parsers::{
  ll::{ParseRun, ParseStatus, Parser},
  table::{PredictiveTable, TableError},
  NoAction, ParseError, SemanticAction, TokenSource,
};
