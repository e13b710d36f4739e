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

//! A ready-made tree for semantic actions to build.
//!
//! Productions are applied in leftmost derivation order, which is the
//! pre-order of the parse tree. An action can therefore create one node per
//! production and hand it to `Node::insert_preorder`, which places it in the
//! leftmost child slot that is still open.

use std::sync::Arc;

use im::Vector;

#[derive(Derivative)]
#[derivative(
  Clone(bound = ""),
  Debug(bound = "L: std::fmt::Debug"),
  PartialEq(bound = "L: PartialEq")
)]
pub struct Node<L> {
  label: Arc<L>,
  arity: usize,
  children: Vector<Node<L>>,
}

impl<L> Node<L> {
  /// Creates a node with `arity` empty child slots.
  pub fn new(label: L, arity: usize) -> Self {
    Node {
      label: Arc::new(label),
      arity,
      children: Vector::new(),
    }
  }

  pub fn label(&self) -> &L {
    &self.label
  }

  pub fn arity(&self) -> usize {
    self.arity
  }

  pub fn children(&self) -> impl Iterator<Item = &Node<L>> {
    self.children.iter()
  }

  /// Returns true if every child slot in this subtree is filled.
  pub fn is_complete(&self) -> bool {
    self.children.len() == self.arity
      && self.children.iter().all(Node::is_complete)
  }

  /// The number of nodes in this subtree.
  pub fn size(&self) -> usize {
    1 + self.children.iter().map(Node::size).sum::<usize>()
  }

  /// Places `node` in the leftmost open child slot of this subtree. Gives the
  /// node back if the subtree is already complete.
  pub fn insert_preorder(&mut self, node: Node<L>) -> Result<(), Node<L>> {
    let mut node = node;
    for child in self.children.iter_mut() {
      match child.insert_preorder(node) {
        Ok(()) => return Ok(()),
        Err(rejected) => node = rejected,
      }
    }

    if self.children.len() < self.arity {
      self.children.push_back(node);
      Ok(())
    } else {
      Err(node)
    }
  }

  /// Visits the labels of this subtree in pre-order.
  pub fn preorder_labels(&self) -> Vec<&L> {
    let mut labels = vec![self.label()];
    for child in &self.children {
      labels.extend(child.preorder_labels());
    }
    labels
  }
}
