//! A pass is a type of query over the grammar that may be depended on by other passes.
//! This allows us to build each different type of pass in isolation, and then combine them
//! with automatic dependency resolution.

pub mod firsts;
pub mod follows;
pub mod nullable;

use std::{
  any::{Any, TypeId},
  cell::RefCell,
  collections::{BTreeMap, BTreeSet},
  rc::Rc,
};

use crate::{
  grammar::{GrammarError, KSeq, NonTerminal, ProductionSet},
  utils::ToDoc,
};

/// A unique placeholder type to represent the value of a pass that hasn't completed.
///
/// This helps us avoid accidental infinite recursion in the case where a pass depends on itself (directly or indirectly).
struct NoCurrentValue;

pub trait Pass: Any + Sized + 'static {
  type Error: std::error::Error + 'static;

  fn run_pass(pass_map: &PassContext) -> Result<Self, Self::Error>;
}

/// A map from passes to their associated results, for one production set and
/// one lookahead length.
pub struct PassContext<'a> {
  productions: &'a ProductionSet,
  k: usize,
  passes: RefCell<BTreeMap<TypeId, Rc<dyn Any + 'static>>>,
}

impl<'a> PassContext<'a> {
  /// Creates a new pass map over `productions`. The set must be closed (see
  /// `ProductionSet::check`) and `k` must be at least one.
  pub fn new(
    productions: &'a ProductionSet,
    k: usize,
  ) -> Result<Self, GrammarError> {
    if k == 0 {
      return Err(GrammarError::InvalidLookahead(k));
    }
    productions.check()?;
    Ok(PassContext {
      productions,
      k,
      passes: RefCell::new(BTreeMap::new()),
    })
  }

  /// Returns the underlying production set.
  pub fn productions(&self) -> &'a ProductionSet {
    self.productions
  }

  /// The lookahead length every pass is computed for.
  pub fn k(&self) -> usize {
    self.k
  }

  /// Returns the result of the given pass. Computes it if it hasn't been computed yet. Passes can
  /// depend on other passes.
  pub fn get_pass<P: Pass>(&self) -> Result<Rc<P>, P::Error> {
    let pass_type = TypeId::of::<P>();

    let cached = self.passes.borrow().get(&pass_type).cloned();
    if let Some(pass) = cached {
      return match pass.downcast::<P>() {
        Ok(value) => Ok(value),
        Err(_) => panic!("Detected recursive loop in pass dependencies."),
      };
    }

    // Mark the pass as in process, so a dependency cycle is caught above.
    self
      .passes
      .borrow_mut()
      .insert(pass_type, Rc::new(NoCurrentValue));

    match P::run_pass(self) {
      Ok(value) => {
        let value = Rc::new(value);
        self
          .passes
          .borrow_mut()
          .insert(pass_type, value.clone() as Rc<dyn Any>);
        Ok(value)
      }
      Err(e) => {
        self.passes.borrow_mut().remove(&pass_type);
        Err(e)
      }
    }
  }
}

/// Renders a per-nonterminal table of sequence sets, one nonterminal per
/// line: `NT0 | { (T2, T3), (T2) }`.
pub(crate) fn seq_sets_to_doc<'a, DA: pretty::DocAllocator<'a>>(
  da: &'a DA,
  sets: &BTreeMap<NonTerminal, BTreeSet<KSeq>>,
) -> pretty::DocBuilder<'a, DA>
where
  DA::Doc: Clone,
{
  da.intersperse(
    sets.iter().map(|(nt, seqs)| {
      nt.to_doc(da)
        .append(da.text(" | {"))
        .append(
          da.line()
            .append(da.intersperse(
              seqs.iter().map(|seq| seq.to_doc(da)),
              da.text(",").append(da.line()),
            ))
            .nest(2),
        )
        .append(da.line())
        .append(da.text("}"))
        .group()
    }),
    da.hardline(),
  )
}
