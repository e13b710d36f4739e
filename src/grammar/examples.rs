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

//! Example grammars shared by the unit tests.

use crate::grammar::{
  build, NonTerminal, ProductionId, ProductionSet, Terminal, Vocabulary,
};

pub const ZERO: Terminal = Terminal::new(2);
pub const ONE: Terminal = Terminal::new(3);

fn vocab(num_terminals: u16, num_nonterminals: u16) -> Vocabulary {
  Vocabulary::new(num_terminals, num_nonterminals).unwrap()
}

pub const BAL_S: NonTerminal = NonTerminal::new(0);

/// `S -> 0 S 1 | 0 1`. Needs two terminals of lookahead.
pub fn make_balanced() -> ProductionSet {
  build(vocab(4, 1), BAL_S, |gb| {
    gb.add_rule(BAL_S, |rb| {
      rb.add_prod(0, |pb| {
        pb.add_term(ZERO).add_nonterm(BAL_S).add_term(ONE);
      })
      .add_prod(1, |pb| {
        pb.add_term(ZERO).add_term(ONE);
      });
    });
  })
  .unwrap()
}

pub const OPS_S: NonTerminal = NonTerminal::new(0);
pub const PLUS: Terminal = Terminal::new(2);
pub const MINUS: Terminal = Terminal::new(3);
pub const ATOM: Terminal = Terminal::new(4);

/// Prefix expressions: `S -> + S S | - S S | a`.
pub fn make_prefix_ops() -> ProductionSet {
  build(vocab(5, 1), OPS_S, |gb| {
    gb.add_rule(OPS_S, |rb| {
      rb.add_prod(0, |pb| {
        pb.add_term(PLUS).add_nonterm(OPS_S).add_nonterm(OPS_S);
      })
      .add_prod(1, |pb| {
        pb.add_term(MINUS).add_nonterm(OPS_S).add_nonterm(OPS_S);
      })
      .add_prod(2, |pb| {
        pb.add_term(ATOM);
      });
    });
  })
  .unwrap()
}

pub const EPS_S: NonTerminal = NonTerminal::new(0);
pub const EPS_A: NonTerminal = NonTerminal::new(1);
pub const EPS_A_EMPTY: ProductionId = ProductionId::new(2);

/// `S -> A $`, `A -> 0 A 1 | ε`.
pub fn make_nullable_wrapped() -> ProductionSet {
  build(vocab(4, 2), EPS_S, |gb| {
    gb.add_rule(EPS_S, |rb| {
      rb.add_prod(0, |pb| {
        pb.add_nonterm(EPS_A).add_term(Terminal::END);
      });
    })
    .add_rule(EPS_A, |rb| {
      rb.add_prod(1, |pb| {
        pb.add_term(ZERO).add_nonterm(EPS_A).add_term(ONE);
      })
      .add_empty(2);
    });
  })
  .unwrap()
}

pub const OVL_S: NonTerminal = NonTerminal::new(0);

/// `S -> 0 1 | 0 0`. Both alternatives start with the same terminal.
pub fn make_overlapping() -> ProductionSet {
  build(vocab(4, 1), OVL_S, |gb| {
    gb.add_rule(OVL_S, |rb| {
      rb.add_prod(0, |pb| {
        pb.add_term(ZERO).add_term(ONE);
      })
      .add_prod(1, |pb| {
        pb.add_term(ZERO).add_term(ZERO);
      });
    });
  })
  .unwrap()
}

pub const LL2_S: NonTerminal = NonTerminal::new(0);
pub const LL2_A: NonTerminal = NonTerminal::new(1);
pub const LL2_ONE: NonTerminal = NonTerminal::new(2);

/// `S -> 0 A | 0 One`, `A -> 0 A One | 0 One One`, `One -> 1`.
pub fn make_ll2() -> ProductionSet {
  build(vocab(4, 3), LL2_S, |gb| {
    gb.add_rule(LL2_S, |rb| {
      rb.add_prod(0, |pb| {
        pb.add_term(ZERO).add_nonterm(LL2_A);
      })
      .add_prod(1, |pb| {
        pb.add_term(ZERO).add_nonterm(LL2_ONE);
      });
    })
    .add_rule(LL2_A, |rb| {
      rb.add_prod(2, |pb| {
        pb.add_term(ZERO).add_nonterm(LL2_A).add_nonterm(LL2_ONE);
      })
      .add_prod(3, |pb| {
        pb.add_term(ZERO)
          .add_nonterm(LL2_ONE)
          .add_nonterm(LL2_ONE);
      });
    })
    .add_rule(LL2_ONE, |rb| {
      rb.add_prod(4, |pb| {
        pb.add_term(ONE);
      });
    });
  })
  .unwrap()
}

pub const CHAIN_START: NonTerminal = NonTerminal::new(0);
pub const CHAIN_A: NonTerminal = NonTerminal::new(1);
pub const CHAIN_B: NonTerminal = NonTerminal::new(2);
pub const CHAIN_C: NonTerminal = NonTerminal::new(3);
pub const CHAIN_X: Terminal = Terminal::new(2);

/// `Start -> A B`, `A -> ε | x`, `B -> A A | C`, `C -> x C | x`.
pub fn make_chained_nullable() -> ProductionSet {
  build(vocab(3, 4), CHAIN_START, |gb| {
    gb.add_rule(CHAIN_START, |rb| {
      rb.add_prod(0, |pb| {
        pb.add_nonterm(CHAIN_A).add_nonterm(CHAIN_B);
      });
    })
    .add_rule(CHAIN_A, |rb| {
      rb.add_empty(1).add_prod(2, |pb| {
        pb.add_term(CHAIN_X);
      });
    })
    .add_rule(CHAIN_B, |rb| {
      rb.add_prod(3, |pb| {
        pb.add_nonterm(CHAIN_A).add_nonterm(CHAIN_A);
      })
      .add_prod(4, |pb| {
        pb.add_nonterm(CHAIN_C);
      });
    })
    .add_rule(CHAIN_C, |rb| {
      rb.add_prod(5, |pb| {
        pb.add_term(CHAIN_X).add_nonterm(CHAIN_C);
      })
      .add_prod(6, |pb| {
        pb.add_term(CHAIN_X);
      });
    });
  })
  .unwrap()
}

pub const END_S: NonTerminal = NonTerminal::new(0);

/// `S -> 0 $`.
pub fn make_end_only() -> ProductionSet {
  build(vocab(4, 1), END_S, |gb| {
    gb.add_rule(END_S, |rb| {
      rb.add_prod(0, |pb| {
        pb.add_term(ZERO).add_term(Terminal::END);
      });
    });
  })
  .unwrap()
}

pub const LR_E: NonTerminal = NonTerminal::new(0);
pub const LR_T: NonTerminal = NonTerminal::new(1);

/// `E -> E + T | T`, `T -> a`.
pub fn make_left_recursive() -> ProductionSet {
  build(vocab(5, 2), LR_E, |gb| {
    gb.add_rule(LR_E, |rb| {
      rb.add_prod(0, |pb| {
        pb.add_nonterm(LR_E).add_term(PLUS).add_nonterm(LR_T);
      })
      .add_prod(1, |pb| {
        pb.add_nonterm(LR_T);
      });
    })
    .add_rule(LR_T, |rb| {
      rb.add_prod(2, |pb| {
        pb.add_term(ATOM);
      });
    });
  })
  .unwrap()
}

pub const HID_S: NonTerminal = NonTerminal::new(0);
pub const HID_B: NonTerminal = NonTerminal::new(1);
pub const HID_C: NonTerminal = NonTerminal::new(2);

/// `S -> B 0`, `B -> C`, `C -> ε`. `B` is not an epsilon production, but
/// only derives epsilon.
pub fn make_hidden_epsilon() -> ProductionSet {
  build(vocab(3, 3), HID_S, |gb| {
    gb.add_rule(HID_S, |rb| {
      rb.add_prod(0, |pb| {
        pb.add_nonterm(HID_B).add_term(ZERO);
      });
    })
    .add_rule(HID_B, |rb| {
      rb.add_prod(1, |pb| {
        pb.add_nonterm(HID_C);
      });
    })
    .add_rule(HID_C, |rb| {
      rb.add_empty(2);
    });
  })
  .unwrap()
}

pub const TWIN_S: NonTerminal = NonTerminal::new(0);
pub const TWIN_A: NonTerminal = NonTerminal::new(1);

/// `S -> A 0`, `A -> ε | ε`.
pub fn make_twin_epsilon() -> ProductionSet {
  build(vocab(3, 2), TWIN_S, |gb| {
    gb.add_rule(TWIN_S, |rb| {
      rb.add_prod(0, |pb| {
        pb.add_nonterm(TWIN_A).add_term(ZERO);
      });
    })
    .add_rule(TWIN_A, |rb| {
      rb.add_empty(1).add_empty(2);
    });
  })
  .unwrap()
}
