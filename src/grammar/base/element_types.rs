use crate::utils::ToDoc;

/// A terminal, identified by a small index into the declared terminal range.
///
/// Two ids are reserved: `Terminal::EMPTY` marks the epsilon production, and
/// `Terminal::END` marks the end of the input.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Terminal(u16);

impl Terminal {
  pub const EMPTY: Terminal = Terminal(0);
  pub const END: Terminal = Terminal(1);

  pub const fn new(id: u16) -> Self {
    Terminal(id)
  }

  pub fn id(self) -> u16 {
    self.0
  }

  pub fn is_empty(self) -> bool {
    self == Terminal::EMPTY
  }

  pub fn is_end(self) -> bool {
    self == Terminal::END
  }
}

impl std::fmt::Display for Terminal {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    match *self {
      Terminal::EMPTY => fmt.write_str("ε"),
      Terminal::END => fmt.write_str("$"),
      Terminal(id) => write!(fmt, "T{}", id),
    }
  }
}

impl std::fmt::Debug for Terminal {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    std::fmt::Display::fmt(self, fmt)
  }
}

impl ToDoc for Terminal {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    da.text(self.to_string())
  }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminal(u16);

impl NonTerminal {
  pub const fn new(id: u16) -> Self {
    NonTerminal(id)
  }

  pub fn id(self) -> u16 {
    self.0
  }
}

impl std::fmt::Display for NonTerminal {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(fmt, "NT{}", self.0)
  }
}

impl std::fmt::Debug for NonTerminal {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    std::fmt::Display::fmt(self, fmt)
  }
}

impl ToDoc for NonTerminal {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    da.text(self.to_string())
  }
}

/// The unique id of a production within a production set. This is the value
/// handed to semantic actions.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductionId(u16);

impl ProductionId {
  pub const fn new(id: u16) -> Self {
    ProductionId(id)
  }

  pub fn id(self) -> u16 {
    self.0
  }
}

impl std::fmt::Display for ProductionId {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(fmt, "P{}", self.0)
  }
}

impl std::fmt::Debug for ProductionId {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    std::fmt::Display::fmt(self, fmt)
  }
}

impl ToDoc for ProductionId {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    da.text(self.to_string())
  }
}
