/// One emission of a stream.
///
/// A subscription delivers any number of `Next` events followed by at most
/// one terminal event, `Error` or `Completed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<Item, Err> {
  Next(Item),
  Error(Err),
  Completed,
}

impl<Item, Err> Event<Item, Err> {
  #[inline]
  pub fn is_terminal(&self) -> bool { !matches!(self, Event::Next(_)) }
}
