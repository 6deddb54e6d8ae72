//! Stack-safe traversal of recovery candidates.
//!
//! The candidates of a `catch_sequence` live on an explicit stack of
//! iterators. Stepping pulls the next subscribable candidate, descending into
//! spliced sequences and unwinding exhausted ones, without ever recursing.

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::observable::{BoxObservable, BoxOp, Boxed};

/// Lazily produced candidates of one recovery sequence. A yielded `Err` is a
/// failing generator.
pub(crate) type Cursor<Item, Err> =
  Box<dyn Iterator<Item = Result<BoxOp<Item, Err>, Err>> + Send>;

/// Candidate lists of one recovery sequence, in the order they are tried.
pub(crate) type Cursors<Item, Err> = VecDeque<Cursor<Item, Err>>;

pub(crate) enum Step<Item, Err> {
  /// Subscribe this candidate next.
  Subscribe(Box<dyn BoxObservable<Item, Err>>),
  /// The generator failed; its error is terminal.
  Failed(Err),
  /// No candidates left, with the error of the last failed one if any.
  Exhausted(Option<Err>),
}

pub(crate) struct Trampoline<Item, Err> {
  stack: SmallVec<[Cursor<Item, Err>; 4]>,
  pub(crate) last_error: Option<Err>,
  /// A drain loop is active on some call stack.
  pub(crate) running: bool,
  /// A step was requested and not yet taken.
  pub(crate) pending: bool,
}

impl<Item, Err> Trampoline<Item, Err> {
  pub(crate) fn new(cursors: Cursors<Item, Err>) -> Self {
    let stack = cursors.into_iter().rev().collect();
    Self { stack, last_error: None, running: false, pending: false }
  }

  pub(crate) fn next_step(&mut self) -> Step<Item, Err> {
    while let Some(cursor) = self.stack.last_mut() {
      match cursor.next() {
        None => {
          self.stack.pop();
        }
        Some(Err(err)) => {
          log_trace!("candidate generator failed");
          self.stack.clear();
          return Step::Failed(err);
        }
        Some(Ok(BoxOp(Boxed::Sequence(inner)))) => {
          self.stack.extend(inner.into_iter().rev());
          log_trace!(depth = self.stack.len(), "spliced nested recovery sequence");
        }
        Some(Ok(BoxOp(Boxed::Source(source)))) => return Step::Subscribe(source),
      }
    }
    log_trace!(failed = self.last_error.is_some(), "recovery sequence exhausted");
    Step::Exhausted(self.last_error.take())
  }

  #[cfg(test)]
  fn depth(&self) -> usize { self.stack.len() }
}
