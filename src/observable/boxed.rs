//! Type-erased observables.
//!
//! [`BoxOp`] is the common currency of recovery sequences: every candidate
//! of a `catch_sequence` is a `BoxOp` of the same item and error type,
//! whatever concrete source it was built from.

use std::{collections::VecDeque, iter};

use super::{Observable, ObservableExt};
use crate::{
  observer::{BoxObserver, Observer},
  ops::catch_sequence::subscribe_cursors,
  subscription::BoxSubscription,
  trampoline::{Cursor, Cursors},
};

/// Object-safe subscribe, implemented for every observable that can feed a
/// [`BoxObserver`] and returns a thread-safe subscription.
pub trait BoxObservable<Item, Err>: Send {
  fn box_subscribe(self: Box<Self>, observer: BoxObserver<Item, Err>) -> BoxSubscription;
}

impl<T, Item, Err> BoxObservable<Item, Err> for T
where
  T: Observable<Item, Err, BoxObserver<Item, Err>> + Send,
  T::Unsub: Send + 'static,
{
  fn box_subscribe(self: Box<Self>, observer: BoxObserver<Item, Err>) -> BoxSubscription {
    BoxSubscription::new((*self).actual_subscribe(observer))
  }
}

/// A boxed observable.
///
/// A boxed recovery sequence keeps its candidates reachable instead of
/// hiding them behind the trait object, so a `catch_sequence` that meets it
/// as one of its own candidates can continue with the inner candidates in
/// place. A sequence is a queue of candidate lists, traversed front to back;
/// `catch_with` appends to the queue, so a chain of fallbacks stays one level
/// deep however long it grows.
pub struct BoxOp<Item, Err>(pub(crate) Boxed<Item, Err>);

pub(crate) enum Boxed<Item, Err> {
  Source(Box<dyn BoxObservable<Item, Err>>),
  Sequence(Cursors<Item, Err>),
}

impl<Item, Err> BoxOp<Item, Err> {
  pub(crate) fn from_source(source: impl BoxObservable<Item, Err> + 'static) -> Self {
    Self(Boxed::Source(Box::new(source)))
  }

  pub(crate) fn from_sequence(cursor: Cursor<Item, Err>) -> Self {
    Self(Boxed::Sequence(VecDeque::from([cursor])))
  }

  /// A sequence trying `self` first, then `fallback`.
  pub(crate) fn followed_by(self, fallback: Self) -> Self
  where
    Item: 'static,
    Err: Send + 'static,
  {
    let mut front = self.into_cursors();
    let mut back = fallback.into_cursors();
    // move the shorter queue
    if front.len() >= back.len() {
      front.append(&mut back);
      Self(Boxed::Sequence(front))
    } else {
      while let Some(cursor) = front.pop_back() {
        back.push_front(cursor);
      }
      Self(Boxed::Sequence(back))
    }
  }

  fn into_cursors(self) -> Cursors<Item, Err>
  where
    Item: 'static,
    Err: Send + 'static,
  {
    match self.0 {
      Boxed::Sequence(cursors) => cursors,
      source @ Boxed::Source(_) => {
        let single: Cursor<Item, Err> = Box::new(iter::once(Ok(BoxOp(source))));
        VecDeque::from([single])
      }
    }
  }

  /// Whether subscribing this observable runs a recovery sequence.
  #[cfg(test)]
  pub(crate) fn is_sequence(&self) -> bool { matches!(self.0, Boxed::Sequence(_)) }

  #[cfg(test)]
  pub(crate) fn queued_lists(&self) -> usize {
    match &self.0 {
      Boxed::Sequence(cursors) => cursors.len(),
      Boxed::Source(_) => 0,
    }
  }
}

impl<Item, Err, O> Observable<Item, Err, O> for BoxOp<Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
  Item: 'static,
  Err: Send + 'static,
{
  type Unsub = BoxSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    match self.0 {
      Boxed::Source(source) => source.box_subscribe(BoxObserver::new(observer)),
      // Always a `BoxObserver` here, so a sequence nested in a sequence
      // instantiates the same traversal instead of a new one per level.
      Boxed::Sequence(cursors) => {
        BoxSubscription::new(subscribe_cursors(cursors, BoxObserver::new(observer)))
      }
    }
  }
}

impl<Item, Err> ObservableExt<Item, Err> for BoxOp<Item, Err> {
  fn box_it(self) -> BoxOp<Item, Err>
  where
    Self: BoxObservable<Item, Err> + 'static,
  {
    self
  }
}
