//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

use std::convert::Infallible;

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable
  ///
  /// This consumes the observer, as no more values can be emitted after an
  /// error
  fn error(self, err: Err);

  /// Handle completion of the observable
  ///
  /// This consumes the observer, as no more values can be emitted after
  /// completion
  fn complete(self);

  /// Returns `true` if the observer will not accept more values.
  ///
  /// Synchronous sources (like `from_iter`) poll this to stop emitting early
  /// once the downstream pipeline has been disposed.
  fn is_finished(&self) -> bool;
}

/// Emits to an observer through a mutable reference.
///
/// `create` hands its closure a `&mut dyn Emitter` so the closure does not
/// need to know the concrete observer type of the pipeline. Terminal calls
/// after the first one are ignored.
pub trait Emitter<Item, Err> {
  fn next(&mut self, value: Item);
  fn error(&mut self, err: Err);
  fn complete(&mut self);
}

/// Object-safe mirror of [`Observer`].
pub trait DynObserver<Item, Err> {
  fn box_next(&mut self, value: Item);
  fn box_error(self: Box<Self>, err: Err);
  fn box_complete(self: Box<Self>);
  fn box_is_finished(&self) -> bool;
}

impl<T, Item, Err> DynObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  fn box_next(&mut self, value: Item) { self.next(value); }
  fn box_error(self: Box<Self>, err: Err) { (*self).error(err); }
  fn box_complete(self: Box<Self>) { (*self).complete(); }
  fn box_is_finished(&self) -> bool { self.is_finished() }
}

/// A type-erased observer, as handed to a [`BoxOp`](crate::observable::BoxOp).
pub struct BoxObserver<Item, Err>(Box<dyn DynObserver<Item, Err> + Send>);

impl<Item, Err> BoxObserver<Item, Err> {
  #[inline]
  pub fn new(observer: impl Observer<Item, Err> + Send + 'static) -> Self {
    Self(Box::new(observer))
  }
}

impl<Item, Err> Observer<Item, Err> for BoxObserver<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { self.0.box_next(value) }

  #[inline]
  fn error(self, err: Err) { self.0.box_error(err) }

  #[inline]
  fn complete(self) { self.0.box_complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.0.box_is_finished() }
}

/// Observer assembled from three closures.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  #[inline(always)]
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline(always)]
  fn error(self, err: Err) { (self.error)(err); }

  #[inline(always)]
  fn complete(self) { (self.complete)(); }

  #[inline(always)]
  fn is_finished(&self) -> bool { false }
}

/// Observer that only cares about values, for streams that cannot fail.
#[derive(Clone)]
pub struct ObserverNext<N>(pub N);

impl<Item, N> Observer<Item, Infallible> for ObserverNext<N>
where
  N: FnMut(Item),
{
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.0)(value); }

  fn error(self, err: Infallible) { match err {} }

  #[inline(always)]
  fn complete(self) {}

  #[inline(always)]
  fn is_finished(&self) -> bool { false }
}
