//! Observable traits and creation functions.
//!
//! [`Observable`] is the subscribe half of the contract: it is implemented
//! once per observer type the source can feed, and consumes the source on
//! subscribe. [`ObservableExt`] carries the operator methods and is
//! implemented by every source and operator in the crate.

use crate::{
  observer::{Observer, ObserverAll, ObserverNext},
  ops::{catch::Catch, catch_to_result::CatchToResult},
  subscription::Subscription,
};

mod boxed;
pub use boxed::*;
mod create;
pub use create::*;
mod from_events;
pub use from_events::*;
mod from_iter;
pub use from_iter::*;
mod of;
pub use of::*;
mod trivial;
pub use trivial::*;

/// A source of `Item` values that may terminate with an `Err`.
///
/// A fresh subscription produces an independent event stream that obeys the
/// single terminal event contract: any number of `next` calls followed by at
/// most one `error` or `complete`.
pub trait Observable<Item, Err, O> {
  /// The handle returned to the subscriber.
  type Unsub: Subscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

pub trait ObservableExt<Item, Err>: Sized {
  /// Recover from an error by switching to the observable returned by
  /// `handler`.
  ///
  /// Values and completion of the source pass through untouched. When the
  /// source fails, `handler` is called once with the error and the fallback
  /// it returns is subscribed in place of the source; every event of the
  /// fallback, including its own error, is forwarded as is. If `handler`
  /// itself returns `Err`, that error terminates the stream.
  ///
  /// ```
  /// use rxrecover::prelude::*;
  ///
  /// let mut values = vec![];
  /// observable::from_events([Event::Next(1), Event::Error("lost connection")])
  ///   .catch(|_| Ok(observable::from_iter([2, 3])))
  ///   .subscribe_all(|v| values.push(v), |_| {}, || {});
  ///
  /// assert_eq!(values, [1, 2, 3]);
  /// ```
  fn catch<F, S>(self, handler: F) -> Catch<Self, F>
  where
    F: FnOnce(Err) -> Result<S, Err>,
  {
    Catch { source: self, handler }
  }

  /// Turn the stream into a stream of `Result`s that never fails.
  ///
  /// Each value is wrapped in `Ok`; an error becomes a final `Err` value
  /// followed by completion.
  ///
  /// ```
  /// use rxrecover::prelude::*;
  ///
  /// let mut values = vec![];
  /// observable::from_events([Event::Next(1), Event::Error("boom")])
  ///   .catch_to_result()
  ///   .subscribe(|v| values.push(v));
  ///
  /// assert_eq!(values, [Ok(1), Err("boom")]);
  /// ```
  fn catch_to_result(self) -> CatchToResult<Self> { CatchToResult { source: self } }

  /// Continue with `fallback` when this stream fails.
  ///
  /// Chained `catch_with` calls append to one queue of candidates, so
  /// arbitrarily long chains are traversed and dropped without growing the
  /// stack.
  fn catch_with<S>(self, fallback: S) -> BoxOp<Item, Err>
  where
    Self: BoxObservable<Item, Err> + 'static,
    S: ObservableExt<Item, Err> + BoxObservable<Item, Err> + 'static,
    Item: 'static,
    Err: Send + 'static,
  {
    self.box_it().followed_by(fallback.box_it())
  }

  /// Replace an error with a single `value`, then complete.
  fn catch_and_return(self, value: Item) -> BoxOp<Item, Err>
  where
    Self: BoxObservable<Item, Err> + 'static,
    Item: Send + 'static,
    Err: Send + 'static,
  {
    self.catch_with(of(value))
  }

  /// Erase the type of this observable.
  ///
  /// Recovery sequences override this to stay recognizable, which is what
  /// lets an enclosing `catch_sequence` splice them instead of nesting.
  fn box_it(self) -> BoxOp<Item, Err>
  where
    Self: BoxObservable<Item, Err> + 'static,
  {
    BoxOp::from_source(self)
  }

  /// Subscribe with a closure for the values of a stream that cannot fail.
  fn subscribe<N>(self, next: N) -> <Self as Observable<Item, Err, ObserverNext<N>>>::Unsub
  where
    Self: Observable<Item, Err, ObserverNext<N>>,
    N: FnMut(Item),
  {
    self.actual_subscribe(ObserverNext(next))
  }

  /// Subscribe with one closure per kind of event.
  fn subscribe_all<N, E, C>(
    self,
    next: N,
    error: E,
    complete: C,
  ) -> <Self as Observable<Item, Err, ObserverAll<N, E, C>>>::Unsub
  where
    Self: Observable<Item, Err, ObserverAll<N, E, C>>,
    N: FnMut(Item),
    E: FnOnce(Err),
    C: FnOnce(),
  {
    self.actual_subscribe(ObserverAll::new(next, error, complete))
  }

  fn subscribe_with<O>(self, observer: O) -> <Self as Observable<Item, Err, O>>::Unsub
  where
    Self: Observable<Item, Err, O>,
    O: Observer<Item, Err>,
  {
    self.actual_subscribe(observer)
  }
}
