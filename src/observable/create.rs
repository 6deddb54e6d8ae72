use std::marker::PhantomData;

use super::{Observable, ObservableExt};
use crate::{
  observer::{Emitter, Observer},
  subscription::Subscription,
};

/// Creates an observable from a function that emits to a `&mut dyn Emitter`.
///
/// The function runs on every subscription; whatever subscription it returns
/// is handed back to the subscriber, so asynchronous sources can return a
/// teardown.
///
/// ```
/// use rxrecover::prelude::*;
///
/// let mut values = vec![];
/// observable::create(|emitter| {
///   emitter.next(1);
///   emitter.error("boom");
/// })
/// .catch_to_result()
/// .subscribe(|v| values.push(v));
///
/// assert_eq!(values, [Ok(1), Err("boom")]);
/// ```
pub fn create<F, Item, Err, U>(f: F) -> Create<F, Item, Err>
where
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> U,
  U: Subscription,
{
  Create { f, _marker: PhantomData }
}

#[derive(Clone)]
pub struct Create<F, Item, Err> {
  f: F,
  _marker: PhantomData<fn() -> (Item, Err)>,
}

/// Wrapper to implement Emitter for Option<O>
struct CreateEmitter<O>(Option<O>);

impl<O, Item, Err> Emitter<Item, Err> for CreateEmitter<O>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) {
    if let Some(observer) = &mut self.0 {
      if !observer.is_finished() {
        observer.next(value);
      }
    }
  }

  #[inline]
  fn error(&mut self, err: Err) {
    if let Some(observer) = self.0.take() {
      observer.error(err);
    }
  }

  #[inline]
  fn complete(&mut self) {
    if let Some(observer) = self.0.take() {
      observer.complete();
    }
  }
}

impl<F, Item, Err, O, U> Observable<Item, Err, O> for Create<F, Item, Err>
where
  O: Observer<Item, Err>,
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> U,
  U: Subscription,
{
  type Unsub = U;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut emitter = CreateEmitter(Some(observer));
    (self.f)(&mut emitter)
  }
}

impl<F, Item, Err> ObservableExt<Item, Err> for Create<F, Item, Err> {}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  };

  use crate::{event::Event, prelude::*, test_util::Recorder};

  #[test]
  fn emits_until_terminal() {
    let recorder = Recorder::<i32, &str>::new();
    observable::create(|emitter| {
      emitter.next(1);
      emitter.next(2);
      emitter.complete();
      emitter.next(3);
      emitter.error("ignored");
    })
    .subscribe_with(recorder.clone());

    assert_eq!(recorder.events(), vec![Event::Next(1), Event::Next(2), Event::Completed]);
  }

  #[test]
  fn returns_teardown() {
    let torn_down = Arc::new(AtomicBool::new(false));
    let c_torn_down = torn_down.clone();

    let subscription = observable::create(move |emitter| {
      emitter.next(1);
      ClosureSubscription(move || c_torn_down.store(true, Ordering::SeqCst))
    })
    .subscribe_with(Recorder::<i32, &str>::new());

    assert!(!torn_down.load(Ordering::SeqCst));
    subscription.unsubscribe();
    assert!(torn_down.load(Ordering::SeqCst));
  }
}
