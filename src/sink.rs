//! The machinery shared by every recovery operator.
//!
//! A [`Sink`] binds the downstream observer of one subscription to the
//! [`SerialSubscription`] of whichever upstream is currently feeding it.
//! Operators hand clones of the sink to the observers they subscribe
//! upstream, and return another clone to the consumer as the subscription
//! handle.

use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc,
};

use crate::{
  observer::Observer,
  rc::{MutArc, RcDerefMut},
  subscription::{SerialSubscription, Subscription},
};

pub struct Sink<O> {
  observer: MutArc<Option<O>>,
  disposed: Arc<AtomicBool>,
  upstream: SerialSubscription,
}

impl<O> Sink<O> {
  pub fn new(observer: O) -> Self {
    Self {
      observer: MutArc::own(Some(observer)),
      disposed: Arc::new(AtomicBool::new(false)),
      upstream: SerialSubscription::new(),
    }
  }

  #[inline]
  pub fn is_disposed(&self) -> bool { self.disposed.load(Ordering::Acquire) }

  /// The slot holding the active upstream subscription.
  #[inline]
  pub fn upstream(&self) -> &SerialSubscription { &self.upstream }

  /// Deliver a non-terminal event to the downstream observer.
  ///
  /// The observer slot stays locked while `f` runs. If `f` disposes this
  /// sink (directly, or by unsubscribing the pipeline from a downstream
  /// callback), disposal cannot take the observer and this call drops it on
  /// the way out instead.
  pub fn emit(&self, f: impl FnOnce(&mut O)) {
    if self.is_disposed() {
      return;
    }
    let mut slot = self.observer.rc_deref_mut();
    if let Some(observer) = slot.as_mut() {
      if !self.is_disposed() {
        f(observer);
      }
    }
    if self.is_disposed() {
      slot.take();
    }
  }

  /// Deliver a terminal event and dispose.
  ///
  /// The observer is moved out of the slot before `f` runs, so it receives at
  /// most one terminal event even if the upstream misbehaves.
  pub fn finish(&self, f: impl FnOnce(O)) {
    let observer = if self.is_disposed() { None } else { self.observer.rc_deref_mut().take() };
    if let Some(observer) = observer {
      f(observer);
    }
    self.dispose();
  }

  /// Stop all further delivery and unsubscribe the active upstream.
  ///
  /// Idempotent: only the first call has any effect.
  pub fn dispose(&self) {
    if self.disposed.swap(true, Ordering::AcqRel) {
      return;
    }
    log_trace!("sink disposed");
    if let Some(mut slot) = self.observer.try_rc_deref_mut() {
      slot.take();
    }
    self.upstream.clone().unsubscribe();
  }

  /// An observer that forwards to this sink.
  pub fn relay(&self) -> Relay<O> { Relay { sink: self.clone() } }
}

impl<O> Clone for Sink<O> {
  fn clone(&self) -> Self {
    Self {
      observer: self.observer.clone(),
      disposed: self.disposed.clone(),
      upstream: self.upstream.clone(),
    }
  }
}

impl<O> Subscription for Sink<O> {
  #[inline]
  fn unsubscribe(self) { self.dispose() }

  #[inline]
  fn is_closed(&self) -> bool { self.is_disposed() }
}

/// Forwards every event verbatim to a sink's downstream observer.
///
/// A terminal event passing through disposes the sink, so a fallback's own
/// failure is final and never re-enters the recovery logic that subscribed
/// it.
pub struct Relay<O> {
  sink: Sink<O>,
}

impl<Item, Err, O> Observer<Item, Err> for Relay<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) { self.sink.emit(|o| o.next(value)); }

  fn error(self, err: Err) { self.sink.finish(|o| o.error(err)); }

  fn complete(self) { self.sink.finish(|o| o.complete()); }

  fn is_finished(&self) -> bool { self.sink.is_disposed() }
}

#[cfg(test)]
mod tests {
  use std::sync::atomic::AtomicUsize;

  use super::*;
  use crate::{event::Event, subscription::ClosureSubscription, test_util::Recorder};

  fn teardown_counter(sink: &Sink<Recorder<i32, &'static str>>) -> Arc<AtomicUsize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let c_counter = counter.clone();
    sink.upstream().set_initial(ClosureSubscription(move || {
      c_counter.fetch_add(1, Ordering::SeqCst);
    }));
    counter
  }

  #[test]
  fn emit_then_finish() {
    let recorder = Recorder::<i32, &str>::new();
    let sink = Sink::new(recorder.clone());

    sink.emit(|o| o.next(1));
    sink.finish(|o| o.error("boom"));
    sink.emit(|o| o.next(2));
    sink.finish(|o| o.complete());

    assert_eq!(recorder.events(), vec![Event::Next(1), Event::Error("boom")]);
    assert!(sink.is_disposed());
  }

  #[test]
  fn dispose_cuts_delivery_and_upstream() {
    let recorder = Recorder::<i32, &str>::new();
    let sink = Sink::new(recorder.clone());
    let torn_down = teardown_counter(&sink);

    sink.emit(|o| o.next(1));
    sink.clone().unsubscribe();
    sink.emit(|o| o.next(2));
    sink.finish(|o| o.complete());

    assert_eq!(recorder.events(), vec![Event::Next(1)]);
    assert_eq!(torn_down.load(Ordering::SeqCst), 1);
    // the downstream observer is released by disposal
    assert_eq!(recorder.holders(), 1);
  }

  #[test]
  fn dispose_twice_is_noop() {
    let recorder = Recorder::<i32, &str>::new();
    let sink = Sink::new(recorder.clone());
    let torn_down = teardown_counter(&sink);

    sink.clone().unsubscribe();
    sink.clone().unsubscribe();
    assert_eq!(torn_down.load(Ordering::SeqCst), 1);
    assert!(sink.is_closed());
  }

  #[test]
  fn dispose_from_inside_delivery() {
    let recorder = Recorder::<i32, &str>::new();
    let sink = Sink::new(recorder.clone());
    let handle = sink.clone();

    sink.emit(move |o| {
      o.next(1);
      handle.dispose();
    });
    sink.emit(|o| o.next(2));

    assert_eq!(recorder.events(), vec![Event::Next(1)]);
    assert_eq!(recorder.holders(), 1);
  }

  #[test]
  fn relay_disposes_on_terminal() {
    let recorder = Recorder::<i32, &str>::new();
    let sink = Sink::new(recorder.clone());
    let mut relay = sink.relay();

    relay.next(7);
    assert!(!relay.is_finished());
    relay.complete();

    assert!(sink.is_disposed());
    assert_eq!(recorder.events(), vec![Event::Next(7), Event::Completed]);
  }
}
