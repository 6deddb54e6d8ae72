//! Observers and sources for driving pipelines by hand in tests.

use std::sync::{
  atomic::{AtomicBool, Ordering},
  Arc, Mutex,
};

use crate::{
  event::Event,
  observable::{Observable, ObservableExt},
  observer::{BoxObserver, Observer},
  rc::{MutArc, RcDeref, RcDerefMut},
  subscription::Subscription,
};

/// Records every event it receives. Clones share the record.
pub struct Recorder<Item, Err>(Arc<Mutex<Vec<Event<Item, Err>>>>);

impl<Item, Err> Recorder<Item, Err> {
  pub fn new() -> Self { Self(Arc::new(Mutex::new(Vec::new()))) }

  pub fn events(&self) -> Vec<Event<Item, Err>>
  where
    Item: Clone,
    Err: Clone,
  {
    self.0.lock().unwrap().clone()
  }

  /// How many clones of this recorder are alive, the caller's included.
  pub fn holders(&self) -> usize { Arc::strong_count(&self.0) }

  /// Whether a terminal event has been recorded.
  pub fn is_terminated(&self) -> bool {
    self.0.lock().unwrap().last().map_or(false, Event::is_terminal)
  }

  /// Panics on any event after a terminal one, so every test that records a
  /// stream also checks the single terminal event contract.
  fn push(&self, event: Event<Item, Err>) {
    let mut events = self.0.lock().unwrap();
    assert!(
      !events.last().map_or(false, Event::is_terminal),
      "event delivered after a terminal event"
    );
    events.push(event);
  }
}

impl<Item, Err> Clone for Recorder<Item, Err> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<Item, Err> Observer<Item, Err> for Recorder<Item, Err> {
  fn next(&mut self, value: Item) { self.push(Event::Next(value)); }

  fn error(self, err: Err) { self.push(Event::Error(err)); }

  fn complete(self) { self.push(Event::Completed); }

  fn is_finished(&self) -> bool { false }
}

/// A source whose events are pushed by the test, possibly from another
/// thread. Subscribing again replaces the previous subscriber.
pub struct Trigger<Item, Err>(MutArc<Option<Subscriber<Item, Err>>>);

struct Subscriber<Item, Err> {
  observer: BoxObserver<Item, Err>,
  closed: Arc<AtomicBool>,
}

impl<Item, Err> Trigger<Item, Err> {
  pub fn new() -> Self { Self(MutArc::own(None)) }

  /// Whether a subscriber is attached and has not unsubscribed.
  pub fn is_observed(&self) -> bool {
    self
      .0
      .rc_deref()
      .as_ref()
      .map_or(false, |s| !s.closed.load(Ordering::SeqCst))
  }

  pub fn next(&self, value: Item) {
    // Deliver outside the lock, the downstream may subscribe to this trigger
    // again.
    let Some(mut subscriber) = self.take_open() else { return };
    subscriber.observer.next(value);
    if !subscriber.closed.load(Ordering::SeqCst) {
      let mut slot = self.0.rc_deref_mut();
      if slot.is_none() {
        *slot = Some(subscriber);
      }
    }
  }

  pub fn error(&self, err: Err) {
    if let Some(subscriber) = self.take_open() {
      subscriber.observer.error(err);
    }
  }

  pub fn complete(&self) {
    if let Some(subscriber) = self.take_open() {
      subscriber.observer.complete();
    }
  }

  fn take_open(&self) -> Option<Subscriber<Item, Err>> {
    self.0.rc_deref_mut().take().filter(|s| !s.closed.load(Ordering::SeqCst))
  }
}

impl<Item, Err> Clone for Trigger<Item, Err> {
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

pub struct TriggerSubscription(Arc<AtomicBool>);

impl Subscription for TriggerSubscription {
  fn unsubscribe(self) { self.0.store(true, Ordering::SeqCst); }

  fn is_closed(&self) -> bool { self.0.load(Ordering::SeqCst) }
}

impl<Item, Err, O> Observable<Item, Err, O> for Trigger<Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
{
  type Unsub = TriggerSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let closed = Arc::new(AtomicBool::new(false));
    *self.0.rc_deref_mut() =
      Some(Subscriber { observer: BoxObserver::new(observer), closed: closed.clone() });
    TriggerSubscription(closed)
  }
}

impl<Item, Err> ObservableExt<Item, Err> for Trigger<Item, Err> {}
