//! Subscription handles.
//!
//! A [`Subscription`] is returned by every `actual_subscribe` call and allows
//! the consumer to stop receiving events before the stream terminates.
//! Handles that are shared between a sink and its consumer are `Clone`;
//! unsubscribing one clone closes them all, and unsubscribing again is a
//! no-op.

mod boxed;
mod serial;

pub use boxed::*;
pub use serial::*;

/// Cancellation handle of a subscription.
pub trait Subscription {
  /// Stop the delivery of events and release the upstream resources.
  fn unsubscribe(self);

  /// Whether the subscription has been unsubscribed or its stream has
  /// terminated.
  fn is_closed(&self) -> bool;
}

/// Synchronous sources have nothing left to cancel once `actual_subscribe`
/// returns.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

/// Runs a teardown closure on unsubscribe.
pub struct ClosureSubscription<F>(pub F);

impl<F: FnOnce()> Subscription for ClosureSubscription<F> {
  #[inline]
  fn unsubscribe(self) { (self.0)() }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

impl<T: Subscription> Subscription for Option<T> {
  fn unsubscribe(self) {
    if let Some(subscription) = self {
      subscription.unsubscribe()
    }
  }

  fn is_closed(&self) -> bool { self.as_ref().map_or(true, Subscription::is_closed) }
}
