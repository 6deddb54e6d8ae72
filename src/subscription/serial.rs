use super::{BoxSubscription, Subscription};
use crate::rc::{MutArc, RcDeref, RcDerefMut};

/// A subscription slot that holds at most one inner subscription.
///
/// Installing a new subscription unsubscribes the previous occupant, so a
/// recovery chain never keeps two upstream subscriptions alive. The swap is
/// done under the slot's lock; the released subscription is unsubscribed
/// after the lock is dropped, because unsubscribing may run arbitrary
/// teardown code.
///
/// Once the slot itself is unsubscribed, every subscription handed to it is
/// unsubscribed immediately.
#[derive(Clone, Default)]
pub struct SerialSubscription(MutArc<SerialState>);

#[derive(Default)]
struct SerialState {
  closed: bool,
  replaced: bool,
  current: Option<BoxSubscription>,
}

impl SerialSubscription {
  pub fn new() -> Self { Self::default() }

  /// Install the subscription of the first upstream.
  ///
  /// A source may fail synchronously inside its own `actual_subscribe`, in
  /// which case the fallback is installed with [`replace`](Self::replace)
  /// before the source's subscription is even returned. The late first
  /// subscription belongs to a finished stream and is released instead of
  /// displacing the fallback.
  pub fn set_initial(&self, subscription: impl Subscription + Send + 'static) {
    let stale = {
      let mut state = self.0.rc_deref_mut();
      if state.closed || state.replaced {
        Some(subscription)
      } else {
        state.current = Some(BoxSubscription::new(subscription));
        None
      }
    };
    stale.unsubscribe();
  }

  /// Swap in `subscription`, unsubscribing whatever the slot held before.
  pub fn replace(&self, subscription: impl Subscription + Send + 'static) {
    let incoming = Some(BoxSubscription::new(subscription));
    let released = {
      let mut state = self.0.rc_deref_mut();
      if state.closed {
        incoming
      } else {
        state.replaced = true;
        std::mem::replace(&mut state.current, incoming)
      }
    };
    released.unsubscribe();
  }
}

impl Subscription for SerialSubscription {
  fn unsubscribe(self) {
    let current = {
      let mut state = self.0.rc_deref_mut();
      state.closed = true;
      state.current.take()
    };
    current.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().closed }
}
