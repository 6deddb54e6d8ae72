//! Sequential recovery over a list of candidate observables.
//!
//! The candidates are subscribed one at a time: the first one that completes
//! ends the stream successfully, and running out of candidates surfaces the
//! error of the last one that failed. Advancing to the next candidate is
//! driven by a [`Trampoline`] loop, so long chains of synchronously failing
//! candidates run in constant stack space.

use crate::{
  observable::{BoxObservable, BoxOp, Observable, ObservableExt},
  observer::{BoxObserver, Observer},
  rc::{MutArc, RcDerefMut},
  sink::Sink,
  trampoline::{Cursor, Cursors, Step, Trampoline},
};

/// Try `sources` in order until one of them completes.
///
/// The iterator is only created when the returned observable is subscribed,
/// and only advanced past a candidate once that candidate has failed, so
/// `sources` may be unbounded. An empty list completes immediately.
///
/// ```
/// use rxrecover::prelude::*;
///
/// use std::sync::{Arc, Mutex};
///
/// let values = Arc::new(Mutex::new(vec![]));
/// let c_values = values.clone();
/// catch_sequence([
///   observable::throw_err("offline").box_it(),
///   observable::from_events([Event::Next(1), Event::Error("timeout")]).box_it(),
///   observable::of(2).box_it(),
/// ])
/// .subscribe_all(move |v| c_values.lock().unwrap().push(v), |_| {}, || {});
///
/// assert_eq!(*values.lock().unwrap(), [1, 2]);
/// ```
pub fn catch_sequence<I, Item, Err>(sources: I) -> CatchSequence<I>
where
  I: IntoIterator<Item = BoxOp<Item, Err>>,
{
  CatchSequence { sources }
}

/// Like [`catch_sequence`], for generators that may themselves fail.
///
/// A yielded `Err` terminates the stream with that error, whatever the
/// previous candidates did.
pub fn try_catch_sequence<I, Item, Err>(sources: I) -> CatchSequence<I>
where
  I: IntoIterator<Item = Result<BoxOp<Item, Err>, Err>>,
{
  CatchSequence { sources }
}

#[derive(Clone)]
pub struct CatchSequence<I> {
  sources: I,
}

/// An element of a candidate list: an observable, or the failure of the
/// generator that should have produced one.
pub trait IntoCandidate<Item, Err> {
  fn into_candidate(self) -> Result<BoxOp<Item, Err>, Err>;
}

impl<Item, Err> IntoCandidate<Item, Err> for BoxOp<Item, Err> {
  #[inline]
  fn into_candidate(self) -> Result<BoxOp<Item, Err>, Err> { Ok(self) }
}

impl<Item, Err> IntoCandidate<Item, Err> for Result<BoxOp<Item, Err>, Err> {
  #[inline]
  fn into_candidate(self) -> Result<BoxOp<Item, Err>, Err> { self }
}

impl<I> CatchSequence<I> {
  fn into_cursor<Item, Err>(self) -> Cursor<Item, Err>
  where
    I: IntoIterator + 'static,
    I::IntoIter: Send,
    I::Item: IntoCandidate<Item, Err>,
    Item: 'static,
    Err: 'static,
  {
    Box::new(self.sources.into_iter().map(IntoCandidate::into_candidate))
  }
}

impl<Item, Err, O, I> Observable<Item, Err, O> for CatchSequence<I>
where
  O: Observer<Item, Err> + Send + 'static,
  I: IntoIterator + 'static,
  I::IntoIter: Send,
  I::Item: IntoCandidate<Item, Err>,
  Item: 'static,
  Err: Send + 'static,
{
  type Unsub = Sink<O>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    subscribe_cursors(Cursors::from([self.into_cursor()]), observer)
  }
}

impl<Item, Err, I> ObservableExt<Item, Err> for CatchSequence<I>
where
  I: IntoIterator + 'static,
  I::IntoIter: Send,
  I::Item: IntoCandidate<Item, Err>,
  Item: 'static,
  Err: 'static,
{
  /// Boxing keeps the candidates reachable, so this sequence is spliced into
  /// an enclosing one rather than subscribed as a nested observable.
  fn box_it(self) -> BoxOp<Item, Err>
  where
    Self: BoxObservable<Item, Err> + 'static,
  {
    BoxOp::from_sequence(self.into_cursor())
  }
}

/// Start traversing `cursors` on behalf of `observer`.
pub(crate) fn subscribe_cursors<Item, Err, O>(cursors: Cursors<Item, Err>, observer: O) -> Sink<O>
where
  O: Observer<Item, Err> + Send + 'static,
  Item: 'static,
  Err: Send + 'static,
{
  let sink = Sink::new(observer);
  let sequence = SequenceObserver { sink: sink.clone(), trampoline: MutArc::own(Trampoline::new(cursors)) };
  sequence.drain();
  sink
}

/// Observes the active candidate. Every candidate gets its own clone; they
/// all share the sink and the traversal state.
struct SequenceObserver<O, Item, Err> {
  sink: Sink<O>,
  trampoline: MutArc<Trampoline<Item, Err>>,
}

impl<O, Item, Err> Clone for SequenceObserver<O, Item, Err> {
  fn clone(&self) -> Self { Self { sink: self.sink.clone(), trampoline: self.trampoline.clone() } }
}

impl<O, Item, Err> SequenceObserver<O, Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
  Item: 'static,
  Err: Send + 'static,
{
  /// Request a step and, unless a loop is already running somewhere up the
  /// stack or on another thread, run the loop here until no step is pending.
  fn drain(&self) {
    {
      let mut trampoline = self.trampoline.rc_deref_mut();
      trampoline.pending = true;
      if trampoline.running {
        return;
      }
      trampoline.running = true;
    }

    loop {
      let step = {
        let mut trampoline = self.trampoline.rc_deref_mut();
        if self.sink.is_disposed() || !trampoline.pending {
          trampoline.running = false;
          return;
        }
        trampoline.pending = false;
        trampoline.next_step()
      };

      match step {
        Step::Subscribe(candidate) => {
          log_trace!("subscribing next recovery candidate");
          let unsub = candidate.box_subscribe(BoxObserver::new(self.clone()));
          self.sink.upstream().replace(unsub);
        }
        Step::Failed(err) => return self.sink.finish(|o| o.error(err)),
        Step::Exhausted(Some(err)) => return self.sink.finish(|o| o.error(err)),
        Step::Exhausted(None) => return self.sink.finish(|o| o.complete()),
      }
    }
  }
}

impl<O, Item, Err> Observer<Item, Err> for SequenceObserver<O, Item, Err>
where
  O: Observer<Item, Err> + Send + 'static,
  Item: 'static,
  Err: Send + 'static,
{
  fn next(&mut self, value: Item) { self.sink.emit(|o| o.next(value)); }

  fn error(self, err: Err) {
    if self.sink.is_disposed() {
      return;
    }
    self.trampoline.rc_deref_mut().last_error = Some(err);
    self.drain();
  }

  fn complete(self) { self.sink.finish(|o| o.complete()); }

  fn is_finished(&self) -> bool { self.sink.is_disposed() }
}
