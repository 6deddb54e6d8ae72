use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  sink::{Relay, Sink},
};

/// Recover from an error by switching to a fallback observable.
///
/// See [`ObservableExt::catch`].
#[derive(Clone)]
pub struct Catch<S, F> {
  pub(crate) source: S,
  pub(crate) handler: F,
}

/// Observes the source of a [`Catch`] and performs the handoff on error.
pub struct CatchObserver<O, F> {
  sink: Sink<O>,
  handler: F,
}

impl<Item, Err, O, F, S2> Observer<Item, Err> for CatchObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnOnce(Err) -> Result<S2, Err>,
  S2: Observable<Item, Err, Relay<O>>,
  S2::Unsub: Send + 'static,
{
  fn next(&mut self, value: Item) { self.sink.emit(|o| o.next(value)); }

  fn error(self, err: Err) {
    let Self { sink, handler } = self;
    if sink.is_disposed() {
      return;
    }
    match handler(err) {
      Ok(fallback) => {
        log_debug!("source failed, switching to fallback");
        let unsub = fallback.actual_subscribe(sink.relay());
        sink.upstream().replace(unsub);
      }
      Err(err) => {
        log_debug!("catch handler failed");
        sink.finish(|o| o.error(err));
      }
    }
  }

  fn complete(self) { self.sink.finish(|o| o.complete()); }

  fn is_finished(&self) -> bool { self.sink.is_disposed() }
}

impl<Item, Err, O, S, F, S2> Observable<Item, Err, O> for Catch<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, CatchObserver<O, F>>,
  S::Unsub: Send + 'static,
  F: FnOnce(Err) -> Result<S2, Err>,
  S2: Observable<Item, Err, Relay<O>>,
  S2::Unsub: Send + 'static,
{
  type Unsub = Sink<O>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let sink = Sink::new(observer);
    let observer = CatchObserver { sink: sink.clone(), handler: self.handler };
    let unsub = self.source.actual_subscribe(observer);
    sink.upstream().set_initial(unsub);
    sink
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for Catch<S, F> where S: ObservableExt<Item, Err> {}
