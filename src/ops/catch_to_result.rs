use std::convert::Infallible;

use crate::{
  observable::{Observable, ObservableExt},
  observer::Observer,
  sink::Sink,
};

/// Absorb errors into the value channel.
///
/// See [`ObservableExt::catch_to_result`].
#[derive(Clone)]
pub struct CatchToResult<S> {
  pub(crate) source: S,
}

pub struct CatchToResultObserver<O> {
  sink: Sink<O>,
}

impl<Item, Err, O> Observer<Item, Err> for CatchToResultObserver<O>
where
  O: Observer<Result<Item, Err>, Infallible>,
{
  fn next(&mut self, value: Item) { self.sink.emit(|o| o.next(Ok(value))); }

  fn error(self, err: Err) {
    log_debug!("error converted into a value");
    self.sink.finish(|mut o| {
      o.next(Err(err));
      o.complete();
    });
  }

  fn complete(self) { self.sink.finish(|o| o.complete()); }

  fn is_finished(&self) -> bool { self.sink.is_disposed() }
}

impl<Item, Err, O, S> Observable<Result<Item, Err>, Infallible, O> for CatchToResult<S>
where
  O: Observer<Result<Item, Err>, Infallible>,
  S: Observable<Item, Err, CatchToResultObserver<O>>,
  S::Unsub: Send + 'static,
{
  type Unsub = Sink<O>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let sink = Sink::new(observer);
    let unsub = self.source.actual_subscribe(CatchToResultObserver { sink: sink.clone() });
    sink.upstream().set_initial(unsub);
    sink
  }
}

impl<Item, Err, S> ObservableExt<Result<Item, Err>, Infallible> for CatchToResult<S> where
  S: ObservableExt<Item, Err>
{
}
