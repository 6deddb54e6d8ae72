use super::{Observable, ObservableExt};
use crate::{event::Event, observer::Observer};

/// Creates an observable that replays a scripted list of events.
///
/// Events are delivered in order up to and including the first terminal
/// one; anything after it is never looked at. A script without a terminal
/// event leaves the stream open, like [`never`](super::never) after its
/// values.
///
/// ```
/// use rxrecover::prelude::*;
///
/// let mut values = vec![];
/// let mut failure = None;
/// observable::from_events([Event::Next(1), Event::Error("boom"), Event::Next(2)])
///   .subscribe_all(|v| values.push(v), |e| failure = Some(e), || {});
///
/// assert_eq!(values, [1]);
/// assert_eq!(failure, Some("boom"));
/// ```
pub fn from_events<Iter, Item, Err>(events: Iter) -> FromEvents<Iter>
where
  Iter: IntoIterator<Item = Event<Item, Err>>,
{
  FromEvents(events)
}

#[derive(Clone)]
pub struct FromEvents<Iter>(Iter);

impl<Item, Err, O, Iter> Observable<Item, Err, O> for FromEvents<Iter>
where
  Iter: IntoIterator<Item = Event<Item, Err>>,
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    for event in self.0 {
      match event {
        Event::Next(value) => {
          if observer.is_finished() {
            return;
          }
          observer.next(value);
        }
        Event::Error(err) => return observer.error(err),
        Event::Completed => return observer.complete(),
      }
    }
  }
}

impl<Item, Err, Iter> ObservableExt<Item, Err> for FromEvents<Iter> where
  Iter: IntoIterator<Item = Event<Item, Err>>
{
}
