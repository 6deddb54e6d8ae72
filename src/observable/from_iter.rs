use super::{Observable, ObservableExt};
use crate::observer::Observer;

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error.
/// Emission stops early once the observer reports it is finished.
///
/// ```
/// use rxrecover::prelude::*;
///
/// let mut sum = 0;
/// observable::from_iter(0..10).subscribe(|v| sum += v);
/// assert_eq!(sum, 45);
/// ```
pub fn from_iter<Iter>(iter: Iter) -> ObservableIter<Iter>
where
  Iter: IntoIterator,
{
  ObservableIter(iter)
}

#[derive(Clone)]
pub struct ObservableIter<Iter>(Iter);

impl<Item, Err, O, Iter> Observable<Item, Err, O> for ObservableIter<Iter>
where
  Iter: IntoIterator<Item = Item>,
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    for v in self.0 {
      if observer.is_finished() {
        return;
      }
      observer.next(v);
    }
    observer.complete();
  }
}

impl<Item, Err, Iter> ObservableExt<Item, Err> for ObservableIter<Iter> where
  Iter: IntoIterator<Item = Item>
{
}
