use super::{Observable, ObservableExt};
use crate::observer::Observer;

/// Creates an observable producing a single value, then completing.
///
/// ```
/// use rxrecover::prelude::*;
///
/// let mut value = 0;
/// observable::of(123).subscribe(|v| value = v);
/// assert_eq!(value, 123);
/// ```
pub fn of<Item>(v: Item) -> Of<Item> { Of(v) }

#[derive(Clone)]
pub struct Of<Item>(Item);

impl<Item, Err, O> Observable<Item, Err, O> for Of<Item>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    observer.next(self.0);
    observer.complete();
  }
}

impl<Item, Err> ObservableExt<Item, Err> for Of<Item> {}
