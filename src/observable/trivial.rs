use std::marker::PhantomData;

use super::{Observable, ObservableExt};
use crate::observer::Observer;

/// Creates an observable that emits no items, just terminates with an error.
///
/// The item type is part of the observable, so a recovery chain starting
/// from a failure can be pinned with `throw_err::<i32, _>(e)`.
pub fn throw_err<Item, Err>(e: Err) -> ThrowErr<Item, Err> { ThrowErr(e, PhantomData) }

pub struct ThrowErr<Item, Err>(Err, PhantomData<fn() -> Item>);

impl<Item, Err: Clone> Clone for ThrowErr<Item, Err> {
  fn clone(&self) -> Self { ThrowErr(self.0.clone(), PhantomData) }
}

impl<Item, Err, O> Observable<Item, Err, O> for ThrowErr<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.error(self.0) }
}

impl<Item, Err> ObservableExt<Item, Err> for ThrowErr<Item, Err> {}

/// Creates an observable that produces no values and completes immediately.
pub fn empty<Item>() -> Empty<Item> { Empty(PhantomData) }

pub struct Empty<Item>(PhantomData<fn() -> Item>);

impl<Item> Clone for Empty<Item> {
  fn clone(&self) -> Self { *self }
}

impl<Item> Copy for Empty<Item> {}

impl<Item, Err, O> Observable<Item, Err, O> for Empty<Item>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.complete() }
}

impl<Item, Err> ObservableExt<Item, Err> for Empty<Item> {}

/// Creates an observable that never emits anything, not even a terminal
/// event.
pub fn never() -> Never { Never }

#[derive(Clone, Copy)]
pub struct Never;

impl<Item, Err, O> Observable<Item, Err, O> for Never
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, _observer: O) -> Self::Unsub {}
}

impl<Item, Err> ObservableExt<Item, Err> for Never {}
