//! Integration tests for the recovery operators
//!
//! Tests operator chains through the public prelude, including threading
//! behavior.

use std::{
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  },
  thread,
};

use rxrecover::prelude::*;

fn collector<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl FnMut(T) + Send + 'static) {
  let values = Arc::new(Mutex::new(Vec::new()));
  let c_values = values.clone();
  (values, move |v| c_values.lock().unwrap().push(v))
}

#[test]
fn catch_then_catch_to_result() {
  let (values, push) = collector();

  observable::from_events([Event::Next(1), Event::Error("disconnected")])
    .catch(|_| Ok(observable::from_events([Event::Next(2), Event::Error("still down")])))
    .catch_to_result()
    .subscribe(push);

  assert_eq!(*values.lock().unwrap(), vec![Ok(1), Ok(2), Err("still down")]);
}

#[test]
fn catch_and_return_replaces_error() {
  let (values, push) = collector();
  let completed = Arc::new(AtomicUsize::new(0));
  let c_completed = completed.clone();

  observable::from_events([Event::Next(1), Event::Error("boom")])
    .catch_and_return(0)
    .subscribe_all(push, |_: &str| panic!("error must be recovered"), move || {
      c_completed.fetch_add(1, Ordering::SeqCst);
    });

  assert_eq!(*values.lock().unwrap(), vec![1, 0]);
  assert_eq!(completed.load(Ordering::SeqCst), 1);
}

#[test]
fn catch_with_chain_falls_through_in_order() {
  let (values, push) = collector();
  let errors = Arc::new(Mutex::new(Vec::new()));
  let c_errors = errors.clone();

  observable::throw_err("primary")
    .catch_with(observable::from_events([Event::Next(1), Event::Error("secondary")]))
    .catch_with(observable::throw_err("tertiary"))
    .subscribe_all(push, move |e| c_errors.lock().unwrap().push(e), || {});

  assert_eq!(*values.lock().unwrap(), vec![1]);
  assert_eq!(*errors.lock().unwrap(), vec!["tertiary"]);
}

#[test]
fn retry_like_generator() {
  let attempts = Arc::new(AtomicUsize::new(0));
  let c_attempts = attempts.clone();
  let (values, push) = collector();

  let flaky = move |_| {
    let attempt = c_attempts.fetch_add(1, Ordering::SeqCst);
    if attempt < 4 {
      observable::throw_err("flaky").box_it()
    } else {
      observable::of(attempt).box_it()
    }
  };
  catch_sequence((0..).map(flaky)).catch_to_result().subscribe(push);

  assert_eq!(*values.lock().unwrap(), vec![Ok::<_, &str>(4)]);
  assert_eq!(attempts.load(Ordering::SeqCst), 5);
}

#[test]
fn generator_failure_stops_sequence() {
  let (values, push) = collector();

  try_catch_sequence((0..).map(|i| {
    if i < 2 {
      Ok(observable::throw_err(format!("candidate {i}")).box_it())
    } else {
      Err(format!("generator gave up after {i}"))
    }
  }))
  .catch_to_result()
  .subscribe(push);

  assert_eq!(*values.lock().unwrap(), vec![Err::<i32, _>("generator gave up after 2".to_owned())]);
}

#[test]
fn create_sources_recover_synchronously() {
  let (values, push) = collector();

  let subscription = observable::create(|emitter| {
    emitter.next(1);
    emitter.error("handing off".to_owned());
  })
  .catch(|_| {
    Ok(observable::create(|emitter| {
      emitter.next(2);
      emitter.complete();
    }))
  })
  .catch_to_result()
  .subscribe(push);

  assert!(subscription.is_closed());
  assert_eq!(*values.lock().unwrap(), vec![Ok(1), Ok(2)]);
}

#[test]
fn unsubscribe_from_another_thread() {
  let (values, push) = collector();
  let torn_down = Arc::new(AtomicUsize::new(0));
  let c_torn_down = torn_down.clone();

  let subscription = catch_sequence([
    observable::throw_err("offline").box_it(),
    observable::create(move |emitter| {
      emitter.next(1);
      ClosureSubscription(move || {
        c_torn_down.fetch_add(1, Ordering::SeqCst);
      })
    })
    .box_it(),
  ])
  .catch_to_result()
  .subscribe(push);

  assert!(!subscription.is_closed());
  thread::spawn(move || subscription.unsubscribe()).join().unwrap();

  assert_eq!(*values.lock().unwrap(), vec![Ok(1)]);
  assert_eq!(torn_down.load(Ordering::SeqCst), 1);
}
