//! # rxrecover: error recovery for Reactive Extensions in Rust
//!
//! Operators that let a consumer survive a failing stream:
//!
//! | Operator | On source error |
//! |----------|-----------------|
//! | [`catch`](ObservableExt::catch) | switch once to the fallback computed by a handler |
//! | [`catch_to_result`](ObservableExt::catch_to_result) | emit `Err(e)` as a value, then complete |
//! | [`catch_sequence`] | try the next candidate of a (possibly unbounded) list |
//! | [`catch_with`](ObservableExt::catch_with) | switch to a fixed fallback |
//! | [`catch_and_return`](ObservableExt::catch_and_return) | emit one value, then complete |
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//!
//! use rxrecover::prelude::*;
//!
//! let values = Arc::new(Mutex::new(vec![]));
//! let c_values = values.clone();
//! observable::from_events([Event::Next(1), Event::Error("disconnected")])
//!   .catch(|_| Ok(observable::of(2)))
//!   .catch_to_result()
//!   .subscribe(move |v| c_values.lock().unwrap().push(v));
//!
//! assert_eq!(*values.lock().unwrap(), [Ok(1), Ok(2)]);
//! ```
//!
//! ## Feature Flags
//!
//! - **`tracing`** (default): log recovery transitions through `tracing` at
//!   `debug` and `trace` level.
//!
//! [`catch_sequence`]: ops::catch_sequence::catch_sequence

macro_rules! log_trace {
  ($($arg:tt)*) => {{
    #[cfg(feature = "tracing")]
    ::tracing::trace!($($arg)*);
  }};
}

macro_rules! log_debug {
  ($($arg:tt)*) => {{
    #[cfg(feature = "tracing")]
    ::tracing::debug!($($arg)*);
  }};
}

pub mod event;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod sink;
pub mod subscription;
mod trampoline;

#[cfg(test)]
mod test_util;

pub use prelude::*;
