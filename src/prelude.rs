//! Prelude module for convenient imports

pub use crate::{
  event::Event,
  observable::{self, BoxObservable, BoxOp, Observable, ObservableExt},
  observer::{BoxObserver, DynObserver, Emitter, Observer, ObserverAll, ObserverNext},
  ops::{
    catch::Catch,
    catch_sequence::{catch_sequence, try_catch_sequence, CatchSequence, IntoCandidate},
    catch_to_result::CatchToResult,
  },
  sink::Sink,
  subscription::*,
};
