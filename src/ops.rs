//! Error-recovery operators.
//!
//! [`catch`] and [`catch_to_result`] wrap a single source; [`catch_sequence`]
//! traverses a list of candidates and also backs
//! [`catch_with`](crate::observable::ObservableExt::catch_with) and
//! [`catch_and_return`](crate::observable::ObservableExt::catch_and_return).

pub mod catch;
pub mod catch_sequence;
pub mod catch_to_result;
