//! Retry execution engine with policy-based configuration
//!
//! Used for Bridge service calls. A `RetryPredicate` decides which failures
//! are transient; everything else fails on the first attempt.
//!
//! # Example
//!
//! ```rust,no_run
//! use bridge_core::retry::{AlwaysRetry, RetryExecutor, TracingObserver};
//! use bridge_core::types::RetryPolicy;
//!
//! async fn example() {
//!     let executor = RetryExecutor::new(RetryPolicy::default())
//!         .with_predicate(AlwaysRetry)
//!         .with_observer(TracingObserver::new("fetch"));
//!
//!     let result = executor
//!         .execute(|| async { Ok::<_, std::io::Error>("done") })
//!         .await;
//! }
//! ```

mod error;
mod executor;
mod observer;
mod strategies;

pub use error::RetryError;
pub use executor::RetryExecutor;
pub use observer::{NoOpObserver, RetryObserver, TracingObserver};
pub use strategies::{calculate_delay, AlwaysRetry, RetryPredicate};
