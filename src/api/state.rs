//! Application state for the paycheck API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::calculation::local_today;
use crate::error::{EngineError, EngineResult};
use crate::storage::TimesheetStore;

/// Shared application state.
///
/// Holds the timesheet store every handler reads from and writes to.
#[derive(Clone)]
pub struct AppState {
    /// The record and settings store.
    store: Arc<dyn TimesheetStore>,
    /// Fixed "today" used instead of the local clock, for tests.
    fixed_today: Option<NaiveDate>,
}

impl AppState {
    /// Creates a new application state around `store`.
    pub fn new<S: TimesheetStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
            fixed_today: None,
        }
    }

    /// Pins "today" to `today` instead of reading the local clock.
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// Runs `f` against the store on the blocking thread pool.
    ///
    /// Store implementations may do synchronous file I/O, which must not run
    /// on the async worker threads.
    pub async fn with_store<T, F>(&self, f: F) -> EngineResult<T>
    where
        F: FnOnce(&dyn TimesheetStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|err| EngineError::StorageError {
                message: format!("store task failed: {}", err),
            })
    }

    /// Returns today's date.
    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(local_today)
    }
}
