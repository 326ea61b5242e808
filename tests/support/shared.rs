//! Mutex-guarded state shared between rspec hooks and examples.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared pointer type for scenario state.
pub type Shared<T> = Arc<Mutex<T>>;

/// Locks shared state, recovering from a poisoned mutex.
pub fn lock<T>(shared: &Shared<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
