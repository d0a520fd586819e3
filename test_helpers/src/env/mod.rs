//! Guarded mutation of process environment variables.
//!
//! The library itself reads the environment only through explicit
//! snapshots, but tests of `EnvSnapshot::capture` and the default builder
//! pipeline still need real variables. Every mutation here takes a global
//! re-entrant mutex and returns a guard that restores the previous value
//! (or removes the variable) when dropped. Guards for the same key restore
//! in LIFO order.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("LC_TEST_KEY", "VALUE");
//! assert_eq!(std::env::var("LC_TEST_KEY").ok().as_deref(), Some("VALUE"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

fn mutate_locked<F>(key: String, mutator: F, _held: &ReentrantMutexGuard<'static, ()>) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// Restores one environment variable on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _held = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held.
            Some(value) => unsafe { env_set_var(&self.key, &value) },
            // SAFETY: `ENV_MUTEX` is held.
            None => unsafe { env_remove_var(&self.key) },
        }
    }
}

/// Holds the environment lock across several mutations.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Set `key` while the lock is held.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        // SAFETY: the lock is held by `self`.
        mutate_locked(key.into(), |k| unsafe { env_set_var(k, value.as_ref()) }, &self.guard)
    }

    /// Remove `key` while the lock is held.
    pub fn remove_var<K: Into<String>>(&self, key: K) -> EnvVarGuard {
        // SAFETY: the lock is held by `self`.
        mutate_locked(key.into(), |k| unsafe { env_remove_var(k) }, &self.guard)
    }
}

/// Keeps the lock and a set of guards alive together.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping restores the variables and releases the lock"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvVarLock,
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        drop(std::mem::take(&mut self.guards));
    }
}

/// Set `key` to `value` until the guard drops.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Remove `key` until the guard drops.
pub fn remove_var<K: Into<String>>(key: K) -> EnvVarGuard {
    lock().remove_var(key)
}

/// Acquire the environment lock.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        guard: ENV_MUTEX.lock(),
    }
}

/// Set every pair under one lock, restoring them all when the scope drops.
///
/// ```
/// use test_helpers::env;
///
/// let _scope = env::set_vars([("LC_A", "1"), ("LC_B", "2")]);
/// assert_eq!(std::env::var("LC_B").ok().as_deref(), Some("2"));
/// ```
pub fn set_vars<I, K, V>(pairs: I) -> EnvScope
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let lock = lock();
    let guards = pairs
        .into_iter()
        .map(|(key, value)| lock.set_var(key, value))
        .collect();
    EnvScope {
        guards,
        _lock: lock,
    }
}

/// Run `f` while holding the environment lock.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _held = ENV_MUTEX.lock();
    f()
}
