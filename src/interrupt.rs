//! Cooperative cancellation of long computations.
//!
//! The number core runs single-threaded and uninterruptibly except for one
//! shared bit: a flag raised by the host (typically from a `SIGINT` handler)
//! and polled by every inner loop. The core only ever reads the flag; it
//! never installs handlers and never clears it.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::{Error, Result};

/// A cloneable handle to the shared interrupt flag.
///
/// Every potentially long operation takes `&Interrupt` and polls it once
/// per loop iteration. When the flag is observed the operation unwinds with
/// [`Error::Interrupted`], leaving its output in a valid but unspecified
/// state.
///
/// ```
/// use num_bigdec::{BigDec, Error, Interrupt};
///
/// let int = Interrupt::new();
/// let a = BigDec::from(7u64);
/// assert!(a.mul(&a, 0, &int).is_ok());
///
/// int.raise();
/// assert_eq!(a.mul(&a, 0, &int), Err(Error::Interrupted));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Creates a handle whose flag is lowered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag. Safe to call from a signal handler context via a
    /// pre-cloned handle; the store is a relaxed atomic.
    pub fn raise(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Lowers the flag. The host calls this between top-level operations;
    /// the core itself never does.
    pub fn clear(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    /// Whether the flag is currently raised.
    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Poll point for inner loops.
    #[inline]
    pub fn check(&self) -> Result<()> {
        if self.is_raised() {
            Err(Error::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Poll point for loops that may run without a handle (the operator
/// traits and `Ord`/`Eq`, which cannot surface `Interrupted`).
#[inline]
pub(crate) fn poll(int: Option<&Interrupt>) -> Result<()> {
    match int {
        Some(int) => int.check(),
        None => Ok(()),
    }
}
