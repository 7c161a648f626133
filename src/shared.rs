//! # Shared engine facade
//!
//! Wraps [`Engine`] behind a single [`spin::Mutex`] for kernels that
//! serve more than one caller concurrently, per spec §5: "the entire
//! engine state sits behind one mutual-exclusion boundary acquired on
//! entry to each public operation and released on every exit path."
//! Modeled on `splax_kernel`'s `Kernel` struct, which owns its
//! subsystems behind a single-init guard rather than per-field locks.

use spin::Mutex;

use crate::cipher::{Aes256, BlockCipher256};
use crate::error::RandomError;
use crate::hash::{Digest256, Sha256};
use crate::Engine;

/// A mutex-guarded [`Engine`] safe to share across threads or interrupt
/// contexts. Every method takes `&self`: the lock, not `&mut self`, is
/// what serializes access.
pub struct SharedEngine<const S: usize, H: Digest256 = Sha256, C: BlockCipher256 = Aes256> {
    inner: Mutex<Engine<S, H, C>>,
}

impl<const S: usize, H: Digest256, C: BlockCipher256> SharedEngine<S, H, C> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Engine::new()),
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.inner.lock().is_seeded()
    }

    pub fn update(&self, src: usize, samples: &[u64]) {
        self.inner.lock().update(src, samples);
    }

    pub fn put_bytes(&self, bytes: &[u8]) {
        self.inner.lock().put_bytes(bytes);
    }

    pub fn get_bytes(&self, out: &mut [u8]) -> Result<(), RandomError> {
        self.inner.lock().get_bytes(out)
    }

    pub fn zeroize(&self) {
        self.inner.lock().zeroize();
    }
}

impl<const S: usize, H: Digest256, C: BlockCipher256> Default for SharedEngine<S, H, C> {
    fn default() -> Self {
        Self::new()
    }
}
