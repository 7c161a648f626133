//! # S-CORE Entropy Accumulator and CSPRNG
//!
//! A kernel-resident cryptographic random number generator modeled on the
//! Fortuna construction. Low-quality samples from many independent event
//! sources (interrupt jitter, timer skew, whatever the embedding kernel's
//! drivers hand in) are filtered for novelty, accumulated into 32 hash
//! pools on a round-robin schedule, and periodically condensed into a
//! fresh symmetric key. That key drives a counter-mode block-cipher
//! stream that rekeys itself from its own output after every draw, so a
//! compromise of current state does not expose bytes already handed out.
//!
//! ## Components
//!
//! - [`filter`]: per-source novelty test — rejects samples whose
//!   successive differences (up to 16th order) collapse toward zero,
//!   the signature of a free-running counter rather than real noise.
//! - [`pool`]: the 32-pool hash accumulator each source round-robins
//!   across.
//! - [`engine`]: the reseed controller (pool-draining schedule) and the
//!   counter-mode output generator, combined in [`Engine`] since both
//!   operate on the same key/counter/sample-count state.
//! - [`hash`] / [`cipher`]: the two primitive contracts the engine is
//!   generic over — a 256-bit streaming hash and a 128-bit block cipher
//!   — with in-crate `Sha256` / `Aes256` implementations so the crate has
//!   no external crypto dependency.
//! - [`shared`]: a single-mutex facade ([`SharedEngine`]) for embedding
//!   kernels that serve more than one caller concurrently.
//!
//! ## Non-goals
//!
//! No cross-platform byte-exact output reproducibility, no resistance to
//! an adversary with kernel read access, and no random material before
//! the first reseed — [`Engine::get_bytes`] returns
//! [`RandomError::NotSeeded`] until then.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

mod cipher;
mod engine;
mod error;
mod filter;
mod hash;
mod pool;
mod shared;

pub use cipher::{Aes256, BlockCipher256};
pub use engine::Engine;
pub use error::RandomError;
pub use hash::{Digest256, Sha256};
pub use shared::SharedEngine;

/// Number of independent pool accumulators (spec §6: `NR_POOLS`).
pub const NR_POOLS: usize = 32;
/// Derivative-history depth for the novelty filter (spec §6: `N_DERIV`).
pub const N_DERIV: usize = 16;
/// Samples credited to pool 0 required before a reseed may occur.
pub const MIN_SAMPLES: u64 = 256;
/// Block cipher block size in bytes.
pub const BLOCK_LEN: usize = 16;
/// Key length kept and refreshed, in bytes (two cipher blocks).
pub const KEY_LEN: usize = 32;
/// Hash digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Overwrites `buf` with zeroes in a way the compiler cannot optimize
/// away, then fences so the write is visible before this returns.
pub(crate) fn secure_zero(buf: &mut [u8]) {
    for byte in buf.iter_mut() {
        // SAFETY: `byte` is a valid, live `&mut u8` for the duration of the write.
        unsafe {
            core::ptr::write_volatile(byte, 0);
        }
    }
    core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
}
