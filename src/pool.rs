//! # Pool accumulator (component B)
//!
//! 32 independent running hash contexts. Each accepted sample from a
//! source is absorbed into exactly one pool, chosen by that source's
//! round-robin cursor; `put_bytes` always lands in pool 0. Pool `i`
//! survives until the reseed schedule (component C, in [`crate::engine`])
//! decides it is its turn to contribute and drains it.

use crate::hash::Digest256;
use crate::NR_POOLS;

pub(crate) struct Pools<H: Digest256> {
    ctx: [H; NR_POOLS],
}

impl<H: Digest256> Pools<H> {
    pub(crate) fn new() -> Self {
        Self {
            ctx: core::array::from_fn(|_| H::new()),
        }
    }

    /// Feeds `bytes` into `pool` without finalizing it.
    pub(crate) fn absorb(&mut self, pool: usize, bytes: &[u8]) {
        self.ctx[pool].update(bytes);
    }

    /// Finalizes `pool`'s digest and reinitializes it, ready to accumulate
    /// the next round's samples.
    pub(crate) fn drain(&mut self, pool: usize) -> [u8; 32] {
        let finished = core::mem::replace(&mut self.ctx[pool], H::new());
        finished.finalize()
    }

    /// Discards all pool state, replacing every context with a fresh one.
    /// Used on an explicit engine teardown path.
    pub(crate) fn reset_all(&mut self) {
        for ctx in self.ctx.iter_mut() {
            *ctx = H::new();
        }
    }
}
