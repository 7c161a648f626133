//! # Engine facade (components C, D, E)
//!
//! [`Engine`] is the only externally visible object. It sequences the
//! filter (component A, [`crate::filter::Filter`]) and pool accumulator
//! (component B, [`crate::pool::Pools`]) on every absorb, runs the
//! power-of-two reseed schedule, and drives the counter-mode output
//! generator. `S` is the number of independent entropy sources
//! (`RANDOM_SOURCES` in the original driver); `H` and `C` are the hash
//! and block-cipher primitives, defaulted to the in-crate `Sha256` /
//! `Aes256` so most callers never name them.

use core::marker::PhantomData;

use crate::cipher::{Aes256, BlockCipher256};
use crate::error::RandomError;
use crate::filter::Filter;
use crate::hash::{Digest256, Sha256};
use crate::pool::Pools;
use crate::{secure_zero, BLOCK_LEN, KEY_LEN, MIN_SAMPLES, NR_POOLS};

/// The entropy accumulator, reseed controller, and output generator for
/// `S` independent sample sources.
pub struct Engine<const S: usize, H: Digest256 = Sha256, C: BlockCipher256 = Aes256> {
    pools: Pools<H>,
    filter: Filter<S>,
    pool_ind: [usize; S],
    samples: u64,
    key: [u8; KEY_LEN],
    counter: u128,
    reseed_count: u32,
    seeded: bool,
    _cipher: PhantomData<C>,
}

impl<const S: usize, H: Digest256, C: BlockCipher256> Engine<S, H, C> {
    const ASSERT_AT_LEAST_ONE_SOURCE: () = assert!(S >= 1, "Engine requires S >= 1 sources");

    /// Establishes the engine's invariants: empty pools, zeroed
    /// derivative history, `seeded = false`. Corresponds to the
    /// original driver's `init()`; there is no separate call, `new`
    /// performs it.
    pub fn new() -> Self {
        let () = Self::ASSERT_AT_LEAST_ONE_SOURCE;
        Self {
            pools: Pools::new(),
            filter: Filter::new(),
            pool_ind: [0; S],
            samples: 0,
            key: [0u8; KEY_LEN],
            counter: 0,
            reseed_count: 0,
            seeded: false,
            _cipher: PhantomData,
        }
    }

    /// `true` once the engine has completed at least one reseed.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    /// Absorbs `samples` from source `src`, running the novelty filter
    /// on each one. `src` must be in `[0, S)`; an out-of-range source
    /// id is a programmer error and is fatal.
    pub fn update(&mut self, src: usize, samples: &[u64]) {
        if src >= S {
            Self::source_out_of_range(src, S);
        }
        for &sample in samples {
            self.absorb(src, sample);
        }
    }

    /// Feeds `bytes` straight into pool 0, bypassing the novelty
    /// filter, and credits `8 * bytes.len()` samples. The caller is
    /// trusted to be handing in genuine entropy.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.pools.absorb(0, bytes);
        self.samples = self.samples.saturating_add(8 * bytes.len() as u64);
        self.maybe_reseed();
    }

    /// Fills `out` with generator output. Returns
    /// [`RandomError::NotSeeded`] if the engine has not yet completed
    /// its first reseed; `out` is left untouched in that case. A
    /// zero-length request is a no-op: `key` and `counter` are
    /// unchanged.
    pub fn get_bytes(&mut self, out: &mut [u8]) -> Result<(), RandomError> {
        if !self.seeded {
            return Err(RandomError::NotSeeded);
        }
        if out.is_empty() {
            return Ok(());
        }

        let cipher = C::new(&self.key);
        let mut written = 0;
        while written < out.len() {
            let block = Self::next_block(&cipher, &mut self.counter);
            let remaining = out.len() - written;
            if remaining >= BLOCK_LEN {
                out[written..written + BLOCK_LEN].copy_from_slice(&block);
                written += BLOCK_LEN;
            } else {
                out[written..].copy_from_slice(&block[..remaining]);
                written += remaining;
            }
        }

        let mut rekey_a = Self::next_block(&cipher, &mut self.counter);
        let mut rekey_b = Self::next_block(&cipher, &mut self.counter);
        secure_zero(&mut self.key);
        self.key[..16].copy_from_slice(&rekey_a);
        self.key[16..].copy_from_slice(&rekey_b);
        secure_zero(&mut rekey_a);
        secure_zero(&mut rekey_b);

        Ok(())
    }

    /// Zeroizes sensitive state. Not part of spec §6's operation set;
    /// provided for an embedding kernel's explicit teardown path, per
    /// §9's zeroization note.
    pub fn zeroize(&mut self) {
        secure_zero(&mut self.key);
        self.pools.reset_all();
    }

    fn absorb(&mut self, src: usize, sample: u64) {
        if !self.filter.accept(src, sample) {
            return;
        }
        let pool = self.pool_ind[src];
        self.pools.absorb(pool, &sample.to_ne_bytes());
        if pool == 0 {
            self.samples = self.samples.saturating_add(1);
        }
        self.pool_ind[src] = (pool + 1) % NR_POOLS;
        self.maybe_reseed();
    }

    /// Drains the scheduled subset of pools into a fresh key whenever
    /// `samples` has reached `MIN_SAMPLES`. Pool 0 always contributes;
    /// pool `i >= 1` contributes while bit `(i-1)` of the new
    /// `reseed_count` is clear, and the loop stops at the first set
    /// bit (see `SPEC_FULL.md` §12 for why this is the correct reading
    /// of the schedule, not its literal inverse).
    fn maybe_reseed(&mut self) {
        if self.samples < MIN_SAMPLES {
            return;
        }

        self.reseed_count = self.reseed_count.wrapping_add(1);
        let r = self.reseed_count;

        let mut h = H::new();
        if self.seeded {
            h.update(&self.key);
        }

        let mut digest0 = self.pools.drain(0);
        h.update(&digest0);
        secure_zero(&mut digest0);

        let mut highest_drained = 0usize;
        for i in 1..NR_POOLS {
            let shift = (i - 1) as u32;
            if (r >> shift) & 1 != 0 {
                break;
            }
            let mut digest = self.pools.drain(i);
            h.update(&digest);
            secure_zero(&mut digest);
            highest_drained = i;
        }

        let new_key = h.finalize();
        secure_zero(&mut self.key);
        self.key = new_key;
        self.samples = 0;
        self.seeded = true;

        log::debug!(
            "splax_random: reseed #{} drained pools 0..={}",
            r,
            highest_drained
        );
    }

    fn next_block(cipher: &C, counter: &mut u128) -> [u8; BLOCK_LEN] {
        let block = cipher.encrypt_block(&counter.to_le_bytes());
        *counter = counter.wrapping_add(1);
        block
    }

    #[cold]
    #[inline(never)]
    fn source_out_of_range(src: usize, s: usize) -> ! {
        panic!(
            "splax_random: update() called with source {} out of range [0, {})",
            src, s
        );
    }
}

impl<const S: usize, H: Digest256, C: BlockCipher256> Default for Engine<S, H, C> {
    fn default() -> Self {
        Self::new()
    }
}
