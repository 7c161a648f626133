//! End-to-end scenarios for the entropy engine, matching the six
//! scenarios and as many of the ten testable properties as are
//! practical to express as deterministic, hand-driven cases.

use splax_random::{Engine, RandomError};

/// Feeds enough zero bytes through `put_bytes` to force exactly one
/// reseed (`32 * 8 == MIN_SAMPLES == 256`).
fn seed_once<const S: usize>(engine: &mut Engine<S>) {
    engine.put_bytes(&[0u8; 32]);
}

#[test]
fn scenario_1_cold_boot() {
    let mut engine: Engine<1> = Engine::new();
    assert!(!engine.is_seeded());

    let mut out = [0u8; 16];
    assert_eq!(engine.get_bytes(&mut out), Err(RandomError::NotSeeded));
}

#[test]
fn scenario_2_seeding_via_put_bytes() {
    let mut engine: Engine<1> = Engine::new();
    engine.put_bytes(&[0u8; 32]);
    assert!(engine.is_seeded());

    let mut out = [0u8; 16];
    assert!(engine.get_bytes(&mut out).is_ok());
}

#[test]
fn scenario_3_filter_rejects_ticks() {
    let mut engine: Engine<1> = Engine::new();
    let ticks: Vec<u64> = (1000..1256).collect();
    engine.update(0, &ticks);

    // Every sample in a 256-long run of consecutive integers is
    // rejected once the derivative history is primed: first
    // differences are constant 1, second differences are 0.
    assert!(!engine.is_seeded());
}

#[test]
fn scenario_4_multi_pool_schedule() {
    // Reseed 1: pool 0 only. Reseed 2: pools 0, 1. Reseed 3: pool 0
    // only. Reseed 4: pools 0, 1, 2. We can't observe which pools
    // drained directly (the engine exposes no such accessor by
    // design), so this is asserted indirectly: each `put_bytes` call
    // that crosses MIN_SAMPLES produces exactly one reseed, and the
    // engine keeps producing fresh output after each one.
    let mut engine: Engine<1> = Engine::new();
    for _ in 1..=4u32 {
        engine.put_bytes(&[0u8; 32]);
        assert!(engine.is_seeded());
        let mut out = [0u8; 16];
        assert!(engine.get_bytes(&mut out).is_ok());
    }
}

#[test]
fn scenario_5_forward_secrecy() {
    let mut a: Engine<1> = Engine::new();
    let mut b: Engine<1> = Engine::new();
    seed_once(&mut a);
    seed_once(&mut b);

    // `a` and `b` are fed identical input, so they reach identical
    // key state (property 7: determinism from identical streams).
    let mut out_a = [0u8; 16];
    a.get_bytes(&mut out_a).unwrap();

    // `b` draws the same first output, confirming the pre-draw key
    // was identical between the two engines.
    let mut out_b = [0u8; 16];
    b.get_bytes(&mut out_b).unwrap();
    assert_eq!(out_a, out_b);

    // A second draw from `a` differs from the first: the key was
    // replaced by the forward-secrecy rekey after the first draw.
    let mut out_a2 = [0u8; 16];
    a.get_bytes(&mut out_a2).unwrap();
    assert_ne!(out_a, out_a2);
}

#[test]
fn scenario_6_counter_continuity_across_reseed() {
    let mut engine: Engine<1> = Engine::new();
    seed_once(&mut engine);

    let mut first = [0u8; 16];
    engine.get_bytes(&mut first).unwrap();

    // Force a second reseed with a fresh batch of samples.
    engine.put_bytes(&[0u8; 32]);
    assert!(engine.is_seeded());

    // The draw after the second reseed uses counter = 4, not 0: the
    // generator's counter is never reset by a reseed. We can't read
    // `counter` directly, so this is asserted by construction — the
    // output differs from the first draw, which it would not if the
    // counter had been reset back to 0 under the new key.
    let mut second = [0u8; 16];
    engine.get_bytes(&mut second).unwrap();
    assert_ne!(first, second);
}

#[test]
fn property_reseed_count_equals_number_of_reseeds() {
    // Each of these put_bytes calls crosses MIN_SAMPLES exactly once,
    // so after k calls we expect exactly k reseeds. We only have
    // `is_seeded`, not a `reseed_count` accessor, so we check the
    // weaker but still meaningful invariant: the engine stays seeded
    // and keeps producing output after repeated reseeds.
    let mut engine: Engine<1> = Engine::new();
    for _ in 0..10 {
        engine.put_bytes(&[0u8; 32]);
        assert!(engine.is_seeded());
    }
    let mut out = [0u8; 16];
    assert!(engine.get_bytes(&mut out).is_ok());
}

#[test]
fn property_get_bytes_zero_is_noop_and_succeeds() {
    let mut engine: Engine<1> = Engine::new();
    seed_once(&mut engine);
    assert!(engine.get_bytes(&mut []).is_ok());
}

#[test]
fn property_partial_request_is_prefix_of_full_block() {
    let mut a: Engine<1> = Engine::new();
    let mut b: Engine<1> = Engine::new();
    seed_once(&mut a);
    seed_once(&mut b);

    let mut full = [0u8; 16];
    a.get_bytes(&mut full).unwrap();

    let mut partial = [0u8; 9];
    b.get_bytes(&mut partial).unwrap();

    assert_eq!(&full[..9], &partial[..]);
}

#[test]
fn property_filter_rejects_repeated_sample_sixteen_times() {
    let mut engine: Engine<1> = Engine::new();
    let samples = [777u64; 16];
    // Only the first of sixteen identical samples from a cold source
    // is accepted; crediting a single sample to pool 0 is nowhere
    // near MIN_SAMPLES, so the engine never becomes seeded.
    engine.update(0, &samples);
    assert!(!engine.is_seeded());
}

#[test]
#[should_panic(expected = "out of range")]
fn programmer_error_bad_source_id_is_fatal() {
    let mut engine: Engine<2> = Engine::new();
    engine.update(7, &[1, 2, 3]);
}

#[test]
fn determinism_identical_streams_produce_identical_output() {
    let mut a: Engine<1> = Engine::new();
    let mut b: Engine<1> = Engine::new();

    let samples: Vec<u64> = (1..=500).collect();
    a.update(0, &samples);
    b.update(0, &samples);
    assert_eq!(a.is_seeded(), b.is_seeded());

    a.put_bytes(b"additional entropy, identical on both sides");
    b.put_bytes(b"additional entropy, identical on both sides");
    assert!(a.is_seeded());
    assert!(b.is_seeded());

    let mut out_a = [0u8; 48];
    let mut out_b = [0u8; 48];
    a.get_bytes(&mut out_a).unwrap();
    b.get_bytes(&mut out_b).unwrap();
    assert_eq!(out_a, out_b);
}
