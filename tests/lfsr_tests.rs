//! Sequence generator properties

use simon_game::lfsr::{advance, next_step, Sequence, Step, Steps, LFSR_MASK};

const SEEDS: [u32; 6] = [0x1223_6632, 0xDEAD_BEEF, 0x0000_0001, 0x8000_0000, 0xFFFF_FFFF, 0x0BAD_F00D];

#[test]
fn test_replay_is_deterministic() {
    for seed in SEEDS {
        let a: Vec<Step> = Steps::from_seed(seed).take(200).collect();
        let b: Vec<Step> = Steps::from_seed(seed).take(200).collect();
        assert_eq!(a, b, "seed {:08x}", seed);
    }
}

#[test]
fn test_steps_cover_all_four_values() {
    for seed in SEEDS {
        let mut seen = [false; 4];
        for step in Steps::from_seed(seed).take(200) {
            assert!(step.index() < 4);
            seen[step.index()] = true;
        }
        assert_eq!(seen, [true; 4], "seed {:08x}", seed);
    }
}

#[test]
fn test_step_is_low_bits_of_new_state() {
    let mut state = 0x1223_6632;
    for _ in 0..64 {
        let (next, step) = next_step(state);
        assert_eq!(step, Step::from_bits(next as u8));
        let expected = if state & 1 == 1 { (state >> 1) ^ LFSR_MASK } else { state >> 1 };
        assert_eq!(next, expected);
        state = next;
    }
}

#[test]
fn test_boot_seed_opening() {
    let opening: Vec<Step> = Steps::from_seed(0x1223_6632).take(2).collect();
    assert_eq!(opening, [Step::Two, Step::Four]);
}

#[test]
fn test_advance_composes() {
    for seed in SEEDS {
        assert_eq!(advance(advance(seed, 3), 4), advance(seed, 7));
        assert_eq!(advance(seed, 0), seed);
    }
}

#[test]
fn test_step_at_after_failure_continues_stream() {
    // After failing a round of 3, the next game starts at stream position 3
    let mut seq = Sequence::new(0xDEAD_BEEF);
    seq.advance_past(3);

    let tail: Vec<Step> = Steps::from_seed(0xDEAD_BEEF).skip(3).take(10).collect();
    let replayed: Vec<Step> = (0..10).map(|i| seq.step_at(i)).collect();
    assert_eq!(tail, replayed);
}

#[test]
fn test_reseed_moves_base() {
    let mut seq = Sequence::default();
    assert_eq!(seq.game_seed(), 0x1223_6632);

    seq.reseed(0xCAFE_BABE);
    seq.advance_past(5);
    seq.restart();
    assert_eq!(seq.game_seed(), 0xCAFE_BABE);
}
