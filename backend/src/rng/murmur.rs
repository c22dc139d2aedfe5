//! Seed expansion: arbitrary string → 128-bit generator state
//!
//! A MurmurHash3 (x86, 32-bit) body followed by four chained finalizer
//! rounds. Each round keeps mutating the same running hash, so the four
//! lanes are sequentially dependent rather than four hashes of one input.

use super::RngState;

const SEED: u32 = 0xAE69_DB53;
const C1: u32 = 0xCC9E_2D51;
const C2: u32 = 0x1B87_3593;
const N: u32 = 0xE654_6B64;

/// Expand a seed string into the initial `(a, b, c, d)` generator lanes.
///
/// Characters are consumed as Unicode scalar values, and the final length
/// mix uses the character count.
///
/// # Example
/// ```
/// use dice_odds_core_rs::rng::expand_seed;
///
/// let state = expand_seed("seed");
/// assert_eq!(state, expand_seed("seed"));
/// assert_ne!(state, expand_seed("Seed"));
/// ```
pub fn expand_seed(seed: &str) -> RngState {
    let mut h = SEED;
    let mut len: u32 = 0;

    for ch in seed.chars() {
        let k = (ch as u32).wrapping_mul(C1).rotate_left(15).wrapping_mul(C2);
        h ^= k;
        h = h.rotate_left(13);
        h = h.wrapping_mul(5).wrapping_add(N);
        len = len.wrapping_add(1);
    }
    h ^= len;

    let a = avalanche(&mut h);
    let b = avalanche(&mut h);
    let c = avalanche(&mut h);
    let d = avalanche(&mut h);

    RngState { a, b, c, d }
}

/// fmix32 applied in place; returns the mixed value
fn avalanche(h: &mut u32) -> u32 {
    *h ^= *h >> 16;
    *h = h.wrapping_mul(0x85EB_CA6B);
    *h ^= *h >> 13;
    *h = h.wrapping_mul(0xC2B2_AE35);
    *h ^= *h >> 16;
    *h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_expansion() {
        let state = expand_seed("seed");
        assert_eq!(
            state,
            RngState {
                a: 0x0B02_2C44,
                b: 0x2E30_F5CB,
                c: 0x84AD_40AB,
                d: 0x92D9_B012,
            }
        );
    }

    #[test]
    fn test_empty_seed_is_valid() {
        let state = expand_seed("");
        assert_eq!(
            state,
            RngState {
                a: 0xF3A5_EED5,
                b: 0x096C_AF4D,
                c: 0x3F06_057E,
                d: 0xB5BA_7C8F,
            }
        );
    }

    #[test]
    fn test_lanes_are_distinct() {
        let s = expand_seed("dice");
        assert_ne!(s.a, s.b);
        assert_ne!(s.b, s.c);
        assert_ne!(s.c, s.d);
    }
}
