//! Stateless integer hashing for per-cell decisions.
//!
//! Every random choice the automaton makes is a pure function of
//! `(seed, x, y, tick, salt)`. A source cell and a neighbour reasoning about that
//! source compute the same bits without sharing an RNG stream, which is what makes
//! the gather kernel race-free.

/// Salt for the "affected by gravity" roll.
pub const SALT_GRAVITY: u32 = 0;
/// Salt for spigot injection.
pub const SALT_SPIGOT: u32 = 1;
/// Salt for self-only decay in the gather kernel.
pub const SALT_DECAY: u32 = 2;
/// Scanline rules use `SALT_RULES + n` for their n-th draw inside one cell update.
pub const SALT_RULES: u32 = 16;

/// Integer avalanche hash (lowbias32 variant).
#[inline]
pub fn hash(n: u32) -> u32 {
    let mut x = n;
    x ^= x >> 17;
    x = x.wrapping_mul(0xed5a_d4bb);
    x ^= x >> 11;
    x = x.wrapping_mul(0xac4c_1b51);
    x ^= x >> 15;
    x = x.wrapping_mul(0x3184_8bab);
    x ^= x >> 14;
    x
}

#[inline]
pub fn hash2(x: u32, y: u32) -> u32 {
    hash(x.wrapping_add(hash(y)))
}

#[inline]
pub fn hash3(x: u32, y: u32, z: u32) -> u32 {
    hash(x.wrapping_add(hash(y.wrapping_add(hash(z)))))
}

#[inline]
fn fold_tick(tick: u64) -> u32 {
    (tick as u32) ^ ((tick >> 32) as u32).rotate_left(16)
}

/// Raw 32-bit draw for cell `(x, y)` on `tick`.
#[inline]
pub fn cell_roll(seed: u32, x: u32, y: u32, tick: u64, salt: u32) -> u32 {
    let key = hash(seed ^ salt.wrapping_mul(0x9e37_79b9));
    hash3(x, y, fold_tick(tick) ^ key)
}

/// `true` for roughly a `p` fraction of all rolls. `p` saturates at 0 and 1.
#[inline]
pub fn roll_passes(roll: u32, p: f64) -> bool {
    if p >= 1.0 {
        return true;
    }
    if p <= 0.0 {
        return false;
    }
    (roll as u64) < (p * 4_294_967_296.0) as u64
}

#[inline]
pub fn cell_chance(seed: u32, x: u32, y: u32, tick: u64, salt: u32, p: f64) -> bool {
    roll_passes(cell_roll(seed, x, y, tick, salt), p)
}

/// Map a roll onto `[0, 1)`.
#[inline]
pub fn unit(roll: u32) -> f32 {
    (roll >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_roll_is_pure() {
        for tick in 0..64u64 {
            assert_eq!(cell_roll(7, 3, 9, tick, SALT_GRAVITY), cell_roll(7, 3, 9, tick, SALT_GRAVITY));
        }
    }

    #[test]
    fn salts_and_seeds_decorrelate() {
        let a = cell_roll(1, 10, 10, 5, SALT_GRAVITY);
        assert_ne!(a, cell_roll(1, 10, 10, 5, SALT_SPIGOT));
        assert_ne!(a, cell_roll(2, 10, 10, 5, SALT_GRAVITY));
        assert_ne!(a, cell_roll(1, 10, 10, 6, SALT_GRAVITY));
    }

    #[test]
    fn probability_extremes_saturate() {
        assert!(roll_passes(u32::MAX, 1.0));
        assert!(roll_passes(u32::MAX, 1.5));
        assert!(!roll_passes(0, 0.0));
        assert!(!roll_passes(0, -0.2));
    }

    #[test]
    fn chance_rate_tracks_probability() {
        let mut hits = 0u32;
        let samples = 200 * 200;
        for y in 0..200 {
            for x in 0..200 {
                if cell_chance(99, x, y, 17, SALT_SPIGOT, 0.1) {
                    hits += 1;
                }
            }
        }
        let rate = hits as f64 / samples as f64;
        assert!((rate - 0.1).abs() < 0.01, "rate = {rate}");
    }

    #[test]
    fn unit_stays_in_range() {
        for n in [0u32, 1, 0x7fff_ffff, u32::MAX] {
            let u = unit(hash(n));
            assert!((0.0..1.0).contains(&u));
        }
        assert!(unit(u32::MAX) < 1.0);
    }
}
