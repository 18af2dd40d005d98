use crate::hw::RandomSource;

/// xorshift32 PRNG
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for Xorshift32 {
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo).wrapping_add(1);
        if span == 0 {
            // lo..=hi covers the whole u32 range
            return self.next_u32();
        }
        lo + self.next_u32() % span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_does_not_lock_up() {
        let mut rng = Xorshift32::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn range_stays_inside_bounds() {
        let mut rng = Xorshift32::new(0xDEAD_BEEF);
        for _ in 0..10_000 {
            let v = rng.range_inclusive(800, 3000);
            assert!((800..=3000).contains(&v));
        }
    }

    #[test]
    fn every_target_index_is_drawn() {
        let mut rng = Xorshift32::new(42);
        let mut seen = [false; 3];
        for _ in 0..300 {
            seen[rng.range_inclusive(0, 2) as usize] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn degenerate_range_returns_low_bound() {
        let mut rng = Xorshift32::new(7);
        assert_eq!(rng.range_inclusive(5, 5), 5);
        assert_eq!(rng.range_inclusive(9, 3), 9);
    }
}
