use rand::Rng;

pub use rand_chacha::ChaCha8Rng as SeededRng;

pub fn new_rng(seed: u32) -> SeededRng {
    rand_seeder::Seeder::from(seed).make_rng()
}

/// Uniform sample in `[-range, range)`. Zero or negative ranges yield zero.
pub fn symmetric_jitter<R: Rng + ?Sized>(rng: &mut R, range: f64) -> f64 {
    if range > 0.0 {
        rng.gen_range(-range..range)
    } else {
        0.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut a = new_rng(7);
        let mut b = new_rng(7);
        for _ in 0..10 {
            assert_eq!(a.gen::<u64>(), b.gen::<u64>());
        }
    }

    #[test]
    fn test_symmetric_jitter() {
        let mut rng = new_rng(0);
        assert_eq!(symmetric_jitter(&mut rng, 0.0), 0.0);
        assert_eq!(symmetric_jitter(&mut rng, -1.0), 0.0);
        for _ in 0..1000 {
            let x = symmetric_jitter(&mut rng, 0.2);
            assert!((-0.2..0.2).contains(&x));
        }
    }
}
