//! Secret generation and hint selection
//!
//! Both take the random source as a parameter so callers can seed it.

use crate::core::{CODE_LENGTH, Code, DIGIT_COUNT};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

/// Draws secrets: three distinct digits, uniformly, in random order
pub struct SecretGenerator;

impl SecretGenerator {
    /// Generate a new secret
    ///
    /// # Panics
    /// Will not panic - the `expect()` call is guaranteed safe by sampling without replacement.
    ///
    /// # Examples
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use wld_baseball::game::SecretGenerator;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let secret = SecretGenerator::generate(&mut rng);
    /// assert_eq!(secret.digits().len(), 3);
    /// ```
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Code {
        let mut digits: Vec<u8> = (0..DIGIT_COUNT).collect();
        let (picked, _) = digits.partial_shuffle(rng, CODE_LENGTH);
        Code::new(picked).expect("partial_shuffle picks distinct digits")
    }
}

/// Pick a digit that is not in `secret` and not in `revealed`
///
/// Returns `None` once every absent digit has been revealed.
pub fn pick_absent_digit<R: Rng + ?Sized>(
    secret: &Code,
    revealed: &[u8],
    rng: &mut R,
) -> Option<u8> {
    let available: Vec<u8> = (0..DIGIT_COUNT)
        .filter(|d| !secret.contains(*d) && !revealed.contains(d))
        .collect();

    available.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn generated_secrets_are_valid() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let secret = SecretGenerator::generate(&mut rng);
            let unique: HashSet<u8> = secret.digits().iter().copied().collect();
            assert_eq!(unique.len(), 3);
            assert!(secret.digits().iter().all(|&d| d < 10));
        }
    }

    #[test]
    fn same_seed_same_secret() {
        let a = SecretGenerator::generate(&mut StdRng::seed_from_u64(99));
        let b = SecretGenerator::generate(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn every_digit_shows_up_in_every_position() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = [[false; 10]; 3];
        for _ in 0..2000 {
            let secret = SecretGenerator::generate(&mut rng);
            for (position, &digit) in secret.digits().iter().enumerate() {
                seen[position][digit as usize] = true;
            }
        }
        assert!(seen.iter().all(|row| row.iter().all(|&s| s)));
    }

    #[test]
    fn hints_avoid_secret_and_revealed_digits() {
        let secret = Code::new(&[8, 1, 5]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..200 {
            let hint = pick_absent_digit(&secret, &[], &mut rng).unwrap();
            assert!([0, 2, 3, 4, 6, 7, 9].contains(&hint));
        }

        let revealed = [0, 2, 3, 4, 6, 7];
        for _ in 0..20 {
            assert_eq!(pick_absent_digit(&secret, &revealed, &mut rng), Some(9));
        }
    }

    #[test]
    fn hints_run_out() {
        let secret = Code::new(&[8, 1, 5]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let revealed = [0, 2, 3, 4, 6, 7, 9];
        assert_eq!(pick_absent_digit(&secret, &revealed, &mut rng), None);
    }
}
