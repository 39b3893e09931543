//! Primality helpers used to size the bucket array.

/// Outcome of [`is_prime`]. Inputs below 2 have no defined primality and are
/// reported as `NotApplicable` rather than folded into either answer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Primality {
    NotApplicable,
    Prime,
    NotPrime,
}

impl Primality {
    /// True only for `Prime`; `NotApplicable` is not prime.
    #[inline]
    pub fn is_prime(self) -> bool {
        matches!(self, Primality::Prime)
    }
}

/// Trial division by odd candidates up to `floor(sqrt(x))`.
pub fn is_prime(x: usize) -> Primality {
    if x < 2 {
        return Primality::NotApplicable;
    }
    if x < 4 {
        return Primality::Prime;
    }
    if x % 2 == 0 {
        return Primality::NotPrime;
    }
    let mut i = 3;
    // `i <= x / i` is `i * i <= x` without the overflow.
    while i <= x / i {
        if x % i == 0 {
            return Primality::NotPrime;
        }
        i += 2;
    }
    Primality::Prime
}

/// Smallest prime greater than or equal to `x`.
pub fn next_prime(mut x: usize) -> usize {
    while !is_prime(x).is_prime() {
        x += 1;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_two_is_not_applicable() {
        assert_eq!(is_prime(0), Primality::NotApplicable);
        assert_eq!(is_prime(1), Primality::NotApplicable);
        assert!(!is_prime(1).is_prime());
    }

    #[test]
    fn small_values() {
        assert_eq!(is_prime(2), Primality::Prime);
        assert_eq!(is_prime(3), Primality::Prime);
        assert_eq!(is_prime(4), Primality::NotPrime);
        assert_eq!(is_prime(9), Primality::NotPrime);
        assert_eq!(is_prime(25), Primality::NotPrime);
        assert_eq!(is_prime(49), Primality::NotPrime);
        assert_eq!(is_prime(53), Primality::Prime);
    }

    /// Squares of primes are the boundary case for the `sqrt` bound.
    #[test]
    fn prime_squares_are_composite() {
        for p in [3usize, 5, 7, 11, 13, 101, 1_009] {
            assert_eq!(is_prime(p * p), Primality::NotPrime, "{}", p * p);
        }
    }

    #[test]
    fn agrees_with_naive_check() {
        for x in 2usize..2_000 {
            let naive = (2..x).all(|d| x % d != 0);
            assert_eq!(is_prime(x).is_prime(), naive, "x = {x}");
        }
    }

    #[test]
    fn next_prime_examples() {
        assert_eq!(next_prime(50), 53);
        assert_eq!(next_prime(100), 101);
        assert_eq!(next_prime(53), 53);
        assert_eq!(next_prime(25), 29);
        assert_eq!(next_prime(200), 211);
    }

    /// `NotApplicable` must not stop the search at 0 or 1.
    #[test]
    fn next_prime_skips_degenerate_inputs() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(1), 2);
    }

    #[test]
    fn next_prime_handles_large_inputs() {
        assert_eq!(next_prime(1_000_000), 1_000_003);
    }
}
