//! Mixed-radix counters over fixed-length tuples.
//!
//! An [`Odometer`] walks every length-`len` tuple of digits in `0..radix`
//! in lexicographic order (last digit fastest), which is the order of
//! repeated permutations drawn with repetition from a domain list.

use smallvec::SmallVec;

/// Digit storage; candidates rarely need more than eight slots.
pub type Digits = SmallVec<[usize; 8]>;

/// A lexicographic counter over `radix^len` digit tuples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Odometer {
    radix: usize,
    digits: Digits,
}

impl Odometer {
    /// Starts at the all-zero tuple.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is zero.
    #[must_use]
    pub fn new(radix: usize, len: usize) -> Self {
        assert!(radix > 0, "odometer radix must be positive");
        Self {
            radix,
            digits: smallvec::smallvec![0; len],
        }
    }

    /// Starts at an explicit tuple.
    ///
    /// # Panics
    ///
    /// Panics if any digit is not below `radix`.
    #[must_use]
    pub fn with_digits(radix: usize, digits: Digits) -> Self {
        assert!(
            digits.iter().all(|&d| d < radix),
            "odometer digit out of range"
        );
        Self { radix, digits }
    }

    /// Starts at the tuple with the given lexicographic ordinal, or returns
    /// `None` if the ordinal is past the end.
    #[must_use]
    pub fn at(radix: usize, len: usize, ordinal: u128) -> Option<Self> {
        if ordinal >= Self::count(radix, len)? {
            return None;
        }

        let mut odometer = Self::new(radix, len);
        let mut rest = ordinal;
        let base = radix as u128;
        for digit in odometer.digits.iter_mut().rev() {
            *digit = (rest % base) as usize;
            rest /= base;
        }
        Some(odometer)
    }

    /// Number of tuples, `radix^len`, or `None` on overflow.
    #[must_use]
    pub fn count(radix: usize, len: usize) -> Option<u128> {
        let exp = u32::try_from(len).ok()?;
        (radix as u128).checked_pow(exp)
    }

    /// The current digits, most significant first.
    #[must_use]
    pub fn digits(&self) -> &[usize] {
        &self.digits
    }

    /// Tuple length.
    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Returns true for the zero-length odometer, which has exactly one
    /// (empty) tuple.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The lexicographic ordinal of the current tuple.
    #[must_use]
    pub fn ordinal(&self) -> u128 {
        let base = self.radix as u128;
        self.digits
            .iter()
            .fold(0u128, |acc, &d| acc.wrapping_mul(base).wrapping_add(d as u128))
    }

    /// Steps to the next tuple.
    ///
    /// Returns `true` when the counter wrapped around to the all-zero tuple,
    /// i.e. the previous tuple was the last one.
    pub fn advance(&mut self) -> bool {
        for digit in self.digits.iter_mut().rev() {
            *digit += 1;
            if *digit < self.radix {
                return false;
            }
            *digit = 0;
        }
        true
    }
}

/// Iterates every tuple of `len` items drawn with repetition from `domain`.
#[derive(Clone, Debug)]
pub struct RepeatedPermutations<'a, T> {
    domain: &'a [T],
    odometer: Odometer,
    done: bool,
}

impl<'a, T: Copy> RepeatedPermutations<'a, T> {
    /// Creates the iterator.
    ///
    /// # Panics
    ///
    /// Panics if `domain` is empty.
    #[must_use]
    pub fn new(domain: &'a [T], len: usize) -> Self {
        Self {
            domain,
            odometer: Odometer::new(domain.len(), len),
            done: false,
        }
    }

    /// Number of tuples this iterator yields in total, if it fits in `u128`.
    #[must_use]
    pub fn total(&self) -> Option<u128> {
        Odometer::count(self.domain.len(), self.odometer.len())
    }
}

impl<T: Copy> Iterator for RepeatedPermutations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self
            .odometer
            .digits()
            .iter()
            .map(|&d| self.domain[d])
            .collect();
        self.done = self.odometer.advance();
        Some(item)
    }
}
