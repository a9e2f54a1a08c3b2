//! Deterministic per-day content selection.
//!
//! Two strategies coexist and are not interchangeable:
//!
//! - [`select_for_date`] shuffles a copy of the pool with a generator seeded
//!   from the date and keeps the first `count` items. Wisdom and the learning
//!   feed use it.
//! - [`select_one_for_date`] indexes the pool directly with
//!   `seed % pool.len()`. The journal prompt of the day uses it.
//!
//! For the same seed the two can pick different items. Both depend only on
//! their arguments, so a date always maps to the same selection across
//! restarts as long as the pool is unchanged.

use chrono::Datelike;

use crate::calendar::day_seed;

const LCG_MULTIPLIER: i64 = 9301;
const LCG_INCREMENT: i64 = 49297;
const LCG_MODULUS: i64 = 233_280;

/// Linear congruential generator driven by the seed of the day.
#[derive(Debug, Clone)]
pub struct DayRng {
    state: i64,
}

impl DayRng {
    pub fn new(seed: i64) -> Self {
        Self { state: seed }
    }

    pub fn for_date(date: impl Datelike) -> Self {
        Self::new(day_seed(date))
    }

    /// Advance and return a value in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT).rem_euclid(LCG_MODULUS);
        self.state as f64 / LCG_MODULUS as f64
    }

    /// Advance and return an index in `[0, bound)`. `bound` must be non-zero.
    pub fn next_index(&mut self, bound: usize) -> usize {
        let idx = (self.next_unit() * bound as f64).floor() as usize;
        idx.min(bound - 1)
    }
}

/// Fisher-Yates shuffle of a copy of `pool`, seeded from `date`.
pub fn shuffle_for_date<T: Clone>(pool: &[T], date: impl Datelike) -> Vec<T> {
    let mut shuffled = pool.to_vec();
    let mut rng = DayRng::for_date(date);
    let mut current = shuffled.len();
    while current > 0 {
        let pick = rng.next_index(current);
        current -= 1;
        shuffled.swap(current, pick);
    }
    shuffled
}

/// The first `count` items of the date's shuffle of `pool`.
///
/// Returns `min(count, pool.len())` items; an empty pool or a zero count
/// yields an empty vector. The input is never reordered.
pub fn select_for_date<T: Clone>(pool: &[T], date: impl Datelike, count: usize) -> Vec<T> {
    if pool.is_empty() || count == 0 {
        return Vec::new();
    }
    let mut shuffled = shuffle_for_date(pool, date);
    shuffled.truncate(count);
    shuffled
}

/// The item at `seed % pool.len()`, with no shuffle.
pub fn select_one_for_date<T: Clone>(pool: &[T], date: impl Datelike) -> Option<T> {
    if pool.is_empty() {
        return None;
    }
    let idx = day_seed(date).rem_euclid(pool.len() as i64) as usize;
    pool.get(idx).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const POOL: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

    #[test]
    fn known_shuffle_for_mid_june() {
        let date = ymd(2023, 6, 15);
        assert_eq!(shuffle_for_date(&POOL, date), vec!['E', 'B', 'A', 'C', 'D']);
        assert_eq!(select_for_date(&POOL, date, 2), vec!['E', 'B']);
    }

    #[test]
    fn neighbouring_day_shuffles_differently() {
        assert_eq!(
            select_for_date(&POOL, ymd(2023, 6, 16), 5),
            vec!['B', 'A', 'D', 'C', 'E']
        );
    }

    #[test]
    fn count_only_truncates() {
        let date = ymd(2023, 6, 15);
        let full = select_for_date(&POOL, date, 5);
        for n in 0..=5 {
            assert_eq!(select_for_date(&POOL, date, n), full[..n].to_vec());
        }
    }

    #[test]
    fn count_larger_than_pool_returns_whole_shuffle() {
        let date = ymd(2023, 6, 15);
        assert_eq!(select_for_date(&POOL, date, 50), shuffle_for_date(&POOL, date));
    }

    #[test]
    fn empty_pool_and_zero_count() {
        let empty: [u8; 0] = [];
        assert!(select_for_date(&empty, ymd(2023, 6, 15), 3).is_empty());
        assert!(select_for_date(&POOL, ymd(2023, 6, 15), 0).is_empty());
        assert!(select_one_for_date(&empty, ymd(2023, 6, 15)).is_none());
    }

    #[test]
    fn input_pool_is_not_reordered() {
        let pool = vec![1, 2, 3, 4, 5, 6];
        let _ = select_for_date(&pool, ymd(2023, 6, 15), 3);
        assert_eq!(pool, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn mod_index_and_shuffle_strategies_differ() {
        let date = ymd(2023, 6, 15);
        // 20230615 % 5 == 0
        assert_eq!(select_one_for_date(&POOL, date), Some('A'));
        assert_eq!(select_for_date(&POOL, date, 1), vec!['E']);
    }

    #[test]
    fn mod_index_uses_seed_directly() {
        assert_eq!(select_one_for_date(&POOL, ymd(2024, 2, 29)), Some('E'));
        assert_eq!(select_one_for_date(&POOL, ymd(2023, 6, 16)), Some('B'));
    }

    #[test]
    fn rng_stays_in_unit_interval() {
        let mut rng = DayRng::new(20_230_615);
        for _ in 0..1_000 {
            let v = rng.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1970i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| ymd(y, m, d))
    }

    proptest! {
        #[test]
        fn selection_is_deterministic(pool in prop::collection::vec(any::<u16>(), 0..40), date in any_date(), count in 0usize..50) {
            prop_assert_eq!(select_for_date(&pool, date, count), select_for_date(&pool, date, count));
            prop_assert_eq!(select_one_for_date(&pool, date), select_one_for_date(&pool, date));
        }

        #[test]
        fn selection_length_is_bounded(pool in prop::collection::vec(any::<u16>(), 0..40), date in any_date(), count in 0usize..50) {
            prop_assert_eq!(select_for_date(&pool, date, count).len(), count.min(pool.len()));
        }

        #[test]
        fn shuffle_is_a_permutation(pool in prop::collection::vec(any::<u16>(), 0..40), date in any_date()) {
            let mut shuffled = shuffle_for_date(&pool, date);
            let mut original = pool.clone();
            shuffled.sort_unstable();
            original.sort_unstable();
            prop_assert_eq!(shuffled, original);
        }
    }
}
