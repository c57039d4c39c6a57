//! Random numbers and unique identifiers.

use crate::date::tick_count;
use rand::Rng;

/// Random integer in `min..=max`. The bounds may be given in either order.
pub fn random(min: i64, max: i64) -> i64 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    rand::rng().random_range(low..=high)
}

/// `prefix` followed by the current millisecond timestamp and ten random
/// digits.
pub fn unique_id(prefix: &str) -> String {
    let suffix = rand::rng().random_range(0..10_000_000_000u64);
    format!("{}{}{:010}", prefix, tick_count(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_stays_in_bounds() {
        for _ in 0..200 {
            let v = random(3, 7);
            assert!((3..=7).contains(&v));
        }
        assert_eq!(random(5, 5), 5);
        assert!((1..=4).contains(&random(4, 1)));
    }

    #[test]
    fn test_unique_id_prefix_and_uniqueness() {
        let ids: HashSet<String> = (0..100).map(|_| unique_id("req-")).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| id.starts_with("req-")));
    }
}
