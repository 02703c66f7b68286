use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    /// bucket key (unix seconds)
    pub t: i64,
    pub price: f64,
}

/// Time-indexed price points at one-second granularity.
///
/// A second point landing on an existing key replaces the earlier value.
/// The series keeps at most `max_points` keys, dropping the oldest first.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    max_points: usize,
    points: BTreeMap<i64, f64>,
}

impl ChartSeries {
    pub fn new(max_points: usize) -> Self {
        Self {
            max_points: max_points.max(1),
            points: BTreeMap::new(),
        }
    }

    /// Insert-or-overwrite. Returns true when the key was new.
    pub fn upsert(&mut self, t: i64, price: f64) -> bool {
        let inserted = self.points.insert(t, price).is_none();
        self.trim_to_window();
        inserted
    }

    fn trim_to_window(&mut self) {
        while self.points.len() > self.max_points {
            self.points.pop_first();
        }
    }

    pub fn get(&self, t: i64) -> Option<f64> {
        self.points.get(&t).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn snapshot(&self) -> Vec<SeriesPoint> {
        self.points
            .iter()
            .map(|(&t, &price)| SeriesPoint { t, price })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_second_keeps_one_point_with_later_value() {
        let mut s = ChartSeries::new(100);
        assert!(s.upsert(1_700_000_000, 55.25));
        assert!(!s.upsert(1_700_000_000, 56.0));
        assert_eq!(s.len(), 1);
        assert_eq!(s.get(1_700_000_000), Some(56.0));
    }

    #[test]
    fn snapshot_is_time_ordered_even_for_late_inserts() {
        let mut s = ChartSeries::new(100);
        s.upsert(30, 3.0);
        s.upsert(10, 1.0);
        s.upsert(20, 2.0);
        let snap = s.snapshot();
        let ts: Vec<i64> = snap.iter().map(|p| p.t).collect();
        assert_eq!(ts, vec![10, 20, 30]);
        assert_eq!(snap.last(), Some(&SeriesPoint { t: 30, price: 3.0 }));
    }

    #[test]
    fn window_drops_oldest_keys() {
        let mut s = ChartSeries::new(2);
        s.upsert(1, 1.0);
        s.upsert(2, 2.0);
        s.upsert(3, 3.0);
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(1), None);
        assert_eq!(s.get(3), Some(3.0));
    }
}
