//! Bounded pointer trail.
//!
//! A fixed-capacity, chronologically ordered history of recent pointer
//! positions. Pushing past capacity evicts the oldest point.

use kurbo::Point;
use std::collections::VecDeque;

/// One recorded pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub position: Point,
    /// Milliseconds, in whatever clock the caller records with.
    pub timestamp: f64,
}

/// A trail segment between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    pub from: Point,
    pub to: Point,
}

impl TrailSegment {
    /// Where the segment's color is sampled.
    pub fn midpoint(&self) -> Point {
        self.from.midpoint(self.to)
    }
}

#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, position: Point, timestamp: f64) {
        if self.capacity == 0 {
            return;
        }
        self.points.push_back(TrailPoint {
            position,
            timestamp,
        });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points, oldest first.
    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Consecutive segments, oldest first. Empty with fewer than two points.
    pub fn segments(&self) -> impl Iterator<Item = TrailSegment> + '_ {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .map(|(a, b)| TrailSegment {
                from: a.position,
                to: b.position,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_need_two_points() {
        let mut trail = Trail::new(4);
        trail.push(Point::new(0.0, 0.0), 0.0);
        assert_eq!(trail.segments().count(), 0);
        trail.push(Point::new(10.0, 0.0), 16.0);
        let seg = trail.segments().next().unwrap();
        assert_eq!(seg.midpoint(), Point::new(5.0, 0.0));
    }

    #[test]
    fn overflow_keeps_most_recent_oldest_first() {
        let mut trail = Trail::new(40);
        for i in 0..100 {
            trail.push(Point::new(i as f64, 0.0), i as f64 * 16.0);
        }
        assert_eq!(trail.len(), 40);
        let xs: Vec<f64> = trail.points().map(|p| p.position.x).collect();
        let expected: Vec<f64> = (60..100).map(|i| i as f64).collect();
        assert_eq!(xs, expected);
        assert_eq!(trail.segments().count(), 39);
    }

    #[test]
    fn zero_capacity_never_stores() {
        let mut trail = Trail::new(0);
        trail.push(Point::new(1.0, 1.0), 0.0);
        assert!(trail.is_empty());
    }
}
