/// A closed range of ray parameters `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Every hit strictly in front of the ray origin.
    pub const POSITIVE: Interval = Interval::new(0.0, f32::INFINITY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));

        assert!(interval.surrounds(5.0));
        assert!(interval.surrounds(0.1));
        assert!(interval.surrounds(9.9));

        assert!(!interval.surrounds(-0.1));
        assert!(!interval.surrounds(10.1));
    }

    #[test]
    fn test_positive_interval() {
        let positive = Interval::POSITIVE;
        assert_eq!(positive, Interval::new(0.0, f32::INFINITY));

        assert!(!positive.surrounds(0.0));
        assert!(!positive.surrounds(-1.0));
        assert!(positive.surrounds(1e-6));
        assert!(positive.surrounds(1e10));
        assert!(!positive.surrounds(f32::INFINITY));
    }
}
