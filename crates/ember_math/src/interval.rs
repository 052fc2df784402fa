/// Closed range `[min, max]`, used for ray parameters and box slabs.
///
/// `min > max` means empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// `[0, 1]`, for color clamping.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        !(self.min <= self.max)
    }

    /// Inclusive membership.
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Exclusive membership. NaN and infinities never pass, which is what
    /// root acceptance relies on.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Same lower bound, new upper bound.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval { min: self.min, max }
    }

    /// Grow by `delta` in total, half on each end.
    pub fn padded(&self, delta: f32) -> Interval {
        let half = 0.5 * delta;
        Interval::new(self.min - half, self.max + half)
    }

    pub fn shifted(&self, offset: f32) -> Interval {
        Interval::new(self.min + offset, self.max + offset)
    }

    /// Smallest interval covering both.
    pub fn union(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_includes_endpoints() {
        let range = Interval::new(0.0, 10.0);

        assert!(range.contains(0.0) && range.contains(10.0) && range.contains(5.0));
        assert!(!range.contains(-0.1));
        assert!(!range.contains(10.1));
    }

    #[test]
    fn test_surrounds_excludes_endpoints_and_nan() {
        let range = Interval::new(0.0, 10.0);

        assert!(!range.surrounds(0.0));
        assert!(!range.surrounds(10.0));
        assert!(range.surrounds(0.1));
        assert!(!range.surrounds(f32::NAN));
        assert!(!range.surrounds(f32::INFINITY));
    }

    #[test]
    fn test_clamp_to_unit() {
        assert_eq!(Interval::UNIT.clamp(-5.0), 0.0);
        assert_eq!(Interval::UNIT.clamp(0.25), 0.25);
        assert_eq!(Interval::UNIT.clamp(15.0), 1.0);
    }

    #[test]
    fn test_with_max_keeps_min() {
        let narrowed = Interval::new(0.001, f32::INFINITY).with_max(4.0);
        assert_eq!(narrowed, Interval::new(0.001, 4.0));
    }

    #[test]
    fn test_padded_and_shifted() {
        assert_eq!(Interval::new(0.0, 10.0).padded(4.0), Interval::new(-2.0, 12.0));
        assert_eq!(Interval::new(1.0, 2.0).shifted(-3.0), Interval::new(-2.0, -1.0));
    }

    #[test]
    fn test_empty() {
        assert!(Interval::EMPTY.is_empty());
        assert!(!Interval::EMPTY.contains(0.0));
        assert!(!Interval::new(3.0, 3.0).is_empty());
        assert!(Interval::new(f32::NAN, 1.0).is_empty());

        let merged = Interval::union(&Interval::EMPTY, &Interval::new(1.0, 2.0));
        assert_eq!(merged, Interval::new(1.0, 2.0));
    }
}
