//! Orthonormal basis for mapping locally sampled directions to world space.

use crate::Vec3;

/// Three mutually orthogonal unit vectors with `w` as the local +Z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onb {
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Onb {
    /// Build a right-handed frame whose `w` axis is `n` normalized.
    ///
    /// The helper axis is X unless `w` is nearly parallel to it.
    pub fn build_from_w(n: Vec3) -> Self {
        let w = n.normalize();
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let u = w.cross(a).normalize();
        let v = w.cross(u);
        Self { u, v, w }
    }

    #[inline]
    pub fn u(&self) -> Vec3 {
        self.u
    }

    #[inline]
    pub fn v(&self) -> Vec3 {
        self.v
    }

    #[inline]
    pub fn w(&self) -> Vec3 {
        self.w
    }

    /// Map local coordinates `(a, b, c)` to `a*u + b*v + c*w`.
    #[inline]
    pub fn local(&self, a: f32, b: f32, c: f32) -> Vec3 {
        a * self.u + b * self.v + c * self.w
    }

    #[inline]
    pub fn local_vec(&self, a: Vec3) -> Vec3 {
        self.local(a.x, a.y, a.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(onb: &Onb) {
        assert!((onb.u().length() - 1.0).abs() < 1e-5);
        assert!((onb.v().length() - 1.0).abs() < 1e-5);
        assert!((onb.w().length() - 1.0).abs() < 1e-5);
        assert!(onb.u().dot(onb.v()).abs() < 1e-5);
        assert!(onb.u().dot(onb.w()).abs() < 1e-5);
        assert!(onb.v().dot(onb.w()).abs() < 1e-5);
    }

    #[test]
    fn test_onb_w_is_normalized_input() {
        let onb = Onb::build_from_w(Vec3::new(0.0, 0.0, 3.0));
        assert!((onb.w() - Vec3::Z).length() < 1e-6);
        assert_orthonormal(&onb);
    }

    #[test]
    fn test_onb_orthonormal_for_many_inputs() {
        let inputs = [
            Vec3::X,
            -Vec3::X,
            Vec3::Y,
            Vec3::new(0.95, 0.1, 0.0),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-0.3, -0.9, 0.2),
        ];
        for n in inputs {
            let onb = Onb::build_from_w(n);
            assert_orthonormal(&onb);
            assert!((onb.u().cross(onb.v()) - onb.w()).length() < 1e-5);
        }
    }

    #[test]
    fn test_onb_local_maps_z_to_w() {
        let n = Vec3::new(1.0, 1.0, 0.0);
        let onb = Onb::build_from_w(n);

        let mapped = onb.local(0.0, 0.0, 1.0);
        assert!((mapped - n.normalize()).length() < 1e-6);

        let v = Vec3::new(0.3, -0.2, 0.9);
        assert!((onb.local_vec(v) - onb.local(v.x, v.y, v.z)).length() < 1e-6);
    }

    #[test]
    fn test_onb_local_preserves_length() {
        let onb = Onb::build_from_w(Vec3::new(-0.3, 0.4, 0.5));
        let v = Vec3::new(0.6, 0.0, 0.8);
        assert!((onb.local_vec(v).length() - 1.0).abs() < 1e-5);
    }
}
