//! Axis-aligned rectangles.
//!
//! One type covers all three orientations: the plane selects which axis is
//! fixed at `k` and which two axes the bounds apply to.

use crate::{
    hittable::{HitRecord, Hittable},
    sampling::gen_f32,
    Material,
};
use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Plane a rectangle lies in. The outward normal is the remaining axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectPlane {
    Xy,
    Xz,
    Yz,
}

impl RectPlane {
    /// Axis indices as (first bounded axis, second bounded axis, fixed axis).
    #[inline]
    fn axes(self) -> (usize, usize, usize) {
        match self {
            RectPlane::Xy => (0, 1, 2),
            RectPlane::Xz => (0, 2, 1),
            RectPlane::Yz => (1, 2, 0),
        }
    }
}

/// An axis-aligned rectangle `[a0, a1] x [b0, b1]` on the plane `axis = k`.
///
/// Bounds are expected to satisfy `a0 < a1` and `b0 < b1`; degenerate
/// rectangles are not rejected.
pub struct AaRect {
    plane: RectPlane,
    a0: f32,
    a1: f32,
    b0: f32,
    b1: f32,
    k: f32,
    material: Arc<dyn Material>,
}

impl AaRect {
    pub fn new(
        plane: RectPlane,
        (a0, a1): (f32, f32),
        (b0, b1): (f32, f32),
        k: f32,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            plane,
            a0,
            a1,
            b0,
            b1,
            k,
            material,
        }
    }

    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(RectPlane::Xy, (x0, x1), (y0, y1), k, material)
    }

    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(RectPlane::Xz, (x0, x1), (z0, z1), k, material)
    }

    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(RectPlane::Yz, (y0, y1), (z0, z1), k, material)
    }

    pub fn plane(&self) -> RectPlane {
        self.plane
    }

    pub fn area(&self) -> f32 {
        (self.a1 - self.a0) * (self.b1 - self.b0)
    }

    /// Outward normal (the positive fixed axis).
    pub fn outward_normal(&self) -> Vec3 {
        let (_, _, ik) = self.plane.axes();
        let mut normal = Vec3::ZERO;
        normal[ik] = 1.0;
        normal
    }

    /// Build a world-space point from plane coordinates.
    fn point(&self, a: f32, b: f32) -> Vec3 {
        let (ia, ib, ik) = self.plane.axes();
        let mut p = Vec3::ZERO;
        p[ia] = a;
        p[ib] = b;
        p[ik] = self.k;
        p
    }
}

impl Hittable for AaRect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let (ia, ib, ik) = self.plane.axes();

        // Parallel rays give an infinite or NaN t, which surrounds() rejects
        let t = (self.k - ray.origin()[ik]) / ray.direction()[ik];
        if !ray_t.surrounds(t) {
            return false;
        }

        let p = ray.at(t);
        let (a, b) = (p[ia], p[ib]);
        if a < self.a0 || a > self.a1 || b < self.b0 || b > self.b1 {
            return false;
        }

        rec.u = (a - self.a0) / (self.a1 - self.a0);
        rec.v = (b - self.b0) / (self.b1 - self.b0);
        rec.t = t;
        rec.p = p;
        rec.set_face_normal(ray, self.outward_normal());
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        // Padding gives the flat axis a small thickness
        Aabb::from_points(self.point(self.a0, self.b0), self.point(self.a1, self.b1))
    }

    /// Converts the uniform area density `1 / A` to solid angle:
    /// `distance^2 / (cos * A)`.
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        let mut rec = HitRecord::default();
        if !self.hit(&Ray::new_simple(origin, direction), Interval::new(0.001, f32::INFINITY), &mut rec) {
            return 0.0;
        }

        let distance_squared = rec.t * rec.t * direction.length_squared();
        let cosine = (direction.dot(rec.normal) / direction.length()).abs();
        if cosine <= 0.0 {
            return 0.0;
        }

        distance_squared / (cosine * self.area())
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let a = self.a0 + gen_f32(rng) * (self.a1 - self.a0);
        let b = self.b0 + gen_f32(rng) * (self.b1 - self.b0);
        self.point(a, b) - origin
    }
}
