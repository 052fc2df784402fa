//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, ScatterResult};
use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::{Rng, RngCore};
use std::sync::Arc;

/// A dummy material used for HitRecord::default().
/// Always absorbs light (returns None from scatter).
struct DummyMaterial;

impl Material for DummyMaterial {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }
}

static DUMMY_MATERIAL: DummyMaterial = DummyMaterial;

/// Record of a ray-object intersection.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Material of the primitive that was hit
    pub material: &'a dyn Material,
    /// UV texture coordinates
    pub u: f32,
    pub v: f32,
    /// Ray parameter of the intersection
    pub t: f32,
    /// Whether the ray hit the outward-facing side of the surface
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &DUMMY_MATERIAL,
            u: 0.0,
            v: 0.0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on ray direction and unit outward normal.
    ///
    /// The stored normal always points against the ray, so the side that was
    /// hit is tracked separately in `front_face`.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object with `t` strictly inside `ray_t`.
    ///
    /// Returns true if hit and fills in the record. On a miss the record is
    /// left untouched.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool;

    /// Axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;

    /// Solid-angle density of sampling `direction` from `origin` with
    /// [`Hittable::random`]. Zero for objects that can't be sampled or that
    /// the direction misses.
    fn pdf_value(&self, _origin: Vec3, _direction: Vec3) -> f32 {
        0.0
    }

    /// Direction from `origin` toward a random point on this object.
    fn random(&self, _origin: Vec3, _rng: &mut dyn RngCore) -> Vec3 {
        Vec3::X
    }
}

/// A flat list of shared hittable objects.
///
/// Objects are held by `Arc` so one primitive can be both part of the world
/// and a light sampling target.
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Arc<dyn Hittable>> for HittableList {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Hittable>>>(iter: I) -> Self {
        let mut list = HittableList::new();
        for object in iter {
            list.add(object);
        }
        list
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if object.hit(ray, ray_t.with_max(closest_so_far), rec) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// Average of the members' densities, matching `random`'s uniform choice.
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        if self.objects.is_empty() {
            return 0.0;
        }

        let weight = 1.0 / self.objects.len() as f32;
        self.objects
            .iter()
            .map(|object| weight * object.pdf_value(origin, direction))
            .sum()
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        if self.objects.is_empty() {
            return Vec3::X;
        }

        let index = rng.gen_range(0..self.objects.len());
        self.objects[index].random(origin, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AaRect, Color, DiffuseLight, Lambertian, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere_at(z: f32) -> Arc<dyn Hittable> {
        Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, z),
            0.5,
            Arc::new(Lambertian::new(Color::splat(0.5))),
        ))
    }

    #[test]
    fn test_set_face_normal() {
        let mut rec = HitRecord::default();
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);

        rec.set_face_normal(&ray, Vec3::Z);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);

        rec.set_face_normal(&ray, -Vec3::Z);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_list_returns_closest_hit_regardless_of_order() {
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        let interval = Interval::new(0.001, f32::INFINITY);

        let near_first: HittableList = vec![sphere_at(-2.0), sphere_at(-5.0)].into_iter().collect();
        let far_first: HittableList = vec![sphere_at(-5.0), sphere_at(-2.0)].into_iter().collect();

        for list in [near_first, far_first] {
            let mut rec = HitRecord::default();
            assert!(list.hit(&ray, interval, &mut rec));
            assert!((rec.t - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_list_respects_interval() {
        let list: HittableList = vec![sphere_at(-5.0)].into_iter().collect();
        let ray = Ray::new_simple(Vec3::ZERO, -Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(!list.hit(&ray, Interval::new(0.001, 4.0), &mut rec));
        assert!(!HittableList::new().hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_list_len_and_clear() {
        let mut list = HittableList::new();
        assert!(list.is_empty());

        list.add(sphere_at(-1.0));
        list.add(sphere_at(-3.0));
        assert_eq!(list.len(), 2);
        assert!(list.bounding_box().z.contains(-3.4));

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.bounding_box(), Aabb::EMPTY);
    }

    #[test]
    fn test_list_pdf_value_averages_members() {
        let light: Arc<dyn Hittable> = Arc::new(AaRect::xz(
            -1.0,
            1.0,
            -1.0,
            1.0,
            2.0,
            Arc::new(DiffuseLight::new(Color::ONE)),
        ));
        let off_to_side: Arc<dyn Hittable> = Arc::new(AaRect::xz(
            10.0,
            11.0,
            10.0,
            11.0,
            2.0,
            Arc::new(DiffuseLight::new(Color::ONE)),
        ));
        let lights: HittableList = vec![light.clone(), off_to_side].into_iter().collect();

        let direction = Vec3::Y;
        let single = light.pdf_value(Vec3::ZERO, direction);
        assert!(single > 0.0);
        assert!((lights.pdf_value(Vec3::ZERO, direction) - 0.5 * single).abs() < 1e-6);
    }

    #[test]
    fn test_list_random_points_at_a_member() {
        let light: Arc<dyn Hittable> = Arc::new(AaRect::xz(
            -1.0,
            1.0,
            -1.0,
            1.0,
            2.0,
            Arc::new(DiffuseLight::new(Color::ONE)),
        ));
        let lights: HittableList = vec![light].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..100 {
            let direction = lights.random(Vec3::ZERO, &mut rng);
            assert!(lights.pdf_value(Vec3::ZERO, direction) > 0.0);
        }
    }
}
