//! Axis-aligned box assembled from six rectangles.

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    AaRect, FlipFace, Material,
};
use ember_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// A box spanning two opposite corners, all faces sharing one material.
///
/// The faces on the minimum side of each axis are flipped so that
/// `front_face` is true for hits from outside the box.
pub struct Cuboid {
    box_min: Vec3,
    box_max: Vec3,
    sides: HittableList,
}

impl Cuboid {
    pub fn new(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> Self {
        let box_min = a.min(b);
        let box_max = a.max(b);
        let (p0, p1) = (box_min, box_max);

        let mut sides = HittableList::new();

        sides.add(Arc::new(AaRect::xy(p0.x, p1.x, p0.y, p1.y, p1.z, material.clone())));
        sides.add(Arc::new(FlipFace::new(Arc::new(AaRect::xy(
            p0.x,
            p1.x,
            p0.y,
            p1.y,
            p0.z,
            material.clone(),
        )))));

        sides.add(Arc::new(AaRect::xz(p0.x, p1.x, p0.z, p1.z, p1.y, material.clone())));
        sides.add(Arc::new(FlipFace::new(Arc::new(AaRect::xz(
            p0.x,
            p1.x,
            p0.z,
            p1.z,
            p0.y,
            material.clone(),
        )))));

        sides.add(Arc::new(AaRect::yz(p0.y, p1.y, p0.z, p1.z, p1.x, material.clone())));
        sides.add(Arc::new(FlipFace::new(Arc::new(AaRect::yz(
            p0.y, p1.y, p0.z, p1.z, p0.x, material,
        )))));

        Self {
            box_min,
            box_max,
            sides,
        }
    }
}

impl Hittable for Cuboid {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.sides.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::from_points(self.box_min, self.box_max)
    }

    // A face is picked uniformly and sampled by area; the density is the
    // matching average over faces, so a box can be a light.
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f32 {
        self.sides.pdf_value(origin, direction)
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        self.sides.random(origin, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ray_color, AaRect, Color, DiffuseLight, Lambertian, RenderConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_cuboid() -> Cuboid {
        Cuboid::new(Vec3::ONE, Vec3::ZERO, Arc::new(Lambertian::new(Color::splat(0.73))))
    }

    #[test]
    fn test_cuboid_hits_nearest_face_from_every_side() {
        let cuboid = unit_cuboid();
        let center = Vec3::splat(0.5);
        let interval = Interval::new(0.001, f32::INFINITY);

        for axis_dir in [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z] {
            let origin = center + 3.0 * axis_dir;
            let ray = Ray::new_simple(origin, -axis_dir);
            let mut rec = HitRecord::default();

            assert!(cuboid.hit(&ray, interval, &mut rec));
            assert!((rec.t - 2.5).abs() < 1e-5);
            assert!((rec.normal - axis_dir).length() < 1e-6);
            assert!(rec.front_face, "outside hit along {:?}", axis_dir);
        }
    }

    #[test]
    fn test_cuboid_hit_from_inside_is_back_face() {
        let cuboid = unit_cuboid();
        let ray = Ray::new_simple(Vec3::splat(0.5), Vec3::Y);
        let mut rec = HitRecord::default();

        assert!(cuboid.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-5);
        assert!(!rec.front_face);
    }

    #[test]
    fn test_cuboid_miss_and_bbox() {
        let cuboid = unit_cuboid();
        let ray = Ray::new_simple(Vec3::new(2.0, 2.0, -3.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(!cuboid.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert_eq!(cuboid.bounding_box(), Aabb::from_points(Vec3::ZERO, Vec3::ONE));
    }

    #[test]
    fn test_cuboid_light_sampling_targets_the_box() {
        let cuboid = unit_cuboid();
        let origin = Vec3::new(0.5, 0.5, -3.0);
        let mut rng = StdRng::seed_from_u64(21);

        assert!(cuboid.pdf_value(origin, Vec3::Z) > 0.0);
        assert_eq!(cuboid.pdf_value(origin, -Vec3::Z), 0.0);

        for _ in 0..100 {
            let direction = cuboid.random(origin, &mut rng);
            let mut rec = HitRecord::default();
            let ray = Ray::new_simple(origin, direction);
            assert!(cuboid.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
            assert!(cuboid.pdf_value(origin, direction) > 0.0);
        }
    }

    #[test]
    fn test_cuboid_light_matches_cosine_sampling() {
        // Wall at x = 0 facing +X, lit by an emissive slab in front of it
        let light: Arc<dyn Hittable> = Arc::new(Cuboid::new(
            Vec3::new(1.5, -0.5, -0.5),
            Vec3::new(1.7, 0.5, 0.5),
            Arc::new(DiffuseLight::new(Color::splat(4.0))),
        ));
        let mut world = HittableList::new();
        world.add(Arc::new(AaRect::yz(
            -5.0,
            5.0,
            -5.0,
            5.0,
            0.0,
            Arc::new(Lambertian::new(Color::splat(0.5))),
        )));
        world.add(light.clone());
        let mut lights = HittableList::new();
        lights.add(light);

        let config = RenderConfig::default();
        let ray = Ray::new_simple(Vec3::new(1.0, 0.0, 0.0), -Vec3::X);
        let mut rng = StdRng::seed_from_u64(22);

        let n = 40_000;
        let mixed: f64 = (0..n)
            .map(|_| ray_color(&ray, &world, Some(&lights), 2, &config, &mut rng).x as f64)
            .sum::<f64>()
            / n as f64;
        let cosine_only: f64 = (0..n)
            .map(|_| ray_color(&ray, &world, None, 2, &config, &mut rng).x as f64)
            .sum::<f64>()
            / n as f64;

        assert!(cosine_only > 0.0);
        assert!(
            (mixed - cosine_only).abs() / cosine_only < 0.1,
            "mixed = {}, cosine only = {}",
            mixed,
            cosine_only
        );
    }
}
