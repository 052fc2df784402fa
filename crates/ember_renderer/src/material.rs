//! Material trait for surface scattering and emission.

use crate::sampling::random_cosine_direction;
use crate::texture::{SolidColor, Texture};
use crate::HitRecord;
use ember_math::{Onb, Ray, Vec3};
use rand::RngCore;
use std::f32::consts::PI;
use std::sync::Arc;

/// Color type alias (linear RGB radiance or reflectance)
pub type Color = Vec3;

/// Outcome of a material scattering an incoming ray.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Reflectance applied to light arriving along `scattered`
    pub attenuation: Color,
    /// The material's own sample of the outgoing direction
    pub scattered: Ray,
    /// Density of `scattered` under the material's natural distribution
    pub pdf: f32,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the surface does not scatter (absorbs, or only emits).
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;

    /// Density of `scattered` under this material's scattering distribution.
    ///
    /// The integrator evaluates this for the direction it actually chose,
    /// which is usually not the one `scatter` sampled.
    fn scattering_pdf(&self, _ray_in: &Ray, _rec: &HitRecord, _scattered: &Ray) -> f32 {
        0.0
    }

    /// Radiance emitted at the hit point. Black for non-emissive materials.
    fn emitted(&self, _ray_in: &Ray, _rec: &HitRecord, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (ideal diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a Lambertian material with a constant albedo.
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let uvw = Onb::build_from_w(rec.normal);
        let direction = uvw.local_vec(random_cosine_direction(rng)).normalize();

        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, direction, ray_in.time()),
            pdf: uvw.w().dot(direction) / PI,
        })
    }

    fn scattering_pdf(&self, _ray_in: &Ray, rec: &HitRecord, scattered: &Ray) -> f32 {
        let cosine = rec.normal.dot(scattered.direction().normalize());
        if cosine < 0.0 {
            0.0
        } else {
            cosine / PI
        }
    }
}

/// Diffuse light emitter. Radiates only from the front face.
#[derive(Clone)]
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a diffuse light with a constant emission color.
    pub fn new(emit: Color) -> Self {
        Self::from_texture(Arc::new(SolidColor::new(emit)))
    }

    pub fn from_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(&self, _ray_in: &Ray, _rec: &HitRecord, _rng: &mut dyn RngCore) -> Option<ScatterResult> {
        None
    }

    fn emitted(&self, _ray_in: &Ray, rec: &HitRecord, u: f32, v: f32, p: Vec3) -> Color {
        if rec.front_face {
            self.emit.value(u, v, p)
        } else {
            Color::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record_with_normal<'a>(material: &'a dyn Material, normal: Vec3, front_face: bool) -> HitRecord<'a> {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            material,
            u: 0.25,
            v: 0.75,
            t: 1.0,
            front_face,
        }
    }

    fn probe_ray() -> Ray {
        Ray::new_simple(Vec3::Y, -Vec3::Y)
    }

    #[test]
    fn test_lambertian_scatter_stays_above_surface() {
        let material = Lambertian::new(Color::new(0.5, 0.6, 0.7));
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        let rec = record_with_normal(&material, normal, true);
        let ray_in = Ray::new(Vec3::new(0.0, 5.0, 5.0), -normal, 0.25);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let result = material.scatter(&ray_in, &rec, &mut rng).expect("lambertian always scatters");
            let direction = result.scattered.direction();

            assert!((direction.length() - 1.0).abs() < 1e-4);
            assert!(direction.dot(normal) > 0.0);
            assert_eq!(result.attenuation, Color::new(0.5, 0.6, 0.7));
            assert_eq!(result.scattered.time(), 0.25);
            assert!((result.pdf - direction.dot(normal) / PI).abs() < 1e-5);
        }
    }

    #[test]
    fn test_lambertian_scattering_pdf() {
        let material = Lambertian::new(Color::ONE);
        let rec = record_with_normal(&material, Vec3::Y, true);
        let ray_in = Ray::new_simple(Vec3::Y, -Vec3::Y);

        // Back side is zero
        let below = Ray::new_simple(Vec3::ZERO, Vec3::new(0.3, -0.5, 0.1));
        assert_eq!(material.scattering_pdf(&ray_in, &rec, &below), 0.0);

        // cos(theta) / pi for every angle above the surface
        for degrees in [0.0f32, 15.0, 45.0, 60.0, 89.0] {
            let theta = degrees.to_radians();
            let direction = Vec3::new(theta.sin(), theta.cos(), 0.0) * 3.0;
            let scattered = Ray::new_simple(Vec3::ZERO, direction);
            let expected = theta.cos() / PI;
            assert!((material.scattering_pdf(&ray_in, &rec, &scattered) - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_diffuse_light_emits_from_front_face_only() {
        let light = DiffuseLight::new(Color::splat(15.0));
        let ray_in = Ray::new_simple(Vec3::new(0.0, -1.0, 0.0), Vec3::Y);

        let front = record_with_normal(&light, -Vec3::Y, true);
        assert_eq!(light.emitted(&ray_in, &front, front.u, front.v, front.p), Color::splat(15.0));

        let back = record_with_normal(&light, -Vec3::Y, false);
        assert_eq!(light.emitted(&ray_in, &back, back.u, back.v, back.p), Color::ZERO);
    }

    #[test]
    fn test_diffuse_light_does_not_scatter() {
        let light = DiffuseLight::new(Color::ONE);
        let rec = record_with_normal(&light, Vec3::Y, true);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(light.scatter(&probe_ray(), &rec, &mut rng).is_none());
        assert_eq!(light.scattering_pdf(&probe_ray(), &rec, &probe_ray()), 0.0);
    }

    #[test]
    fn test_lambertian_is_not_emissive() {
        let material = Lambertian::new(Color::ONE);
        let rec = record_with_normal(&material, Vec3::Y, true);
        assert_eq!(material.emitted(&probe_ray(), &rec, 0.0, 0.0, Vec3::ZERO), Color::ZERO);
    }
}
