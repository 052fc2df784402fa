//! Ember renderer - CPU path tracing with light importance sampling.
//!
//! A Monte Carlo path tracer that blends BRDF sampling with sampling toward
//! light geometry. Scene objects are shared as `Arc`s and are read-only while
//! rendering, so pixels can be traced in parallel.

mod bucket;
mod bvh;
mod camera;
mod cuboid;
mod error;
mod hittable;
mod material;
mod pdf;
mod rect;
mod renderer;
mod sampling;
mod sphere;
mod texture;
mod transform;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::Bvh;
pub use camera::Camera;
pub use cuboid::Cuboid;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, DiffuseLight, Lambertian, Material, ScatterResult};
pub use pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf};
pub use rect::{AaRect, RectPlane};
pub use renderer::{ray_color, render, render_pixel, write_color, ImageBuffer, RenderConfig};
pub use sampling::{gen_f32, random_cosine_direction, random_in_unit_disk, random_to_sphere, random_unit_vector};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, SolidColor, Texture};
pub use transform::{FlipFace, RotateY, Translate};

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Aabb, Interval, Onb, Ray, Vec3};
