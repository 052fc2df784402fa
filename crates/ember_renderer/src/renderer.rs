//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Light importance sampling blended with cosine sampling
//! - Configurable bounce depth, iterated rather than recursed
//! - Multi-sampled pixels written as linear 8-bit RGB

use crate::pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf};
use crate::{Camera, Color, HitRecord, Hittable, RenderError, RenderResult};
use ember_math::{Interval, Ray};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Render configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing and integration
    pub samples_per_pixel: u32,
    /// Maximum number of path vertices
    pub max_depth: u32,
    /// Background radiance when a ray escapes the scene
    pub background: Color,
    /// Whether to use sky gradient instead of solid background
    pub use_sky_gradient: bool,
    /// Lower bound of the hit interval, to avoid self-intersection
    pub t_min: f32,
    /// Paths whose sampling density falls below this are terminated
    pub min_pdf: f32,
    /// Base seed for per-bucket random streams
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::ZERO,
            use_sky_gradient: false,
            t_min: 0.001,
            min_pdf: 1e-6,
            seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig("samples_per_pixel must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidConfig("max_depth must be at least 1".into()));
        }
        if !(self.min_pdf > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "min_pdf must be positive, got {}",
                self.min_pdf
            )));
        }
        if !(self.t_min >= 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "t_min must be non-negative, got {}",
                self.t_min
            )));
        }
        Ok(())
    }
}

/// Compute the radiance carried back along a ray.
///
/// At each vertex the emitted light is added, then the next direction is
/// drawn from an equal mix of light sampling (toward `lights`) and cosine
/// sampling, and the path throughput is scaled by
/// `albedo * scattering_pdf / mixture_pdf`. Without lights, or with a light
/// set that has nothing in it, only the cosine distribution is used.
///
/// A sampled direction whose mixture density is below `config.min_pdf` ends
/// the path there; the sample keeps the radiance gathered so far.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let lights = lights.filter(|lights| !lights.bounding_box().is_empty());
    let mut radiance = Color::ZERO;
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let mut rec = HitRecord::default();
        if !world.hit(&ray, Interval::new(config.t_min, f32::INFINITY), &mut rec) {
            return radiance + throughput * background(&ray, config);
        }

        radiance += throughput * rec.material.emitted(&ray, &rec, rec.u, rec.v, rec.p);

        let Some(scatter) = rec.material.scatter(&ray, &rec, rng) else {
            return radiance;
        };

        let cosine_pdf = CosinePdf::new(rec.normal);
        let (direction, pdf_value) = match lights {
            Some(lights) => {
                let light_pdf = HittablePdf::new(lights, rec.p);
                let mixture = MixturePdf::new(&light_pdf, &cosine_pdf);
                let direction = mixture.generate(rng);
                (direction, mixture.value(direction))
            }
            None => {
                let direction = cosine_pdf.generate(rng);
                (direction, cosine_pdf.value(direction))
            }
        };

        if !pdf_value.is_finite() || pdf_value < config.min_pdf {
            return radiance;
        }

        let scattered = Ray::new(rec.p, direction, ray.time());
        let scattering_pdf = rec.material.scattering_pdf(&ray, &rec, &scattered);
        if scattering_pdf <= 0.0 {
            return radiance;
        }

        throughput *= scatter.attenuation * scattering_pdf / pdf_value;
        ray = scattered;
    }

    radiance
}

fn background(ray: &Ray, config: &RenderConfig) -> Color {
    if config.use_sky_gradient {
        sky_gradient(ray)
    } else {
        config.background
    }
}

/// White-to-blue vertical gradient.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Write one pixel as three bytes at `cursor`, advancing it.
///
/// `pixel_color` is the sum over `samples_per_pixel` samples. Each channel is
/// averaged, clamped to `[0, 1]` and scaled to `[0, 255]` without gamma.
pub fn write_color(buffer: &mut [u8], cursor: &mut usize, pixel_color: Color, samples_per_pixel: u32) {
    let scale = 1.0 / samples_per_pixel as f32;

    for channel in pixel_color.to_array() {
        buffer[*cursor] = (255.999 * Interval::UNIT.clamp(channel * scale)) as u8;
        *cursor += 1;
    }
}

/// Sum `samples_per_pixel` radiance samples for pixel `(x, y)`.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_pixel_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, lights, config.max_depth, config, rng);
    }

    pixel_color
}

/// Accumulated radiance per pixel, row-major with row 0 at the top.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Summed (not averaged) color at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Averaged color at (x, y).
    pub fn average(&self, x: u32, y: u32) -> Color {
        self.get(x, y) / self.samples_per_pixel as f32
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[y as usize * self.width as usize + x as usize] = color;
    }

    /// Convert to packed RGB bytes.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.pixels.len() * 3];
        let mut cursor = 0;
        for color in &self.pixels {
            write_color(&mut bytes, &mut cursor, *color, self.samples_per_pixel);
        }
        bytes
    }

    /// Encode to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        image::save_buffer(path, &self.to_rgb8(), self.width, self.height, image::ColorType::Rgb8)?;
        log::info!("Wrote {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Check that the camera and config can produce an image.
pub(crate) fn validate_setup(
    camera: &Camera,
    lights: Option<&dyn Hittable>,
    config: &RenderConfig,
) -> RenderResult<()> {
    config.validate()?;
    if lights.is_none() {
        log::warn!("No light list given, sampling directions from the cosine lobe only");
    }
    if camera.image_width == 0 || camera.image_height == 0 {
        return Err(RenderError::InvalidConfig(format!(
            "image size must be non-zero, got {}x{}",
            camera.image_width, camera.image_height
        )));
    }
    Ok(())
}

/// Render the entire scene on the calling thread.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> RenderResult<ImageBuffer> {
    validate_setup(camera, lights, config)?;

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        camera.image_width,
        camera.image_height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height, config.samples_per_pixel);
    for y in 0..camera.image_height {
        log::debug!("Scanlines remaining: {}", camera.image_height - y);
        for x in 0..camera.image_width {
            let color = render_pixel(camera, world, lights, x, y, config, rng);
            image.set(x, y, color);
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}
