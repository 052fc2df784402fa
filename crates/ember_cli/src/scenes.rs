//! Built-in scenes.

use crate::settings::{SceneKind, Settings};
use ember_renderer::{
    AaRect, Bvh, Camera, CheckerTexture, Color, Cuboid, DiffuseLight, FlipFace, Hittable, HittableList,
    Lambertian, Material, RotateY, Sphere, Translate, Vec3,
};
use std::sync::Arc;

/// A renderable scene: what to look at, from where, and which objects to
/// sample as lights.
pub struct Scene {
    pub camera: Camera,
    pub world: HittableList,
    pub lights: HittableList,
    pub use_sky_gradient: bool,
}

pub fn build(settings: &Settings) -> Scene {
    let mut scene = match settings.scene {
        SceneKind::CornellBox => cornell_box(),
        SceneKind::Spheres => spheres(),
    };

    scene.camera.image_width = settings.width;
    scene.camera.image_height = settings.height;
    scene.camera.initialize();

    log::info!(
        "Built {:?} scene: {} objects, {} lights",
        settings.scene,
        scene.world.len(),
        scene.lights.len()
    );
    scene
}

/// The classic Cornell box: two rotated boxes under a ceiling light.
pub fn cornell_box() -> Scene {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    // The light faces down into the box
    let ceiling_light: Arc<dyn Hittable> = Arc::new(FlipFace::new(Arc::new(AaRect::xz(
        213.0, 343.0, 227.0, 332.0, 554.0, light,
    ))));

    let mut world = HittableList::new();
    world.add(Arc::new(AaRect::yz(0.0, 555.0, 0.0, 555.0, 555.0, green)));
    world.add(Arc::new(AaRect::yz(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    world.add(ceiling_light.clone());
    world.add(Arc::new(AaRect::xz(0.0, 555.0, 0.0, 555.0, 555.0, white.clone())));
    world.add(Arc::new(AaRect::xz(0.0, 555.0, 0.0, 555.0, 0.0, white.clone())));
    world.add(Arc::new(AaRect::xy(0.0, 555.0, 0.0, 555.0, 555.0, white.clone())));

    let tall = Cuboid::new(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0), white.clone());
    let tall = RotateY::new(Arc::new(tall), 15.0);
    world.add(Arc::new(Translate::new(Arc::new(tall), Vec3::new(265.0, 0.0, 295.0))));

    let short = Cuboid::new(Vec3::ZERO, Vec3::splat(165.0), white);
    let short = RotateY::new(Arc::new(short), -18.0);
    world.add(Arc::new(Translate::new(Arc::new(short), Vec3::new(130.0, 0.0, 65.0))));

    let mut lights = HittableList::new();
    lights.add(ceiling_light);

    let camera = Camera::new()
        .with_position(Vec3::new(278.0, 278.0, -800.0), Vec3::new(278.0, 278.0, 0.0), Vec3::Y)
        .with_lens(40.0, 0.0, 10.0);

    Scene {
        camera,
        world,
        lights,
        use_sky_gradient: false,
    }
}

/// Three spheres on a checkered ground under a small spherical light and sky.
pub fn spheres() -> Scene {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::from_texture(Arc::new(CheckerTexture::from_colors(
        0.5,
        Color::new(0.2, 0.3, 0.1),
        Color::splat(0.9),
    ))));
    let lamp: Arc<dyn Hittable> = Arc::new(Sphere::new(
        Vec3::new(0.0, 2.0, -1.0),
        0.5,
        Arc::new(DiffuseLight::new(Color::splat(4.0))),
    ));

    let objects: Vec<Arc<dyn Hittable>> = vec![
        Arc::new(Sphere::new(
            Vec3::new(-1.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.8, 0.3, 0.3))),
        )),
        Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5))),
        )),
        Arc::new(Sphere::new(
            Vec3::new(1.0, 0.0, -1.0),
            0.5,
            Arc::new(Lambertian::new(Color::new(0.8, 0.6, 0.2))),
        )),
        lamp.clone(),
    ];

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)));
    world.add(Arc::new(Bvh::new(objects)));

    let mut lights = HittableList::new();
    lights.add(lamp);

    let camera = Camera::new()
        .with_position(Vec3::new(0.0, 0.5, 1.5), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(60.0, 0.0, 1.0);

    Scene {
        camera,
        world,
        lights,
        use_sky_gradient: true,
    }
}
