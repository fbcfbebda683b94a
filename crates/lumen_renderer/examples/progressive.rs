//! Progressive rendering example.
//!
//! Builds a small lit scene, renders it repeatedly while the image
//! converges, then moves the camera and starts over.
//!
//! Usage: cargo run --release --example progressive -- [frames]

use anyhow::{Context, Result};
use lumen_renderer::{Camera, Color, Material, Renderer, Scene, Settings, Sphere, Vec3};

const WIDTH: u32 = 320;
const HEIGHT: u32 = 180;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let frames: u32 = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("Invalid frame count: {arg}"))?,
        None => 32,
    };

    let scene = build_scene();
    if let Err(e) = scene.validate() {
        log::warn!("Scene has authoring errors, rendering anyway: {}", e);
    }
    log::info!(
        "Scene: {} spheres, {} materials",
        scene.sphere_count(),
        scene.material_count()
    );

    let mut camera = Camera::new(45.0, 0.1, 100.0);
    camera.on_resize(WIDTH, HEIGHT);

    let mut renderer = Renderer::new().with_settings(Settings {
        bounces: 5,
        ..Settings::default()
    });
    renderer.on_resize(WIDTH, HEIGHT);

    log::info!("Rendering {}x{} for {} frames", WIDTH, HEIGHT, frames);
    converge(&mut renderer, &scene, &camera, frames)?;

    // Any camera change invalidates the running average
    camera.translate(Vec3::new(1.0, 0.5, 0.0));
    camera.rotate(0.0, -0.15);
    renderer.reset_accumulation_frame();

    log::info!("Camera moved, restarting accumulation");
    converge(&mut renderer, &scene, &camera, frames)?;

    Ok(())
}

fn converge(renderer: &mut Renderer, scene: &Scene, camera: &Camera, frames: u32) -> Result<()> {
    let start = std::time::Instant::now();
    for _ in 0..frames {
        renderer.render(scene, camera)?;
        log::debug!(
            "Frame {} took {:.3}ms",
            renderer.frame_index() - 1,
            renderer.last_render_time().as_secs_f64() * 1000.0
        );
    }

    let image = renderer
        .final_image()
        .context("Renderer has no image after rendering")?;
    let lit = image
        .pixels()
        .iter()
        .filter(|&&p| p & 0x00FF_FFFF != 0)
        .count();

    log::info!(
        "{} frames in {:?} ({:.1}% of pixels lit)",
        frames,
        start.elapsed(),
        100.0 * lit as f64 / image.pixel_count().max(1) as f64
    );
    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    let pink = scene.add_material(Material::new(Color::new(1.0, 0.0, 1.0)).with_roughness(0.0));
    let blue = scene.add_material(Material::new(Color::new(0.2, 0.3, 1.0)).with_roughness(0.1));
    let orange = scene.add_material(
        Material::new(Color::new(0.8, 0.5, 0.2))
            .with_roughness(0.1)
            .with_emission(Color::new(0.8, 0.5, 0.2), 2.0),
    );

    scene.add_sphere(Sphere::new(Vec3::ZERO, 1.0, pink));
    scene.add_sphere(Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0, orange));
    scene.add_sphere(Sphere::new(Vec3::new(0.0, -101.0, 0.0), 100.0, blue));

    scene
}
