// Denoises a synthetic, one sample-per-pixel shadow signal and writes the
// noisy and filtered images as PNGs.
//
// Usage:
//   cargo run --release --example demo -- [OUTPUT_DIR]

use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use glam::{uvec2, vec2, vec4, UVec2, Vec2, Vec3};
use image::RgbImage;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use umbra::kernels::DepthNormal;
use umbra::{BufferDescriptor, Denoiser, DenoiserConfig, Resources, Texture};

const SIZE: UVec2 = UVec2::new(320, 200);
const FRAMES: u32 = 16;

/// Camera pans this many pixels per frame.
const PAN: f32 = 1.0;

fn main() -> Result<(), Box<dyn Error>> {
    let _ = env_logger::try_init();

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("target/umbra-demo"));

    fs::create_dir_all(&out_dir)?;

    let descriptor = BufferDescriptor::new(
        "shadows",
        "depth_normal",
        "motion_vectors",
        "shadows_denoised",
    );

    let mut denoiser = Denoiser::new(descriptor, DenoiserConfig::default())?;
    let mut resources = Resources::new();
    let mut rng = StdRng::seed_from_u64(1337);

    denoiser.resize(SIZE);

    resources.insert(
        "motion_vectors",
        Texture::filled("motion_vectors", SIZE, vec4(PAN, 0.0, 0.0, 0.0)),
    );

    resources.insert(
        "shadows_denoised",
        Texture::new("shadows_denoised", SIZE),
    );

    for frame in 0..FRAMES {
        let offset = frame as f32 * PAN;

        resources.insert(
            "depth_normal",
            Texture::from_fn("depth_normal", SIZE, |pos| {
                surface(pos.as_vec2() - vec2(offset, 0.0)).pack()
            }),
        );

        resources.insert(
            "shadows",
            Texture::from_fn("shadows", SIZE, |pos| {
                let lit = visibility(pos.as_vec2() - vec2(offset, 0.0));
                let sample = if rng.gen::<f32>() < lit { 1.0 } else { 0.0 };

                Vec3::splat(sample).extend(1.0)
            }),
        );

        let outcome = denoiser.execute(&mut resources);

        info!("Frame {frame}: {outcome:?}");
    }

    for (name, file) in [
        ("shadows", "noisy.png"),
        ("shadows_denoised", "denoised.png"),
    ] {
        if let Some(texture) = resources.get(name) {
            let path = out_dir.join(file);

            to_image(texture).save(&path)?;
            info!("Saved {}", path.display());
        }
    }

    Ok(())
}

/// A floor seen from above, with a raised box in the middle; everything
/// outside the floor is sky.
fn surface(pos: Vec2) -> DepthNormal {
    let floor = pos.y > 20.0 && pos.y < SIZE.y as f32 - 20.0;
    let tower = (pos - vec2(160.0, 100.0)).abs().max_element() < 30.0;

    if tower {
        DepthNormal::new(6.0, 0.01, Vec3::Z)
    } else if floor {
        DepthNormal::new(10.0, 0.02, Vec3::Z)
    } else {
        DepthNormal::default()
    }
}

/// Soft shadow cast by the box towards bottom-right.
fn visibility(pos: Vec2) -> f32 {
    let dist = (pos - vec2(190.0, 130.0)).abs().max_element();

    ((dist - 30.0) / 25.0).clamp(0.0, 1.0) * 0.8 + 0.1
}

fn to_image(texture: &Texture) -> RgbImage {
    let size = texture.size();

    RgbImage::from_fn(size.x, size.y, |x, y| {
        let [r, g, b, _] = texture.read(uvec2(x, y)).to_array();
        let encode = |v: f32| (v.clamp(0.0, 1.0).powf(1.0 / 2.2) * 255.0) as u8;

        image::Rgb([encode(r), encode(g), encode(b)])
    })
}
