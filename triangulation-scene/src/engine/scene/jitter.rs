use bevy::prelude::*;

/// Deterministic pseudo-random value in `[0, 1)` for an integer seed.
///
/// Evaluated in `f64` so the sequence matches `frac(sin(seed) * 10000)`
/// bit for bit across ports.
pub fn seeded_random(seed: u32) -> f64 {
    let x = f64::from(seed).sin() * 10_000.0;
    x - x.floor()
}

/// Look-at target for camera `index`: the shared target nudged by a
/// reproducible offset of at most `noise_scale / 2` per axis.
pub fn jittered_target(index: usize, center: Vec3, noise_scale: f32) -> Vec3 {
    let base = index as u32 * 3;
    let offset = Vec3::new(
        (seeded_random(base) - 0.5) as f32,
        (seeded_random(base + 1) - 0.5) as f32,
        (seeded_random(base + 2) - 0.5) as f32,
    );
    center + offset * noise_scale
}
