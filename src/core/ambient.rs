// Ambient decoration: the floating particle field and the upward-flowing
// light lines.

use super::constants::*;
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: [f32; 3],
    pub scale: f32,
    pub randomness: [f32; 3],
}

/// Particles spread through a box centred on the origin.
pub fn particle_field<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            position: [
                (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD[0],
                (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD[1],
                (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD[2],
            ],
            scale: rng.gen(),
            randomness: [rng.gen(), rng.gen(), rng.gen()],
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientLine {
    pub x: f32,
    pub z: f32,
    /// bottom end
    pub y: f32,
    pub length: f32,
    pub speed: f32,
}

/// Recycle a line that rose past the top back to the bottom.
#[inline]
pub fn wrap_height(y: f32) -> f32 {
    if y > LINE_MAX_HEIGHT {
        y - 2.0 * LINE_MAX_HEIGHT
    } else {
        y
    }
}

#[derive(Clone, Debug, Default)]
pub struct AmbientLines {
    pub lines: Vec<AmbientLine>,
    /// group rotation about Y
    pub rotation: f32,
}

impl AmbientLines {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let lines = (0..count)
            .map(|_| AmbientLine {
                x: (rng.gen::<f32>() - 0.5) * LINE_SPREAD_XZ,
                z: (rng.gen::<f32>() - 0.5) * LINE_SPREAD_XZ - 2.0,
                y: (rng.gen::<f32>() * 2.0 - 1.0) * LINE_MAX_HEIGHT,
                length: LINE_LENGTH_MIN + rng.gen::<f32>() * LINE_LENGTH_SPAN,
                speed: LINE_SPEED_MIN + rng.gen::<f32>() * LINE_SPEED_SPAN,
            })
            .collect();
        Self {
            lines,
            rotation: 0.0,
        }
    }

    pub fn advance(&mut self, dt_sec: f32) {
        self.rotation = (self.rotation + LINE_SPIN * dt_sec).rem_euclid(TAU);
        for l in self.lines.iter_mut() {
            l.y = wrap_height(l.y + l.speed * dt_sec);
        }
    }

    /// Segment endpoints in group space with a per-vertex alpha: the head of
    /// each line is bright, the tail fades out.
    pub fn segments(&self) -> Vec<([f32; 3], f32)> {
        let mut out = Vec::with_capacity(self.lines.len() * 2);
        for l in &self.lines {
            let fade = 1.0 - (l.y.abs() / LINE_MAX_HEIGHT).min(1.0) * 0.7;
            out.push(([l.x, l.y, l.z], 0.0));
            out.push(([l.x, l.y + l.length, l.z], 0.6 * fade));
        }
        out
    }
}
