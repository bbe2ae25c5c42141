use super::constants::REFERENCE_FPS;

/// Convert a per-frame easing rate (tuned at 60 Hz) into the blend factor for
/// a frame of `dt_sec`, so that easing speed does not depend on frame rate.
///
/// The result is always in \[0, 1\]; `rate >= 1` snaps.
#[inline]
pub fn frame_alpha(rate_per_frame: f32, dt_sec: f32) -> f32 {
    if rate_per_frame >= 1.0 {
        return 1.0;
    }
    let frames = (dt_sec.max(0.0)) * REFERENCE_FPS;
    (1.0 - (1.0 - rate_per_frame.max(0.0)).powf(frames)).clamp(0.0, 1.0)
}

/// Blend factor for a first-order filter with time constant `tau_sec`.
#[inline]
pub fn tau_alpha(tau_sec: f32, dt_sec: f32) -> f32 {
    if tau_sec <= 0.0 {
        return 1.0;
    }
    1.0 - (-dt_sec.max(0.0) / tau_sec).exp()
}

/// Per-frame multiplicative decay (e.g. 0.92 per frame) scaled to `dt_sec`.
#[inline]
pub fn frame_decay(factor_per_frame: f32, dt_sec: f32) -> f32 {
    factor_per_frame.powf(dt_sec.max(0.0) * REFERENCE_FPS)
}

#[inline]
pub fn approach(current: f32, target: f32, alpha: f32) -> f32 {
    current + (target - current) * alpha
}

#[inline]
pub fn approach_vec2(current: glam::Vec2, target: glam::Vec2, alpha: f32) -> glam::Vec2 {
    current + (target - current) * alpha
}

#[inline]
pub fn approach_vec3(current: glam::Vec3, target: glam::Vec3, alpha: f32) -> glam::Vec3 {
    current + (target - current) * alpha
}

/// `1 - (1 - t)^4`
#[inline]
pub fn ease_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}
