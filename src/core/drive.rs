// Blends page-scroll velocity and raw wheel velocity into the spin drive of
// the floating instances.
//
// Wheel input is tracked separately from page scroll so that wheel gestures
// still register when the document cannot scroll any further.

use super::constants::*;
use super::scroll::{ScrollDirection, ScrollState};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSignal {
    pub velocity: f32,
    pub direction: ScrollDirection,
    pub at_top: bool,
    pub at_bottom: bool,
}

impl From<&ScrollState> for ScrollSignal {
    fn from(s: &ScrollState) -> Self {
        Self {
            velocity: s.velocity,
            direction: s.direction,
            at_top: s.at_top(),
            at_bottom: s.at_bottom(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriveSource {
    Idle,
    Scroll,
    Wheel,
    Overscroll,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drive {
    pub multiplier: f32,
    /// +1 or -1
    pub sign: f32,
    pub source: DriveSource,
}

impl Default for Drive {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            sign: 1.0,
            source: DriveSource::Idle,
        }
    }
}

impl Drive {
    /// Scale factor applied to an instance's base rotation speed.
    pub fn factor(&self) -> f32 {
        self.multiplier * self.sign
    }
}

#[inline]
fn multiplier_for(magnitude: f32) -> f32 {
    (1.0 + magnitude.abs() * DRIVE_GAIN).min(DRIVE_MAX_MULTIPLIER)
}

#[inline]
fn sign_of(v: f32) -> f32 {
    if v < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Resolve the drive for this frame.
///
/// Precedence: scroll-limit override, then page scroll, then wheel, then
/// idle (keeping `previous_sign`).
pub fn resolve_drive(scroll: ScrollSignal, wheel_velocity: f32, previous_sign: f32) -> Drive {
    let wheel_active = wheel_velocity.abs() > DRIVE_ACTIVE_EPSILON;
    let pushing_past_limit =
        (scroll.at_top && wheel_velocity < 0.0) || (scroll.at_bottom && wheel_velocity > 0.0);

    if wheel_active && pushing_past_limit {
        return Drive {
            multiplier: multiplier_for(wheel_velocity * OVERSCROLL_BOOST),
            sign: sign_of(wheel_velocity),
            source: DriveSource::Overscroll,
        };
    }
    if scroll.velocity.abs() > DRIVE_ACTIVE_EPSILON {
        return Drive {
            multiplier: multiplier_for(scroll.velocity),
            sign: scroll.direction.sign(),
            source: DriveSource::Scroll,
        };
    }
    if wheel_active {
        return Drive {
            multiplier: multiplier_for(wheel_velocity),
            sign: sign_of(wheel_velocity),
            source: DriveSource::Wheel,
        };
    }
    Drive {
        multiplier: 1.0,
        sign: if previous_sign < 0.0 { -1.0 } else { 1.0 },
        source: DriveSource::Idle,
    }
}

/// Decaying wheel velocity accumulator.
#[derive(Clone, Copy, Debug, Default)]
pub struct WheelTracker {
    pub velocity: f32,
}

impl WheelTracker {
    /// `delta_px` is the wheel delta already converted to pixels.
    pub fn push(&mut self, delta_px: f32) {
        if !delta_px.is_finite() {
            return;
        }
        let v = delta_px / SCROLL_VELOCITY_DIVISOR;
        // keep the stronger of the fresh sample and the decaying one
        if v.abs() >= self.velocity.abs() || v.signum() != self.velocity.signum() {
            self.velocity = v;
        }
    }

    pub fn decay(&mut self, dt_sec: f32) {
        self.velocity *= (-WHEEL_VELOCITY_DECAY_PER_SEC * dt_sec.max(0.0)).exp();
        if self.velocity.abs() < DRIVE_ACTIVE_EPSILON * 0.1 {
            self.velocity = 0.0;
        }
    }
}

/// Convert a `WheelEvent` delta to pixels given its `deltaMode`
/// (0 = pixel, 1 = line, 2 = page).
#[inline]
pub fn wheel_delta_px(delta: f64, delta_mode: u32, viewport_height: f64) -> f32 {
    let px = match delta_mode {
        1 => delta * 16.0,
        2 => delta * viewport_height,
        _ => delta,
    };
    px as f32
}
