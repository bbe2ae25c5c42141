// Motion and layout tuning shared by the cursor, scroll and scene math.
//
// Per-frame rates are expressed against a 60 Hz reference frame and converted
// to frame-rate independent factors by `easing::frame_alpha`.

use std::f32::consts::PI;

// Reference frame rate for per-frame easing rates
pub const REFERENCE_FPS: f32 = 60.0;

// ---------------- Cursor ----------------
pub const EDGE_THRESHOLD_PX: f32 = 5.0; // distance from a screen edge that counts as "at the edge"
pub const IDLE_THRESHOLD_MS: f64 = 2000.0; // no movement for this long -> idle
pub const IDLE_CHECK_INTERVAL_MS: i32 = 100; // cadence of the idle poll

pub const CURSOR_EASE: f32 = 0.15; // visual cursor follow rate per frame
pub const CURSOR_EASE_HOVER: f32 = 0.25; // snappier follow while over a magnetic target
pub const TRAIL_EASE: f32 = 0.08; // trail lags behind the cursor

pub const MAGNET_RADIUS_PX: f32 = 100.0; // attraction cap
pub const MAGNET_MIN_DISTANCE_PX: f32 = 8.0; // pull saturates inside this distance
pub const MAGNET_PULL: f32 = 0.3; // maximum pull fraction toward the target center

pub const MARKER_CAPACITY: usize = 24; // bounded marker pool
pub const IDLE_MARKER_COUNT: usize = 8; // markers used by orbit/emission
pub const ORBIT_RADIUS_PX: f32 = 28.0;
pub const ORBIT_SPEED: f32 = 1.6; // rad/s
pub const ORBIT_WOBBLE: f32 = 0.45; // fraction of speed modulated by the slow sine
pub const ORBIT_WOBBLE_FREQ: f32 = 0.7; // rad/s of the modulation sine

pub const EMIT_BASE_DISTANCE_PX: f32 = 14.0;
pub const EMIT_PULSE_DISTANCE_PX: f32 = 26.0;
pub const EMIT_PULSE_FREQ: f32 = 4.0; // rad/s
pub const EMIT_PHASE_STEP: f32 = 0.6; // phase lag between neighbouring markers
pub const EMIT_MIN_OPACITY: f32 = 0.25;
pub const CORNER_SPREAD: f32 = PI / 2.0; // 90 degree cone
pub const EDGE_SPREAD: f32 = PI * 0.75; // 135 degree cone

pub const TRAIL_SPEED_THRESHOLD_PX_S: f32 = 120.0;
pub const TRAIL_SPAWN_INTERVAL_MS: f64 = 40.0;
pub const TRAIL_LIFETIME_MS: f64 = 600.0;

// ---------------- Scroll ----------------
pub const REVEAL_OFFSET_PX: f32 = 100.0;
pub const SCROLL_VELOCITY_DIVISOR: f32 = 100.0; // px delta -> velocity units
pub const SCROLL_VELOCITY_DECAY_PER_SEC: f32 = 4.0;
pub const WHEEL_VELOCITY_DECAY_PER_SEC: f32 = 6.0;
pub const CARD_STAGGER: f32 = 0.1;
pub const CARD_TRAVEL_PX: f32 = 50.0;
pub const COUNTER_DURATION_MS: f64 = 2000.0;

// ---------------- Drive (wheel/scroll -> instance spin) ----------------
pub const DRIVE_ACTIVE_EPSILON: f32 = 0.001;
pub const DRIVE_GAIN: f32 = 5.0;
pub const DRIVE_MAX_MULTIPLIER: f32 = 12.0;
pub const OVERSCROLL_BOOST: f32 = 1.5;

// ---------------- Scene ----------------
pub const POINTER_EASE: f32 = 0.05;
pub const PROGRESS_EASE: f32 = 0.08;
pub const CAMERA_EASE: f32 = 0.06;
pub const MODEL_EASE: f32 = 0.05;

pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_HOME: [f32; 3] = [0.0, 0.0, 5.0];
pub const CAMERA_PARALLAX: f32 = 0.5; // world units per NDC unit on the virtual camera
pub const CAMERA_NUDGE: f32 = 0.15; // fraction of the parallax applied to the real camera
pub const MODEL_POINTER_TILT: f32 = 0.15; // rad per NDC unit

pub const INSTANCE_SPEED_TAU_SEC: f32 = 0.35; // time constant of the spin chase
pub const INSTANCE_FLOAT_FREQ: f32 = 0.5;
pub const INSTANCE_FLOAT_AMPLITUDE: f32 = 0.5;
pub const INSTANCE_RADIUS_JITTER: f32 = 2.0;
pub const INSTANCE_SCALE_MIN: f32 = 0.2;
pub const INSTANCE_SCALE_SPAN: f32 = 0.3;
pub const INSTANCE_BASE_SPEED: f32 = 1.2; // rad/s span of the random base speed (+-0.6)

pub const FLIP_TRIGGER_DISTANCE: f32 = 0.3; // NDC distance to the cursor
pub const FLIP_START_SPEED: f32 = 12.0; // rad/s
pub const FLIP_DECAY_PER_FRAME: f32 = 0.92;
pub const FLIP_STOP_SPEED: f32 = 0.6;

pub const HERO_RADIUS: f32 = 2.0;
pub const HERO_DETAIL: u32 = 4;
pub const HERO_FLOAT_AMPLITUDE: f32 = 0.3;
pub const HERO_POINTER_TILT: f32 = 0.02;
pub const EXPERIENCE_POSITION: [f32; 3] = [3.0, 0.0, -2.0];
pub const EXPERIENCE_BOB: f32 = 2.0;

pub const PARTICLE_SPIN: f32 = 0.05; // rad/s about Y
pub const PARTICLE_SPREAD: [f32; 3] = [20.0, 20.0, 10.0];
pub const LINE_SPIN: f32 = 0.02; // rad/s about Y
pub const LINE_MAX_HEIGHT: f32 = 12.0; // lines wrap from +H back to -H
pub const LINE_SPREAD_XZ: f32 = 14.0;
pub const LINE_LENGTH_MIN: f32 = 0.6;
pub const LINE_LENGTH_SPAN: f32 = 1.8;
pub const LINE_SPEED_MIN: f32 = 0.4;
pub const LINE_SPEED_SPAN: f32 = 1.2;

// Golden angle (pi * (3 - sqrt 5)) used by the Fibonacci sphere
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;
