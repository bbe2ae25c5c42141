// Cursor controller state: eased/magnetic follow, idle detection and the
// decorative marker effects (idle orbit, edge emission, movement trail).
//
// Everything here is in CSS pixels with the origin at the top-left corner of
// the viewport and Y pointing down. The DOM layer feeds pointer samples and
// magnetic target rectangles in, and paints `markers` back out.

use super::constants::*;
use super::easing::{approach_vec2, frame_alpha};
use glam::Vec2;
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

/// Which screen edge or corner the pointer is resting against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeZone {
    #[default]
    None,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl EdgeZone {
    pub const ALL: [EdgeZone; 9] = [
        EdgeZone::None,
        EdgeZone::Top,
        EdgeZone::Bottom,
        EdgeZone::Left,
        EdgeZone::Right,
        EdgeZone::TopLeft,
        EdgeZone::TopRight,
        EdgeZone::BottomLeft,
        EdgeZone::BottomRight,
    ];

    /// Classify `pos` against the viewport. Corners win when two edge
    /// conditions hold at once.
    pub fn classify(pos: Vec2, viewport: Vec2, threshold: f32) -> Self {
        let top = pos.y <= threshold;
        let bottom = pos.y >= viewport.y - threshold;
        let left = pos.x <= threshold;
        let right = pos.x >= viewport.x - threshold;
        match (top, bottom, left, right) {
            (true, _, true, _) => EdgeZone::TopLeft,
            (true, _, _, true) => EdgeZone::TopRight,
            (_, true, true, _) => EdgeZone::BottomLeft,
            (_, true, _, true) => EdgeZone::BottomRight,
            (true, _, _, _) => EdgeZone::Top,
            (_, true, _, _) => EdgeZone::Bottom,
            (_, _, true, _) => EdgeZone::Left,
            (_, _, _, true) => EdgeZone::Right,
            _ => EdgeZone::None,
        }
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            EdgeZone::TopLeft | EdgeZone::TopRight | EdgeZone::BottomLeft | EdgeZone::BottomRight
        )
    }

    /// Screen-space angle (Y down) pointing away from the edge, into the page.
    pub fn inward_angle(self) -> Option<f32> {
        match self {
            EdgeZone::None => None,
            EdgeZone::Top => Some(FRAC_PI_2),
            EdgeZone::Bottom => Some(-FRAC_PI_2),
            EdgeZone::Left => Some(0.0),
            EdgeZone::Right => Some(PI),
            EdgeZone::TopLeft => Some(FRAC_PI_4),
            EdgeZone::TopRight => Some(PI - FRAC_PI_4),
            EdgeZone::BottomLeft => Some(-FRAC_PI_4),
            EdgeZone::BottomRight => Some(-PI + FRAC_PI_4),
        }
    }

    /// Angular width of the emission cone.
    pub fn spread(self) -> f32 {
        match self {
            EdgeZone::None => 0.0,
            z if z.is_corner() => CORNER_SPREAD,
            _ => EDGE_SPREAD,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorEvent {
    Moved,
    IdleElapsed { edge: EdgeZone },
}

/// Visual mode of the cursor decorations. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorMode {
    #[default]
    Active,
    Orbiting,
    Emitting(EdgeZone),
}

impl CursorMode {
    pub fn transition(self, event: CursorEvent) -> Self {
        match (self, event) {
            (_, CursorEvent::Moved) => CursorMode::Active,
            (CursorMode::Active, CursorEvent::IdleElapsed { edge: EdgeZone::None }) => {
                CursorMode::Orbiting
            }
            (CursorMode::Active, CursorEvent::IdleElapsed { edge }) => CursorMode::Emitting(edge),
            // already idle: stays put until the pointer moves again
            (idle, CursorEvent::IdleElapsed { .. }) => idle,
        }
    }

    pub fn is_idle(self) -> bool {
        !matches!(self, CursorMode::Active)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerRole {
    /// Owned by the idle orbit/emission routine; `slot` is its angular index.
    Idle { slot: usize },
    /// Spawned by fast movement; fades out over `TRAIL_LIFETIME_MS`.
    Trail { born_ms: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub pos: Vec2,
    pub opacity: f32,
    pub role: MarkerRole,
}

impl Marker {
    pub fn is_active(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Axis-aligned rectangle of an interactive element, in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagnetTarget {
    pub min: Vec2,
    pub max: Vec2,
}

impl MagnetTarget {
    pub fn from_rect(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(left + width, top + height),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Pull fraction for a pointer `distance` px away from a target center.
///
/// Zero outside `MAGNET_RADIUS_PX`, quadratic falloff inside, saturating at
/// `MAGNET_PULL` within `MAGNET_MIN_DISTANCE_PX`.
#[inline]
pub fn magnet_strength(distance: f32) -> f32 {
    if !(distance < MAGNET_RADIUS_PX) {
        return 0.0;
    }
    let d = distance.max(MAGNET_MIN_DISTANCE_PX);
    let falloff = (MAGNET_RADIUS_PX - d) / (MAGNET_RADIUS_PX - MAGNET_MIN_DISTANCE_PX);
    MAGNET_PULL * falloff * falloff
}

/// Point the cursor should follow once the nearest magnetic target in range
/// has pulled on the raw pointer.
pub fn magnetic_follow_point(pointer: Vec2, targets: &[MagnetTarget]) -> Vec2 {
    let nearest = targets
        .iter()
        .map(|t| {
            let c = t.center();
            (c, c.distance(pointer))
        })
        .filter(|(_, d)| *d < MAGNET_RADIUS_PX)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    match nearest {
        Some((center, dist)) => pointer + (center - pointer) * magnet_strength(dist),
        None => pointer,
    }
}

pub type Markers = SmallVec<[Marker; MARKER_CAPACITY]>;

pub struct CursorState {
    pub pointer: Vec2,
    pub eased: Vec2,
    pub trail: Vec2,
    pub hover: Option<usize>,
    pub mode: CursorMode,
    pub edge: EdgeZone,
    pub markers: Markers,
    viewport: Vec2,
    prev_pointer: Vec2,
    last_move_ms: f64,
    idle_since_ms: f64,
    idle_left_ms: f64,
    last_spawn_ms: f64,
    orbit_phase: f32,
    speed_px_s: f32,
}

impl CursorState {
    pub fn new(viewport: Vec2, now_ms: f64) -> Self {
        let center = viewport * 0.5;
        Self {
            pointer: center,
            eased: center,
            trail: center,
            hover: None,
            mode: CursorMode::Active,
            edge: EdgeZone::None,
            markers: SmallVec::new(),
            viewport,
            prev_pointer: center,
            last_move_ms: now_ms,
            idle_since_ms: now_ms,
            idle_left_ms: now_ms,
            last_spawn_ms: f64::NEG_INFINITY,
            orbit_phase: 0.0,
            speed_px_s: 0.0,
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        self.edge = EdgeZone::classify(self.pointer, viewport, EDGE_THRESHOLD_PX);
    }

    pub fn is_idle(&self) -> bool {
        self.mode.is_idle()
    }

    pub fn idle_duration_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.last_move_ms).max(0.0)
    }

    pub fn speed_px_s(&self) -> f32 {
        self.speed_px_s
    }

    pub fn on_pointer_move(&mut self, pos: Vec2, now_ms: f64) {
        self.pointer = pos;
        self.last_move_ms = now_ms;
        if self.mode.is_idle() {
            self.idle_left_ms = now_ms;
        }
        self.mode = self.mode.transition(CursorEvent::Moved);
        self.edge = EdgeZone::classify(pos, self.viewport, EDGE_THRESHOLD_PX);
    }

    /// Periodic idle poll. Returns `true` only on the tick that enters idle.
    pub fn check_idle(&mut self, now_ms: f64) -> bool {
        if self.mode.is_idle() || self.idle_duration_ms(now_ms) < IDLE_THRESHOLD_MS {
            return false;
        }
        self.mode = self
            .mode
            .transition(CursorEvent::IdleElapsed { edge: self.edge });
        self.idle_since_ms = now_ms;
        self.orbit_phase = 0.0;
        self.populate_idle_markers();
        true
    }

    /// Pointer position in \[-1, 1\] with +Y up.
    pub fn normalized(&self) -> Vec2 {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (self.pointer.x / self.viewport.x) * 2.0 - 1.0,
            -((self.pointer.y / self.viewport.y) * 2.0 - 1.0),
        )
    }

    /// Eased cursor position in \[0, 1\] with +Y down.
    pub fn position01(&self) -> Vec2 {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return Vec2::splat(0.5);
        }
        (self.eased / self.viewport).clamp(Vec2::ZERO, Vec2::ONE)
    }

    /// Advance one frame.
    pub fn step(&mut self, now_ms: f64, dt_sec: f32, targets: &[MagnetTarget]) {
        self.hover = targets.iter().position(|t| t.contains(self.pointer));

        let follow = magnetic_follow_point(self.pointer, targets);
        let rate = if self.hover.is_some() {
            CURSOR_EASE_HOVER
        } else {
            CURSOR_EASE
        };
        self.eased = approach_vec2(self.eased, follow, frame_alpha(rate, dt_sec));
        self.trail = approach_vec2(self.trail, self.pointer, frame_alpha(TRAIL_EASE, dt_sec));

        self.speed_px_s = if dt_sec > 0.0 {
            self.pointer.distance(self.prev_pointer) / dt_sec
        } else {
            0.0
        };
        self.prev_pointer = self.pointer;

        match self.mode {
            CursorMode::Orbiting => self.animate_orbit(now_ms, dt_sec),
            CursorMode::Emitting(zone) => self.animate_emission(zone, now_ms),
            CursorMode::Active => self.maybe_spawn_trail(now_ms),
        }
        self.fade_markers(now_ms);
    }

    fn populate_idle_markers(&mut self) {
        self.markers
            .retain(|m| !matches!(m.role, MarkerRole::Idle { .. }));
        for slot in 0..IDLE_MARKER_COUNT {
            if self.markers.len() >= MARKER_CAPACITY {
                self.evict_oldest_trail();
            }
            self.markers.push(Marker {
                pos: self.eased,
                opacity: 1.0,
                role: MarkerRole::Idle { slot },
            });
        }
    }

    fn animate_orbit(&mut self, now_ms: f64, dt_sec: f32) {
        let t = ((now_ms - self.idle_since_ms) / 1000.0) as f32;
        let speed = ORBIT_SPEED * (1.0 + ORBIT_WOBBLE * (t * ORBIT_WOBBLE_FREQ).sin());
        self.orbit_phase = (self.orbit_phase + speed * dt_sec).rem_euclid(TAU);
        let step = TAU / IDLE_MARKER_COUNT as f32;
        let (center, phase) = (self.eased, self.orbit_phase);
        for m in self.markers.iter_mut() {
            if let MarkerRole::Idle { slot } = m.role {
                let a = phase + slot as f32 * step;
                m.pos = center + Vec2::new(a.cos(), a.sin()) * ORBIT_RADIUS_PX;
                m.opacity = 1.0;
            }
        }
    }

    fn animate_emission(&mut self, zone: EdgeZone, now_ms: f64) {
        let Some(inward) = zone.inward_angle() else {
            return;
        };
        let t = ((now_ms - self.idle_since_ms) / 1000.0) as f32;
        let spread = zone.spread();
        let center = self.eased;
        for m in self.markers.iter_mut() {
            if let MarkerRole::Idle { slot } = m.role {
                let a = inward + spread * (emission_fraction(slot) - 0.5);
                let wave = 0.5 + 0.5 * (t * EMIT_PULSE_FREQ - slot as f32 * EMIT_PHASE_STEP).sin();
                let dist = EMIT_BASE_DISTANCE_PX + EMIT_PULSE_DISTANCE_PX * wave;
                m.pos = center + Vec2::new(a.cos(), a.sin()) * dist;
                m.opacity = EMIT_MIN_OPACITY + (1.0 - EMIT_MIN_OPACITY) * wave;
            }
        }
    }

    fn maybe_spawn_trail(&mut self, now_ms: f64) {
        if self.speed_px_s <= TRAIL_SPEED_THRESHOLD_PX_S
            || now_ms - self.last_spawn_ms < TRAIL_SPAWN_INTERVAL_MS
        {
            return;
        }
        self.last_spawn_ms = now_ms;
        // leftover idle markers leave one per spawned trail marker
        if let Some(i) = self
            .markers
            .iter()
            .position(|m| matches!(m.role, MarkerRole::Idle { .. }))
        {
            self.markers.remove(i);
        }
        if self.markers.len() >= MARKER_CAPACITY {
            self.evict_oldest_trail();
        }
        self.markers.push(Marker {
            pos: self.trail,
            opacity: 1.0,
            role: MarkerRole::Trail { born_ms: now_ms },
        });
    }

    /// Trail markers fade from their birth. Idle markers left behind once the
    /// pointer moves fade from the moment idle ended, so slow motion that
    /// never spawns a trail still clears them.
    fn fade_markers(&mut self, now_ms: f64) {
        let active = !self.mode.is_idle();
        let idle_left_ms = self.idle_left_ms;
        for m in self.markers.iter_mut() {
            let age = match m.role {
                MarkerRole::Trail { born_ms } => now_ms - born_ms,
                MarkerRole::Idle { .. } if active => now_ms - idle_left_ms,
                MarkerRole::Idle { .. } => continue,
            };
            m.opacity = (1.0 - age.max(0.0) / TRAIL_LIFETIME_MS).max(0.0) as f32;
        }
        self.markers.retain(|m| m.is_active());
    }

    fn evict_oldest_trail(&mut self) {
        if let Some(i) = self
            .markers
            .iter()
            .position(|m| matches!(m.role, MarkerRole::Trail { .. }))
        {
            self.markers.remove(i);
        }
    }
}

#[inline]
fn emission_fraction(slot: usize) -> f32 {
    if IDLE_MARKER_COUNT > 1 {
        slot as f32 / (IDLE_MARKER_COUNT - 1) as f32
    } else {
        0.5
    }
}
