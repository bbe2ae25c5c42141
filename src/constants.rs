// Page selectors and browser-side tuning.
//
// The markup contract lives here so the DOM modules never hard-code
// selectors inline.
pub const CANVAS_ID: &str = "webgl-canvas";
pub const CURSOR_SELECTOR: &str = ".cursor";
pub const CURSOR_TRAIL_SELECTOR: &str = ".cursor-trail";
pub const PROGRESS_FILL_SELECTOR: &str = ".progress-fill";
pub const MAGNETIC_SELECTOR: &str =
    "a, button, .feature-card, .gallery-item, .nav-link, .form-input, [data-magnetic]";
pub const REVEAL_SELECTOR: &str = ".title-line, .fade-in";
pub const CARD_SELECTOR: &str = ".feature-card";
pub const COUNTER_SELECTOR: &str = ".stat-number[data-count]";
pub const ICON_SELECTOR: &str = ".icon-3d";

// Classes toggled on page elements
pub const HOVER_CLASS: &str = "hover";
pub const IDLE_CLASS: &str = "idle";
pub const VISIBLE_CLASS: &str = "visible";
pub const COUNTED_CLASS: &str = "counted";
pub const MARKER_CLASS: &str = "cursor-marker";

// Magnetic target rectangles move with scroll and layout; re-read them at
// most this often.
pub const MAGNET_REFRESH_MS: f64 = 250.0;

// Size of the pooled marker elements (px)
pub const MARKER_SIZE_PX: f32 = 6.0;

// Swapchain clear behind the background pass
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.05,
    a: 1.0,
};

// Icon canvases composite over their card
pub const ICON_CLEAR_COLOR: wgpu::Color = wgpu::Color::TRANSPARENT;
