pub mod ambient;
pub mod camera;
pub mod camera_path;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod drive;
pub mod easing;
pub mod icons;
pub mod instances;
pub mod mesh;
pub mod model;
pub mod object;
pub mod scene;
pub mod scroll;

pub use camera::Camera;
pub use camera_path::{CameraPath, CameraSample, Viewpoint};
pub use config::SceneConfig;
pub use cursor::{CursorMode, CursorState, EdgeZone, MagnetTarget};
pub use drive::{resolve_drive, Drive, ScrollSignal, WheelTracker};
pub use icons::FeatureIcon;
pub use mesh::{MeshData, PlaceholderKind};
pub use model::{parse_glb, resolve_asset, AssetRequest, LoadError, ResolvedAsset};
pub use object::{Material, MeshId, ObjectSource, SceneObject, Transform};
pub use scene::{DrawItem, FrameInput, SceneState};
pub use scroll::{ScrollObservers, ScrollState};

// Shaders bundled as string constants
pub static BACKGROUND_WGSL: &str = include_str!("../../shaders/background.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../../shaders/particles.wgsl");
pub static MESH_WGSL: &str = include_str!("../../shaders/mesh.wgsl");
pub static LINES_WGSL: &str = include_str!("../../shaders/lines.wgsl");
