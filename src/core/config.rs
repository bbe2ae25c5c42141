use super::mesh::PlaceholderKind;
use super::model::AssetRequest;

/// Runtime scene parameters. Pages can override any of them with `data-*`
/// attributes on the canvas element.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub model_path: String,
    pub fallback: PlaceholderKind,
    pub instance_count: usize,
    pub instance_radius: f32,
    pub model_scale: f32,
    pub particle_count: usize,
    pub line_count: usize,
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model_path: "models/lion.glb".to_string(),
            fallback: PlaceholderKind::Lion,
            instance_count: 8,
            instance_radius: 5.0,
            model_scale: 1.2,
            particle_count: 500,
            line_count: 40,
            seed: 42,
        }
    }
}

const MAX_INSTANCES: usize = 64;
const MAX_PARTICLES: usize = 20_000;
const MAX_LINES: usize = 1_000;

impl SceneConfig {
    /// Apply overrides from a `data-*` lookup (keys without the prefix, e.g.
    /// `"instances"`). Returns the keys whose values were rejected.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<&'static str> {
        let mut rejected = Vec::new();
        if let Some(v) = lookup("model") {
            let v = v.trim();
            if v.is_empty() {
                rejected.push("model");
            } else {
                self.model_path = v.to_string();
            }
        }
        if let Some(v) = lookup("fallback") {
            match v.parse() {
                Ok(kind) => self.fallback = kind,
                Err(_) => rejected.push("fallback"),
            }
        }
        parse_into(&lookup, "instances", &mut rejected, |n: usize| {
            (n <= MAX_INSTANCES).then(|| self.instance_count = n).is_some()
        });
        parse_into(&lookup, "instance-radius", &mut rejected, |r: f32| {
            (r.is_finite() && r > 0.0).then(|| self.instance_radius = r).is_some()
        });
        parse_into(&lookup, "model-scale", &mut rejected, |s: f32| {
            (s.is_finite() && s > 0.0).then(|| self.model_scale = s).is_some()
        });
        parse_into(&lookup, "particles", &mut rejected, |n: usize| {
            (n <= MAX_PARTICLES).then(|| self.particle_count = n).is_some()
        });
        parse_into(&lookup, "lines", &mut rejected, |n: usize| {
            (n <= MAX_LINES).then(|| self.line_count = n).is_some()
        });
        parse_into(&lookup, "seed", &mut rejected, |s: u64| {
            self.seed = s;
            true
        });
        rejected
    }

    pub fn model_request(&self) -> AssetRequest {
        AssetRequest {
            name: "model".to_string(),
            path: self.model_path.clone(),
            fallback: self.fallback,
        }
    }
}

fn parse_into<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    rejected: &mut Vec<&'static str>,
    mut accept: impl FnMut(T) -> bool,
) {
    if let Some(raw) = lookup(key) {
        let ok = raw.trim().parse::<T>().map(&mut accept).unwrap_or(false);
        if !ok {
            rejected.push(key);
        }
    }
}
