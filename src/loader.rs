//! Browser-side asset fetching. Parsing and placeholder fallback live in
//! `core::model`.

use crate::core::mesh::MeshData;
use crate::core::model::{parse_glb, resolve_asset, AssetRequest, LoadError, ResolvedAsset};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn fetch_error(path: &str, err: impl std::fmt::Debug) -> LoadError {
    LoadError::Fetch {
        path: path.to_string(),
        reason: format!("{err:?}"),
    }
}

pub async fn fetch_bytes(path: &str) -> Result<Vec<u8>, LoadError> {
    let window = web::window().ok_or_else(|| fetch_error(path, "no window"))?;
    let response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| fetch_error(path, e))?;
    let response: web::Response = response.dyn_into().map_err(|e| fetch_error(path, e))?;
    if !response.ok() {
        return Err(LoadError::Status {
            path: path.to_string(),
            status: response.status(),
        });
    }
    let buffer = JsFuture::from(response.array_buffer().map_err(|e| fetch_error(path, e))?)
        .await
        .map_err(|e| fetch_error(path, e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

pub async fn load_model(path: &str) -> Result<MeshData, LoadError> {
    let bytes = fetch_bytes(path).await?;
    log::info!("[loader] fetched {} ({} bytes)", path, bytes.len());
    parse_glb(&bytes)
}

/// Load every request in order. A failure only affects its own asset, which
/// falls back to its placeholder.
pub async fn load_assets(requests: &[AssetRequest]) -> Vec<ResolvedAsset> {
    let mut resolved = Vec::with_capacity(requests.len());
    for request in requests {
        let loaded = load_model(&request.path).await;
        resolved.push(resolve_asset(request, loaded));
    }
    resolved
}
