//! Asset byte readers.
//!
//! One reader per host: [`FileAssetReader`] reads from disk through tokio on
//! native targets, [`FetchAssetReader`] uses `window.fetch` on the web.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use crate::errors::Result;

/// Asynchronous source of raw asset bytes.
pub trait AssetReader {
    /// Reads the whole resource at `uri`, relative to the reader's root.
    fn read_bytes(&self, uri: &str) -> impl std::future::Future<Output = Result<Vec<u8>>>;
}

/// Local file reader.
///
/// Requires a tokio runtime on the calling thread.
#[cfg(not(target_arch = "wasm32"))]
pub struct FileAssetReader {
    root_path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileAssetReader {
    /// `path` is either the asset directory or a file within it.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let root_path = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root_path }
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl AssetReader for FileAssetReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        let path = self.root_path.join(uri);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(
                crate::errors::GiantError::AssetNotFound(path.display().to_string()),
            ),
            Err(err) => Err(err.into()),
        }
    }
}

/// `fetch`-based reader, resolving URIs against `base_url` (empty = page
/// relative).
#[cfg(target_arch = "wasm32")]
pub struct FetchAssetReader {
    base_url: String,
}

#[cfg(target_arch = "wasm32")]
impl FetchAssetReader {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn resolve(&self, uri: &str) -> String {
        if self.base_url.is_empty() || uri.starts_with("http://") || uri.starts_with("https://") {
            uri.to_string()
        } else {
            format!("{}/{}", self.base_url.trim_end_matches('/'), uri.trim_start_matches("./"))
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl AssetReader for FetchAssetReader {
    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        use crate::errors::GiantError;
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let url = self.resolve(uri);
        let window = web_sys::window().ok_or_else(|| GiantError::Wasm("no window".into()))?;

        let response = JsFuture::from(window.fetch_with_str(&url)).await?;
        let response: web_sys::Response = response.dyn_into()?;
        if !response.ok() {
            return Err(GiantError::HttpStatus {
                url,
                status: response.status(),
            });
        }

        let buffer = JsFuture::from(response.array_buffer()?).await?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}
