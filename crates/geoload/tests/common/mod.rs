#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use geoload::{BlobCache, HttpClient, HttpResponse, ProxySettings, ResourceLoader};
use tempfile::TempDir;
use tiff::encoder::{TiffEncoder, colortype};

pub const LOCATOR: &str = "https://example.com/raster.tif";
pub const PROXIED: &str = "https://corsproxy.io/https://example.com/raster.tif";

#[derive(Debug)]
pub struct MockError(String);

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

impl std::error::Error for MockError {}

/// Routes by exact URL; anything unrouted fails like a refused connection.
/// Clones share the request log.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    routes:   HashMap<String, HttpResponse>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockHttpClient {
    pub fn route(mut self, url: &str, response: HttpResponse) -> Self {
        self.routes.insert(url.to_owned(), response);
        self
    }

    pub fn requests(&self) -> Vec<String> { self.requests.lock().unwrap().clone() }
}

impl HttpClient for MockHttpClient {
    type Error = MockError;

    async fn get(&self, url: &str) -> Result<HttpResponse, MockError> {
        // Suspend once like a real socket would, so joined loads interleave.
        tokio::task::yield_now().await;
        self.requests.lock().unwrap().push(url.to_owned());
        self.routes
            .get(url)
            .cloned()
            .ok_or_else(|| MockError(format!("connection refused: {url}")))
    }
}

/// A loader over `client` with a fresh cache in its own temp dir.
pub fn loader(client: MockHttpClient) -> (ResourceLoader<MockHttpClient>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let cache = BlobCache::new(dir.path().join("cache"));
    (ResourceLoader::new(client, ProxySettings::default(), cache), dir)
}

/// Write `bytes` to `name` under `root`, creating parent directories.
pub fn write_local(root: &std::path::Path, name: &str, bytes: &[u8]) {
    let path = root.join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

pub fn rgb_tiff() -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    TiffEncoder::new(&mut buf)
        .unwrap()
        .write_image::<colortype::RGB8>(4, 4, &[128u8; 48])
        .unwrap();
    buf.into_inner()
}

pub fn tiff_response(bytes: &[u8]) -> HttpResponse {
    HttpResponse::new(200, bytes.to_vec()).content_type("image/tiff")
}
