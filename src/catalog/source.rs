use crate::error::{PickerError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the raw catalog JSON comes from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human readable location, used in log lines and load errors
    fn describe(&self) -> String;

    /// Fetch the raw catalog document
    async fn fetch(&self) -> Result<String>;
}

/// Catalog stored on the local filesystem
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        debug!("Reading catalog file {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PickerError::load(self.describe(), e))
    }
}

/// Catalog served over HTTP(S)
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PickerError::load(self.describe(), e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PickerError::load(
                self.describe(),
                format!("server responded with status {}", status),
            ));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        debug!("Fetched catalog from {} ({})", self.url, content_type);

        resp.text()
            .await
            .map_err(|e| PickerError::load(self.describe(), e))
    }
}

pub fn is_remote_location(location: &str) -> bool {
    let lower = location.trim().to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Pick a source implementation from a path or URL
pub fn source_from_location(location: &str) -> Box<dyn CatalogSource> {
    if is_remote_location(location) {
        Box::new(HttpSource::new(location.trim()))
    } else {
        Box::new(FileSource::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response on a local port
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}/restaurants.json", addr)
    }

    fn local_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    #[tokio::test]
    async fn http_error_status_is_a_load_error() {
        let url = serve_once("404 Not Found", "").await;
        let source = HttpSource::with_client(url.clone(), local_client());

        let err = source.fetch().await.unwrap_err();
        assert!(err.is_load_error());
        assert!(err.to_string().contains(&url));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn http_success_returns_body() {
        let body = r#"[{"name": "Lotus", "cuisine": "Thai"}]"#;
        let url = serve_once("200 OK", body).await;
        let source = HttpSource::with_client(url, local_client());

        assert_eq!(source.fetch().await.unwrap(), body);
    }

    #[test]
    fn urls_are_remote() {
        assert!(is_remote_location("https://example.com/restaurants.json"));
        assert!(is_remote_location("HTTP://example.com/restaurants.json"));
        assert!(!is_remote_location("restaurants.json"));
        assert!(!is_remote_location("/srv/data/http/restaurants.json"));
    }

    #[test]
    fn location_picks_source_kind() {
        let remote = source_from_location("https://example.com/restaurants.json");
        assert_eq!(remote.describe(), "https://example.com/restaurants.json");

        let local = source_from_location("data/restaurants.json");
        assert_eq!(local.describe(), "data/restaurants.json");
    }

    #[tokio::test]
    async fn missing_file_is_a_load_error() {
        let source = FileSource::new("definitely/not/here/restaurants.json");
        let err = source.fetch().await.unwrap_err();
        assert!(err.is_load_error());
    }
}
