use crate::{error::AcquireError, extract_palette, PaletteEntry, PixelGrid, DEFAULT_MAX_DIMENSION};
use image::DynamicImage;
use std::future::Future;

/// The proxy endpoint URLs are retried through after a failed direct load. The original URL is appended to it as-is.
pub const DEFAULT_PROXY_PREFIX: &str = "https://corsproxy.io/?";

/// Something that can download the raw bytes behind a URL.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, AcquireError>> + Send;
}

/// A [`Fetcher`] backed by an async `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

/// Where to get an image from: an already decoded image, or a URL to download one from. A decoded image takes
/// precedence when both are set.
#[derive(Debug, Clone, Default)]
pub struct ImageSource {
    url: Option<String>,
    image: Option<DynamicImage>,
}

/// How a failed direct load is retried: once, through a proxy that adds permissive cross-origin headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRetry {
    proxy_prefix: String,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AcquireError> {
        let fetch_error = |reason: String| AcquireError::Fetch {
            url: url.to_owned(),
            reason,
        };

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(format!("failed to read response body: {e}")))?;

        Ok(bytes.to_vec())
    }
}

impl ImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new().url(url)
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self::new().image(image)
    }

    pub fn url(self, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..self
        }
    }

    pub fn image(self, image: DynamicImage) -> Self {
        Self {
            image: Some(image),
            ..self
        }
    }

    pub fn is_missing(&self) -> bool {
        self.image.is_none() && self.url.as_deref().map_or(true, str::is_empty)
    }
}

impl ProxyRetry {
    pub fn new(proxy_prefix: impl Into<String>) -> Self {
        Self {
            proxy_prefix: proxy_prefix.into(),
        }
    }

    pub fn proxied(&self, url: &str) -> String {
        format!("{}{}", self.proxy_prefix, url)
    }
}

impl Default for ProxyRetry {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_PREFIX)
    }
}

/// Resolve an image source into a pixel grid whose longest side is at most `max_dimension` pixels.
///
/// Decoded images are converted directly. URLs are downloaded and decoded; if that fails for any reason the load is
/// retried exactly once through the proxy, and if the retry fails too the error carries both failure messages.
pub async fn acquire_grid<F>(
    source: ImageSource,
    fetcher: &F,
    retry: &ProxyRetry,
    max_dimension: u32,
) -> Result<PixelGrid, AcquireError>
where
    F: Fetcher,
{
    if source.is_missing() {
        return Err(AcquireError::SourceMissing);
    }

    let (url, image) = (source.url, source.image);
    if let Some(image) = image {
        return Ok(PixelGrid::from_image(&image, max_dimension));
    }

    let url = url.ok_or(AcquireError::SourceMissing)?;
    let direct = match load_grid(fetcher, &url, max_dimension).await {
        Ok(grid) => return Ok(grid),
        Err(e) => e,
    };

    let proxied = retry.proxied(&url);
    log::warn!("loading {url} failed ({direct}), retrying through {proxied}");

    load_grid(fetcher, &proxied, max_dimension)
        .await
        .map_err(|proxy| AcquireError::LoadFailure {
            reason: format!("{direct}; retry through proxy: {proxy}"),
            url,
        })
}

/// Resolve the source with the default proxy and size bound, then extract `k` dominant colors from it.
pub async fn extract_palette_from<F>(source: ImageSource, fetcher: &F, k: usize) -> Result<Vec<PaletteEntry>, AcquireError>
where
    F: Fetcher,
{
    let grid = acquire_grid(source, fetcher, &ProxyRetry::default(), DEFAULT_MAX_DIMENSION).await?;
    Ok(extract_palette(&grid, k))
}

async fn load_grid<F>(fetcher: &F, url: &str, max_dimension: u32) -> Result<PixelGrid, AcquireError>
where
    F: Fetcher,
{
    let bytes = fetcher.fetch(url).await?;

    PixelGrid::decode(&bytes, max_dimension).map_err(|e| AcquireError::Decode {
        url: url.to_owned(),
        reason: e.to_string(),
    })
}
