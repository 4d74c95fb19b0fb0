use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use futures::{stream, StreamExt};
use image::DynamicImage;
use log::{debug, info, warn};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error::ImageFetchError;
use crate::utilities::constants::USER_AGENT;

#[cfg(test)]
use mockall::automock;

/// Source of raw image bytes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageFetcher {
    async fn fetch(&self, uri: &str) -> Result<Vec<u8>, ImageFetchError>;
}

/// Plain GET against the image uri.
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    pub fn new(client: Client) -> Self {
        HttpImageFetcher { client }
    }

    fn setup_http_headers() -> HeaderMap {
        let mut header_map = HeaderMap::new();
        header_map.insert(reqwest::header::ACCEPT, HeaderValue::from_static("image/*"));
        header_map.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(USER_AGENT),
        );
        header_map
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, uri: &str) -> Result<Vec<u8>, ImageFetchError> {
        let url = Url::parse(uri).map_err(|e| ImageFetchError::InvalidUri {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ImageFetchError::InvalidUri {
                uri: uri.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        debug!("Fetching image: {}", uri);
        let network_error = |e: reqwest::Error| ImageFetchError::Network {
            uri: uri.to_string(),
            reason: e.to_string(),
        };
        let response = self
            .client
            .get(url)
            .headers(Self::setup_http_headers())
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(ImageFetchError::Status {
                uri: uri.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(network_error)?;
        Ok(bytes.to_vec())
    }
}

/// What the screen can draw for an image right now.
#[derive(Debug, Clone)]
pub enum ImageSlot {
    Ready(Arc<DynamicImage>),
    Loading,
    Missing,
}

type ImageResult = Result<Arc<DynamicImage>, ImageFetchError>;
type PendingImage = Shared<BoxFuture<'static, ImageResult>>;

#[derive(Default)]
struct CacheState {
    images: HashMap<String, Arc<DynamicImage>>,
    in_flight: HashMap<String, PendingImage>,
}

/// Decoded images keyed by uri. Never evicts.
///
/// Every uri has at most one fetch in flight; concurrent callers share it.
/// The fetch runs in its own task, which is the only writer of its cache entry,
/// so a caller giving up never cancels the download. Failures are returned to
/// all waiters and leave the uri uncached.
pub struct ImageCache<F> {
    fetcher: Arc<F>,
    state: Arc<Mutex<CacheState>>,
    timeout: Duration,
}

impl<F> Clone for ImageCache<F> {
    fn clone(&self) -> Self {
        ImageCache {
            fetcher: Arc::clone(&self.fetcher),
            state: Arc::clone(&self.state),
            timeout: self.timeout,
        }
    }
}

impl ImageCache<HttpImageFetcher> {
    pub fn with_http(client: Client, timeout: Duration) -> Self {
        ImageCache::new(Arc::new(HttpImageFetcher::new(client)), timeout)
    }
}

impl<F> ImageCache<F>
where
    F: ImageFetcher + Send + Sync + 'static,
{
    pub fn new(fetcher: Arc<F>, timeout: Duration) -> Self {
        ImageCache {
            fetcher,
            state: Arc::new(Mutex::new(CacheState::default())),
            timeout,
        }
    }

    pub async fn get(&self, uri: &str) -> ImageSlot {
        let state = self.state.lock().await;
        if let Some(image) = state.images.get(uri) {
            ImageSlot::Ready(Arc::clone(image))
        } else if state.in_flight.contains_key(uri) {
            ImageSlot::Loading
        } else {
            ImageSlot::Missing
        }
    }

    pub async fn contains(&self, uri: &str) -> bool {
        self.state.lock().await.images.contains_key(uri)
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.images.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Returns the cached image, or joins/starts the fetch for `uri`.
    pub async fn fetch(&self, uri: &str) -> ImageResult {
        let pending = {
            let mut state = self.state.lock().await;
            if let Some(image) = state.images.get(uri) {
                debug!("Returning cached image for: {}", uri);
                return Ok(Arc::clone(image));
            }
            match state.in_flight.get(uri) {
                Some(pending) => {
                    debug!("Joining in-flight fetch for: {}", uri);
                    pending.clone()
                }
                None => {
                    let pending = self.start_fetch(uri);
                    state.in_flight.insert(uri.to_string(), pending.clone());
                    pending
                }
            }
        };
        pending.await
    }

    /// Like [`ImageCache::fetch`], but the caller stops waiting once `cancel`
    /// fires. The shared fetch keeps running and still fills the cache.
    pub async fn fetch_with_cancel(&self, uri: &str, cancel: &CancellationToken) -> ImageResult {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Caller stopped waiting for: {}", uri);
                Err(ImageFetchError::Cancelled { uri: uri.to_string() })
            }
            result = self.fetch(uri) => result,
        }
    }

    /// Warms the cache for `uris` with at most `concurrency` fetches at once.
    /// Returns how many distinct uris are ready afterwards.
    pub async fn prefetch<I, S>(&self, uris: I, concurrency: usize) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let uris: Vec<String> = uris
            .into_iter()
            .map(|uri| uri.as_ref().to_string())
            .filter(|uri| seen.insert(uri.clone()))
            .collect();

        let results: Vec<ImageResult> = stream::iter(uris.iter())
            .map(|uri| self.fetch(uri))
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        let mut ready = 0;
        for result in results {
            match result {
                Ok(_) => ready += 1,
                Err(e) => warn!("Prefetch failed: {}", e),
            }
        }
        info!("Prefetched {} of {} images", ready, uris.len());
        ready
    }

    fn start_fetch(&self, uri: &str) -> PendingImage {
        let fetcher = Arc::clone(&self.fetcher);
        let state = Arc::clone(&self.state);
        let timeout = self.timeout;
        let task_uri = uri.to_string();

        let handle = tokio::spawn(async move {
            let result = AssertUnwindSafe(fetch_and_decode(fetcher.as_ref(), &task_uri, timeout))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| {
                    Err(ImageFetchError::Aborted {
                        uri: task_uri.clone(),
                        reason: panic_reason(panic.as_ref()),
                    })
                });

            let mut state = state.lock().await;
            state.in_flight.remove(&task_uri);
            match &result {
                Ok(image) => {
                    state.images.insert(task_uri.clone(), Arc::clone(image));
                }
                Err(e) => warn!("Failed to load image: {}", e),
            }
            result
        });

        let state = Arc::clone(&self.state);
        let uri = uri.to_string();
        async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    state.lock().await.in_flight.remove(&uri);
                    Err(ImageFetchError::Aborted {
                        uri,
                        reason: e.to_string(),
                    })
                }
            }
        }
        .boxed()
        .shared()
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("fetch panicked: {}", message)
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("fetch panicked: {}", message)
    } else {
        "fetch panicked".to_string()
    }
}

async fn fetch_and_decode<F>(fetcher: &F, uri: &str, timeout: Duration) -> ImageResult
where
    F: ImageFetcher + ?Sized,
{
    let bytes = match tokio::time::timeout(timeout, fetcher.fetch(uri)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(ImageFetchError::Timeout {
                uri: uri.to_string(),
                after: timeout,
            })
        }
    };

    let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .map_err(|e| ImageFetchError::Aborted {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;

    decoded
        .map(Arc::new)
        .map_err(|e| ImageFetchError::Decode {
            uri: uri.to_string(),
            reason: e.to_string(),
        })
}
