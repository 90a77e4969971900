use crate::results::{ImageState, ImageStatus};
use crate::sources::WikiSource;
use futures::future::join_all;

/// Probe every image URL concurrently and classify it.
///
/// Advisory only: failures are logged and returned, never raised.
pub async fn check_all<S: WikiSource>(source: &S, urls: &[String]) -> Vec<ImageStatus> {
    if urls.is_empty() {
        return Vec::new();
    }

    let statuses = join_all(urls.iter().map(|url| check_one(source, url))).await;

    let failed = statuses.iter().filter(|status| !status.is_loaded()).count();
    for status in statuses.iter().filter(|status| !status.is_loaded()) {
        ::log::warn!("Image failed to load: {}", status.url);
    }
    ::log::debug!(
        "Checked {} images, {} failed",
        statuses.len(),
        failed
    );

    statuses
}

async fn check_one<S: WikiSource>(source: &S, url: &str) -> ImageStatus {
    let state = match source.probe(url).await {
        Ok(true) => ImageState::Loaded,
        Ok(false) => ImageState::Failed,
        Err(e) => {
            ::log::debug!("Probe error for {}: {}", url, e);
            ImageState::Failed
        }
    };
    ImageStatus::new(url.to_string(), state)
}
