use alloc::vec::Vec;
use core::future::Future;

use filmstrip::{FetchRequest, ImageRecord, SourceError};

/// The remote image API, as seen by the strip.
///
/// `fetch_page(page, count)` resolves to the page's records in order, or an error carrying an
/// HTTP-style status or transport failure. It must not panic.
///
/// Any `Fn(u32, usize) -> impl Future<Output = Result<Vec<ImageRecord>, SourceError>>` is an
/// `ImageSource`.
pub trait ImageSource {
    fn fetch_page(
        &self,
        page: u32,
        count: usize,
    ) -> impl Future<Output = Result<Vec<ImageRecord>, SourceError>>;
}

impl<F, Fut> ImageSource for F
where
    F: Fn(u32, usize) -> Fut,
    Fut: Future<Output = Result<Vec<ImageRecord>, SourceError>>,
{
    fn fetch_page(
        &self,
        page: u32,
        count: usize,
    ) -> impl Future<Output = Result<Vec<ImageRecord>, SourceError>> {
        self(page, count)
    }
}

/// Runs `request` against `source`.
///
/// The returned pair goes straight into [`crate::Controller::on_fetch_complete`]. Requests for
/// different edges may be awaited concurrently; feed each back as it resolves.
pub async fn resolve<S: ImageSource>(
    source: &S,
    request: FetchRequest,
) -> (FetchRequest, Result<Vec<ImageRecord>, SourceError>) {
    let result = source.fetch_page(request.page, request.count).await;
    (request, result)
}

/// Maps an HTTP status to a [`SourceError`] unless it is a success (2xx).
pub fn check_status(status: u16) -> Result<(), SourceError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(SourceError::Status(status))
    }
}

#[cfg(feature = "json")]
pub use curated::{curated_url, decode_curated};

#[cfg(feature = "json")]
mod curated {
    use alloc::format;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use filmstrip::{ImageRecord, SourceError};

    #[derive(serde::Deserialize)]
    struct CuratedPage {
        photos: Vec<CuratedPhoto>,
    }

    #[derive(serde::Deserialize)]
    struct CuratedPhoto {
        id: PhotoId,
        src: PhotoSources,
    }

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum PhotoId {
        Number(u64),
        Text(String),
    }

    #[derive(serde::Deserialize)]
    struct PhotoSources {
        large: String,
    }

    /// URL of one page of a curated photo feed (`{base}/curated?page=..&per_page=..`).
    pub fn curated_url(base: &str, page: u32, count: usize) -> String {
        let base = base.trim_end_matches('/');
        format!("{base}/curated?page={page}&per_page={count}")
    }

    /// Decodes a curated photo feed body into records, in feed order.
    ///
    /// Numeric ids are stringified; each record's url is the photo's `src.large`.
    pub fn decode_curated(body: &str) -> Result<Vec<ImageRecord>, SourceError> {
        let page: CuratedPage =
            serde_json::from_str(body).map_err(|e| SourceError::Payload(e.to_string()))?;
        Ok(page
            .photos
            .into_iter()
            .map(|photo| {
                let id = match photo.id {
                    PhotoId::Number(n) => n.to_string(),
                    PhotoId::Text(s) => s,
                };
                ImageRecord {
                    id,
                    url: photo.src.large,
                }
            })
            .collect())
    }
}
