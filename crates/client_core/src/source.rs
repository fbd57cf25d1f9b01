use async_trait::async_trait;
use shared::{domain::PageResult, error::FetchError};

/// Anything that can hand back one page of photos for a query.
///
/// Implementations issue at most one backend request per call and never
/// retry; retry policy belongs to the caller.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PageResult, FetchError>;
}

/// Stand-in used before a real backend is configured.
pub struct MissingPhotoSource;

#[async_trait]
impl PhotoSource for MissingPhotoSource {
    async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        _page_size: u32,
    ) -> Result<PageResult, FetchError> {
        Err(FetchError::unknown(format!(
            "no photo source configured (query '{query}', page {page})"
        )))
    }
}
