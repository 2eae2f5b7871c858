use alloc::string::String;

/// Failure reported by the image source for a single page request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceError {
    /// The remote answered with a non-success HTTP-style status.
    #[error("image source returned status {0}")]
    Status(u16),
    /// The request never completed (connection reset, DNS, timeout, ...).
    #[error("image source transport failed: {0}")]
    Transport(String),
    /// The response body could not be mapped to image records.
    #[error("malformed image source payload: {0}")]
    Payload(String),
}

/// Rejected [`crate::StripOptions`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("batch_size must be at least 1")]
    ZeroBatchSize,
    #[error("max_batches must be at least 1")]
    ZeroMaxBatches,
    #[error("initial_page must be at least 1")]
    ZeroInitialPage,
    #[error("prefetch_items must be at least 1")]
    ZeroPrefetchItems,
}
