use thiserror::Error;

/// Fatal feed errors. These are the only two ways a run can fail once flags
/// are validated: the network request, or the shape of the bytes it returned.
/// Everything downstream degrades to defaults instead of erroring.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network or transport failure, including the request timeout.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not well-formed XML.
    #[error("malformed feed: {0}")]
    Malformed(#[from] quick_xml::DeError),
}
