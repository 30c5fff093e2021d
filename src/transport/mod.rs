//! HTTP collaborator used by the client
//!
//! The client never opens sockets itself; it hands URLs to a [`Transport`].
//! [`HttpTransport`] is the default, and tests or embedders can supply their
//! own implementation.

mod http;

pub use http::{HttpTransport, DEFAULT_TIMEOUT};

use crate::error::TransportError;
use async_trait::async_trait;

/// Response returned by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single GET request
///
/// Implementations must bound every call by a timeout and report
/// connection failures as errors, distinct from a successful but empty
/// response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a URL, returning the status and body
    async fn fetch(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn fetch(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).fetch(url).await
    }
}
