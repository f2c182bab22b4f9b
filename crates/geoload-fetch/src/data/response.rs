use bytes::Bytes;

use super::candidate::FetchCandidate;

/// A completed HTTP exchange as seen by decoders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status:       u16,
    pub content_type: Option<String>,
    pub body:         Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: None,
            body: body.into(),
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// 2xx statuses.
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// The decoded value of the winning candidate.
#[derive(Clone, Debug)]
pub struct Resolved<T> {
    pub value:          T,
    pub candidate:      FetchCandidate,
    pub status:         u16,
    pub content_type:   Option<String>,
    pub content_length: u64,
}

impl<T> Resolved<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value:          f(self.value),
            candidate:      self.candidate,
            status:         self.status,
            content_type:   self.content_type,
            content_length: self.content_length,
        }
    }
}
