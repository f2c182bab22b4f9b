use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::data::HttpResponse;
use crate::error::DecodeError;

/// Turns a successful response into a typed value.
///
/// A decode failure makes the fetcher discard the candidate and move on, so
/// decoders should reject anything the caller cannot use.
pub trait Decode: Send + Sync {
    type Output: Send;

    fn decode(&self, response: &HttpResponse) -> Result<Self::Output, DecodeError>;
}

/// Takes the body as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawBytes;

impl Decode for RawBytes {
    type Output = Bytes;

    fn decode(&self, response: &HttpResponse) -> Result<Bytes, DecodeError> {
        Ok(response.body.clone())
    }
}

/// Parses the body as JSON into `T`.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T> Json<T> {
    pub fn new() -> Self { Self(PhantomData) }
}

impl<T> Default for Json<T> {
    fn default() -> Self { Self::new() }
}

impl<T> Decode for Json<T>
where
    T: DeserializeOwned + Send,
{
    type Output = T;

    fn decode(&self, response: &HttpResponse) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(&response.body)?)
    }
}

/// Adapter for closure decoders, see [`decode_fn`].
pub struct DecodeFn<F>(F);

/// Wrap a closure as a [`Decode`] implementation.
pub fn decode_fn<F, T>(f: F) -> DecodeFn<F>
where
    F: Fn(&HttpResponse) -> Result<T, DecodeError> + Send + Sync,
    T: Send,
{
    DecodeFn(f)
}

impl<F, T> Decode for DecodeFn<F>
where
    F: Fn(&HttpResponse) -> Result<T, DecodeError> + Send + Sync,
    T: Send,
{
    type Output = T;

    fn decode(&self, response: &HttpResponse) -> Result<T, DecodeError> { (self.0)(response) }
}
