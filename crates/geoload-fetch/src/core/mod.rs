//! Pure transformations: URL rewriting and response decoding.

mod decode;
mod rewrite;

pub use decode::{Decode, DecodeFn, Json, RawBytes, decode_fn};
pub use rewrite::{is_remote, proxied_url};
