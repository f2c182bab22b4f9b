//! Immutable data types for failover fetching.

pub mod candidate;
pub mod response;
pub mod settings;

pub use candidate::{FetchCandidate, Origin};
pub use response::{HttpResponse, Resolved};
pub use settings::{DEFAULT_PROXY_URL, ProxySettings};
