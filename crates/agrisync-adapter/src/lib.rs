/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public AgriSync adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod backend;
pub mod http;
pub mod types;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use backend::TaskBackend;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{BackendCall, BackendOp, MockTaskBackend};

// Re-export commonly used types from http
pub use http::{
    AgrisyncClient,
    AgrisyncError,
    ClientConfig,
    Credentials,
    DEFAULT_BASE_URL,
    Result,
    endpoints,
};

// Re-export all types
pub use types::*;
