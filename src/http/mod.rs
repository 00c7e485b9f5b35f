//! HTTP client module
//!
//! Provides the HTTP client used to reach the data-transport API.
//!
//! # Features
//!
//! - **Authentication Headers**: API key and bearer token on every request
//! - **Cancellation**: Requests race an [`AbortSignal`] and reject with `Aborted`
//! - **Error Mapping**: Network failures vs structured API errors

mod abort;
mod client;

pub use abort::{AbortController, AbortSignal};
pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, API_KEY_HEADER,
};
