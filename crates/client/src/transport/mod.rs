//! Transport layer for the FMP client.

pub mod http;

pub use http::HttpTransport;
