//! # FMP client
//!
//! Thin async client for the Financial Modeling Prep REST endpoints used by
//! the MCP tools. Every call is a single authenticated GET returning the raw
//! JSON body; shaping happens in `fmp-mcp-core`.
//!
//! ```rust,no_run
//! use fmp_client::{FmpClient, FmpResult};
//! use fmp_mcp_core::Symbol;
//!
//! # async fn example() -> FmpResult<()> {
//! let client = FmpClient::builder()
//!     .api_key("your-fmp-key")
//!     .build()?;
//!
//! let surprises = client
//!     .earnings()
//!     .surprises(&Symbol("AAPL".to_string()))
//!     .await?;
//! println!("{}", surprises);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use client::{FmpClient, FmpClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{FmpError, FmpResult};
