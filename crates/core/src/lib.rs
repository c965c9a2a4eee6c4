// Core types and functionality for the FMP MCP server:
// tool request/response models, argument validation and response shaping

pub mod shaper;
pub mod types;
pub mod validation;
pub mod window;

pub use types::*;
pub use validation::{
    EarningsCalendarRequest, IndicatorRequest, InsiderTradingRequest, SymbolRequest,
    ValidationError,
};
pub use window::DateWindow;
