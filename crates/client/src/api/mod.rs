//! FMP endpoint groups.

pub mod analysts;
pub mod earnings;
pub mod insiders;
pub mod technical;

pub use analysts::AnalystsApi;
pub use earnings::EarningsApi;
pub use insiders::InsidersApi;
pub use technical::TechnicalApi;
