//! Domain rows for FidcWatch.

pub mod covenant;
pub mod fund;
pub mod macro_series;

pub use covenant::{CovenantRecord, CovenantStatus};
pub use fund::{FundId, FundRecord};
pub use macro_series::MacroRecord;
