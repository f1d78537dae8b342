pub mod evaluator;
pub mod history;
pub mod metadata;
pub mod prices;
pub mod rate;
pub mod triangles;
pub mod types;

pub use evaluator::{evaluate_opportunities, evaluate_triangle};
pub use history::TradeHistory;
pub use metadata::{MetadataIndex, TRADING_STATUS};
pub use prices::PriceTable;
pub use rate::{rate, rate_for};
pub use triangles::{Triangle, build_triangles};
pub use types::{ScanReport, ScanSettings};
