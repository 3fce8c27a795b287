// Domain types and value objects
pub mod catalog;
pub mod pair;
pub mod tier;

// Re-export commonly used types
pub use catalog::{PairCatalog, PairCategory};
pub use pair::PairSymbol;
pub use tier::Tier;
