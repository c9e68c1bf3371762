//! Exchange-agnostic catalog types.

pub mod catalog;
pub mod category;
pub mod error;
pub mod id;

pub use catalog::{Catalog, ConstituentRecord, IndexBasket, IndexRecord};
pub use category::Category;
pub use error::DomainError;
pub use id::{IndexCode, Ticker, KNOWN_QUOTES};
