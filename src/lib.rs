pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod presentation;
pub mod selector;
pub mod types;

pub use catalog::Catalog;
pub use error::{PickerError, Result};
pub use selector::{PickerSession, PolicyKind, SelectionPolicy};
pub use types::{FilterKey, RestaurantRecord};
