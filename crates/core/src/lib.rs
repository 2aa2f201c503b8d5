pub mod config;
pub mod domain;
pub mod errors;
pub mod rules;

pub use domain::customer::{BrowsingEvent, CustomerRecord, LastPurchase, Purchase};
pub use domain::profile::{CustomerProfile, LtvSegment, CAMPING_TENTS};
pub use errors::{ApplicationError, DecodeError};
pub use rules::batch::{generate_batch, BatchEntry, BatchReport};
pub use rules::{generate_profile, ProfileGenerator};
