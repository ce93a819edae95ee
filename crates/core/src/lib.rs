#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod normalize;
pub mod time;

pub use error::Error;
pub use normalize::{answers_match, normalize, normalize_optional};
pub use time::Clock;
