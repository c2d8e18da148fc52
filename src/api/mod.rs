pub mod payload;

pub use payload::{parse_date, parse_time, require};
