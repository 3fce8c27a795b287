// Small shared helpers
pub mod time_utils;

pub use time_utils::{how_many_seconds_ago, local_now_as_timestamp_ms};
