pub mod hive_log;
pub mod types;

pub use hive_log::HiveLog;
pub use types::{Attribute, Hive, HiveReading, LineParser, ParseOutcome, SensorRecord, SkipReason};
