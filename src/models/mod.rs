pub mod accumulator;
pub mod daily_log;
pub mod duty_status;
pub mod entry;
pub mod rule_set;
pub mod summary;
pub mod violation;
