pub mod actuals;
pub mod coaching;
pub mod field_time;
pub mod regularity;
pub mod reporting;
pub mod targets;
