pub mod advice;
pub mod assumptions;
pub mod catalog;
pub mod channel;
pub mod report;
pub mod state;
pub mod tracking;
