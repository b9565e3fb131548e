pub mod dashboard;
#[cfg(feature = "desktop")]
pub mod ipc;
pub mod state;
pub mod storage;
pub mod store;
pub mod validation;
