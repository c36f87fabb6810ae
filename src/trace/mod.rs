pub mod logger;
pub mod subscriber;
#[allow(clippy::module_inception)]
pub mod trace;
