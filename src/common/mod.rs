pub mod banner;
pub mod logger;
pub mod targets;
pub mod utils;
