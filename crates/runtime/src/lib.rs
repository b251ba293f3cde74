pub mod export;
pub mod logging;
