pub mod config;
pub mod logging;

pub mod api;
pub mod inventory;
pub mod retry;
pub mod sweeper;
pub mod util;
