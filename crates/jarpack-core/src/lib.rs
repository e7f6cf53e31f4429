pub mod config;
pub mod logging;

pub mod coordinate;
pub mod error;
pub mod fetch;
pub mod input;
pub mod pack;
pub mod pipeline;
pub mod stage;
