pub mod banner;
pub mod classifier;
pub mod config;
pub mod consts;
pub mod detect;
pub mod server;
