pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod logic;
pub mod network;
pub mod player;


pub use config::ClientConfig;
pub use error::ClientError;
