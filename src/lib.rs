pub mod audio;
pub mod catalog;
pub mod config;
pub mod error;
pub mod intent;
pub mod kernel;
pub mod services;
pub mod store;

pub use intent::CommandDispatcher;
pub use kernel::ListeningLoop;
