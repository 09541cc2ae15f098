pub mod gateway;
pub mod llm;
pub mod prompts;

pub use gateway::{ClassifierGateway, UNKNOWN};
