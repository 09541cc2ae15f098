pub mod classifier;
pub mod dispatcher;
pub mod interpreters;
pub mod types;

pub use classifier::PrimaryClassifier;
pub use dispatcher::{CommandDispatcher, DispatchOutcome};
pub use types::{FilterOutcome, IntentCategory, Interpretation, Utterance};
