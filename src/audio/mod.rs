pub mod capture;

pub use capture::{CaptureSink, SpeechCapture, StdinCapture};
