//! Complaint report triage and emotion-aware chat replies, built on small
//! supervised text classifiers trained once at startup.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use triage::{EngineConfig, IntelEngine};
//!
//! let engine = IntelEngine::new(EngineConfig::default())?;
//!
//! let report = engine.classify_report("no water supply in our residential block for 3 days");
//! println!("{} / {}", report.category, report.severity);
//!
//! let chat = engine.respond_to_chat("thank you for the help i want to contribute");
//! println!("[{} {:.2}] {}", chat.emotion, chat.confidence, chat.reply);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! An engine never changes after it is built and can be shared across
//! threads using `Arc`:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use triage::{EngineConfig, IntelEngine};
//! use std::sync::Arc;
//! use std::thread;
//!
//! let engine = Arc::new(IntelEngine::new(EngineConfig::default())?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let engine = Arc::clone(&engine);
//!     handles.push(thread::spawn(move || {
//!         engine.respond_to_chat("just checking the status of my report");
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod config;
pub mod engine;
pub mod server;

pub use classifier::{
    ClassProbabilities, Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo,
    LabeledExample, TrainingSummary,
};
pub use config::{TrainingConfig, VectorizerConfig};
pub use engine::{
    ChatReply, ConfidenceGate, EngineConfig, EngineError, GateDecision, IntelEngine,
    ReplySource, ReportClassification, ResponseCatalog, ResponseSelector, SeededReplySource,
    ThreadRngSource,
};

/// Installs the `env_logger` backend at `info` unless `RUST_LOG` says
/// otherwise. Calling it again is a no-op.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
