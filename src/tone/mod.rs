//! The Tone Engine: emotion category in, click-free healing tone out.
//!
//! [`ToneEngine`] lives on the control side and talks to the audio thread's
//! [`ToneGraph`] only through a lock-free ring of [`ToneMessage`]s.

pub mod backend;
pub mod engine;
pub mod graph;
pub mod message;
pub mod scheduler;
pub mod synthesis;
pub mod voice;

pub use backend::{AudioBackend, AudioContext, CpalBackend, OfflineBackend, OfflineRenderer};
pub use engine::{ToneEngine, ToneSession};
pub use graph::ToneGraph;
pub use message::{SessionId, ToneMessage, Voicing};
