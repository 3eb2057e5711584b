//! Block-rendering building blocks shared by the tone voices.
//!
//! Graph nodes wrap the low-level DSP primitives with the context they need
//! to render a block: sample rate and (for pitched sources) a frequency.

/// Core traits shared by all graph nodes.
pub mod node;
/// Fixed-pitch sine sources.
pub mod oscillator;

pub use node::{GraphNode, RenderCtx};
pub use oscillator::OscNode;
