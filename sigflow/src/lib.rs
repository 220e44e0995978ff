//! # Sigflow
//!
//! A synchronous stage-pipeline execution engine for numeric signal
//! processing.
//!
//! Sigflow is the execution core of a larger signal-processing toolkit.
//! It provides:
//!
//! - **Stage-based execution**: Discrete processing stages with fixed
//!   input/output element counts, chained in append order
//! - **Allocation-free steady state**: One run acquires exactly two scratch
//!   buffers, regardless of how many stages execute
//! - **Property side-channel**: Named, dynamically-typed values attached to
//!   a pipeline for its owner and stages
//! - **Event-driven observability**: Per-run event emission for monitoring
//!
//! ## Quick Start
//!
//! ```
//! use sigflow::prelude::*;
//! use std::sync::Arc;
//!
//! let mut pipeline = Pipeline::new();
//! pipeline.add(Arc::new(FnStage::new("double", 3, 3, |input, output| {
//!     for (out, x) in output.iter_mut().zip(input) {
//!         *out = x * 2.0;
//!     }
//!     Ok(())
//! })));
//! pipeline.add(Arc::new(FnStage::new("sum", 3, 1, |input, output| {
//!     output[0] = input.iter().sum();
//!     Ok(())
//! })));
//!
//! let result = pipeline.execute(&[1.0, 2.0, 3.0])?;
//! assert_eq!(result, vec![12.0]);
//! # Ok::<(), sigflow::errors::PipelineError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod errors;
pub mod events;
pub mod observability;
pub mod pipeline;
pub mod properties;
pub mod registry;
pub mod stages;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::{PipelineError, PropertyError, StageError};
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::pipeline::Pipeline;
    pub use crate::properties::{PropertyBag, PropertyKind, PropertyValue};
    pub use crate::registry::{StageFactory, StageRegistry};
    pub use crate::stages::{FnStage, PassthroughStage, Stage, StageResult};
}
