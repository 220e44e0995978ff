//! Error types for the sigflow engine.

use crate::properties::PropertyKind;
use thiserror::Error;

/// The main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage index was out of range.
    #[error("stage index {index} out of range for pipeline of {len} stages")]
    StageIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of stages in the pipeline.
        len: usize,
    },

    /// The caller-supplied input does not match the pipeline's input count.
    #[error("input length mismatch: pipeline reads {expected} elements, got {actual}")]
    InputLengthMismatch {
        /// The pipeline's input count.
        expected: usize,
        /// The length of the supplied input.
        actual: usize,
    },

    /// The caller-supplied sink cannot hold the pipeline's output.
    #[error("output sink too small: {required} elements required, capacity is {capacity}")]
    SinkTooSmall {
        /// The pipeline's output count.
        required: usize,
        /// The capacity of the supplied sink.
        capacity: usize,
    },

    /// Two consecutive stages disagree on how many elements flow between
    /// them.
    #[error(
        "shape mismatch between '{upstream}' and '{downstream}': \
         {produced} elements produced, {consumed} consumed"
    )]
    ShapeMismatch {
        /// Name of the producing stage.
        upstream: String,
        /// Name of the consuming stage.
        downstream: String,
        /// Elements the upstream stage writes.
        produced: usize,
        /// Elements the downstream stage reads.
        consumed: usize,
    },

    /// A stage failed during execution, aborting the run.
    #[error("stage '{stage}' (index {index}) failed")]
    StageFailed {
        /// Name of the failing stage.
        stage: String,
        /// Position of the failing stage in the pipeline.
        index: usize,
        /// The stage's own error.
        #[source]
        source: StageError,
    },

    /// A property access failed.
    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Error returned by a stage implementation.
///
/// Stages report failures with a message and, optionally, an underlying
/// cause. The engine wraps this into [`PipelineError::StageFailed`] with
/// the stage's name and position.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StageError {
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StageError {
    /// Creates a new stage error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attaches an underlying cause.
    #[must_use]
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised by typed property retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property was never set.
    #[error("property '{name}' is not set")]
    Missing {
        /// The requested property name.
        name: String,
    },

    /// The property holds a value of a different kind than requested.
    #[error("property '{name}' holds a {actual} value, not {expected}")]
    WrongKind {
        /// The requested property name.
        name: String,
        /// The kind the caller asked for.
        expected: PropertyKind,
        /// The kind actually stored.
        actual: PropertyKind,
    },
}

impl PropertyError {
    /// Creates a missing-property error.
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    /// Creates a wrong-kind error.
    #[must_use]
    pub fn wrong_kind(
        name: impl Into<String>,
        expected: PropertyKind,
        actual: PropertyKind,
    ) -> Self {
        Self::WrongKind {
            name: name.into(),
            expected,
            actual,
        }
    }
}
