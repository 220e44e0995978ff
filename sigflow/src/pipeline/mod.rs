//! Pipeline container and execution.
//!
//! A [`Pipeline`] owns an ordered sequence of stages and a named-property
//! side-table, and drives the stages synchronously over two reusable
//! scratch buffers.

mod executor;

use crate::errors::PipelineError;
use crate::events::{EventSink, NoOpEventSink};
use crate::properties::{PropertyBag, PropertyValue};
use crate::stages::Stage;
use std::fmt;
use std::sync::Arc;

/// An ordered chain of stages plus a named-property side-table.
///
/// Insertion order is execution order. Stage references are shared, so a
/// stage may outlive the pipeline, and the same instance may appear more
/// than once (callers are responsible for reentrancy in that case).
///
/// A pipeline is a single-owner object: mutation takes `&mut self` and is
/// not synchronised across threads. Execution is stateless between runs.
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
    properties: PropertyBag,
    events: Arc<dyn EventSink>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            properties: PropertyBag::new(),
            events: Arc::new(NoOpEventSink),
        }
    }

    /// Sets the event sink used by subsequent runs.
    pub fn set_event_sink(&mut self, sink: Arc<dyn EventSink>) {
        self.events = sink;
    }

    /// Builder-style variant of [`set_event_sink`](Self::set_event_sink).
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Appends a stage to the end of the pipeline.
    ///
    /// Shape compatibility with the previous stage is not checked here;
    /// every run validates the whole chain up front, so pipelines may be
    /// assembled in any order.
    pub fn add(&mut self, stage: Arc<dyn Stage>) {
        self.stages.push(stage);
    }

    /// Removes every stage. Properties are untouched.
    pub fn clear(&mut self) {
        self.stages.clear();
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the pipeline has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Returns the stage at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::StageIndexOutOfRange`] if
    /// `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<Arc<dyn Stage>, PipelineError> {
        self.stages
            .get(index)
            .cloned()
            .ok_or(PipelineError::StageIndexOutOfRange {
                index,
                len: self.stages.len(),
            })
    }

    /// Number of elements a run consumes: the first stage's input count,
    /// or 0 for an empty pipeline.
    #[must_use]
    pub fn input_count(&self) -> usize {
        self.stages.first().map_or(0, |stage| stage.input_count())
    }

    /// Number of elements a run produces: the last stage's output count,
    /// or 0 for an empty pipeline.
    #[must_use]
    pub fn output_count(&self) -> usize {
        self.stages.last().map_or(0, |stage| stage.output_count())
    }

    /// Stores a property under `name`, overwriting any prior value.
    pub fn set_property(&self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.set(name, value);
    }

    /// Returns the property stored under `name`, or `None` if it was never
    /// set.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.properties.get(name)
    }

    /// Bulk-stores properties, overwriting existing names.
    pub fn set_properties<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (String, PropertyValue)>,
    {
        self.properties.extend(entries);
    }

    /// The pipeline's property table, for typed retrieval.
    #[must_use]
    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "stages",
                &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("properties", &self.properties.len())
            .finish_non_exhaustive()
    }
}
