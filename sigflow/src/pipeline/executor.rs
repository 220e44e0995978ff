//! The buffer-swapping execution engine.
//!
//! A run acquires exactly two scratch buffers sized to the largest single
//! stage, seeds the first with the caller's input, and drives the stages in
//! order, swapping the two buffer handles after each stage so one stage's
//! output memory is the next stage's input memory.

use super::Pipeline;
use crate::errors::PipelineError;
use tracing::debug;
use uuid::Uuid;

impl Pipeline {
    /// Runs the pipeline over `input`, returning the produced elements.
    ///
    /// Convenience wrapper around
    /// [`execute_into`](Self::execute_into) that allocates the sink. An
    /// empty pipeline returns an empty vector.
    ///
    /// # Errors
    ///
    /// See [`execute_into`](Self::execute_into).
    pub fn execute(&self, input: &[f32]) -> Result<Vec<f32>, PipelineError> {
        let mut sink = vec![0.0; self.output_count()];
        let written = self.execute_into(input, &mut sink)?;
        sink.truncate(written);
        Ok(sink)
    }

    /// Runs the pipeline over `input`, writing the result into `sink`.
    ///
    /// Returns the number of elements written: the last stage's output
    /// count, or 0 for an empty pipeline, which invokes nothing and writes
    /// nothing.
    ///
    /// The run owns its two scratch buffers exclusively and releases them on
    /// every exit path; nothing besides them is mutated, so a failed run
    /// leaves no observably inconsistent state.
    ///
    /// # Errors
    ///
    /// * [`PipelineError::InputLengthMismatch`] if `input.len()` differs
    ///   from [`input_count`](Self::input_count)
    /// * [`PipelineError::SinkTooSmall`] if `sink` cannot hold
    ///   [`output_count`](Self::output_count) elements
    /// * [`PipelineError::ShapeMismatch`] if consecutive stages disagree on
    ///   the element count flowing between them
    /// * [`PipelineError::StageFailed`] if a stage returns an error; the
    ///   run aborts and later stages are not invoked
    pub fn execute_into(&self, input: &[f32], sink: &mut [f32]) -> Result<usize, PipelineError> {
        self.validate_run(input.len(), sink.len())?;

        let run_id = Uuid::new_v4();
        self.events.emit(
            "pipeline.started",
            Some(serde_json::json!({
                "run_id": run_id.to_string(),
                "stages": self.len(),
                "input_len": input.len(),
            })),
        );
        debug!(%run_id, stages = self.len(), "pipeline run started");

        if self.stages.is_empty() {
            self.events.emit(
                "pipeline.completed",
                Some(serde_json::json!({
                    "run_id": run_id.to_string(),
                    "output_len": 0,
                })),
            );
            return Ok(0);
        }

        // Two scratch buffers sized to the largest single-stage shape,
        // reused across the whole run. Swapping the owned handles makes
        // stage i's output memory stage i+1's input memory.
        let max_size = self.max_stage_size();
        let mut front = vec![0.0_f32; max_size];
        let mut back = vec![0.0_f32; max_size];
        front[..input.len()].copy_from_slice(input);

        for (index, stage) in self.stages.iter().enumerate() {
            let read = stage.input_count();
            let written = stage.output_count();
            stage
                .execute(&front[..read], &mut back[..written])
                .map_err(|source| {
                    self.events.emit(
                        "pipeline.failed",
                        Some(serde_json::json!({
                            "run_id": run_id.to_string(),
                            "stage": stage.name(),
                            "index": index,
                            "error": source.to_string(),
                        })),
                    );
                    PipelineError::StageFailed {
                        stage: stage.name().to_string(),
                        index,
                        source,
                    }
                })?;
            self.events.emit(
                "stage.completed",
                Some(serde_json::json!({
                    "run_id": run_id.to_string(),
                    "stage": stage.name(),
                    "index": index,
                })),
            );
            std::mem::swap(&mut front, &mut back);
        }

        // After the final swap the front buffer holds the last stage's
        // output in its valid prefix.
        let written = self.output_count();
        sink[..written].copy_from_slice(&front[..written]);
        self.events.emit(
            "pipeline.completed",
            Some(serde_json::json!({
                "run_id": run_id.to_string(),
                "output_len": written,
            })),
        );
        debug!(%run_id, output_len = written, "pipeline run completed");
        Ok(written)
    }

    fn validate_run(&self, input_len: usize, sink_len: usize) -> Result<(), PipelineError> {
        let expected = self.input_count();
        if input_len != expected {
            return Err(PipelineError::InputLengthMismatch {
                expected,
                actual: input_len,
            });
        }

        let required = self.output_count();
        if sink_len < required {
            return Err(PipelineError::SinkTooSmall {
                required,
                capacity: sink_len,
            });
        }

        for pair in self.stages.windows(2) {
            if pair[0].output_count() != pair[1].input_count() {
                return Err(PipelineError::ShapeMismatch {
                    upstream: pair[0].name().to_string(),
                    downstream: pair[1].name().to_string(),
                    produced: pair[0].output_count(),
                    consumed: pair[1].input_count(),
                });
            }
        }

        Ok(())
    }

    /// Largest input or output any single stage requires; 0 when empty.
    fn max_stage_size(&self) -> usize {
        self.stages
            .iter()
            .map(|stage| stage.input_count().max(stage.output_count()))
            .max()
            .unwrap_or(0)
    }
}
