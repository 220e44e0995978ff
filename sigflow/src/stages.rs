//! Stage trait and adapters.
//!
//! Stages are the units of work in a sigflow pipeline: each declares a
//! fixed number of input and output elements and transforms one numeric
//! buffer into another.

use crate::errors::StageError;
use std::fmt::Debug;

/// Result type returned by stage execution.
pub type StageResult = Result<(), StageError>;

/// Trait for pipeline stages.
///
/// A stage reads exactly [`input_count`](Stage::input_count) elements and
/// writes exactly [`output_count`](Stage::output_count) elements per
/// invocation. The engine hands each invocation two distinct, exactly-sized
/// buffers, so implementations can rely on
/// `input.len() == self.input_count()` and
/// `output.len() == self.output_count()`, and an out-of-bounds access is an
/// immediate fault rather than corruption of a neighbouring stage's data.
pub trait Stage: Send + Sync + Debug {
    /// Returns the name of the stage.
    fn name(&self) -> &str;

    /// Number of elements the stage reads per invocation.
    fn input_count(&self) -> usize;

    /// Number of elements the stage writes per invocation.
    fn output_count(&self) -> usize;

    /// Executes the stage.
    ///
    /// # Arguments
    ///
    /// * `input` - Exactly `input_count()` elements
    /// * `output` - Exactly `output_count()` elements, never aliasing `input`
    ///
    /// # Errors
    ///
    /// A returned error aborts the whole pipeline run.
    fn execute(&self, input: &[f32], output: &mut [f32]) -> StageResult;
}

/// A closure-backed stage with explicit element counts.
pub struct FnStage<F>
where
    F: Fn(&[f32], &mut [f32]) -> StageResult + Send + Sync,
{
    name: String,
    input_count: usize,
    output_count: usize,
    func: F,
}

impl<F> FnStage<F>
where
    F: Fn(&[f32], &mut [f32]) -> StageResult + Send + Sync,
{
    /// Creates a new closure-backed stage.
    pub fn new(
        name: impl Into<String>,
        input_count: usize,
        output_count: usize,
        func: F,
    ) -> Self {
        Self {
            name: name.into(),
            input_count,
            output_count,
            func,
        }
    }
}

impl<F> Debug for FnStage<F>
where
    F: Fn(&[f32], &mut [f32]) -> StageResult + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStage")
            .field("name", &self.name)
            .field("input_count", &self.input_count)
            .field("output_count", &self.output_count)
            .finish()
    }
}

impl<F> Stage for FnStage<F>
where
    F: Fn(&[f32], &mut [f32]) -> StageResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn input_count(&self) -> usize {
        self.input_count
    }

    fn output_count(&self) -> usize {
        self.output_count
    }

    fn execute(&self, input: &[f32], output: &mut [f32]) -> StageResult {
        (self.func)(input, output)
    }
}

/// A fixed-width stage that copies its input to its output unchanged.
#[derive(Debug, Clone)]
pub struct PassthroughStage {
    name: String,
    width: usize,
}

impl PassthroughStage {
    /// Creates a new passthrough stage over `width` elements.
    #[must_use]
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

impl Stage for PassthroughStage {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_count(&self) -> usize {
        self.width
    }

    fn output_count(&self) -> usize {
        self.width
    }

    fn execute(&self, input: &[f32], output: &mut [f32]) -> StageResult {
        output.copy_from_slice(input);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fn_stage() {
        let stage = FnStage::new("negate", 2, 2, |input, output| {
            for (out, x) in output.iter_mut().zip(input) {
                *out = -x;
            }
            Ok(())
        });

        assert_eq!(stage.name(), "negate");
        assert_eq!(stage.input_count(), 2);
        assert_eq!(stage.output_count(), 2);

        let mut output = [0.0; 2];
        stage.execute(&[1.0, -3.0], &mut output).unwrap();
        assert_eq!(output, [-1.0, 3.0]);
    }

    #[test]
    fn test_fn_stage_failure() {
        let stage = FnStage::new("reject", 1, 1, |_input, _output| {
            Err(StageError::new("unsupported sample rate"))
        });

        let mut output = [0.0; 1];
        let err = stage.execute(&[0.0], &mut output).unwrap_err();
        assert_eq!(err.message(), "unsupported sample rate");
    }

    #[test]
    fn test_fn_stage_debug_omits_closure() {
        let stage = FnStage::new("noop", 0, 0, |_, _| Ok(()));
        let rendered = format!("{stage:?}");

        assert!(rendered.contains("noop"));
        assert!(rendered.contains("FnStage"));
    }

    #[test]
    fn test_passthrough_stage() {
        let stage = PassthroughStage::new("identity", 3);

        assert_eq!(stage.input_count(), 3);
        assert_eq!(stage.output_count(), 3);

        let mut output = [0.0; 3];
        stage.execute(&[0.5, 1.5, 2.5], &mut output).unwrap();
        assert_eq!(output, [0.5, 1.5, 2.5]);
    }
}
