//! Several mappers applied one after another.
//!
//! Stage 0 sees the physical matrix. Each later stage treats the visible canvas
//! of the stage before it as its own "physical" matrix, so a pipeline of
//! `U-mapper` then `Rotate:90` rotates the folded display.

use crate::pixel_mapper::{Mapper, PixelMapper};
use crate::{Error, Result};

/// Most stages a [`Pipeline`] holds.
pub const MAX_PIPELINE: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Stage<M> {
    mapper: M,
    // Size this stage maps into.
    input: (u32, u32),
}

/// Configured mappers composed into one visible-to-physical transform.
///
/// An empty pipeline is the identity over the physical matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pipeline<M = Mapper> {
    matrix: (u32, u32),
    visible: (u32, u32),
    stages: heapless::Vec<Stage<M>, MAX_PIPELINE>,
}

impl<M: PixelMapper> Pipeline<M> {
    /// An empty pipeline over a `matrix_width` × `matrix_height` physical matrix.
    #[must_use]
    pub const fn new(matrix_width: u32, matrix_height: u32) -> Self {
        Self {
            matrix: (matrix_width, matrix_height),
            visible: (matrix_width, matrix_height),
            stages: heapless::Vec::new(),
        }
    }

    /// Append `mapper` after the existing stages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PipelineFull`] when there is no room, or whatever
    /// `mapper` reports when sized against the current visible canvas.
    pub fn push(&mut self, mapper: M) -> Result<()> {
        let input = self.visible;
        let visible = mapper.visible_size(input.0, input.1)?;
        self.stages
            .push(Stage { mapper, input })
            .map_err(|_| Error::PipelineFull { max: MAX_PIPELINE })?;
        info!(
            "pipeline stage {}: {}x{} -> {}x{}",
            self.stages.len(),
            input.0,
            input.1,
            visible.0,
            visible.1
        );
        self.visible = visible;
        Ok(())
    }

    /// Physical matrix size.
    #[must_use]
    pub const fn matrix_size(&self) -> (u32, u32) {
        self.matrix
    }

    /// Visible canvas size after the last stage.
    #[must_use]
    pub const fn visible_size(&self) -> (u32, u32) {
        self.visible
    }

    /// Number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// `true` when there are no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Names of the stages, first to last.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|stage| stage.mapper.name())
    }

    /// Physical `(x, y)` for the visible `(x, y)`, applying stages last to first.
    #[inline]
    #[must_use]
    pub fn to_physical(&self, x: u32, y: u32) -> (u32, u32) {
        self.stages.iter().rev().fold((x, y), |(x, y), stage| {
            stage.mapper.to_physical(stage.input.0, stage.input.1, x, y)
        })
    }

    // Input size of every stage for a matrix other than the one the pipeline was built for.
    fn stage_inputs(&self, matrix_width: u32, matrix_height: u32) -> Result<[(u32, u32); MAX_PIPELINE]> {
        let mut inputs = [(0, 0); MAX_PIPELINE];
        let mut size = (matrix_width, matrix_height);
        for (input, stage) in inputs.iter_mut().zip(&self.stages) {
            *input = size;
            size = stage.mapper.visible_size(size.0, size.1)?;
        }
        Ok(inputs)
    }
}

/// A pipeline is itself a mapper, so it can stand anywhere a single mapper can.
///
/// Called with the matrix it was built for, it uses the sizes worked out in
/// [`Pipeline::push`]; any other matrix is sized stage by stage on each call.
/// When some stage cannot size that matrix, `visible_size` returns its error and
/// `to_physical` hands the coordinate back unchanged.
impl<M: PixelMapper> PixelMapper for Pipeline<M> {
    fn name(&self) -> &'static str {
        "Pipeline"
    }

    fn visible_size(&self, matrix_width: u32, matrix_height: u32) -> Result<(u32, u32)> {
        if (matrix_width, matrix_height) == self.matrix {
            return Ok(self.visible);
        }
        self.stages
            .iter()
            .try_fold((matrix_width, matrix_height), |(width, height), stage| {
                stage.mapper.visible_size(width, height)
            })
    }

    fn to_physical(&self, matrix_width: u32, matrix_height: u32, x: u32, y: u32) -> (u32, u32) {
        if (matrix_width, matrix_height) == self.matrix {
            return self.stages.iter().rev().fold((x, y), |(x, y), stage| {
                stage.mapper.to_physical(stage.input.0, stage.input.1, x, y)
            });
        }
        let Ok(inputs) = self.stage_inputs(matrix_width, matrix_height) else {
            return (x, y);
        };
        self.stages
            .iter()
            .zip(inputs)
            .rev()
            .fold((x, y), |(x, y), (stage, (width, height))| {
                stage.mapper.to_physical(width, height, x, y)
            })
    }
}
