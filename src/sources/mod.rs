//! External collaborators that supply inputs to the pipeline.

pub mod git;
