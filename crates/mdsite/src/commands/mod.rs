//! CLI command implementations.

mod build;
mod render;

pub(crate) use build::BuildArgs;
pub(crate) use render::RenderArgs;
