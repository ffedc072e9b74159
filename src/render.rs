//! Render composition and render-mode dispatch.
//!
//! This module defines the [`Render`] enum, which scene flows return each
//! frame to describe what they want drawn, and [`RenderMode`], the
//! fill/wireframe/point/both toggle consumed by the engine's draw dispatch.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the primary enum describing render operations
//! - [`Primitive<'a>`] is a single textured mesh to draw
//! - [`RenderMode`] selects which pipelines the dispatch runs

use crate::data_structures::mesh::GpuMesh;

/// How solids are rasterized.
///
/// `Both` draws filled triangles with the wireframe on top, the way the
/// original fixed-pipeline demos overlaid `GL_FILL` and `GL_LINE` passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Fill,
    Wireframe,
    Point,
    Both,
}

impl RenderMode {
    /// The next mode in the keypress cycle.
    pub fn cycle(self) -> Self {
        match self {
            RenderMode::Fill => RenderMode::Wireframe,
            RenderMode::Wireframe => RenderMode::Point,
            RenderMode::Point => RenderMode::Both,
            RenderMode::Both => RenderMode::Fill,
        }
    }
}

/// A single draw unit: an uploaded mesh and the texture to sample.
pub struct Primitive<'a> {
    pub mesh: &'a GpuMesh,
    pub texture: &'a wgpu::BindGroup,
}

/// Specifies what a scene flow wants rendered this frame.
///
/// # Variants
///
/// - `None` renders nothing
/// - `Solid(Primitive)` renders a single textured mesh
/// - `Solids(Vec<Primitive>)` renders a batch of textured meshes
/// - `Composed(Vec<Render>)` recursively renders a composition
pub enum Render<'a> {
    None,
    Solid(Primitive<'a>),
    Solids(Vec<Primitive<'a>>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    /// Flatten into the frame's draw list.
    pub(crate) fn collect(self, solids: &mut Vec<Primitive<'a>>) {
        match self {
            Render::Solid(primitive) => solids.push(primitive),
            Render::Solids(mut vec) => solids.append(&mut vec),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.collect(solids)),
            Render::None => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_mode_cycles_through_all_four_states() {
        let mut mode = RenderMode::Fill;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(mode);
            mode = mode.cycle();
        }
        assert_eq!(mode, RenderMode::Fill);
        assert_eq!(
            seen,
            vec![
                RenderMode::Fill,
                RenderMode::Wireframe,
                RenderMode::Point,
                RenderMode::Both
            ]
        );
    }
}
