//! solid-ngin
//!
//! A lightweight, cross-platform engine for rendering textured 3D primitives
//! (boxes, planes, pyramids, spheres) with a first-person camera. The crate
//! exposes a small surface for generating primitive meshes on the CPU,
//! uploading them to the GPU and rendering them in fill, wireframe or point
//! mode. The math underneath is hand-rolled and usable on its own.
//!
//! High-level modules
//! - `math`: vector/matrix value types, view and projection transforms
//! - `camera`: camera state machine, controller and uniforms
//! - `geometry`: CPU-side mesh buffers and the procedural solid generators
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: GPU meshes and textures
//! - `flow`: high level flow control (scenes / update loop)
//! - `pipelines`: render pipelines for the fill/wireframe/point modes
//! - `render`: render composition and render-mode dispatch
//! - `resources`: helpers to load textures from files
//!

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod geometry;
pub mod math;
pub mod pipelines;
pub mod render;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use math::{Matrix3, Matrix4, Vector3, Vector4};
pub use winit::dpi::PhysicalPosition;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
pub use wgpu::*;
