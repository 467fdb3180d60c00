//! OpenGL device binding.
//!
//! This crate exports an [OpenGL](https://www.khronos.org/opengl/) [`Device`] for
//! [luma-state](https://crates.io/crates/luma-state). The device doesn’t create any context: it
//! expects the windowing layer (GLFW, glutin, SDL2, etc.) to have created an OpenGL 3.3 context,
//! made it current on the calling thread and loaded the [gl](https://crates.io/crates/gl) function
//! pointers.
//!
//! [`Device`]: luma_state::device::Device

pub mod gl33;

pub use gl33::{GlError, GL33};
