//! WebGL device binding.
//!
//! This crate provides a [luma-state] device for [WebGL] 2.0 rendering contexts, as exposed by
//! [web-sys].
//!
//! WebGL contexts can be lost at any time (GPU reset, too many contexts, etc.). The device notices
//! it, fails every call with [`WebGlError::ContextLost`](webgl2::WebGlError::ContextLost) and bumps
//! its context generation, so that states seeded before the loss are rebuilt rather than trusted.
//!
//! [luma-state]: https://crates.io/crates/luma-state
//! [WebGL]: https://www.khronos.org/webgl
//! [web-sys]: https://crates.io/crates/web-sys

pub mod webgl2;

pub use webgl2::{WebGL2, WebGlError};
