//! # Shadowed, scoped graphics pipeline state
//!
//! Graphics APIs such as OpenGL and WebGL expose their pipeline configuration (blending, depth
//! test, culling, stencil, pixel store modes, etc.) as global, mutable state attached to a context.
//! Reading that state back is slow, as it stalls the pipeline, and forgetting to restore what a
//! piece of rendering code changed leaks its configuration into whatever is rendered next.
//!
//! luma-state addresses both problems:
//!
//! - It keeps an in-process mirror of the device state: the [store](crate::store). Reading a
//!   parameter never hits the device.
//! - It provides scoped overrides: a batch of parameter changes is applied, some code runs, and the
//!   previous values are restored, whatever the way that code exits. See
//!   [`GlState::with_scope`](crate::state::GlState::with_scope).
//!
//! # Parameters
//!
//! Parameters are addressed by logical names, such as `"blendFunc"` or `"depthTest"`, described in
//! the [registry](crate::registry). A parameter backed by several native identifiers (the four
//! factors of the blending function, the front and back stencil functions, etc.) is a single unit:
//! it is always read, changed and restored as a whole.
//!
//! Values are loosely typed [`Value`](crate::value::Value)s. Composite values can be passed
//! positionally, as records of named fields or, for some parameters, in a shorthand form (`[src,
//! dst]` for the blending function, for instance). Typed helpers are provided in the
//! [blending](crate::blending), [depth_stencil](crate::depth_stencil),
//! [face_culling](crate::face_culling) and [scissor](crate::scissor) modules.
//!
//! # Devices
//!
//! luma-state doesn’t know how to talk to a graphics API. It talks to a [`Device`](crate::device::Device),
//! which turns [native calls](crate::device::NativeCall) into actual API calls. Devices are
//! provided by separate crates:
//!
//! - [luma-state-gl], for OpenGL 3.3 contexts.
//! - [luma-state-webgl], for WebGL2 rendering contexts.
//!
//! Every device has its own state. [`ContextStates`](crate::context::ContextStates) maps devices
//! to their states and rebuilds a state when its device context got lost and re-created.
//!
//! # Foreign code
//!
//! The mirror is only correct if every state change goes through this crate. If foreign code
//! changes the device state behind your back, resynchronize the affected parameters with
//! [`GlState::resynchronize`](crate::state::GlState::resynchronize) or
//! [`StateStore::resynchronize_natives`](crate::store::StateStore::resynchronize_natives).
//!
//! [luma-state-gl]: https://crates.io/crates/luma-state-gl
//! [luma-state-webgl]: https://crates.io/crates/luma-state-webgl

pub mod blending;
pub mod config;
pub mod consts;
pub mod context;
pub mod depth_stencil;
pub mod device;
pub mod error;
pub mod face_culling;
pub mod registry;
pub mod scissor;
pub mod stack;
pub mod state;
pub mod store;
pub mod value;

pub use crate::config::{Seed, StateConfig};
pub use crate::context::ContextStates;
pub use crate::device::{Device, DeviceId};
pub use crate::error::{ParamError, StateError};
pub use crate::stack::Overrides;
pub use crate::state::{GlState, Scope};
pub use crate::value::Value;
