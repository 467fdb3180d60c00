//! Device binding interface.
//!
//! A device is whatever owns the native graphics context: an OpenGL context made current on a
//! thread, a WebGL rendering context, or a test double. This crate never owns devices; it only
//! mutates them through [`Device::invoke`] and reads them back through [`Device::query`], the
//! latter only when explicitly asked to.
//!
//! Implementors are provided by other crates, such as luma-state-gl and luma-state-webgl.

use crate::consts::{self, GLenum};
use crate::value::{ScalarType, Value};
use std::error;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a device.
///
/// Identifiers are unique for the lifetime of the process; use [`DeviceId::fresh`] to get one.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DeviceId(u64);

impl DeviceId {
  /// Allocate a new, never seen before, identifier.
  pub fn fresh() -> Self {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    DeviceId(NEXT.fetch_add(1, Ordering::Relaxed))
  }
}

/// Set of devices a parameter is available on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Availability {
  /// Every device.
  All,
  /// WebGL2 and OpenGL 3.x devices.
  Gl3,
  /// WebGL devices only.
  WebOnly,
}

/// Polygon side targeted by a front / back call.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Face {
  Front,
  Back,
}

impl Face {
  pub fn to_glenum(self) -> GLenum {
    match self {
      Face::Front => consts::FRONT,
      Face::Back => consts::BACK,
    }
  }
}

/// A native mutation, with its positional arguments.
///
/// Every variant maps to exactly one native entry point.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeCall {
  Enable(GLenum),
  Disable(GLenum),
  BlendColor([f32; 4]),
  BlendEquationSeparate {
    rgb: GLenum,
    alpha: GLenum,
  },
  BlendFuncSeparate {
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
  },
  ClearColor([f32; 4]),
  ClearDepth(f32),
  ClearStencil(i32),
  ColorMask([bool; 4]),
  CullFace(GLenum),
  DepthFunc(GLenum),
  DepthMask(bool),
  DepthRange(f32, f32),
  FrontFace(GLenum),
  Hint(GLenum, GLenum),
  LineWidth(f32),
  PixelStorei(GLenum, i32),
  PolygonOffset(f32, f32),
  SampleCoverage(f32, bool),
  Scissor([i32; 4]),
  Viewport([i32; 4]),
  StencilMaskSeparate(Face, u32),
  StencilFuncSeparate(Face, GLenum, i32, u32),
  StencilOpSeparate(Face, GLenum, GLenum, GLenum),
}

/// A native read.
///
/// `len` is the number of components the native identifier holds. A query with `len == 1` expects a
/// scalar [`Value`] back; any other length expects a [`Value::List`] of `len` scalars.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NativeQuery {
  pub pname: GLenum,
  pub ty: ScalarType,
  pub len: usize,
}

/// Device binding.
///
/// Implementations are expected to be cheap forwarders to the native API. They must report native
/// failures through [`Device::Err`] rather than swallowing them: the state layer propagates them
/// untouched.
pub trait Device {
  /// Error raised by native calls and queries.
  type Err: error::Error + 'static;

  /// Identity of the device.
  fn id(&self) -> DeviceId;

  /// Issue a native mutation.
  fn invoke(&mut self, call: &NativeCall) -> Result<(), Self::Err>;

  /// Read a native parameter back.
  ///
  /// This is a round-trip to the device and can be very slow.
  fn query(&mut self, query: &NativeQuery) -> Result<Value, Self::Err>;

  /// Monotonic counter, incremented every time the native context is invalidated (context loss,
  /// re-creation, etc.).
  fn context_generation(&self) -> u64;

  /// Whether the device implements parameters with the given availability.
  fn supports(&self, availability: Availability) -> bool {
    let _ = availability;
    true
  }
}
