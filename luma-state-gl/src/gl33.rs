//! OpenGL 3.3 device.

mod error;

pub use self::error::GlError;

use gl::types::*;
use luma_state::device::{Availability, Device, DeviceId, NativeCall, NativeQuery};
use luma_state::value::{ScalarType, Value};
use std::cell::RefCell;
use std::marker::PhantomData;

// TLS synchronization barrier for `GL33`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

// upper bound on the flags drained at once
const MAX_PENDING_ERRORS: usize = 8;

/// The OpenGL 3.3 device.
///
/// Only one device can exist per thread at a time: OpenGL contexts are bound to threads and two
/// devices would mutate the same context behind each other’s back.
#[derive(Debug)]
pub struct GL33 {
  _a: PhantomData<*const ()>, // !Send and !Sync
  id: DeviceId,
  generation: u64,
}

impl GL33 {
  /// Create the device of the OpenGL context current on this thread.
  ///
  /// Fails with [`GlError::UnavailableGlDevice`] if a device already exists on this thread.
  pub fn new() -> Result<Self, GlError> {
    TLS_ACQUIRE_GFX_STATE.with(|rc| {
      let mut inner = rc.borrow_mut();

      match *inner {
        Some(_) => {
          inner.take();

          let device = GL33 {
            _a: PhantomData,
            id: DeviceId::fresh(),
            generation: 0,
          };

          log::debug!("acquired OpenGL device {:?}", device.id);
          Ok(device)
        }

        None => Err(GlError::UnavailableGlDevice),
      }
    })
  }

  /// Signal that the context was re-created by the windowing layer.
  ///
  /// States seeded before this call become stale.
  pub fn invalidate(&mut self) {
    self.generation += 1;
    log::debug!(
      "OpenGL device {:?} invalidated (generation {})",
      self.id,
      self.generation
    );
  }

  // flags raised by foreign code before our call must not be reported as ours
  fn discard_errors(&self) {
    if let Some(e) = take_errors(|| unsafe { gl::GetError() }) {
      log::debug!("discarding pending OpenGL error on {:?}: {}", self.id, e);
    }
  }

  fn check_error(&self) -> Result<(), GlError> {
    take_errors(|| unsafe { gl::GetError() }).map_or(Ok(()), Err)
  }
}

// glGetError reports one flag per call: drain them all and keep the first one
fn take_errors(mut get_error: impl FnMut() -> GLenum) -> Option<GlError> {
  let mut first = None;

  for _ in 0..MAX_PENDING_ERRORS {
    match GlError::from_code(get_error()) {
      Some(e) => {
        first.get_or_insert(e);
      }

      None => break,
    }
  }

  first
}

impl Drop for GL33 {
  fn drop(&mut self) {
    // the barrier may already be gone if the thread is shutting down
    let _ = TLS_ACQUIRE_GFX_STATE.try_with(|rc| *rc.borrow_mut() = Some(()));
  }
}

#[inline]
fn gl_bool(b: bool) -> GLboolean {
  if b {
    gl::TRUE
  } else {
    gl::FALSE
  }
}

impl Device for GL33 {
  type Err = GlError;

  fn id(&self) -> DeviceId {
    self.id
  }

  fn invoke(&mut self, call: &NativeCall) -> Result<(), Self::Err> {
    self.discard_errors();

    unsafe {
      match *call {
        NativeCall::Enable(cap) => gl::Enable(cap),
        NativeCall::Disable(cap) => gl::Disable(cap),
        NativeCall::BlendColor([r, g, b, a]) => gl::BlendColor(r, g, b, a),
        NativeCall::BlendEquationSeparate { rgb, alpha } => {
          gl::BlendEquationSeparate(rgb, alpha)
        }

        NativeCall::BlendFuncSeparate {
          src_rgb,
          dst_rgb,
          src_alpha,
          dst_alpha,
        } => gl::BlendFuncSeparate(src_rgb, dst_rgb, src_alpha, dst_alpha),

        NativeCall::ClearColor([r, g, b, a]) => gl::ClearColor(r, g, b, a),
        NativeCall::ClearDepth(depth) => gl::ClearDepth(depth as GLdouble),
        NativeCall::ClearStencil(s) => gl::ClearStencil(s),

        NativeCall::ColorMask([r, g, b, a]) => {
          gl::ColorMask(gl_bool(r), gl_bool(g), gl_bool(b), gl_bool(a))
        }

        NativeCall::CullFace(mode) => gl::CullFace(mode),
        NativeCall::DepthFunc(func) => gl::DepthFunc(func),
        NativeCall::DepthMask(flag) => gl::DepthMask(gl_bool(flag)),
        NativeCall::DepthRange(near, far) => gl::DepthRange(near as GLdouble, far as GLdouble),
        NativeCall::FrontFace(order) => gl::FrontFace(order),
        NativeCall::Hint(target, mode) => gl::Hint(target, mode),
        NativeCall::LineWidth(width) => gl::LineWidth(width),
        NativeCall::PixelStorei(pname, param) => gl::PixelStorei(pname, param),
        NativeCall::PolygonOffset(factor, units) => gl::PolygonOffset(factor, units),
        NativeCall::SampleCoverage(value, invert) => gl::SampleCoverage(value, gl_bool(invert)),
        NativeCall::Scissor([x, y, w, h]) => gl::Scissor(x, y, w, h),
        NativeCall::Viewport([x, y, w, h]) => gl::Viewport(x, y, w, h),

        NativeCall::StencilMaskSeparate(face, mask) => {
          gl::StencilMaskSeparate(face.to_glenum(), mask)
        }

        NativeCall::StencilFuncSeparate(face, func, reference, mask) => {
          gl::StencilFuncSeparate(face.to_glenum(), func, reference, mask)
        }

        NativeCall::StencilOpSeparate(face, sfail, dpfail, dppass) => {
          gl::StencilOpSeparate(face.to_glenum(), sfail, dpfail, dppass)
        }
      }
    }

    self.check_error()
  }

  fn query(&mut self, query: &NativeQuery) -> Result<Value, Self::Err> {
    let len = query.len.max(1);
    self.discard_errors();

    let mut values: Vec<Value> = unsafe {
      match query.ty {
        ScalarType::Bool => {
          let mut data = vec![gl::FALSE; len];
          gl::GetBooleanv(query.pname, data.as_mut_ptr());
          data.into_iter().map(|b| Value::Bool(b != gl::FALSE)).collect()
        }

        ScalarType::Float => {
          let mut data: Vec<GLfloat> = vec![0.; len];
          gl::GetFloatv(query.pname, data.as_mut_ptr());
          data.into_iter().map(Value::from).collect()
        }

        // unsigned masks come back signed; canonicalization reinterprets them
        ScalarType::Enum | ScalarType::Int | ScalarType::Uint => {
          let mut data: Vec<GLint> = vec![0; len];
          gl::GetIntegerv(query.pname, data.as_mut_ptr());
          data.into_iter().map(Value::from).collect()
        }
      }
    };

    self.check_error()?;

    if query.len == 1 {
      Ok(values.remove(0))
    } else {
      Ok(Value::List(values))
    }
  }

  fn context_generation(&self) -> u64 {
    self.generation
  }

  fn supports(&self, availability: Availability) -> bool {
    availability != Availability::WebOnly
  }
}
