//! Emulated device.
//!
//! Models the native state as a map from native identifiers to values, records every call it
//! receives and can be told to reject calls.

#![allow(dead_code)]

use luma_state::consts::{self, GLenum};
use luma_state::device::{Availability, Device, DeviceId, Face, NativeCall, NativeQuery};
use luma_state::registry::{self, Shape};
use luma_state::value::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum EmulatedError {
  #[error("call rejected: {0:?}")]
  Rejected(NativeCall),
  #[error("unknown native parameter {0:#06x}")]
  UnknownQuery(GLenum),
}

pub struct EmulatedDevice {
  id: DeviceId,
  generation: u64,
  web: bool,
  gl3: bool,
  natives: HashMap<GLenum, Value>,
  calls: Vec<NativeCall>,
  queries: usize,
  reject: Option<Box<dyn Fn(&NativeCall) -> bool>>,
}

// lets `RUST_LOG=luma_state=trace cargo test` show native calls
fn init_logger() {
  let _ = env_logger::builder().is_test(true).try_init();
}

impl EmulatedDevice {
  /// A WebGL2-like device, fresh out of context creation.
  pub fn new() -> Self {
    init_logger();

    EmulatedDevice {
      id: DeviceId::fresh(),
      generation: 0,
      web: true,
      gl3: true,
      natives: default_natives(),
      calls: Vec::new(),
      queries: 0,
      reject: None,
    }
  }

  /// A desktop-like device, not supporting WebGL-only parameters.
  pub fn desktop() -> Self {
    EmulatedDevice {
      web: false,
      ..Self::new()
    }
  }

  /// A WebGL1-like device.
  pub fn webgl1() -> Self {
    EmulatedDevice {
      gl3: false,
      ..Self::new()
    }
  }

  pub fn calls(&self) -> &[NativeCall] {
    &self.calls
  }

  pub fn take_calls(&mut self) -> Vec<NativeCall> {
    std::mem::take(&mut self.calls)
  }

  pub fn queries(&self) -> usize {
    self.queries
  }

  pub fn native(&self, pname: GLenum) -> Option<&Value> {
    self.natives.get(&pname)
  }

  /// Change the native state behind the state’s back, as foreign code would.
  pub fn poke(&mut self, pname: GLenum, value: impl Into<Value>) {
    self.natives.insert(pname, value.into());
  }

  /// Reject every call matching the predicate.
  pub fn reject_when(&mut self, pred: impl Fn(&NativeCall) -> bool + 'static) {
    self.reject = Some(Box::new(pred));
  }

  pub fn accept_all(&mut self) {
    self.reject = None;
  }

  /// Simulate a context loss followed by a restoration.
  pub fn lose_context(&mut self) {
    self.generation += 1;
    self.natives = default_natives();
  }

  fn store(&mut self, pname: GLenum, value: impl Into<Value>) {
    self.natives.insert(pname, value.into());
  }

  fn store_face(&mut self, face: Face, front: GLenum, back: GLenum, value: impl Into<Value>) {
    match face {
      Face::Front => self.store(front, value),
      Face::Back => self.store(back, value),
    }
  }

  fn execute(&mut self, call: &NativeCall) {
    match *call {
      NativeCall::Enable(cap) => self.store(cap, true),
      NativeCall::Disable(cap) => self.store(cap, false),
      NativeCall::BlendColor(c) => self.store(consts::BLEND_COLOR, c),

      NativeCall::BlendEquationSeparate { rgb, alpha } => {
        self.store(consts::BLEND_EQUATION_RGB, rgb);
        self.store(consts::BLEND_EQUATION_ALPHA, alpha);
      }

      NativeCall::BlendFuncSeparate {
        src_rgb,
        dst_rgb,
        src_alpha,
        dst_alpha,
      } => {
        self.store(consts::BLEND_SRC_RGB, src_rgb);
        self.store(consts::BLEND_DST_RGB, dst_rgb);
        self.store(consts::BLEND_SRC_ALPHA, src_alpha);
        self.store(consts::BLEND_DST_ALPHA, dst_alpha);
      }

      NativeCall::ClearColor(c) => self.store(consts::COLOR_CLEAR_VALUE, c),
      NativeCall::ClearDepth(d) => self.store(consts::DEPTH_CLEAR_VALUE, d),
      NativeCall::ClearStencil(s) => self.store(consts::STENCIL_CLEAR_VALUE, s),
      NativeCall::ColorMask(m) => self.store(consts::COLOR_WRITEMASK, m),
      NativeCall::CullFace(mode) => self.store(consts::CULL_FACE_MODE, mode),
      NativeCall::DepthFunc(f) => self.store(consts::DEPTH_FUNC, f),
      NativeCall::DepthMask(m) => self.store(consts::DEPTH_WRITEMASK, m),
      NativeCall::DepthRange(near, far) => self.store(consts::DEPTH_RANGE, [near, far]),
      NativeCall::FrontFace(order) => self.store(consts::FRONT_FACE, order),
      NativeCall::Hint(target, mode) => self.store(target, mode),
      NativeCall::LineWidth(w) => self.store(consts::LINE_WIDTH, w),

      NativeCall::PixelStorei(pname, param) => match pname {
        consts::UNPACK_FLIP_Y_WEBGL | consts::UNPACK_PREMULTIPLY_ALPHA_WEBGL => {
          self.store(pname, param != 0)
        }
        _ => self.store(pname, param),
      },

      NativeCall::PolygonOffset(factor, units) => {
        self.store(consts::POLYGON_OFFSET_FACTOR, factor);
        self.store(consts::POLYGON_OFFSET_UNITS, units);
      }

      NativeCall::SampleCoverage(value, invert) => {
        self.store(consts::SAMPLE_COVERAGE_VALUE, value);
        self.store(consts::SAMPLE_COVERAGE_INVERT, invert);
      }

      NativeCall::Scissor(rect) => self.store(consts::SCISSOR_BOX, rect),
      NativeCall::Viewport(rect) => self.store(consts::VIEWPORT, rect),

      NativeCall::StencilMaskSeparate(face, mask) => self.store_face(
        face,
        consts::STENCIL_WRITEMASK,
        consts::STENCIL_BACK_WRITEMASK,
        mask,
      ),

      NativeCall::StencilFuncSeparate(face, func, reference, mask) => {
        self.store_face(face, consts::STENCIL_FUNC, consts::STENCIL_BACK_FUNC, func);
        self.store_face(face, consts::STENCIL_REF, consts::STENCIL_BACK_REF, reference);
        self.store_face(
          face,
          consts::STENCIL_VALUE_MASK,
          consts::STENCIL_BACK_VALUE_MASK,
          mask,
        );
      }

      NativeCall::StencilOpSeparate(face, sfail, dpfail, dppass) => {
        self.store_face(face, consts::STENCIL_FAIL, consts::STENCIL_BACK_FAIL, sfail);
        self.store_face(
          face,
          consts::STENCIL_PASS_DEPTH_FAIL,
          consts::STENCIL_BACK_PASS_DEPTH_FAIL,
          dpfail,
        );
        self.store_face(
          face,
          consts::STENCIL_PASS_DEPTH_PASS,
          consts::STENCIL_BACK_PASS_DEPTH_PASS,
          dppass,
        );
      }
    }
  }
}

impl Device for EmulatedDevice {
  type Err = EmulatedError;

  fn id(&self) -> DeviceId {
    self.id
  }

  fn invoke(&mut self, call: &NativeCall) -> Result<(), Self::Err> {
    if self.reject.as_ref().map_or(false, |pred| pred(call)) {
      return Err(EmulatedError::Rejected(call.clone()));
    }

    self.calls.push(call.clone());
    self.execute(call);
    Ok(())
  }

  fn query(&mut self, query: &NativeQuery) -> Result<Value, Self::Err> {
    self.queries += 1;
    self
      .natives
      .get(&query.pname)
      .cloned()
      .ok_or(EmulatedError::UnknownQuery(query.pname))
  }

  fn context_generation(&self) -> u64 {
    self.generation
  }

  fn supports(&self, availability: Availability) -> bool {
    match availability {
      Availability::All => true,
      Availability::Gl3 => self.gl3,
      Availability::WebOnly => self.web,
    }
  }
}

// native state right after context creation, as advertised by the registry
fn default_natives() -> HashMap<GLenum, Value> {
  let mut natives = HashMap::new();

  for desc in registry::parameters() {
    let default = desc.default_value();

    match desc.shape {
      Shape::Split(_) => {
        if let Value::List(components) = default {
          natives.extend(desc.native.iter().copied().zip(components));
        }
      }

      _ => {
        natives.insert(desc.native[0], default);
      }
    }
  }

  natives
}
