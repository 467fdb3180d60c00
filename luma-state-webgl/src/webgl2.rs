//! WebGL 2.0 device.

mod error;
mod param;

pub use crate::webgl2::error::WebGlError;
use crate::webgl2::param::GetWebGLParam;
use luma_state::device::{Device, DeviceId, NativeCall, NativeQuery};
use luma_state::value::{ScalarType, Value};
use std::cell::Cell;
use web_sys::WebGl2RenderingContext;

/// The WebGL2 device.
#[derive(Debug)]
pub struct WebGL2 {
  ctx: WebGl2RenderingContext,
  id: DeviceId,
  generation: Cell<u64>,
  lost: Cell<bool>,
}

impl WebGL2 {
  pub fn new(ctx: WebGl2RenderingContext) -> Self {
    let device = WebGL2 {
      ctx,
      id: DeviceId::fresh(),
      generation: Cell::new(0),
      lost: Cell::new(false),
    };

    device.poll_context_loss();
    device
  }

  /// Underlying rendering context.
  pub fn context(&self) -> &WebGl2RenderingContext {
    &self.ctx
  }

  // a loss bumps the generation once; the restored context starts from defaults
  fn poll_context_loss(&self) -> bool {
    let lost = self.ctx.is_context_lost();

    if lost && !self.lost.get() {
      self.generation.set(self.generation.get() + 1);
      log::warn!(
        "WebGL context of device {:?} lost (generation {})",
        self.id,
        self.generation.get()
      );
    }

    self.lost.set(lost);
    lost
  }

  fn check_error(&self) -> Result<(), WebGlError> {
    match WebGlError::from_code(self.ctx.get_error()) {
      None => Ok(()),

      Some(WebGlError::ContextLost) => {
        self.poll_context_loss();
        Err(WebGlError::ContextLost)
      }

      Some(e) => Err(e),
    }
  }

  fn get<T>(&self, pname: u32) -> Result<T, WebGlError>
  where
    WebGl2RenderingContext: GetWebGLParam<T>,
  {
    self
      .ctx
      .get_webgl_param(pname)
      .map_err(|e| WebGlError::QueryFailed {
        pname,
        reason: format!("{:?}", e),
      })?
      .ok_or(WebGlError::UnexpectedQueryType { pname })
  }
}

impl Device for WebGL2 {
  type Err = WebGlError;

  fn id(&self) -> DeviceId {
    self.id
  }

  fn invoke(&mut self, call: &NativeCall) -> Result<(), Self::Err> {
    if self.poll_context_loss() {
      return Err(WebGlError::ContextLost);
    }

    let ctx = &self.ctx;

    match *call {
      NativeCall::Enable(cap) => ctx.enable(cap),
      NativeCall::Disable(cap) => ctx.disable(cap),
      NativeCall::BlendColor([r, g, b, a]) => ctx.blend_color(r, g, b, a),
      NativeCall::BlendEquationSeparate { rgb, alpha } => ctx.blend_equation_separate(rgb, alpha),

      NativeCall::BlendFuncSeparate {
        src_rgb,
        dst_rgb,
        src_alpha,
        dst_alpha,
      } => ctx.blend_func_separate(src_rgb, dst_rgb, src_alpha, dst_alpha),

      NativeCall::ClearColor([r, g, b, a]) => ctx.clear_color(r, g, b, a),
      NativeCall::ClearDepth(depth) => ctx.clear_depth(depth),
      NativeCall::ClearStencil(s) => ctx.clear_stencil(s),
      NativeCall::ColorMask([r, g, b, a]) => ctx.color_mask(r, g, b, a),
      NativeCall::CullFace(mode) => ctx.cull_face(mode),
      NativeCall::DepthFunc(func) => ctx.depth_func(func),
      NativeCall::DepthMask(flag) => ctx.depth_mask(flag),
      NativeCall::DepthRange(near, far) => ctx.depth_range(near, far),
      NativeCall::FrontFace(order) => ctx.front_face(order),
      NativeCall::Hint(target, mode) => ctx.hint(target, mode),
      NativeCall::LineWidth(width) => ctx.line_width(width),
      NativeCall::PixelStorei(pname, param) => ctx.pixel_storei(pname, param),
      NativeCall::PolygonOffset(factor, units) => ctx.polygon_offset(factor, units),
      NativeCall::SampleCoverage(value, invert) => ctx.sample_coverage(value, invert),
      NativeCall::Scissor([x, y, w, h]) => ctx.scissor(x, y, w, h),
      NativeCall::Viewport([x, y, w, h]) => ctx.viewport(x, y, w, h),

      NativeCall::StencilMaskSeparate(face, mask) => {
        ctx.stencil_mask_separate(face.to_glenum(), mask)
      }

      NativeCall::StencilFuncSeparate(face, func, reference, mask) => {
        ctx.stencil_func_separate(face.to_glenum(), func, reference, mask)
      }

      NativeCall::StencilOpSeparate(face, sfail, dpfail, dppass) => {
        ctx.stencil_op_separate(face.to_glenum(), sfail, dpfail, dppass)
      }
    }

    self.check_error()
  }

  fn query(&mut self, query: &NativeQuery) -> Result<Value, Self::Err> {
    if self.poll_context_loss() {
      return Err(WebGlError::ContextLost);
    }

    let pname = query.pname;

    let value = match (query.ty, query.len) {
      (ScalarType::Bool, 1) => Value::Bool(self.get(pname)?),
      (ScalarType::Float, 1) => Value::Float(self.get(pname)?),
      (_, 1) => Value::Int(self.get::<f64>(pname)? as i64),

      (ScalarType::Bool, len) => {
        let flags: Vec<bool> = self.get(pname)?;

        if flags.len() != len {
          return Err(WebGlError::UnexpectedQueryType { pname });
        }

        Value::List(flags.into_iter().map(Value::Bool).collect())
      }

      (ty, len) => {
        let numbers: Vec<f64> = self.get(pname)?;

        if numbers.len() != len {
          return Err(WebGlError::UnexpectedQueryType { pname });
        }

        Value::List(
          numbers
            .into_iter()
            .map(|x| match ty {
              ScalarType::Float => Value::Float(x),
              _ => Value::Int(x as i64),
            })
            .collect(),
        )
      }
    };

    self.check_error()?;
    Ok(value)
  }

  fn context_generation(&self) -> u64 {
    self.poll_context_loss();
    self.generation.get()
  }
}
