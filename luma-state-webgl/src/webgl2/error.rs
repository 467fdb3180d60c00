//! WebGL errors.

use luma_state::consts::{self, GLenum};
use thiserror::Error;

/// An error raised by a WebGL device.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum WebGlError {
  /// The rendering context is lost; nothing can be done until it’s restored.
  #[error("WebGL context lost")]
  ContextLost,

  #[error("invalid enum")]
  InvalidEnum,

  #[error("invalid value")]
  InvalidValue,

  #[error("invalid operation")]
  InvalidOperation,

  #[error("out of memory")]
  OutOfMemory,

  #[error("invalid framebuffer operation")]
  InvalidFramebufferOperation,

  /// An error code this crate doesn’t know about.
  #[error("unknown WebGL error {0:#06x}")]
  Unknown(GLenum),

  /// `getParameter` threw.
  #[error("cannot query WebGL parameter {pname:#06x}: {reason}")]
  QueryFailed { pname: GLenum, reason: String },

  /// `getParameter` returned something that doesn’t fit the parameter.
  #[error("unexpected value for WebGL parameter {pname:#06x}")]
  UnexpectedQueryType { pname: GLenum },
}

impl WebGlError {
  /// Map a `getError` code; `None` for `NO_ERROR`.
  pub fn from_code(code: GLenum) -> Option<Self> {
    match code {
      consts::NO_ERROR => None,
      consts::INVALID_ENUM => Some(WebGlError::InvalidEnum),
      consts::INVALID_VALUE => Some(WebGlError::InvalidValue),
      consts::INVALID_OPERATION => Some(WebGlError::InvalidOperation),
      consts::OUT_OF_MEMORY => Some(WebGlError::OutOfMemory),
      consts::INVALID_FRAMEBUFFER_OPERATION => Some(WebGlError::InvalidFramebufferOperation),
      consts::CONTEXT_LOST_WEBGL => Some(WebGlError::ContextLost),
      _ => Some(WebGlError::Unknown(code)),
    }
  }
}
