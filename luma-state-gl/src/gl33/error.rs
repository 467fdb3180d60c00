//! OpenGL errors.

use gl::types::GLenum;
use thiserror::Error;

/// An error raised by an OpenGL device.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum GlError {
  /// The device is unavailable.
  ///
  /// That might occur if you try to have more than one device on the same thread, for instance.
  #[error("unavailable OpenGL device")]
  UnavailableGlDevice,

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
  #[error("unknown OpenGL error {0:#06x}")]
  Unknown(GLenum),
}

impl GlError {
  /// Map a `glGetError` code; `None` for `GL_NO_ERROR`.
  pub fn from_code(code: GLenum) -> Option<Self> {
    match code {
      gl::NO_ERROR => None,
      gl::INVALID_ENUM => Some(GlError::InvalidEnum),
      gl::INVALID_VALUE => Some(GlError::InvalidValue),
      gl::INVALID_OPERATION => Some(GlError::InvalidOperation),
      gl::OUT_OF_MEMORY => Some(GlError::OutOfMemory),
      gl::INVALID_FRAMEBUFFER_OPERATION => Some(GlError::InvalidFramebufferOperation),
      _ => Some(GlError::Unknown(code)),
    }
  }
}
