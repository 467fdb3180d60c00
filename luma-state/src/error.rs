//! Errors.

use crate::consts::GLenum;
use crate::device::DeviceId;
use std::error;
use thiserror::Error;

/// Errors about parameters and their values.
///
/// All of those are programming errors: they are raised before any device call is issued.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParamError {
  /// The parameter name is not registered.
  #[error("unknown state parameter {0}")]
  UnknownParameter(String),

  /// The native identifier doesn’t belong to any registered parameter.
  #[error("unknown native state parameter {0:#06x}")]
  UnknownNativeParameter(GLenum),

  /// The value doesn’t fit the parameter’s shape.
  #[error("invalid value for {name}: {reason}")]
  InvalidValue {
    /// Parameter name.
    name: &'static str,
    /// What went wrong.
    reason: String,
  },

  /// The device doesn’t implement that parameter.
  #[error("state parameter {0} is not supported by the device")]
  UnsupportedParameter(&'static str),
}

/// Errors raised while reading or changing the state of a device.
///
/// `E` is the device’s own error type.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StateError<E>
where
  E: error::Error + 'static,
{
  /// Invalid parameter or value.
  #[error(transparent)]
  Param(#[from] ParamError),

  /// A frame was popped while no override was pushed.
  #[error("override stack is empty")]
  EmptyStack,

  /// The device context was invalidated since the state was seeded.
  #[error("device context generation changed (seeded at {seeded}, now {current})")]
  StaleContext {
    /// Generation the state was seeded for.
    seeded: u64,
    /// Current generation of the device.
    current: u64,
  },

  /// The state belongs to another device.
  #[error("state belongs to device {expected:?}, not {found:?}")]
  ForeignDevice {
    /// Device the state was created for.
    expected: DeviceId,
    /// Device that was passed.
    found: DeviceId,
  },

  /// The device rejected a call or a query.
  #[error("device failure: {0}")]
  Device(#[source] E),
}
