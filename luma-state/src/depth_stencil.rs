//! Depth and stencil test related types.
//!
//! [`Comparison`] is a value of `depthFunc`, [`StencilTest`] a (front and back) value of
//! `stencilFunc` and [`StencilOperations`] a (front and back) value of `stencilOp`.

use crate::consts::{self, GLenum};
use crate::value::Value;
use std::convert::TryFrom;

/// Comparison to perform for depth / stencil operations. `a` is the incoming fragment’s data and b is the fragment’s
/// data that is already stored.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Comparison {
  /// Test never succeeds.
  Never,
  /// Test always succeeds.
  Always,
  /// Test succeeds if `a == b`.
  Equal,
  /// Test succeeds if `a != b`.
  NotEqual,
  /// Test succeeds if `a < b`.
  Less,
  /// Test succeeds if `a <= b`.
  LessOrEqual,
  /// Test succeeds if `a > b`.
  Greater,
  /// Test succeeds if `a >= b`.
  GreaterOrEqual,
}

impl Comparison {
  pub fn to_glenum(self) -> GLenum {
    match self {
      Comparison::Never => consts::NEVER,
      Comparison::Always => consts::ALWAYS,
      Comparison::Equal => consts::EQUAL,
      Comparison::NotEqual => consts::NOTEQUAL,
      Comparison::Less => consts::LESS,
      Comparison::LessOrEqual => consts::LEQUAL,
      Comparison::Greater => consts::GREATER,
      Comparison::GreaterOrEqual => consts::GEQUAL,
    }
  }
}

impl TryFrom<GLenum> for Comparison {
  type Error = GLenum;

  fn try_from(e: GLenum) -> Result<Self, Self::Error> {
    match e {
      consts::NEVER => Ok(Comparison::Never),
      consts::ALWAYS => Ok(Comparison::Always),
      consts::EQUAL => Ok(Comparison::Equal),
      consts::NOTEQUAL => Ok(Comparison::NotEqual),
      consts::LESS => Ok(Comparison::Less),
      consts::LEQUAL => Ok(Comparison::LessOrEqual),
      consts::GREATER => Ok(Comparison::Greater),
      consts::GEQUAL => Ok(Comparison::GreaterOrEqual),
      _ => Err(e),
    }
  }
}

impl From<Comparison> for Value {
  fn from(c: Comparison) -> Self {
    c.to_glenum().into()
  }
}

/// Whether or not writes should be performed when rendering.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Write {
  /// Write values.
  On,
  /// Do not write values.
  Off,
}

impl From<Write> for Value {
  fn from(w: Write) -> Self {
    Value::Bool(w == Write::On)
  }
}

/// The stencil test is a bit weird. It’s a [`Comparison`] as well as the « stencil mask ».
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StencilTest {
  /// Comparison to apply to make a fragment pass the test.
  pub comparison: Comparison,

  /// Reference value for the comparison.
  pub reference: u8,

  /// The mask to apply on the fragment stencil value.
  pub mask: u8,
}

impl StencilTest {
  /// Create a new [`StencilTest`] from the comparison, reference and mask values.
  pub fn new(comparison: Comparison, reference: u8, mask: u8) -> Self {
    Self {
      comparison,
      reference,
      mask,
    }
  }
}

/// Same test for front and back faces.
impl From<StencilTest> for Value {
  fn from(test: StencilTest) -> Self {
    Value::List(vec![
      test.comparison.into(),
      test.reference.into(),
      test.mask.into(),
    ])
  }
}

/// The stencil operations are executed whenever a stencil test passes.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StencilOperations {
  /// Action to take when the depth test passes but not the stencil test.
  pub depth_passes_stencil_fails: StencilOp,

  /// Action to take when the stencil test passes but not the depth test.
  pub depth_fails_stencil_passes: StencilOp,

  /// Action to take when both the depth and stencil tests pass.
  pub depth_stencil_pass: StencilOp,
}

impl StencilOperations {
  /// Create [`Default`] [`StencilOperations`].
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the [`StencilOp`] to do when the depth test passes but stencil test fails:
  pub fn on_depth_passes_stencil_fails(self, op: StencilOp) -> Self {
    Self {
      depth_passes_stencil_fails: op,
      ..self
    }
  }

  /// Set the [`StencilOp`] to do when the depth test fails but stencil test passes:
  pub fn on_depth_fails_stencil_passes(self, op: StencilOp) -> Self {
    Self {
      depth_fails_stencil_passes: op,
      ..self
    }
  }

  /// Set the [`StencilOp`] to do when both the depth test and stencil test pass:
  pub fn on_depth_stencil_pass(self, op: StencilOp) -> Self {
    Self {
      depth_stencil_pass: op,
      ..self
    }
  }
}

/// Default implementation for [`StencilOperations`]:
///
/// - when depth test passes but stencil fail: [`StencilOp::Keep`].
/// - when depth test fails but stencil passes: [`StencilOp::Keep`].
/// - when both depth test and stencil test pass: [`StencilOp::Keep`].
impl Default for StencilOperations {
  fn default() -> Self {
    Self {
      depth_passes_stencil_fails: StencilOp::Keep,
      depth_fails_stencil_passes: StencilOp::Keep,
      depth_stencil_pass: StencilOp::Keep,
    }
  }
}

/// Same operations for front and back faces.
impl From<StencilOperations> for Value {
  fn from(ops: StencilOperations) -> Self {
    Value::List(vec![
      ops.depth_passes_stencil_fails.into(),
      ops.depth_fails_stencil_passes.into(),
      ops.depth_stencil_pass.into(),
    ])
  }
}

/// Possible stencil operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StencilOp {
  /// Keep the current value.
  Keep,

  /// Set the stencil value to zero.
  Zero,

  /// Replace the stencil value.
  Replace,

  /// Increment the stencil value.
  ///
  /// If the stencil value reaches the maximum possible value, it is clamped.
  Increment,

  /// Increment the stencil value.
  ///
  /// If the stencil value reaches the maximum possible value, it wraps around back to `0`.
  IncrementWrap,

  /// Decrement the stencil value.
  ///
  /// If the stencil value reaches 0, it is clamped.
  Decrement,

  /// Decrement the stencil value.
  ///
  /// If the stencil value reaches 0, it wraps back to the maximum value.
  DecrementWrap,

  /// Bit-wise inversion.
  Invert,
}

impl StencilOp {
  pub fn to_glenum(self) -> GLenum {
    match self {
      StencilOp::Keep => consts::KEEP,
      StencilOp::Zero => consts::ZERO,
      StencilOp::Replace => consts::REPLACE,
      StencilOp::Increment => consts::INCR,
      StencilOp::IncrementWrap => consts::INCR_WRAP,
      StencilOp::Decrement => consts::DECR,
      StencilOp::DecrementWrap => consts::DECR_WRAP,
      StencilOp::Invert => consts::INVERT,
    }
  }
}

impl From<StencilOp> for Value {
  fn from(op: StencilOp) -> Self {
    op.to_glenum().into()
  }
}
