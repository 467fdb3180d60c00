//! Blending equations and factors.
//!
//! Given two pixels *src* and *dst* – source and destination, we associate each pixel a blending
//! factor – respectively, *srcK* and *dstK*. *src* is the pixel being computed, and *dst* is the
//! pixel that is already stored in the framebuffer.
//!
//! Both types convert into [`Value`], so that they can be used with the `blendEquation` and
//! `blendFunc` parameters:
//!
//! ```
//! use luma_state::blending::Factor;
//! use luma_state::stack::Overrides;
//!
//! let overrides = Overrides::new()
//!   .set("blend", true)
//!   .set("blendFunc", [Factor::SrcAlpha, Factor::SrcAlphaComplement]);
//! ```
//!
//! A full `blendFunc` value lists its factors in `glBlendFuncSeparate` order: `[srcRgb, dstRgb,
//! srcAlpha, dstAlpha]`. Note that this is *not* `[srcRgb, srcAlpha, dstRgb, dstAlpha]`; use a
//! record (`{ "srcRgb": …, "srcAlpha": … }`) if in doubt. The `[src, dst]` shorthand applies to both
//! RGB and alpha.

use crate::consts::{self, GLenum};
use crate::value::Value;
use std::convert::TryFrom;

/// Blending equation. Used to state how blending factors and pixel data should be blended.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Equation {
  /// `blended = src * srcK + dst * dstK`
  Additive,
  /// `blended = src * srcK - dst * dstK`
  Subtract,
  /// `blended = dst * dstK - src * srcK`
  ReverseSubtract,
  /// `blended = min(src, dst)`
  Min,
  /// `blended = max(src, dst)`
  Max,
}

impl Equation {
  pub fn to_glenum(self) -> GLenum {
    match self {
      Equation::Additive => consts::FUNC_ADD,
      Equation::Subtract => consts::FUNC_SUBTRACT,
      Equation::ReverseSubtract => consts::FUNC_REVERSE_SUBTRACT,
      Equation::Min => consts::MIN,
      Equation::Max => consts::MAX,
    }
  }
}

impl TryFrom<GLenum> for Equation {
  type Error = GLenum;

  fn try_from(e: GLenum) -> Result<Self, Self::Error> {
    match e {
      consts::FUNC_ADD => Ok(Equation::Additive),
      consts::FUNC_SUBTRACT => Ok(Equation::Subtract),
      consts::FUNC_REVERSE_SUBTRACT => Ok(Equation::ReverseSubtract),
      consts::MIN => Ok(Equation::Min),
      consts::MAX => Ok(Equation::Max),
      _ => Err(e),
    }
  }
}

impl From<Equation> for Value {
  fn from(e: Equation) -> Self {
    e.to_glenum().into()
  }
}

/// Blending factors. Pixel data are multiplied by these factors to achieve several effects driven
/// by *blending equations*.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Factor {
  /// `1 * color = factor`
  One,
  /// `0 * color = 0`
  Zero,
  /// `src * color`
  SrcColor,
  /// `(1 - src) * color`
  SrcColorComplement,
  /// `dst * color`
  DestColor,
  /// `(1 - dst) * color`
  DestColorComplement,
  /// `srcA * color`
  SrcAlpha,
  /// `(1 - srcA) * color`
  SrcAlphaComplement,
  /// `dstA * color`
  DstAlpha,
  /// `(1 - dstA) * color`
  DstAlphaComplement,
  /// `min(srcA, 1 - dstA) * color`
  SrcAlphaSaturate,
  /// `blendColor * color`
  ConstantColor,
  /// `(1 - blendColor) * color`
  ConstantColorComplement,
  /// `blendColorA * color`
  ConstantAlpha,
  /// `(1 - blendColorA) * color`
  ConstantAlphaComplement,
}

impl Factor {
  pub fn to_glenum(self) -> GLenum {
    match self {
      Factor::One => consts::ONE,
      Factor::Zero => consts::ZERO,
      Factor::SrcColor => consts::SRC_COLOR,
      Factor::SrcColorComplement => consts::ONE_MINUS_SRC_COLOR,
      Factor::DestColor => consts::DST_COLOR,
      Factor::DestColorComplement => consts::ONE_MINUS_DST_COLOR,
      Factor::SrcAlpha => consts::SRC_ALPHA,
      Factor::SrcAlphaComplement => consts::ONE_MINUS_SRC_ALPHA,
      Factor::DstAlpha => consts::DST_ALPHA,
      Factor::DstAlphaComplement => consts::ONE_MINUS_DST_ALPHA,
      Factor::SrcAlphaSaturate => consts::SRC_ALPHA_SATURATE,
      Factor::ConstantColor => consts::CONSTANT_COLOR,
      Factor::ConstantColorComplement => consts::ONE_MINUS_CONSTANT_COLOR,
      Factor::ConstantAlpha => consts::CONSTANT_ALPHA,
      Factor::ConstantAlphaComplement => consts::ONE_MINUS_CONSTANT_ALPHA,
    }
  }
}

impl TryFrom<GLenum> for Factor {
  type Error = GLenum;

  fn try_from(factor: GLenum) -> Result<Self, Self::Error> {
    match factor {
      consts::ONE => Ok(Factor::One),
      consts::ZERO => Ok(Factor::Zero),
      consts::SRC_COLOR => Ok(Factor::SrcColor),
      consts::ONE_MINUS_SRC_COLOR => Ok(Factor::SrcColorComplement),
      consts::DST_COLOR => Ok(Factor::DestColor),
      consts::ONE_MINUS_DST_COLOR => Ok(Factor::DestColorComplement),
      consts::SRC_ALPHA => Ok(Factor::SrcAlpha),
      consts::ONE_MINUS_SRC_ALPHA => Ok(Factor::SrcAlphaComplement),
      consts::DST_ALPHA => Ok(Factor::DstAlpha),
      consts::ONE_MINUS_DST_ALPHA => Ok(Factor::DstAlphaComplement),
      consts::SRC_ALPHA_SATURATE => Ok(Factor::SrcAlphaSaturate),
      consts::CONSTANT_COLOR => Ok(Factor::ConstantColor),
      consts::ONE_MINUS_CONSTANT_COLOR => Ok(Factor::ConstantColorComplement),
      consts::CONSTANT_ALPHA => Ok(Factor::ConstantAlpha),
      consts::ONE_MINUS_CONSTANT_ALPHA => Ok(Factor::ConstantAlphaComplement),
      _ => Err(factor),
    }
  }
}

impl From<Factor> for Value {
  fn from(f: Factor) -> Self {
    f.to_glenum().into()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn factor_glenum_inverse() {
    let factors = [
      Factor::One,
      Factor::Zero,
      Factor::SrcColor,
      Factor::SrcColorComplement,
      Factor::DestColor,
      Factor::DestColorComplement,
      Factor::SrcAlpha,
      Factor::SrcAlphaComplement,
      Factor::DstAlpha,
      Factor::DstAlphaComplement,
      Factor::SrcAlphaSaturate,
      Factor::ConstantColor,
      Factor::ConstantColorComplement,
      Factor::ConstantAlpha,
      Factor::ConstantAlphaComplement,
    ];

    for f in factors {
      assert_eq!(Factor::try_from(f.to_glenum()), Ok(f));
    }
  }

  #[test]
  fn unknown_equation() {
    assert_eq!(Equation::try_from(consts::ONE), Err(consts::ONE));
  }
}
