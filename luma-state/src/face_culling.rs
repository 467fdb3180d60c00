//! Face culling is the operation of removing triangles if they’re facing the screen in a specific
//! direction with a specific mode.
//!
//! [`FaceCullingOrder`] is a value of the `frontFace` parameter and [`FaceCullingMode`] a value of
//! `cullFaceMode`. [`FaceCulling`] gathers both, along with the `cullFace` switch, as overrides.

use crate::consts::{self, GLenum};
use crate::stack::Overrides;
use crate::value::Value;

/// Face culling setup.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FaceCulling {
  /// Face culling order.
  pub order: FaceCullingOrder,
  /// Face culling mode.
  pub mode: FaceCullingMode,
}

impl FaceCulling {
  /// Create a new [`FaceCulling`].
  pub fn new(order: FaceCullingOrder, mode: FaceCullingMode) -> Self {
    FaceCulling { order, mode }
  }

  /// Overrides enabling face culling with this setup.
  pub fn overrides(self) -> Overrides {
    Overrides::new()
      .set("cullFace", true)
      .set("frontFace", self.order)
      .set("cullFaceMode", self.mode)
  }
}

impl Default for FaceCulling {
  fn default() -> Self {
    FaceCulling::new(FaceCullingOrder::CCW, FaceCullingMode::Back)
  }
}

/// Face culling order.
///
/// The order determines how a triangle is determined to be discarded. If the triangle’s vertices
/// wind up in the same direction as the `FaceCullingOrder`, it’s assigned the front side,
/// otherwise, it’s the back side.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FaceCullingOrder {
  /// Clockwise order.
  CW,
  /// Counter-clockwise order.
  CCW,
}

impl FaceCullingOrder {
  pub fn to_glenum(self) -> GLenum {
    match self {
      FaceCullingOrder::CW => consts::CW,
      FaceCullingOrder::CCW => consts::CCW,
    }
  }
}

impl From<FaceCullingOrder> for Value {
  fn from(order: FaceCullingOrder) -> Self {
    order.to_glenum().into()
  }
}

/// Side to show and side to cull.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FaceCullingMode {
  /// Cull the front side only.
  Front,
  /// Cull the back side only.
  Back,
  /// Always cull any triangle.
  Both,
}

impl FaceCullingMode {
  pub fn to_glenum(self) -> GLenum {
    match self {
      FaceCullingMode::Front => consts::FRONT,
      FaceCullingMode::Back => consts::BACK,
      FaceCullingMode::Both => consts::FRONT_AND_BACK,
    }
  }
}

impl From<FaceCullingMode> for Value {
  fn from(mode: FaceCullingMode) -> Self {
    mode.to_glenum().into()
  }
}
