//! Scissor test and related types.
//!
//! The scissor test is a special test performed at rendering time. It allows to define a region of
//! the screen for which fragments will be discarded. The same rectangle type is used for the
//! viewport.

use crate::stack::Overrides;
use crate::value::Value;

/// A screen rectangle, used by the `scissorBox` and `viewport` parameters.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ScissorRegion {
  /// The x screen position of the region.
  pub x: u32,

  /// The y screen position of the region.
  pub y: u32,

  /// The screen width of the region.
  pub width: u32,

  /// The screen height of the region.
  pub height: u32,
}

impl ScissorRegion {
  pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
    ScissorRegion {
      x,
      y,
      width,
      height,
    }
  }

  /// Overrides enabling the scissor test on this region.
  pub fn overrides(self) -> Overrides {
    Overrides::new()
      .set("scissorTest", true)
      .set("scissorBox", self)
  }
}

impl From<ScissorRegion> for Value {
  fn from(region: ScissorRegion) -> Self {
    Value::from([region.x, region.y, region.width, region.height])
  }
}
