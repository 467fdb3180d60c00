//! State configuration.

use serde_derive::{Deserialize, Serialize};

/// Where the initial shadow values come from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Seed {
  /// Assume the device is in its context-creation state. No device call is issued.
  Defaults,
  /// Read every parameter back from the device.
  ///
  /// Issues one query per native identifier: only use it when adopting a context that foreign code
  /// already altered.
  Readback,
}

impl Default for Seed {
  fn default() -> Self {
    Seed::Defaults
  }
}

/// Configuration of a [`GlState`](crate::state::GlState).
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StateConfig {
  pub seed: Seed,

  /// Size of the drawing buffer.
  ///
  /// Both the viewport and the scissor box start covering the whole drawing buffer. When seeding
  /// from defaults, they are set to `[0, 0, width, height]`; they are left to zero otherwise.
  pub drawing_buffer_size: Option<[i32; 2]>,

  /// Skip native calls when the new value is the one already cached.
  pub skip_redundant_writes: bool,
}

impl StateConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn seed(self, seed: Seed) -> Self {
    StateConfig { seed, ..self }
  }

  pub fn drawing_buffer_size(self, width: i32, height: i32) -> Self {
    StateConfig {
      drawing_buffer_size: Some([width, height]),
      ..self
    }
  }

  pub fn skip_redundant_writes(self, skip: bool) -> Self {
    StateConfig {
      skip_redundant_writes: skip,
      ..self
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserialize_partial() {
    let config: StateConfig =
      serde_json::from_str(r#"{ "seed": "readback", "drawing_buffer_size": [800, 600] }"#).unwrap();

    assert_eq!(
      config,
      StateConfig::new()
        .seed(Seed::Readback)
        .drawing_buffer_size(800, 600)
    );
  }

  #[test]
  fn deserialize_empty() {
    let config: StateConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, StateConfig::default());
  }
}
