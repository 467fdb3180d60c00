//! Per-device states.
//!
//! Several devices can live in the same process (several windows, several canvases, or a context
//! re-created after a loss). [`ContextStates`] maps each of them to its own [`GlState`], created on
//! first use and rebuilt when the device reports a new context generation.

use crate::config::StateConfig;
use crate::device::{Device, DeviceId};
use crate::error::StateError;
use crate::stack::Overrides;
use crate::state::{GlState, Scope};
use std::collections::hash_map::{Entry, HashMap};

/// States of every known device.
#[derive(Debug, Default)]
pub struct ContextStates {
  config: StateConfig,
  states: HashMap<DeviceId, GlState>,
}

impl ContextStates {
  /// New, empty map; states will be created with the given configuration.
  pub fn new(config: StateConfig) -> Self {
    ContextStates {
      config,
      states: HashMap::new(),
    }
  }

  pub fn config(&self) -> &StateConfig {
    &self.config
  }

  /// State of a device.
  ///
  /// The state is created if the device is not known yet. If the device context was invalidated
  /// since the state was created, the old state is torn down and a fresh one is seeded.
  pub fn state<D>(&mut self, device: &mut D) -> Result<&mut GlState, StateError<D::Err>>
  where
    D: Device,
  {
    let generation = device.context_generation();

    match self.states.entry(device.id()) {
      Entry::Occupied(mut entry) => {
        if entry.get().generation() != generation {
          log::warn!(
            "context of device {:?} changed (generation {} -> {}); rebuilding its state",
            entry.key(),
            entry.get().generation(),
            generation
          );

          entry.insert(GlState::new(device, self.config.clone())?);
        }

        Ok(entry.into_mut())
      }

      Entry::Vacant(entry) => {
        log::debug!("creating state of device {:?}", entry.key());
        Ok(entry.insert(GlState::new(device, self.config.clone())?))
      }
    }
  }

  /// Run `body` with overrides applied to a device; see [`GlState::with_scope`].
  pub fn with_scope<D, F, T, E>(
    &mut self,
    device: &mut D,
    values: &Overrides,
    body: F,
  ) -> Result<T, E>
  where
    D: Device,
    F: FnOnce(&mut Scope<'_, D>) -> Result<T, E>,
    E: From<StateError<D::Err>>,
  {
    self.state(device)?.with_scope(device, values, body)
  }

  /// State of a device, if already created.
  pub fn get(&self, id: DeviceId) -> Option<&GlState> {
    self.states.get(&id)
  }

  /// Drop the state of a destroyed device.
  pub fn forget(&mut self, id: DeviceId) -> Option<GlState> {
    self.states.remove(&id)
  }

  pub fn len(&self) -> usize {
    self.states.len()
  }

  pub fn is_empty(&self) -> bool {
    self.states.is_empty()
  }
}
