//! Scoped overrides.
//!
//! An override frame remembers the values a batch of temporary changes replaced. Frames are stacked:
//! [`OverrideStack::push_values`] applies a batch and pushes the frame, [`OverrideStack::pop_values`]
//! pops the most recent frame and restores what it remembers, both on the device and in the
//! [store](crate::store).
//!
//! Pushing and popping by hand is not safe against failures of the code in between. Prefer
//! [`GlState::with_scope`](crate::state::GlState::with_scope), which always pops.

use crate::device::Device;
use crate::error::{ParamError, StateError};
use crate::store::StateStore;
use crate::value::Value;
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A batch of parameter changes, keyed by parameter name.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Overrides {
  values: BTreeMap<String, Value>,
}

impl Overrides {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add (or replace) a change.
  pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
    self.values.insert(name.into(), value.into());
    self
  }

  /// Merge another batch; its changes win.
  pub fn merge(mut self, other: Overrides) -> Self {
    self.values.extend(other.values);
    self
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.values.iter().map(|(k, v)| (k.as_str(), v))
  }
}

impl<K, V> FromIterator<(K, V)> for Overrides
where
  K: Into<String>,
  V: Into<Value>,
{
  fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
  {
    Overrides {
      values: iter
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect(),
    }
  }
}

// previous values, by registry index, in application order
#[derive(Clone, Debug)]
struct Frame {
  old_values: Vec<(usize, Value)>,
}

/// LIFO stack of override frames.
#[derive(Clone, Debug, Default)]
pub struct OverrideStack {
  frames: Vec<Frame>,
}

impl OverrideStack {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of frames currently pushed.
  pub fn depth(&self) -> usize {
    self.frames.len()
  }

  /// Drop every frame without restoring anything.
  pub(crate) fn clear(&mut self) {
    self.frames.clear();
  }

  /// Apply a batch of changes and push a frame remembering the replaced values.
  ///
  /// Every name and value is validated before the first device call: an invalid batch changes
  /// nothing. If the device rejects a call midway, the changes already applied are reverted and the
  /// device error is returned; no frame is pushed.
  pub fn push_values<D>(
    &mut self,
    store: &mut StateStore,
    device: &mut D,
    values: &Overrides,
  ) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    let changes = values
      .iter()
      .map(|(name, value)| store.prepare(device, name, value))
      .collect::<Result<Vec<_>, ParamError>>()?;

    let old_values: Vec<_> = changes
      .iter()
      .map(|(index, _)| (*index, store.value_at(*index).clone()))
      .collect();

    for (applied, (index, canonical)) in changes.iter().enumerate() {
      if let Err(e) = store.write(device, *index, canonical) {
        // the failing parameter may have been partially applied
        Self::revert(store, device, &old_values[..=applied]);
        return Err(e);
      }
    }

    self.frames.push(Frame { old_values });
    Ok(())
  }

  /// Pop the most recent frame and restore the values it remembers.
  ///
  /// Values are restored in reverse order. A restoration failure doesn’t stop the others from being
  /// attempted; the first failure is returned. The frame is consumed in every case.
  ///
  /// A parameter that cannot be restored keeps its overridden value, and that value is written
  /// again so that a half-restored composite doesn’t linger on the device.
  pub fn pop_values<D>(
    &mut self,
    store: &mut StateStore,
    device: &mut D,
  ) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    let frame = self.frames.pop().ok_or(StateError::EmptyStack)?;
    let mut first_err = None;

    for (index, old) in frame.old_values.iter().rev() {
      if let Err(e) = store.write(device, *index, old) {
        let name = StateStore::descriptor_at(*index).name;
        log::error!("cannot restore {}: {}", name, e);

        let current = store.value_at(*index).clone();
        if let Err(write_err) = store.force_write(device, *index, &current) {
          log::error!("cannot write {} back: {}", name, write_err);
        }

        first_err.get_or_insert(e);
      }
    }

    first_err.map_or(Ok(()), Err)
  }

  fn revert<D>(store: &mut StateStore, device: &mut D, old_values: &[(usize, Value)])
  where
    D: Device,
  {
    for (index, old) in old_values.iter().rev() {
      if let Err(e) = store.force_write(device, *index, old) {
        log::error!(
          "cannot revert {} after a failed push: {}",
          StateStore::descriptor_at(*index).name,
          e
        );
      }
    }
  }
}
