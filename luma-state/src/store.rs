//! State store.
//!
//! The store is the in-process mirror of a device’s pipeline state. It holds the last known canonical
//! value of every registered parameter so that reading the state never requires a device round-trip.
//!
//! The mirror stays correct as long as every change goes through [`StateStore::set`] (or the
//! [override stack](crate::stack) built on top of it). If foreign code mutated the device, use
//! [`StateStore::resynchronize`] or [`StateStore::resynchronize_natives`]. Both are slow.

use crate::config::StateConfig;
use crate::consts::GLenum;
use crate::device::Device;
use crate::error::{ParamError, StateError};
use crate::registry::{self, ParamDescriptor};
use crate::value::Value;

/// Cached values of every registered parameter, for a single device context.
#[derive(Clone, Debug)]
pub struct StateStore {
  // aligned with registry::parameters()
  values: Vec<Value>,
  drawing_buffer_size: Option<[i32; 2]>,
  skip_redundant_writes: bool,
}

impl StateStore {
  /// Create a store seeded with default values.
  pub fn new(config: &StateConfig) -> Self {
    let mut store = StateStore {
      values: Vec::new(),
      drawing_buffer_size: config.drawing_buffer_size,
      skip_redundant_writes: config.skip_redundant_writes,
    };

    store.initialize_defaults();
    store
  }

  /// Reset every parameter to its context-creation value.
  ///
  /// No device call is issued: the device is assumed to be freshly created.
  pub fn initialize_defaults(&mut self) {
    self.values = registry::parameters()
      .iter()
      .map(|desc| match (desc.name, self.drawing_buffer_size) {
        ("viewport", Some([w, h])) | ("scissorBox", Some([w, h])) => Value::from([0, 0, w, h]),
        _ => desc.default_value(),
      })
      .collect();
  }

  /// Read every supported parameter back from the device.
  ///
  /// This issues one query per native identifier and should only be used on rare occasions, such
  /// as adopting a context created by foreign code. Unsupported parameters keep their current
  /// value. The store is left untouched if any query fails.
  pub fn resynchronize<D>(&mut self, device: &mut D) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    log::debug!("resynchronizing state of device {:?}", device.id());

    let mut values = self.values.clone();

    for (desc, value) in registry::parameters().iter().zip(&mut values) {
      if device.supports(desc.availability) {
        *value = desc.query(device)?;
      }
    }

    self.values = values;
    Ok(())
  }

  /// Read back the parameters owning the given native identifiers.
  ///
  /// Composite parameters are always read back as a whole. Returns the names of the parameters that
  /// were refreshed. Fails with [`ParamError::UnknownNativeParameter`] before any query if one of
  /// the identifiers is not registered.
  pub fn resynchronize_natives<D>(
    &mut self,
    device: &mut D,
    natives: &[GLenum],
  ) -> Result<Vec<&'static str>, StateError<D::Err>>
  where
    D: Device,
  {
    let mut indices = Vec::new();

    for &native in natives {
      let index = registry::index_of(registry::reverse_lookup(native)?)?;

      if !indices.contains(&index) {
        indices.push(index);
      }
    }

    let parameters = registry::parameters();
    let mut refreshed = Vec::with_capacity(indices.len());

    for &index in &indices {
      let desc = &parameters[index];

      if !device.supports(desc.availability) {
        return Err(ParamError::UnsupportedParameter(desc.name).into());
      }

      refreshed.push((index, desc.query(device)?));
    }

    Ok(
      refreshed
        .into_iter()
        .map(|(index, value)| {
          self.values[index] = value;
          parameters[index].name
        })
        .collect(),
    )
  }

  /// Cached value of a parameter.
  pub fn get(&self, name: &str) -> Result<&Value, ParamError> {
    registry::index_of(name).map(|i| &self.values[i])
  }

  /// Iterate over every parameter and its cached value.
  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
    registry::parameters()
      .iter()
      .map(|desc| desc.name)
      .zip(&self.values)
  }

  /// Change a parameter, on the device and in the store.
  ///
  /// Returns the canonical value, so that callers can see how a shorthand was expanded.
  pub fn set<D>(
    &mut self,
    device: &mut D,
    name: &str,
    value: &Value,
  ) -> Result<Value, StateError<D::Err>>
  where
    D: Device,
  {
    let (index, canonical) = self.prepare(device, name, value)?;
    self.write(device, index, &canonical)?;
    Ok(canonical)
  }

  /// Validate a change without applying it.
  pub(crate) fn prepare<D>(
    &self,
    device: &D,
    name: &str,
    value: &Value,
  ) -> Result<(usize, Value), ParamError>
  where
    D: Device,
  {
    let index = registry::index_of(name)?;
    let desc = &registry::parameters()[index];

    if !device.supports(desc.availability) {
      return Err(ParamError::UnsupportedParameter(desc.name));
    }

    desc.normalize(value).map(|canonical| (index, canonical))
  }

  pub(crate) fn value_at(&self, index: usize) -> &Value {
    &self.values[index]
  }

  pub(crate) fn descriptor_at(index: usize) -> &'static ParamDescriptor {
    &registry::parameters()[index]
  }

  /// Apply an already canonical value.
  pub(crate) fn write<D>(
    &mut self,
    device: &mut D,
    index: usize,
    canonical: &Value,
  ) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    if self.skip_redundant_writes && self.values[index] == *canonical {
      return Ok(());
    }

    self.force_write(device, index, canonical)
  }

  /// Apply an already canonical value, even if the cache already holds it.
  ///
  /// Used to bring the device back in line after a parameter issuing several native calls failed
  /// halfway: the cache is then right but the device is not.
  pub(crate) fn force_write<D>(
    &mut self,
    device: &mut D,
    index: usize,
    canonical: &Value,
  ) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    Self::descriptor_at(index).apply(device, canonical)?;
    self.values[index] = canonical.clone();
    Ok(())
  }
}
