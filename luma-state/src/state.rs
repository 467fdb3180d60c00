//! Shadowed graphics state of a device.
//!
//! [`GlState`] gathers a [`StateStore`] and an [`OverrideStack`] for a single device context. It is
//! the entry point for render-loop code, which only ever needs two things:
//!
//! - [`GlState::with_scope`], to change parameters for the duration of a closure.
//! - [`GlState::get`], to read a parameter without touching the device.
//!
//! ```ignore
//! use luma_state::blending::Factor;
//! use luma_state::stack::Overrides;
//!
//! let overrides = Overrides::new()
//!   .set("blend", true)
//!   .set("blendFunc", [Factor::SrcAlpha, Factor::SrcAlphaComplement]);
//!
//! state.with_scope(&mut device, &overrides, |device| {
//!   // draw transparent things with `device`
//!   Ok::<_, MyError>(())
//! })?;
//! ```
//!
//! A [`GlState`] is tied to the device it was created for and to the context generation it was
//! seeded at. Using it with another device, or after the device context got invalidated, fails
//! instead of silently desynchronizing the shadow from the device; see
//! [`ContextStates`](crate::context::ContextStates) for automatic rebuilding.

use crate::config::{Seed, StateConfig};
use crate::consts::GLenum;
use crate::device::{Device, DeviceId};
use crate::error::{ParamError, StateError};
use crate::registry;
use crate::stack::{OverrideStack, Overrides};
use crate::store::StateStore;
use crate::value::Value;
use std::ops::{Deref, DerefMut};

/// Shadowed state of a device context.
#[derive(Debug)]
pub struct GlState {
  device: DeviceId,
  generation: u64,
  config: StateConfig,
  store: StateStore,
  stack: OverrideStack,
}

impl GlState {
  /// Create the state of a device, seeded according to the configuration.
  pub fn new<D>(device: &mut D, config: StateConfig) -> Result<Self, StateError<D::Err>>
  where
    D: Device,
  {
    let mut state = GlState {
      device: device.id(),
      generation: device.context_generation(),
      store: StateStore::new(&config),
      config,
      stack: OverrideStack::new(),
    };

    state.seed(device)?;
    Ok(state)
  }

  fn seed<D>(&mut self, device: &mut D) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    match self.config.seed {
      Seed::Defaults => {
        log::debug!("seeding state of device {:?} from defaults", self.device);
        self.store.initialize_defaults();
        Ok(())
      }

      Seed::Readback => {
        self.store.initialize_defaults();
        self.store.resynchronize(device)
      }
    }
  }

  /// Device this state belongs to.
  pub fn device_id(&self) -> DeviceId {
    self.device
  }

  /// Context generation the state was seeded at.
  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn config(&self) -> &StateConfig {
    &self.config
  }

  pub fn store(&self) -> &StateStore {
    &self.store
  }

  /// Number of override frames currently pushed.
  pub fn depth(&self) -> usize {
    self.stack.depth()
  }

  /// Whether the state still mirrors the given device.
  pub fn is_current<D>(&self, device: &D) -> bool
  where
    D: Device,
  {
    device.id() == self.device && device.context_generation() == self.generation
  }

  fn check<D>(&self, device: &D) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    let found = device.id();

    if found != self.device {
      return Err(StateError::ForeignDevice {
        expected: self.device,
        found,
      });
    }

    let current = device.context_generation();

    if current != self.generation {
      return Err(StateError::StaleContext {
        seeded: self.generation,
        current,
      });
    }

    Ok(())
  }

  /// Reseed the state after the device context was invalidated.
  ///
  /// Pending override frames are dropped: they describe a context that doesn’t exist anymore.
  pub fn reset<D>(&mut self, device: &mut D) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    let found = device.id();

    if found != self.device {
      return Err(StateError::ForeignDevice {
        expected: self.device,
        found,
      });
    }

    if self.stack.depth() > 0 {
      log::warn!(
        "dropping {} override frame(s) of device {:?}",
        self.stack.depth(),
        self.device
      );
      self.stack.clear();
    }

    self.generation = device.context_generation();
    self.seed(device)
  }

  /// Cached value of a parameter. Never touches the device.
  pub fn get(&self, name: &str) -> Result<&Value, ParamError> {
    self.store.get(name)
  }

  /// Read a parameter straight from the device, leaving the cache untouched.
  pub fn query_value<D>(&self, device: &mut D, name: &str) -> Result<Value, StateError<D::Err>>
  where
    D: Device,
  {
    self.check(device)?;

    let desc = registry::lookup(name)?;

    if !device.supports(desc.availability) {
      return Err(ParamError::UnsupportedParameter(desc.name).into());
    }

    desc.query(device)
  }

  /// Change a parameter permanently; returns its canonical value.
  pub fn set<D>(
    &mut self,
    device: &mut D,
    name: &str,
    value: impl Into<Value>,
  ) -> Result<Value, StateError<D::Err>>
  where
    D: Device,
  {
    self.check(device)?;
    self.store.set(device, name, &value.into())
  }

  /// Read every parameter back from the device. Slow.
  pub fn resynchronize<D>(&mut self, device: &mut D) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    self.check(device)?;
    self.store.resynchronize(device)
  }

  /// Read back the parameters owning the given native identifiers; returns their names.
  pub fn resynchronize_natives<D>(
    &mut self,
    device: &mut D,
    natives: &[GLenum],
  ) -> Result<Vec<&'static str>, StateError<D::Err>>
  where
    D: Device,
  {
    self.check(device)?;
    self.store.resynchronize_natives(device, natives)
  }

  /// Push an override frame. Must be balanced by [`GlState::pop_values`].
  pub fn push_values<D>(
    &mut self,
    device: &mut D,
    values: &Overrides,
  ) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    self.check(device)?;
    self.stack.push_values(&mut self.store, device, values)
  }

  /// Pop the most recent override frame, restoring the previous values.
  pub fn pop_values<D>(&mut self, device: &mut D) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    self.check(device)?;
    self.stack.pop_values(&mut self.store, device)
  }

  /// Push an override frame and return a guard popping it.
  ///
  /// The frame is popped by [`Scope::exit`] or, failing that, when the guard is dropped, unwinding
  /// included. Errors raised while popping on drop are logged.
  pub fn scope<'a, D>(
    &'a mut self,
    device: &'a mut D,
    values: &Overrides,
  ) -> Result<Scope<'a, D>, StateError<D::Err>>
  where
    D: Device,
  {
    self.push_values(device, values)?;

    Ok(Scope {
      state: self,
      device,
      active: true,
    })
  }

  /// Run `body` with the given overrides applied, then restore the previous values.
  ///
  /// Restoration happens whatever the outcome of `body`. If `body` fails, its error is returned
  /// once the state is restored; if restoring fails as well, the restoration error is logged.
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
    let mut scope = self.scope(device, values)?;
    let result = body(&mut scope);
    let restored = scope.exit();

    match (result, restored) {
      (Ok(t), Ok(())) => Ok(t),
      (Ok(_), Err(e)) => Err(e.into()),
      (Err(e), Ok(())) => Err(e),
      (Err(e), Err(restore_err)) => {
        log::error!("cannot restore state after a failed scope: {}", restore_err);
        Err(e)
      }
    }
  }
}

/// An applied override frame.
///
/// A scope dereferences to its device, so that code running inside a scope can use it as if it
/// were the device. Nested scopes are opened with [`Scope::with_scope`].
#[derive(Debug)]
pub struct Scope<'a, D>
where
  D: Device,
{
  state: &'a mut GlState,
  device: &'a mut D,
  active: bool,
}

impl<'a, D> Scope<'a, D>
where
  D: Device,
{
  pub fn device(&mut self) -> &mut D {
    &mut *self.device
  }

  pub fn state(&self) -> &GlState {
    &*self.state
  }

  /// Cached value of a parameter.
  pub fn get(&self, name: &str) -> Result<&Value, ParamError> {
    self.state.get(name)
  }

  /// Open a nested scope.
  pub fn with_scope<F, T, E>(&mut self, values: &Overrides, body: F) -> Result<T, E>
  where
    F: FnOnce(&mut Scope<'_, D>) -> Result<T, E>,
    E: From<StateError<D::Err>>,
  {
    self.state.with_scope(self.device, values, body)
  }

  /// Pop the frame now, reporting restoration errors.
  pub fn exit(mut self) -> Result<(), StateError<D::Err>> {
    self.active = false;
    self.state.pop_values(self.device)
  }
}

impl<'a, D> Deref for Scope<'a, D>
where
  D: Device,
{
  type Target = D;

  fn deref(&self) -> &D {
    &*self.device
  }
}

impl<'a, D> DerefMut for Scope<'a, D>
where
  D: Device,
{
  fn deref_mut(&mut self) -> &mut D {
    &mut *self.device
  }
}

impl<'a, D> Drop for Scope<'a, D>
where
  D: Device,
{
  fn drop(&mut self) {
    if self.active {
      self.active = false;

      if let Err(e) = self.state.pop_values(self.device) {
        log::error!("cannot restore state when leaving scope: {}", e);
      }
    }
  }
}
