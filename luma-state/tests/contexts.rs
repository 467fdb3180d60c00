mod common;

use common::{EmulatedDevice, EmulatedError};
use luma_state::consts;
use luma_state::device::Device;
use luma_state::{ContextStates, Overrides, StateConfig, StateError, Value};

#[test]
fn states_are_created_on_first_use() {
  let mut device = EmulatedDevice::new();
  let mut states = ContextStates::new(StateConfig::default());

  assert!(states.is_empty());
  assert!(states.get(device.id()).is_none());

  states
    .state(&mut device)
    .unwrap()
    .set(&mut device, "depthTest", true)
    .unwrap();

  assert_eq!(states.len(), 1);
  assert_eq!(
    states.state(&mut device).unwrap().get("depthTest"),
    Ok(&Value::Bool(true))
  );
}

#[test]
fn devices_are_independent() {
  let mut a = EmulatedDevice::new();
  let mut b = EmulatedDevice::new();
  let mut states = ContextStates::default();

  states.state(&mut a).unwrap().set(&mut a, "blend", true).unwrap();
  states.state(&mut b).unwrap();

  assert_eq!(states.len(), 2);
  assert_eq!(states.get(a.id()).unwrap().get("blend"), Ok(&Value::Bool(true)));
  assert_eq!(states.get(b.id()).unwrap().get("blend"), Ok(&Value::Bool(false)));
  assert!(b.calls().is_empty());
}

#[test]
fn lost_context_rebuilds_the_state() {
  let mut device = EmulatedDevice::new();
  let mut states = ContextStates::new(StateConfig::new().drawing_buffer_size(640, 480));

  let state = states.state(&mut device).unwrap();
  state
    .push_values(&mut device, &Overrides::new().set("cullFace", true))
    .unwrap();
  assert_eq!(state.depth(), 1);

  device.lose_context();

  let state = states.state(&mut device).unwrap();
  assert_eq!(state.generation(), 1);
  assert_eq!(state.depth(), 0);
  assert_eq!(state.get("cullFace"), Ok(&Value::Bool(false)));
  assert_eq!(state.get("viewport"), Ok(&Value::from([0, 0, 640, 480])));
  assert_eq!(states.len(), 1);
}

#[test]
fn forget() {
  let mut device = EmulatedDevice::new();
  let mut states = ContextStates::default();

  states.state(&mut device).unwrap();
  let state = states.forget(device.id()).unwrap();

  assert_eq!(state.device_id(), device.id());
  assert!(states.is_empty());
  assert!(states.forget(device.id()).is_none());
}

#[test]
fn with_scope() {
  let mut device = EmulatedDevice::new();
  let mut states = ContextStates::default();
  let overrides = Overrides::new().set("lineWidth", 2.);

  let width = states
    .with_scope(&mut device, &overrides, |scope| {
      Ok::<_, StateError<EmulatedError>>(scope.native(consts::LINE_WIDTH).cloned())
    })
    .unwrap();

  assert_eq!(width, Some(Value::Float(2.)));
  assert_eq!(device.native(consts::LINE_WIDTH), Some(&Value::Float(1.)));
  assert_eq!(states.get(device.id()).unwrap().depth(), 0);
}
