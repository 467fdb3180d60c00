mod common;

use common::{EmulatedDevice, EmulatedError};
use luma_state::blending::{Equation, Factor};
use luma_state::consts;
use luma_state::depth_stencil::{Comparison, StencilOp, StencilOperations, StencilTest, Write};
use luma_state::device::{Face, NativeCall};
use luma_state::face_culling::FaceCulling;
use luma_state::scissor::ScissorRegion;
use luma_state::{GlState, Overrides, ParamError, StateConfig, StateError, Value};
use std::panic::{self, AssertUnwindSafe};

type Error = StateError<EmulatedError>;

fn setup() -> (EmulatedDevice, GlState) {
  let mut device = EmulatedDevice::new();
  let state = GlState::new(&mut device, StateConfig::default()).unwrap();
  (device, state)
}

fn blending() -> Overrides {
  Overrides::new()
    .set("blend", true)
    .set("blendFunc", [Factor::SrcAlpha, Factor::SrcAlphaComplement])
}

#[derive(Debug)]
enum DrawError {
  State(Error),
  Failed,
}

impl From<Error> for DrawError {
  fn from(e: Error) -> Self {
    DrawError::State(e)
  }
}

#[test]
fn push_then_pop_restores() {
  let (mut device, mut state) = setup();

  state.push_values(&mut device, &blending()).unwrap();

  assert_eq!(state.depth(), 1);
  assert_eq!(state.get("blend"), Ok(&Value::Bool(true)));
  assert_eq!(
    state.get("blendFunc"),
    Ok(&Value::from([
      consts::SRC_ALPHA,
      consts::ONE_MINUS_SRC_ALPHA,
      consts::SRC_ALPHA,
      consts::ONE_MINUS_SRC_ALPHA
    ]))
  );
  assert_eq!(device.native(consts::BLEND), Some(&Value::Bool(true)));

  state.pop_values(&mut device).unwrap();

  assert_eq!(state.depth(), 0);
  assert_eq!(state.get("blend"), Ok(&Value::Bool(false)));
  assert_eq!(
    state.get("blendFunc"),
    Ok(&Value::from([consts::ONE, consts::ZERO, consts::ONE, consts::ZERO]))
  );
  assert_eq!(device.native(consts::BLEND), Some(&Value::Bool(false)));
  assert_eq!(device.native(consts::BLEND_DST_ALPHA), Some(&Value::from(consts::ZERO)));
}

#[test]
fn pop_restores_in_reverse_order() {
  let (mut device, mut state) = setup();

  state.push_values(&mut device, &blending()).unwrap();
  device.take_calls();
  state.pop_values(&mut device).unwrap();

  // keys are applied in name order, restored the other way around
  assert_eq!(
    device.calls(),
    &[
      NativeCall::BlendFuncSeparate {
        src_rgb: consts::ONE,
        dst_rgb: consts::ZERO,
        src_alpha: consts::ONE,
        dst_alpha: consts::ZERO,
      },
      NativeCall::Disable(consts::BLEND),
    ]
  );
}

#[test]
fn nested_frames() {
  let (mut device, mut state) = setup();

  state
    .push_values(&mut device, &Overrides::new().set("depthFunc", Comparison::LessOrEqual))
    .unwrap();
  state
    .push_values(&mut device, &Overrides::new().set("depthFunc", Comparison::Equal))
    .unwrap();

  assert_eq!(state.depth(), 2);
  assert_eq!(state.get("depthFunc"), Ok(&Value::from(consts::EQUAL)));

  state.pop_values(&mut device).unwrap();
  assert_eq!(state.get("depthFunc"), Ok(&Value::from(consts::LEQUAL)));
  assert_eq!(device.native(consts::DEPTH_FUNC), Some(&Value::from(consts::LEQUAL)));

  state.pop_values(&mut device).unwrap();
  assert_eq!(state.get("depthFunc"), Ok(&Value::from(consts::LESS)));
  assert_eq!(device.native(consts::DEPTH_FUNC), Some(&Value::from(consts::LESS)));
}

#[test]
fn empty_pop_fails_without_device_calls() {
  let (mut device, mut state) = setup();

  assert!(matches!(state.pop_values(&mut device), Err(StateError::EmptyStack)));
  assert!(device.calls().is_empty());
}

#[test]
fn invalid_key_changes_nothing() {
  let (mut device, mut state) = setup();
  let overrides = Overrides::new()
    .set("depthTest", true)
    .set("blendFnuc", [consts::ONE, consts::ONE]);

  let err = state.push_values(&mut device, &overrides).unwrap_err();

  assert!(matches!(
    err,
    StateError::Param(ParamError::UnknownParameter(ref name)) if name == "blendFnuc"
  ));
  assert!(device.calls().is_empty());
  assert_eq!(state.depth(), 0);
  assert_eq!(state.get("depthTest"), Ok(&Value::Bool(false)));
}

#[test]
fn invalid_value_changes_nothing() {
  let (mut device, mut state) = setup();
  let overrides = Overrides::new()
    .set("blend", true)
    .set("blendFunc", [consts::ONE, consts::ONE, consts::ZERO]);

  let err = state.push_values(&mut device, &overrides).unwrap_err();

  assert!(matches!(
    err,
    StateError::Param(ParamError::InvalidValue { name: "blendFunc", .. })
  ));
  assert!(device.calls().is_empty());
  assert_eq!(state.depth(), 0);
}

#[test]
fn failed_push_is_rolled_back() {
  let (mut device, mut state) = setup();
  device.reject_when(|call| matches!(call, NativeCall::DepthFunc(_)));

  let overrides = Overrides::new()
    .set("blend", true)
    .set("depthFunc", Comparison::Equal);
  let err = state.push_values(&mut device, &overrides).unwrap_err();

  assert!(matches!(
    err,
    StateError::Device(EmulatedError::Rejected(NativeCall::DepthFunc(consts::EQUAL)))
  ));
  assert_eq!(state.depth(), 0);
  assert_eq!(state.get("blend"), Ok(&Value::Bool(false)));
  assert_eq!(device.native(consts::BLEND), Some(&Value::Bool(false)));
  assert_eq!(
    device.calls(),
    &[NativeCall::Enable(consts::BLEND), NativeCall::Disable(consts::BLEND)]
  );
}

#[test]
fn failed_restoration_does_not_stop_the_others() {
  let (mut device, mut state) = setup();
  let overrides = Overrides::new().set("blend", true).set("depthTest", true);

  state.push_values(&mut device, &overrides).unwrap();
  device.reject_when(|call| *call == NativeCall::Disable(consts::BLEND));

  let err = state.pop_values(&mut device).unwrap_err();

  assert!(matches!(err, StateError::Device(EmulatedError::Rejected(_))));
  assert_eq!(state.depth(), 0);
  assert_eq!(device.native(consts::DEPTH_TEST), Some(&Value::Bool(false)));
  assert_eq!(state.get("depthTest"), Ok(&Value::Bool(false)));

  // the device still blends and the cache says so
  assert_eq!(device.native(consts::BLEND), Some(&Value::Bool(true)));
  assert_eq!(state.get("blend"), Ok(&Value::Bool(true)));
}

fn rejects_back_stencil_func(call: &NativeCall) -> bool {
  matches!(call, NativeCall::StencilFuncSeparate(Face::Back, ..))
}

#[test]
fn half_applied_push_is_rolled_back() {
  let mut device = EmulatedDevice::new();
  let config = StateConfig::new().skip_redundant_writes(true);
  let mut state = GlState::new(&mut device, config).unwrap();
  let default = state.get("stencilFunc").unwrap().clone();
  device.reject_when(rejects_back_stencil_func);

  let overrides = Overrides::new().set("stencilFunc", [consts::EQUAL, 1, 0xFF]);
  let err = state.push_values(&mut device, &overrides).unwrap_err();

  assert!(matches!(
    err,
    StateError::Device(EmulatedError::Rejected(NativeCall::StencilFuncSeparate(Face::Back, ..)))
  ));
  assert_eq!(state.depth(), 0);
  assert_eq!(state.get("stencilFunc"), Ok(&default));
  assert_eq!(device.native(consts::STENCIL_FUNC), Some(&Value::from(consts::ALWAYS)));
  assert_eq!(state.query_value(&mut device, "stencilFunc").unwrap(), default);
}

#[test]
fn half_applied_pop_is_written_back() {
  let (mut device, mut state) = setup();
  let overrides = Overrides::new().set("stencilFunc", [consts::EQUAL, 1, 0xFF]);

  state.push_values(&mut device, &overrides).unwrap();
  let overridden = state.get("stencilFunc").unwrap().clone();
  device.reject_when(rejects_back_stencil_func);

  let err = state.pop_values(&mut device).unwrap_err();

  assert!(matches!(err, StateError::Device(EmulatedError::Rejected(_))));
  assert_eq!(state.depth(), 0);
  assert_eq!(state.get("stencilFunc"), Ok(&overridden));
  assert_eq!(device.native(consts::STENCIL_FUNC), Some(&Value::from(consts::EQUAL)));
  assert_eq!(state.query_value(&mut device, "stencilFunc").unwrap(), overridden);
}

#[test]
fn with_scope_returns_body_result() {
  let (mut device, mut state) = setup();

  let seen = state
    .with_scope(&mut device, &blending(), |scope| {
      Ok::<_, Error>(scope.get("blend").cloned())
    })
    .unwrap();

  assert_eq!(seen, Ok(Value::Bool(true)));
  assert_eq!(state.depth(), 0);
  assert_eq!(state.get("blend"), Ok(&Value::Bool(false)));
}

#[test]
fn with_scope_restores_on_body_error() {
  let (mut device, mut state) = setup();
  let overrides = Overrides::new().set("depthTest", true);

  let r: Result<(), DrawError> = state.with_scope(&mut device, &overrides, |scope| {
    assert_eq!(scope.native(consts::DEPTH_TEST), Some(&Value::Bool(true)));
    Err(DrawError::Failed)
  });

  assert!(matches!(r, Err(DrawError::Failed)));
  assert_eq!(state.depth(), 0);
  assert_eq!(state.get("depthTest"), Ok(&Value::Bool(false)));
  assert_eq!(device.native(consts::DEPTH_TEST), Some(&Value::Bool(false)));
}

#[test]
fn with_scope_reports_push_errors() {
  let (mut device, mut state) = setup();
  let overrides = Overrides::new().set("depthTset", true);
  let mut ran = false;

  let r: Result<(), DrawError> = state.with_scope(&mut device, &overrides, |_| {
    ran = true;
    Ok(())
  });

  assert!(matches!(
    r,
    Err(DrawError::State(StateError::Param(ParamError::UnknownParameter(_))))
  ));
  assert!(!ran);
  assert_eq!(state.depth(), 0);
}

#[test]
fn body_error_wins_over_restoration_error() {
  let (mut device, mut state) = setup();
  let overrides = Overrides::new().set("depthTest", true);

  let r: Result<(), DrawError> = state.with_scope(&mut device, &overrides, |scope| {
    scope.reject_when(|call| matches!(call, NativeCall::Disable(_)));
    Err(DrawError::Failed)
  });

  assert!(matches!(r, Err(DrawError::Failed)));
  assert_eq!(state.depth(), 0);
}

#[test]
fn restoration_error_is_reported() {
  let (mut device, mut state) = setup();
  let overrides = Overrides::new().set("depthTest", true);

  let r: Result<(), DrawError> = state.with_scope(&mut device, &overrides, |scope| {
    scope.reject_when(|call| matches!(call, NativeCall::Disable(_)));
    Ok(())
  });

  assert!(matches!(
    r,
    Err(DrawError::State(StateError::Device(EmulatedError::Rejected(
      NativeCall::Disable(consts::DEPTH_TEST)
    ))))
  ));
}

#[test]
fn panicking_body_restores() {
  let (mut device, mut state) = setup();
  let overrides = Overrides::new().set("depthTest", true);

  let r = panic::catch_unwind(AssertUnwindSafe(|| {
    state.with_scope(&mut device, &overrides, |_| -> Result<(), Error> {
      panic!("lost in the draw call");
    })
  }));

  assert!(r.is_err());
  assert_eq!(state.depth(), 0);
  assert_eq!(state.get("depthTest"), Ok(&Value::Bool(false)));
  assert_eq!(device.native(consts::DEPTH_TEST), Some(&Value::Bool(false)));
}

#[test]
fn dropped_scope_pops() {
  let (mut device, mut state) = setup();

  {
    let mut scope = state.scope(&mut device, &blending()).unwrap();
    assert_eq!(scope.state().depth(), 1);
    assert_eq!(scope.device().native(consts::BLEND), Some(&Value::Bool(true)));
  }

  assert_eq!(state.depth(), 0);
  assert_eq!(device.native(consts::BLEND), Some(&Value::Bool(false)));
}

#[test]
fn nested_scopes() {
  let (mut device, mut state) = setup();
  let outer = Overrides::new()
    .set("depthTest", true)
    .set("depthFunc", Comparison::LessOrEqual);
  let inner = Overrides::new().set("depthFunc", Comparison::Always);

  state
    .with_scope(&mut device, &outer, |scope| {
      scope.with_scope(&inner, |scope| {
        assert_eq!(scope.state().depth(), 2);
        assert_eq!(scope.get("depthFunc"), Ok(&Value::from(consts::ALWAYS)));
        Ok::<_, Error>(())
      })?;

      assert_eq!(scope.state().depth(), 1);
      assert_eq!(scope.get("depthFunc"), Ok(&Value::from(consts::LEQUAL)));
      assert_eq!(scope.get("depthTest"), Ok(&Value::Bool(true)));
      Ok::<_, Error>(())
    })
    .unwrap();

  assert_eq!(state.get("depthFunc"), Ok(&Value::from(consts::LESS)));
  assert_eq!(state.get("depthTest"), Ok(&Value::Bool(false)));
}

#[test]
fn overrides_from_json() {
  let (mut device, mut state) = setup();
  let overrides: Overrides = serde_json::from_str(
    r#"{
      "blend": true,
      "blendFunc": [770, 771],
      "viewport": { "x": 0, "y": 0, "width": 640, "height": 480 }
    }"#,
  )
  .unwrap();

  state.push_values(&mut device, &overrides).unwrap();

  assert_eq!(
    state.get("blendFunc"),
    Ok(&Value::from([770, 771, 770, 771]))
  );
  assert_eq!(state.get("viewport"), Ok(&Value::from([0, 0, 640, 480])));
  assert_eq!(device.native(consts::VIEWPORT), Some(&Value::from([0, 0, 640, 480])));
}

#[test]
fn typed_overrides() {
  let (mut device, mut state) = setup();
  let overrides = FaceCulling::default()
    .overrides()
    .merge(ScissorRegion::new(10, 20, 300, 200).overrides())
    .set("blendEquation", Equation::Max)
    .set("depthWritemask", Write::Off)
    .set("stencilFunc", StencilTest::new(Comparison::Equal, 1, 0xFF))
    .set(
      "stencilOp",
      StencilOperations::new().on_depth_stencil_pass(StencilOp::Replace),
    );

  state.push_values(&mut device, &overrides).unwrap();

  assert_eq!(device.native(consts::CULL_FACE), Some(&Value::Bool(true)));
  assert_eq!(device.native(consts::SCISSOR_TEST), Some(&Value::Bool(true)));
  assert_eq!(
    device.native(consts::SCISSOR_BOX),
    Some(&Value::from([10, 20, 300, 200]))
  );
  assert_eq!(
    device.native(consts::BLEND_EQUATION_ALPHA),
    Some(&Value::from(consts::MAX))
  );
  assert_eq!(device.native(consts::DEPTH_WRITEMASK), Some(&Value::Bool(false)));
  assert_eq!(device.native(consts::STENCIL_BACK_REF), Some(&Value::from(1)));
  assert_eq!(
    device.native(consts::STENCIL_BACK_PASS_DEPTH_PASS),
    Some(&Value::from(consts::REPLACE))
  );

  state.pop_values(&mut device).unwrap();

  assert_eq!(device.native(consts::CULL_FACE), Some(&Value::Bool(false)));
  assert_eq!(device.native(consts::DEPTH_WRITEMASK), Some(&Value::Bool(true)));
  assert_eq!(device.native(consts::STENCIL_BACK_REF), Some(&Value::from(0)));
  assert_eq!(
    device.native(consts::STENCIL_BACK_PASS_DEPTH_PASS),
    Some(&Value::from(consts::KEEP))
  );
}
