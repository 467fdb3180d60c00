//! Decoding of `getParameter` results.

use js_sys::{Array, Float32Array, Int32Array, Uint32Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::WebGl2RenderingContext;

// Workaround around the lack of implementor for [`TryFrom`] on [`JsValue`].
pub(crate) trait GetWebGLParam<T> {
  fn get_webgl_param(&self, param: u32) -> Result<Option<T>, JsValue>;
}

impl GetWebGLParam<bool> for WebGl2RenderingContext {
  fn get_webgl_param(&self, param: u32) -> Result<Option<bool>, JsValue> {
    self.get_parameter(param).map(|x| x.as_bool())
  }
}

impl GetWebGLParam<f64> for WebGl2RenderingContext {
  fn get_webgl_param(&self, param: u32) -> Result<Option<f64>, JsValue> {
    self.get_parameter(param).map(|x| x.as_f64())
  }
}

// sequences of booleans come back as plain arrays
impl GetWebGLParam<Vec<bool>> for WebGl2RenderingContext {
  fn get_webgl_param(&self, param: u32) -> Result<Option<Vec<bool>>, JsValue> {
    self.get_parameter(param).map(|x| {
      x.dyn_ref::<Array>()
        .and_then(|a| a.iter().map(|b| b.as_bool()).collect())
    })
  }
}

macro_rules! typed_array_to_vec {
  ($value:expr, $($arr_ty:ty),*) => {
    $(
      if let Some(a) = $value.dyn_ref::<$arr_ty>() {
        return Some(a.to_vec().into_iter().map(f64::from).collect());
      }
    )*
  }
}

fn numbers(value: &JsValue) -> Option<Vec<f64>> {
  typed_array_to_vec!(value, Int32Array, Uint32Array, Float32Array);

  value
    .dyn_ref::<Array>()
    .and_then(|a| a.iter().map(|x| x.as_f64()).collect())
}

impl GetWebGLParam<Vec<f64>> for WebGl2RenderingContext {
  fn get_webgl_param(&self, param: u32) -> Result<Option<Vec<f64>>, JsValue> {
    self.get_parameter(param).map(|x| numbers(&x))
  }
}
