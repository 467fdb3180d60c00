//! Parameter registry.
//!
//! The registry is a static table translating logical parameter names (`"blendFunc"`,
//! `"depthTest"`, `"unpackFlipY"`, etc.) into native identifiers and native calls. Names are the
//! camel-cased native identifiers, except when the native setter is named differently.
//!
//! Composite parameters, for instance `blendFunc` which is backed by four native identifiers, are
//! registered as a single unit. That’s what allows the [state store](crate::store) and the
//! [override stack](crate::stack) to always read, change and restore them atomically: restoring only
//! half of a blending function would leave the device in a state the store never modeled.
//!
//! The table is built once; lookups are backed by lazily-built maps.

use crate::consts::{self, GLenum};
use crate::device::{Availability, Device, Face, NativeCall, NativeQuery};
use crate::error::{ParamError, StateError};
use crate::value::{ScalarType, Value};
use once_cell::sync::Lazy;
use smallvec::{smallvec, SmallVec};
use std::collections::{BTreeMap, HashMap};

/// Native calls issued to apply a single parameter.
pub type NativeCalls = SmallVec<[NativeCall; 2]>;

/// A named component of a composite parameter.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Field {
  pub name: &'static str,
  pub ty: ScalarType,
}

/// Shape of a parameter value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Shape {
  /// A single value, backed by a single native identifier.
  Scalar(ScalarType),
  /// Several components of the same type, backed by a single array-valued native identifier.
  Packed(ScalarType, &'static [&'static str]),
  /// Several components, each backed by its own native identifier.
  Split(&'static [Field]),
}

impl Shape {
  /// Number of components.
  pub fn arity(&self) -> usize {
    match *self {
      Shape::Scalar(_) => 1,
      Shape::Packed(_, names) => names.len(),
      Shape::Split(fields) => fields.len(),
    }
  }

  /// Names of the components; empty for scalars.
  pub fn component_names(&self) -> Vec<&'static str> {
    match *self {
      Shape::Scalar(_) => Vec::new(),
      Shape::Packed(_, names) => names.to_vec(),
      Shape::Split(fields) => fields.iter().map(|f| f.name).collect(),
    }
  }

  fn component_type(&self, index: usize) -> Option<ScalarType> {
    match *self {
      Shape::Scalar(ty) => Some(ty).filter(|_| index == 0),
      Shape::Packed(ty, names) => Some(ty).filter(|_| index < names.len()),
      Shape::Split(fields) => fields.get(index).map(|f| f.ty),
    }
  }
}

/// Shorthand accepted in place of the full set of components.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Normalize {
  /// No shorthand.
  None,
  /// A single scalar stands for every component.
  Broadcast,
  /// The first half of the components stands for both halves (rgb / alpha, front / back).
  Mirror,
}

/// Single native entry points.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Entry {
  BlendColor,
  BlendEquationSeparate,
  BlendFuncSeparate,
  ClearColor,
  ClearDepth,
  ClearStencil,
  ColorMask,
  CullFace,
  DepthFunc,
  DepthMask,
  DepthRange,
  FrontFace,
  LineWidth,
  PolygonOffset,
  SampleCoverage,
  Scissor,
  Viewport,
}

/// Entry points called once for the front faces and once for the back faces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FaceEntry {
  StencilMaskSeparate,
  StencilFuncSeparate,
  StencilOpSeparate,
}

/// How a canonical value is turned into native calls.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Setter {
  /// Boolean switched with enable / disable.
  Capability(GLenum),
  /// Pixel store parameter.
  PixelStore(GLenum),
  /// Implementation hint.
  Hint(GLenum),
  /// A single entry point taking the components positionally.
  Call(Entry),
  /// An entry point taking the front components, then the back ones.
  FrontBack(FaceEntry),
}

/// Literal used to declare default values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lit {
  Bool(bool),
  Int(i64),
  Float(f64),
}

impl From<Lit> for Value {
  fn from(lit: Lit) -> Self {
    match lit {
      Lit::Bool(b) => Value::Bool(b),
      Lit::Int(i) => Value::Int(i),
      Lit::Float(x) => Value::Float(x),
    }
  }
}

/// Static description of a parameter.
#[derive(Debug)]
pub struct ParamDescriptor {
  /// Unique, logical name.
  pub name: &'static str,
  /// Native identifiers: one per component for [`Shape::Split`], a single one otherwise.
  pub native: &'static [GLenum],
  pub shape: Shape,
  /// Components assumed at context creation.
  pub default: &'static [Lit],
  pub normalize: Normalize,
  pub setter: Setter,
  pub availability: Availability,
}

impl ParamDescriptor {
  /// Value assumed at context creation, in canonical form.
  pub fn default_value(&self) -> Value {
    match self.shape {
      Shape::Scalar(_) => self.default.first().copied().map_or(Value::Int(0), Value::from),
      _ => Value::List(self.default.iter().copied().map(Value::from).collect()),
    }
  }

  fn invalid(&self, reason: impl Into<String>) -> ParamError {
    ParamError::InvalidValue {
      name: self.name,
      reason: reason.into(),
    }
  }

  /// Turn a value into its canonical form.
  ///
  /// Composite values can be passed positionally, as named fields or, for parameters supporting it,
  /// in shorthand form. Normalizing a canonical value returns it unchanged.
  pub fn normalize(&self, value: &Value) -> Result<Value, ParamError> {
    let arity = self.shape.arity();

    let components = match (self.shape, value) {
      (Shape::Scalar(ty), v) => return ty.coerce(v).map_err(|reason| self.invalid(reason)),

      (_, Value::Record(fields)) => self.order_record(fields)?,

      (_, Value::List(l)) if l.len() == arity => l.clone(),

      (_, Value::List(l)) if self.normalize == Normalize::Mirror && l.len() * 2 == arity => {
        l.iter().chain(l.iter()).cloned().collect()
      }

      (_, v) if v.is_scalar() && self.normalize == Normalize::Broadcast => vec![v.clone(); arity],

      (_, Value::List(l)) => {
        return Err(self.invalid(format!(
          "expected {} components, got {}",
          arity,
          l.len()
        )))
      }

      (_, v) => return Err(self.invalid(format!("expected {} components, got {}", arity, v))),
    };

    components
      .iter()
      .enumerate()
      .map(|(i, c)| {
        let ty = self
          .shape
          .component_type(i)
          .ok_or_else(|| self.invalid("too many components"))?;
        ty.coerce(c)
          .map_err(|reason| self.invalid(format!("component {}: {}", i, reason)))
      })
      .collect::<Result<Vec<_>, _>>()
      .map(Value::List)
  }

  fn order_record(&self, fields: &BTreeMap<String, Value>) -> Result<Vec<Value>, ParamError> {
    let names = self.shape.component_names();

    if let Some(unknown) = fields.keys().find(|k| !names.contains(&k.as_str())) {
      return Err(self.invalid(format!("unknown field {}", unknown)));
    }

    names
      .iter()
      .map(|name| {
        fields
          .get(*name)
          .cloned()
          .ok_or_else(|| self.invalid(format!("missing field {}", name)))
      })
      .collect()
  }

  /// Native calls applying a canonical value.
  pub fn native_calls(&self, canonical: &Value) -> Result<NativeCalls, ParamError> {
    let args = Args {
      desc: self,
      items: match canonical {
        Value::List(items) => items.as_slice(),
        scalar => std::slice::from_ref(scalar),
      },
    };

    if args.items.len() != self.shape.arity() {
      return Err(self.invalid("value is not canonical"));
    }

    let calls = match self.setter {
      Setter::Capability(cap) => {
        if args.bool(0)? {
          smallvec![NativeCall::Enable(cap)]
        } else {
          smallvec![NativeCall::Disable(cap)]
        }
      }

      Setter::PixelStore(pname) => {
        let param = match args.items[0] {
          Value::Bool(b) => b as i32,
          _ => args.int(0)?,
        };

        smallvec![NativeCall::PixelStorei(pname, param)]
      }

      Setter::Hint(target) => smallvec![NativeCall::Hint(target, args.glenum(0)?)],

      Setter::Call(entry) => smallvec![args.call(entry)?],

      Setter::FrontBack(entry) => {
        let half = self.shape.arity() / 2;
        smallvec![
          args.face_call(entry, Face::Front, 0)?,
          args.face_call(entry, Face::Back, half)?,
        ]
      }
    };

    Ok(calls)
  }

  /// Apply a canonical value to a device.
  pub fn apply<D>(&self, device: &mut D, canonical: &Value) -> Result<(), StateError<D::Err>>
  where
    D: Device,
  {
    for call in self.native_calls(canonical)? {
      log::trace!("{}: {:?}", self.name, call);
      device.invoke(&call).map_err(StateError::Device)?;
    }

    Ok(())
  }

  /// Read the current value from a device, in canonical form.
  pub fn query<D>(&self, device: &mut D) -> Result<Value, StateError<D::Err>>
  where
    D: Device,
  {
    let raw = match self.shape {
      Shape::Scalar(ty) => device.query(&NativeQuery {
        pname: self.native[0],
        ty,
        len: 1,
      }),

      Shape::Packed(ty, names) => device.query(&NativeQuery {
        pname: self.native[0],
        ty,
        len: names.len(),
      }),

      Shape::Split(fields) => fields
        .iter()
        .zip(self.native)
        .map(|(f, &pname)| {
          device.query(&NativeQuery {
            pname,
            ty: f.ty,
            len: 1,
          })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List),
    }
    .map_err(StateError::Device)?;

    Ok(self.normalize(&raw)?)
  }
}

// Positional access to canonical components.
struct Args<'a> {
  desc: &'a ParamDescriptor,
  items: &'a [Value],
}

impl<'a> Args<'a> {
  fn item(&self, i: usize) -> Result<&'a Value, ParamError> {
    self
      .items
      .get(i)
      .ok_or_else(|| self.desc.invalid(format!("missing component {}", i)))
  }

  fn bool(&self, i: usize) -> Result<bool, ParamError> {
    let v = self.item(i)?;
    v.as_bool()
      .ok_or_else(|| self.desc.invalid(format!("component {} is not a boolean", i)))
  }

  fn int(&self, i: usize) -> Result<i32, ParamError> {
    let v = self.item(i)?;
    v.as_int()
      .map(|x| x as i32)
      .ok_or_else(|| self.desc.invalid(format!("component {} is not an integer", i)))
  }

  fn uint(&self, i: usize) -> Result<u32, ParamError> {
    let v = self.item(i)?;
    v.as_int()
      .map(|x| x as u32)
      .ok_or_else(|| self.desc.invalid(format!("component {} is not an integer", i)))
  }

  fn glenum(&self, i: usize) -> Result<GLenum, ParamError> {
    self.uint(i)
  }

  fn float(&self, i: usize) -> Result<f32, ParamError> {
    let v = self.item(i)?;
    v.as_float()
      .map(|x| x as f32)
      .ok_or_else(|| self.desc.invalid(format!("component {} is not a float", i)))
  }

  fn floats4(&self) -> Result<[f32; 4], ParamError> {
    Ok([self.float(0)?, self.float(1)?, self.float(2)?, self.float(3)?])
  }

  fn ints4(&self) -> Result<[i32; 4], ParamError> {
    Ok([self.int(0)?, self.int(1)?, self.int(2)?, self.int(3)?])
  }

  fn call(&self, entry: Entry) -> Result<NativeCall, ParamError> {
    let call = match entry {
      Entry::BlendColor => NativeCall::BlendColor(self.floats4()?),

      Entry::BlendEquationSeparate => NativeCall::BlendEquationSeparate {
        rgb: self.glenum(0)?,
        alpha: self.glenum(1)?,
      },

      Entry::BlendFuncSeparate => NativeCall::BlendFuncSeparate {
        src_rgb: self.glenum(0)?,
        dst_rgb: self.glenum(1)?,
        src_alpha: self.glenum(2)?,
        dst_alpha: self.glenum(3)?,
      },

      Entry::ClearColor => NativeCall::ClearColor(self.floats4()?),
      Entry::ClearDepth => NativeCall::ClearDepth(self.float(0)?),
      Entry::ClearStencil => NativeCall::ClearStencil(self.int(0)?),

      Entry::ColorMask => NativeCall::ColorMask([
        self.bool(0)?,
        self.bool(1)?,
        self.bool(2)?,
        self.bool(3)?,
      ]),

      Entry::CullFace => NativeCall::CullFace(self.glenum(0)?),
      Entry::DepthFunc => NativeCall::DepthFunc(self.glenum(0)?),
      Entry::DepthMask => NativeCall::DepthMask(self.bool(0)?),
      Entry::DepthRange => NativeCall::DepthRange(self.float(0)?, self.float(1)?),
      Entry::FrontFace => NativeCall::FrontFace(self.glenum(0)?),
      Entry::LineWidth => NativeCall::LineWidth(self.float(0)?),
      Entry::PolygonOffset => NativeCall::PolygonOffset(self.float(0)?, self.float(1)?),
      Entry::SampleCoverage => NativeCall::SampleCoverage(self.float(0)?, self.bool(1)?),
      Entry::Scissor => NativeCall::Scissor(self.ints4()?),
      Entry::Viewport => NativeCall::Viewport(self.ints4()?),
    };

    Ok(call)
  }

  fn face_call(&self, entry: FaceEntry, face: Face, at: usize) -> Result<NativeCall, ParamError> {
    let call = match entry {
      FaceEntry::StencilMaskSeparate => NativeCall::StencilMaskSeparate(face, self.uint(at)?),

      FaceEntry::StencilFuncSeparate => NativeCall::StencilFuncSeparate(
        face,
        self.glenum(at)?,
        self.int(at + 1)?,
        self.uint(at + 2)?,
      ),

      FaceEntry::StencilOpSeparate => NativeCall::StencilOpSeparate(
        face,
        self.glenum(at)?,
        self.glenum(at + 1)?,
        self.glenum(at + 2)?,
      ),
    };

    Ok(call)
  }
}

use crate::value::ScalarType::{Bool, Enum, Float, Int, Uint};

const RGBA: &[&str] = &["r", "g", "b", "a"];
const RECT: &[&str] = &["x", "y", "width", "height"];

const FLOAT_ZERO4: &[Lit] = &[Lit::Float(0.); 4];
const INT_ZERO4: &[Lit] = &[Lit::Int(0); 4];
const INT_ZERO: &[Lit] = &[Lit::Int(0)];
const FALSE: &[Lit] = &[Lit::Bool(false)];
const TRUE: &[Lit] = &[Lit::Bool(true)];

const MASK_ALL: i64 = 0xFFFF_FFFF;

macro_rules! capability {
  ($name:expr, $cap:expr, $default:expr) => {
    ParamDescriptor {
      name: $name,
      native: &[$cap],
      shape: Shape::Scalar(Bool),
      default: $default,
      normalize: Normalize::None,
      setter: Setter::Capability($cap),
      availability: Availability::All,
    }
  };
}

macro_rules! pixel_store {
  ($name:expr, $pname:expr, $ty:expr, $default:expr, $availability:expr) => {
    ParamDescriptor {
      name: $name,
      native: &[$pname],
      shape: Shape::Scalar($ty),
      default: $default,
      normalize: Normalize::None,
      setter: Setter::PixelStore($pname),
      availability: $availability,
    }
  };
}

static PARAMETERS: &[ParamDescriptor] = &[
  capability!("blend", consts::BLEND, FALSE),
  ParamDescriptor {
    name: "blendColor",
    native: &[consts::BLEND_COLOR],
    shape: Shape::Packed(Float, RGBA),
    default: FLOAT_ZERO4,
    normalize: Normalize::None,
    setter: Setter::Call(Entry::BlendColor),
    availability: Availability::All,
  },
  ParamDescriptor {
    name: "blendEquation",
    native: &[consts::BLEND_EQUATION_RGB, consts::BLEND_EQUATION_ALPHA],
    shape: Shape::Split(&[Field { name: "rgb", ty: Enum }, Field { name: "alpha", ty: Enum }]),
    default: &[
      Lit::Int(consts::FUNC_ADD as i64),
      Lit::Int(consts::FUNC_ADD as i64),
    ],
    normalize: Normalize::Broadcast,
    setter: Setter::Call(Entry::BlendEquationSeparate),
    availability: Availability::All,
  },
  // positional order is glBlendFuncSeparate’s: srcRgb, dstRgb, srcAlpha, dstAlpha
  ParamDescriptor {
    name: "blendFunc",
    native: &[
      consts::BLEND_SRC_RGB,
      consts::BLEND_DST_RGB,
      consts::BLEND_SRC_ALPHA,
      consts::BLEND_DST_ALPHA,
    ],
    shape: Shape::Split(&[
      Field { name: "srcRgb", ty: Enum },
      Field { name: "dstRgb", ty: Enum },
      Field { name: "srcAlpha", ty: Enum },
      Field { name: "dstAlpha", ty: Enum },
    ]),
    default: &[
      Lit::Int(consts::ONE as i64),
      Lit::Int(consts::ZERO as i64),
      Lit::Int(consts::ONE as i64),
      Lit::Int(consts::ZERO as i64),
    ],
    normalize: Normalize::Mirror,
    setter: Setter::Call(Entry::BlendFuncSeparate),
    availability: Availability::All,
  },
  ParamDescriptor {
    name: "clearColor",
    native: &[consts::COLOR_CLEAR_VALUE],
    shape: Shape::Packed(Float, RGBA),
    default: FLOAT_ZERO4,
    normalize: Normalize::None,
    setter: Setter::Call(Entry::ClearColor),
    availability: Availability::All,
  },
  ParamDescriptor {
    name: "colorMask",
    native: &[consts::COLOR_WRITEMASK],
    shape: Shape::Packed(Bool, RGBA),
    default: &[Lit::Bool(true); 4],
    normalize: Normalize::Broadcast,
    setter: Setter::Call(Entry::ColorMask),
    availability: Availability::All,
  },
  capability!("cullFace", consts::CULL_FACE, FALSE),
  ParamDescriptor {
    name: "cullFaceMode",
    native: &[consts::CULL_FACE_MODE],
    shape: Shape::Scalar(Enum),
    default: &[Lit::Int(consts::BACK as i64)],
    normalize: Normalize::None,
    setter: Setter::Call(Entry::CullFace),
    availability: Availability::All,
  },
  capability!("depthTest", consts::DEPTH_TEST, FALSE),
  ParamDescriptor {
    name: "depthClearValue",
    native: &[consts::DEPTH_CLEAR_VALUE],
    shape: Shape::Scalar(Float),
    default: &[Lit::Float(1.)],
    normalize: Normalize::None,
    setter: Setter::Call(Entry::ClearDepth),
    availability: Availability::All,
  },
  ParamDescriptor {
    name: "depthFunc",
    native: &[consts::DEPTH_FUNC],
    shape: Shape::Scalar(Enum),
    default: &[Lit::Int(consts::LESS as i64)],
    normalize: Normalize::None,
    setter: Setter::Call(Entry::DepthFunc),
    availability: Availability::All,
  },
  ParamDescriptor {
    name: "depthRange",
    native: &[consts::DEPTH_RANGE],
    shape: Shape::Packed(Float, &["min", "max"]),
    default: &[Lit::Float(0.), Lit::Float(1.)],
    normalize: Normalize::None,
    setter: Setter::Call(Entry::DepthRange),
    availability: Availability::All,
  },
  ParamDescriptor {
    name: "depthWritemask",
    native: &[consts::DEPTH_WRITEMASK],
    shape: Shape::Scalar(Bool),
    default: TRUE,
    normalize: Normalize::None,
    setter: Setter::Call(Entry::DepthMask),
    availability: Availability::All,
  },
  capability!("dither", consts::DITHER, TRUE),
  ParamDescriptor {
    name: "frontFace",
    native: &[consts::FRONT_FACE],
    shape: Shape::Scalar(Enum),
    default: &[Lit::Int(consts::CCW as i64)],
    normalize: Normalize::None,
    setter: Setter::Call(Entry::FrontFace),
    availability: Availability::All,
  },
  // quality of the images generated by mipmap generation; gone from core OpenGL profiles
  ParamDescriptor {
    name: "generateMipmapHint",
    native: &[consts::GENERATE_MIPMAP_HINT],
    shape: Shape::Scalar(Enum),
    default: &[Lit::Int(consts::DONT_CARE as i64)],
    normalize: Normalize::None,
    setter: Setter::Hint(consts::GENERATE_MIPMAP_HINT),
    availability: Availability::WebOnly,
  },
  ParamDescriptor {
    name: "lineWidth",
    native: &[consts::LINE_WIDTH],
    shape: Shape::Scalar(Float),
    default: &[Lit::Float(1.)],
    normalize: Normalize::None,
    setter: Setter::Call(Entry::LineWidth),
    availability: Availability::All,
  },
  capability!("polygonOffsetFill", consts::POLYGON_OFFSET_FILL, FALSE),
  // fragment depth offset: factor × DZ + r × units
  ParamDescriptor {
    name: "polygonOffset",
    native: &[consts::POLYGON_OFFSET_FACTOR, consts::POLYGON_OFFSET_UNITS],
    shape: Shape::Split(&[Field { name: "factor", ty: Float }, Field { name: "units", ty: Float }]),
    default: &[Lit::Float(0.), Lit::Float(0.)],
    normalize: Normalize::None,
    setter: Setter::Call(Entry::PolygonOffset),
    availability: Availability::All,
  },
  ParamDescriptor {
    name: "sampleCoverage",
    native: &[consts::SAMPLE_COVERAGE_VALUE, consts::SAMPLE_COVERAGE_INVERT],
    shape: Shape::Split(&[Field { name: "value", ty: Float }, Field { name: "invert", ty: Bool }]),
    default: &[Lit::Float(1.), Lit::Bool(false)],
    normalize: Normalize::None,
    setter: Setter::Call(Entry::SampleCoverage),
    availability: Availability::All,
  },
  capability!("scissorTest", consts::SCISSOR_TEST, FALSE),
  // the real default is the drawing buffer size, see StateConfig::drawing_buffer_size
  ParamDescriptor {
    name: "scissorBox",
    native: &[consts::SCISSOR_BOX],
    shape: Shape::Packed(Int, RECT),
    default: INT_ZERO4,
    normalize: Normalize::None,
    setter: Setter::Call(Entry::Scissor),
    availability: Availability::All,
  },
  capability!("stencilTest", consts::STENCIL_TEST, FALSE),
  ParamDescriptor {
    name: "stencilClearValue",
    native: &[consts::STENCIL_CLEAR_VALUE],
    shape: Shape::Scalar(Int),
    default: INT_ZERO,
    normalize: Normalize::None,
    setter: Setter::Call(Entry::ClearStencil),
    availability: Availability::All,
  },
  ParamDescriptor {
    name: "stencilMask",
    native: &[consts::STENCIL_WRITEMASK, consts::STENCIL_BACK_WRITEMASK],
    shape: Shape::Split(&[Field { name: "mask", ty: Uint }, Field { name: "backMask", ty: Uint }]),
    default: &[Lit::Int(MASK_ALL), Lit::Int(MASK_ALL)],
    normalize: Normalize::Broadcast,
    setter: Setter::FrontBack(FaceEntry::StencilMaskSeparate),
    availability: Availability::All,
  },
  ParamDescriptor {
    name: "stencilFunc",
    native: &[
      consts::STENCIL_FUNC,
      consts::STENCIL_REF,
      consts::STENCIL_VALUE_MASK,
      consts::STENCIL_BACK_FUNC,
      consts::STENCIL_BACK_REF,
      consts::STENCIL_BACK_VALUE_MASK,
    ],
    shape: Shape::Split(&[
      Field { name: "func", ty: Enum },
      Field { name: "ref", ty: Int },
      Field { name: "valueMask", ty: Uint },
      Field { name: "backFunc", ty: Enum },
      Field { name: "backRef", ty: Int },
      Field { name: "backValueMask", ty: Uint },
    ]),
    default: &[
      Lit::Int(consts::ALWAYS as i64),
      Lit::Int(0),
      Lit::Int(MASK_ALL),
      Lit::Int(consts::ALWAYS as i64),
      Lit::Int(0),
      Lit::Int(MASK_ALL),
    ],
    normalize: Normalize::Mirror,
    setter: Setter::FrontBack(FaceEntry::StencilFuncSeparate),
    availability: Availability::All,
  },
  // stencil test fail, depth test fail, pass
  ParamDescriptor {
    name: "stencilOp",
    native: &[
      consts::STENCIL_FAIL,
      consts::STENCIL_PASS_DEPTH_FAIL,
      consts::STENCIL_PASS_DEPTH_PASS,
      consts::STENCIL_BACK_FAIL,
      consts::STENCIL_BACK_PASS_DEPTH_FAIL,
      consts::STENCIL_BACK_PASS_DEPTH_PASS,
    ],
    shape: Shape::Split(&[
      Field { name: "fail", ty: Enum },
      Field { name: "passDepthFail", ty: Enum },
      Field { name: "passDepthPass", ty: Enum },
      Field { name: "backFail", ty: Enum },
      Field { name: "backPassDepthFail", ty: Enum },
      Field { name: "backPassDepthPass", ty: Enum },
    ]),
    default: &[Lit::Int(consts::KEEP as i64); 6],
    normalize: Normalize::Mirror,
    setter: Setter::FrontBack(FaceEntry::StencilOpSeparate),
    availability: Availability::All,
  },
  // the real default is the drawing buffer size, see StateConfig::drawing_buffer_size
  ParamDescriptor {
    name: "viewport",
    native: &[consts::VIEWPORT],
    shape: Shape::Packed(Int, RECT),
    default: INT_ZERO4,
    normalize: Normalize::None,
    setter: Setter::Call(Entry::Viewport),
    availability: Availability::All,
  },
  // WebGL1 pixel pack / unpack modes
  pixel_store!(
    "packAlignment",
    consts::PACK_ALIGNMENT,
    Int,
    &[Lit::Int(4)],
    Availability::All
  ),
  pixel_store!(
    "unpackAlignment",
    consts::UNPACK_ALIGNMENT,
    Int,
    &[Lit::Int(4)],
    Availability::All
  ),
  pixel_store!(
    "unpackFlipY",
    consts::UNPACK_FLIP_Y_WEBGL,
    Bool,
    FALSE,
    Availability::WebOnly
  ),
  pixel_store!(
    "unpackPremultiplyAlpha",
    consts::UNPACK_PREMULTIPLY_ALPHA_WEBGL,
    Bool,
    FALSE,
    Availability::WebOnly
  ),
  pixel_store!(
    "unpackColorspaceConversion",
    consts::UNPACK_COLORSPACE_CONVERSION_WEBGL,
    Enum,
    &[Lit::Int(consts::BROWSER_DEFAULT_WEBGL as i64)],
    Availability::WebOnly
  ),
  // WebGL2 pixel pack / unpack modes
  pixel_store!(
    "packRowLength",
    consts::PACK_ROW_LENGTH,
    Int,
    INT_ZERO,
    Availability::Gl3
  ),
  pixel_store!(
    "packSkipPixels",
    consts::PACK_SKIP_PIXELS,
    Int,
    INT_ZERO,
    Availability::Gl3
  ),
  pixel_store!(
    "packSkipRows",
    consts::PACK_SKIP_ROWS,
    Int,
    INT_ZERO,
    Availability::Gl3
  ),
  pixel_store!(
    "unpackRowLength",
    consts::UNPACK_ROW_LENGTH,
    Int,
    INT_ZERO,
    Availability::Gl3
  ),
  pixel_store!(
    "unpackImageHeight",
    consts::UNPACK_IMAGE_HEIGHT,
    Int,
    INT_ZERO,
    Availability::Gl3
  ),
  pixel_store!(
    "unpackSkipPixels",
    consts::UNPACK_SKIP_PIXELS,
    Int,
    INT_ZERO,
    Availability::Gl3
  ),
  pixel_store!(
    "unpackSkipRows",
    consts::UNPACK_SKIP_ROWS,
    Int,
    INT_ZERO,
    Availability::Gl3
  ),
  pixel_store!(
    "unpackSkipImages",
    consts::UNPACK_SKIP_IMAGES,
    Int,
    INT_ZERO,
    Availability::Gl3
  ),
];

static BY_NAME: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
  PARAMETERS
    .iter()
    .enumerate()
    .map(|(i, desc)| (desc.name, i))
    .collect()
});

static BY_NATIVE: Lazy<HashMap<GLenum, usize>> = Lazy::new(|| {
  PARAMETERS
    .iter()
    .enumerate()
    .flat_map(|(i, desc)| desc.native.iter().map(move |&pname| (pname, i)))
    .collect()
});

/// Every registered parameter.
pub fn parameters() -> &'static [ParamDescriptor] {
  PARAMETERS
}

/// Position of a parameter in [`parameters`].
pub fn index_of(name: &str) -> Result<usize, ParamError> {
  BY_NAME
    .get(name)
    .copied()
    .ok_or_else(|| ParamError::UnknownParameter(name.to_owned()))
}

/// Find a parameter by name.
pub fn lookup(name: &str) -> Result<&'static ParamDescriptor, ParamError> {
  index_of(name).map(|i| &PARAMETERS[i])
}

/// Find the name of the parameter owning a native identifier.
pub fn reverse_lookup(native: GLenum) -> Result<&'static str, ParamError> {
  BY_NATIVE
    .get(&native)
    .map(|&i| PARAMETERS[i].name)
    .ok_or(ParamError::UnknownNativeParameter(native))
}
