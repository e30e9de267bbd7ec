//! Typed property values.
//!
//! Every value a provider can hold is one [`PropertyValue`] variant. The
//! [`Property`] trait maps Rust types onto variants so stores can offer
//! typed `get::<T>` access without runtime type inspection.

use std::mem;

use crate::math::{BVec2, BVec3, BVec4, IVec2, IVec3, IVec4, Mat4, Vec2, Vec3, Vec4};
use crate::resource::{BufferId, TextureId, TextureSampler, VertexAttribute};
use crate::state::{BlendFactor, CompareMode, ScissorBox, StencilOperation, TriangleCulling};

/// A value stored in a property provider.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Int(i32),
    Int2(IVec2),
    Int3(IVec3),
    Int4(IVec4),
    UInt(u32),
    Float(f32),
    Float2(Vec2),
    Float3(Vec3),
    Float4(Vec4),
    Mat4(Mat4),
    Bool(bool),
    Bool2(BVec2),
    Bool3(BVec3),
    Bool4(BVec4),
    Buffer(BufferId),
    Texture(TextureId),
    Sampler(TextureSampler),
    VertexAttribute(VertexAttribute),
    BlendFactor(BlendFactor),
    CompareMode(CompareMode),
    StencilOperation(StencilOperation),
    TriangleCulling(TriangleCulling),
    ScissorBox(ScissorBox),
}

impl PropertyValue {
    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => i32::TYPE_NAME,
            Self::Int2(_) => IVec2::TYPE_NAME,
            Self::Int3(_) => IVec3::TYPE_NAME,
            Self::Int4(_) => IVec4::TYPE_NAME,
            Self::UInt(_) => u32::TYPE_NAME,
            Self::Float(_) => f32::TYPE_NAME,
            Self::Float2(_) => Vec2::TYPE_NAME,
            Self::Float3(_) => Vec3::TYPE_NAME,
            Self::Float4(_) => Vec4::TYPE_NAME,
            Self::Mat4(_) => Mat4::TYPE_NAME,
            Self::Bool(_) => bool::TYPE_NAME,
            Self::Bool2(_) => BVec2::TYPE_NAME,
            Self::Bool3(_) => BVec3::TYPE_NAME,
            Self::Bool4(_) => BVec4::TYPE_NAME,
            Self::Buffer(_) => BufferId::TYPE_NAME,
            Self::Texture(_) => TextureId::TYPE_NAME,
            Self::Sampler(_) => TextureSampler::TYPE_NAME,
            Self::VertexAttribute(_) => VertexAttribute::TYPE_NAME,
            Self::BlendFactor(_) => BlendFactor::TYPE_NAME,
            Self::CompareMode(_) => CompareMode::TYPE_NAME,
            Self::StencilOperation(_) => StencilOperation::TYPE_NAME,
            Self::TriangleCulling(_) => TriangleCulling::TYPE_NAME,
            Self::ScissorBox(_) => ScissorBox::TYPE_NAME,
        }
    }

    /// Whether two values are of the same variant.
    ///
    /// Overwriting a value with one of the same kind keeps its slot; a
    /// different kind retires the slot.
    pub fn same_kind(&self, other: &PropertyValue) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

/// A Rust type that maps onto exactly one [`PropertyValue`] variant.
pub trait Property: Sized + Clone + 'static {
    /// Type name used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Extract a value of this type, or `None` for any other variant.
    fn from_value(value: &PropertyValue) -> Option<Self>;

    /// Wrap into a property value.
    fn into_value(self) -> PropertyValue;
}

macro_rules! impl_property {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl Property for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_value(value: &PropertyValue) -> Option<Self> {
                match value {
                    PropertyValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn into_value(self) -> PropertyValue {
                PropertyValue::$variant(self)
            }
        }

        impl From<$ty> for PropertyValue {
            fn from(value: $ty) -> Self {
                PropertyValue::$variant(value)
            }
        }
    };
}

impl_property!(i32, Int, "int1");
impl_property!(IVec2, Int2, "int2");
impl_property!(IVec3, Int3, "int3");
impl_property!(IVec4, Int4, "int4");
impl_property!(u32, UInt, "uint1");
impl_property!(f32, Float, "float1");
impl_property!(Vec2, Float2, "float2");
impl_property!(Vec3, Float3, "float3");
impl_property!(Vec4, Float4, "float4");
impl_property!(Mat4, Mat4, "float16");
impl_property!(bool, Bool, "bool1");
impl_property!(BVec2, Bool2, "bool2");
impl_property!(BVec3, Bool3, "bool3");
impl_property!(BVec4, Bool4, "bool4");
impl_property!(BufferId, Buffer, "buffer");
impl_property!(TextureId, Texture, "texture");
impl_property!(TextureSampler, Sampler, "sampler2d");
impl_property!(VertexAttribute, VertexAttribute, "vertexAttribute");
impl_property!(BlendFactor, BlendFactor, "blendFactor");
impl_property!(CompareMode, CompareMode, "compareMode");
impl_property!(StencilOperation, StencilOperation, "stencilOperation");
impl_property!(TriangleCulling, TriangleCulling, "triangleCulling");
impl_property!(ScissorBox, ScissorBox, "scissorBox");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_value() {
        let value = Vec4::new(1.0, 0.0, 0.0, 1.0).into_value();
        assert_eq!(value.type_name(), "float4");
        assert_eq!(Vec4::from_value(&value), Some(Vec4::new(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_wrong_variant_is_rejected() {
        let value = PropertyValue::Float(1.0);
        assert_eq!(i32::from_value(&value), None);
        assert_eq!(Vec2::from_value(&value), None);
    }

    #[test]
    fn test_same_kind_ignores_payload() {
        assert!(PropertyValue::Float(1.0).same_kind(&PropertyValue::Float(2.0)));
        assert!(!PropertyValue::Float(1.0).same_kind(&PropertyValue::Int(1)));
    }

    #[test]
    fn test_from_impls() {
        let value: PropertyValue = BufferId(4).into();
        assert_eq!(value, PropertyValue::Buffer(BufferId(4)));
    }
}
