use getset::CopyGetters;
use ir::ast::{Member, PrimitiveSubtype, Type};

use crate::context::{Context, Declaration};
use crate::error::{Error, ErrorKind, Result};

/// Inline size and alignment of a value in the FIDL wire format.
#[derive(Constructor, Clone, Copy, CopyGetters, Debug, PartialEq, Eq)]
#[getset(get_copy = "pub")]
pub struct TypeShape {
    size: u32,
    alignment: u32
}

const POINTER: TypeShape = TypeShape { size: 8, alignment: 8 };
const OUT_OF_LINE: TypeShape = TypeShape { size: 16, alignment: 8 };
const HANDLE: TypeShape = TypeShape { size: 4, alignment: 4 };

fn overflow() -> Error {
    Error::new(ErrorKind::TypeShapeOverflow)
}

pub fn align_to(offset: u32, alignment: u32) -> Result<u32> {
    if alignment <= 1 {
        return Ok(offset);
    }
    let padded = offset.checked_add(alignment - 1).ok_or_else(overflow)?;
    Ok(padded / alignment * alignment)
}

pub fn primitive_shape(subtype: PrimitiveSubtype) -> TypeShape {
    let bytes = subtype.bit_width() / 8;
    TypeShape { size: bytes, alignment: bytes }
}

pub fn type_shape(ctx: &Context<'_>, t: &Type) -> Result<TypeShape> {
    match t {
        Type::Primitive { subtype } => Ok(primitive_shape(*subtype)),
        Type::String { .. } | Type::Vector { .. } => Ok(OUT_OF_LINE),
        Type::Handle { .. } | Type::Request { .. } => Ok(HANDLE),
        Type::Array { element_type, element_count } => {
            let element = type_shape(ctx, element_type)?;
            let size = element.size.checked_mul(*element_count).ok_or_else(overflow)?;
            Ok(TypeShape { size, alignment: element.alignment })
        }
        Type::Nullable { inner } => match inner.as_ref() {
            Type::Named { identifier } => match ctx.lookup(identifier)? {
                Declaration::Interface(_) => Ok(HANDLE),
                Declaration::External(e) if e.kind() == ir::ast::DeclarationKind::Interface => Ok(HANDLE),
                _ => Ok(POINTER)
            },
            other => type_shape(ctx, other)
        },
        Type::Named { identifier } => match ctx.lookup(identifier)? {
            Declaration::Enum(e) => Ok(primitive_shape(e.subtype())),
            Declaration::Struct(s) => ctx.struct_shape(s),
            Declaration::Interface(_) => Ok(HANDLE),
            Declaration::External(e) => match (e.size(), e.alignment()) {
                (Some(size), Some(alignment)) => Ok(TypeShape { size, alignment }),
                _ if e.kind() == ir::ast::DeclarationKind::Interface => Ok(HANDLE),
                _ => Err(Error::new(ErrorKind::MissingTypeShape { declaration: identifier.to_string() }))
            }
        }
    }
}

/// Lays `members` out in order, padding each to its natural alignment. Named local
/// structs are resolved through the context, which keeps each one's shape once known.
pub fn struct_shape(ctx: &Context<'_>, members: &[Member]) -> Result<TypeShape> {
    if members.is_empty() {
        return Ok(TypeShape { size: 1, alignment: 1 });
    }

    let mut offset = 0;
    let mut alignment = 1;
    for member in members {
        let located = |e: Error| e.in_member(member.name());
        let shape = type_shape(ctx, member.member_type()).map_err(located)?;
        offset = align_to(offset, shape.alignment)
            .and_then(|start| start.checked_add(shape.size).ok_or_else(overflow))
            .map_err(located)?;
        alignment = alignment.max(shape.alignment);
    }

    Ok(TypeShape { size: align_to(offset, alignment)?, alignment })
}
