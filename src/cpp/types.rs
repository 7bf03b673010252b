use ir::ast::{CompoundIdentifier, DeclarationKind, PrimitiveSubtype, Type};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::target::{Language, Role};

pub fn primitive(subtype: PrimitiveSubtype) -> &'static str {
    match subtype {
        PrimitiveSubtype::Bool => "bool",
        PrimitiveSubtype::Int8 => "int8_t",
        PrimitiveSubtype::Int16 => "int16_t",
        PrimitiveSubtype::Int32 => "int32_t",
        PrimitiveSubtype::Int64 => "int64_t",
        PrimitiveSubtype::Uint8 => "uint8_t",
        PrimitiveSubtype::Uint16 => "uint16_t",
        PrimitiveSubtype::Uint32 => "uint32_t",
        PrimitiveSubtype::Uint64 => "uint64_t",
        PrimitiveSubtype::Float32 => "float",
        PrimitiveSubtype::Float64 => "double"
    }
}

/// The declaration's C++ name, fully qualified when it comes from a dependency.
pub fn qualified(ctx: &Context<'_>, identifier: &CompoundIdentifier) -> Result<String> {
    let name = ctx.declaration_name(identifier)?;
    if ctx.is_local(identifier) {
        return Ok(name);
    }
    Ok(format!("::{}::{}", ctx.map_name(identifier.library(), Role::Library)?, name))
}

pub fn map_type(ctx: &Context<'_>, t: &Type) -> Result<String> {
    match t {
        Type::Primitive { subtype } => Ok(primitive(*subtype).to_string()),
        Type::String { .. } => Ok(String::from("std::string")),
        Type::Vector { element_type, .. } => Ok(format!("std::vector<{}>", map_type(ctx, element_type)?)),
        Type::Array { element_type, element_count } => {
            Ok(format!("std::array<{}, {}>", map_type(ctx, element_type)?, element_count))
        }
        Type::Handle { subtype } => Ok(format!("zx::{}", subtype)),
        Type::Request { subtype } => {
            ctx.lookup(subtype)?;
            Ok(format!("fidl::InterfaceRequest<{}>", qualified(ctx, subtype)?))
        }
        Type::Named { identifier } => match ctx.lookup(identifier)?.kind() {
            DeclarationKind::Interface => Ok(format!("fidl::InterfaceHandle<{}>", qualified(ctx, identifier)?)),
            DeclarationKind::Enum | DeclarationKind::Struct => qualified(ctx, identifier)
        },
        Type::Nullable { inner } => match inner.as_ref() {
            Type::String { .. } | Type::Vector { .. } => Ok(format!("std::optional<{}>", map_type(ctx, inner)?)),
            Type::Handle { .. } | Type::Request { .. } => map_type(ctx, inner),
            Type::Named { identifier } => match ctx.lookup(identifier)?.kind() {
                DeclarationKind::Struct => Ok(format!("std::unique_ptr<{}>", map_type(ctx, inner)?)),
                DeclarationKind::Interface => map_type(ctx, inner),
                DeclarationKind::Enum => Err(Error::unsupported_nullability(Language::Cpp, inner))
            },
            _ => Err(Error::unsupported_nullability(Language::Cpp, inner))
        }
    }
}
