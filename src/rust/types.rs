use ir::ast::{CompoundIdentifier, DeclarationKind, HandleSubtype, PrimitiveSubtype, Type};

use crate::context::Context;
use crate::error::{Error, Result};
use crate::target::{Language, Role};

pub fn primitive(subtype: PrimitiveSubtype) -> &'static str {
    match subtype {
        PrimitiveSubtype::Bool => "bool",
        PrimitiveSubtype::Int8 => "i8",
        PrimitiveSubtype::Int16 => "i16",
        PrimitiveSubtype::Int32 => "i32",
        PrimitiveSubtype::Int64 => "i64",
        PrimitiveSubtype::Uint8 => "u8",
        PrimitiveSubtype::Uint16 => "u16",
        PrimitiveSubtype::Uint32 => "u32",
        PrimitiveSubtype::Uint64 => "u64",
        PrimitiveSubtype::Float32 => "f32",
        PrimitiveSubtype::Float64 => "f64"
    }
}

fn handle(subtype: HandleSubtype) -> &'static str {
    match subtype {
        HandleSubtype::Handle => "zx::Handle",
        HandleSubtype::Process => "zx::Process",
        HandleSubtype::Thread => "zx::Thread",
        HandleSubtype::Vmo => "zx::Vmo",
        HandleSubtype::Channel => "zx::Channel",
        HandleSubtype::Event => "zx::Event",
        HandleSubtype::Port => "zx::Port",
        HandleSubtype::Interrupt => "zx::Interrupt",
        HandleSubtype::Log => "zx::Log",
        HandleSubtype::Socket => "zx::Socket",
        HandleSubtype::Resource => "zx::Resource",
        HandleSubtype::Eventpair => "zx::EventPair",
        HandleSubtype::Job => "zx::Job",
        HandleSubtype::Vmar => "zx::Vmar",
        HandleSubtype::Fifo => "zx::Fifo",
        HandleSubtype::Guest => "zx::Guest",
        HandleSubtype::Timer => "zx::Timer"
    }
}

/// The declaration's Rust path, crate-qualified when it comes from a dependency.
pub fn qualified(ctx: &Context<'_>, identifier: &CompoundIdentifier) -> Result<String> {
    let name = ctx.declaration_name(identifier)?;
    if ctx.is_local(identifier) {
        return Ok(name);
    }
    Ok(format!("{}::{}", ctx.map_name(identifier.library(), Role::Library)?, name))
}

pub fn map_type(ctx: &Context<'_>, t: &Type) -> Result<String> {
    match t {
        Type::Primitive { subtype } => Ok(primitive(*subtype).to_string()),
        Type::String { .. } => Ok(String::from("String")),
        Type::Vector { element_type, .. } => Ok(format!("Vec<{}>", map_type(ctx, element_type)?)),
        Type::Array { element_type, element_count } => Ok(format!("[{}; {}]", map_type(ctx, element_type)?, element_count)),
        Type::Handle { subtype } => Ok(handle(*subtype).to_string()),
        Type::Request { subtype } => {
            ctx.lookup(subtype)?;
            Ok(format!("fidl::endpoints::ServerEnd<{}Marker>", qualified(ctx, subtype)?))
        }
        Type::Named { identifier } => match ctx.lookup(identifier)?.kind() {
            DeclarationKind::Interface => Ok(format!("fidl::endpoints::ClientEnd<{}Marker>", qualified(ctx, identifier)?)),
            DeclarationKind::Enum | DeclarationKind::Struct => qualified(ctx, identifier)
        },
        Type::Nullable { inner } => match inner.as_ref() {
            Type::String { .. } | Type::Vector { .. } | Type::Handle { .. } | Type::Request { .. } => {
                Ok(format!("Option<{}>", map_type(ctx, inner)?))
            }
            Type::Named { identifier } => match ctx.lookup(identifier)?.kind() {
                DeclarationKind::Struct => Ok(format!("Option<Box<{}>>", map_type(ctx, inner)?)),
                DeclarationKind::Interface => Ok(format!("Option<{}>", map_type(ctx, inner)?)),
                DeclarationKind::Enum => Err(Error::unsupported_nullability(Language::Rust, inner))
            },
            _ => Err(Error::unsupported_nullability(Language::Rust, inner))
        }
    }
}
