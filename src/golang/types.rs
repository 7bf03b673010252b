use ir::ast::{CompoundIdentifier, DeclarationKind, HandleSubtype, PrimitiveSubtype, Type};

use crate::context::Context;
use crate::error::{Error, ErrorKind, Result};
use crate::target::{Language, Role};

pub fn primitive(subtype: PrimitiveSubtype) -> &'static str {
    match subtype {
        PrimitiveSubtype::Bool => "bool",
        PrimitiveSubtype::Int8 => "int8",
        PrimitiveSubtype::Int16 => "int16",
        PrimitiveSubtype::Int32 => "int32",
        PrimitiveSubtype::Int64 => "int64",
        PrimitiveSubtype::Uint8 => "uint8",
        PrimitiveSubtype::Uint16 => "uint16",
        PrimitiveSubtype::Uint32 => "uint32",
        PrimitiveSubtype::Uint64 => "uint64",
        PrimitiveSubtype::Float32 => "float32",
        PrimitiveSubtype::Float64 => "float64"
    }
}

fn handle(subtype: HandleSubtype) -> Result<String> {
    let name = match subtype {
        HandleSubtype::Handle => "Handle",
        HandleSubtype::Vmo => "VMO",
        HandleSubtype::Channel => "Channel",
        HandleSubtype::Event => "Event",
        HandleSubtype::Port => "Port",
        HandleSubtype::Log => "Log",
        HandleSubtype::Socket => "Socket",
        HandleSubtype::Vmar => "VMAR",
        _ => return Err(Error::new(ErrorKind::UnsupportedHandleType { target: Language::Go, subtype }))
    };
    Ok(format!("_zx.{}", name))
}

fn last_component(library: &str) -> &str {
    library.rsplit('.').next().unwrap_or(library)
}

/// The name a dependency is imported under: its last component, or every component
/// joined by `_` when another dependency ends in the same one.
pub fn package_alias(ctx: &Context<'_>, library: &str) -> Result<String> {
    let sharing = ctx.library()
        .dependencies()
        .iter()
        .filter(|d| last_component(d.name()) == last_component(library))
        .count();
    if sharing > 1 {
        return ctx.map_name(&library.replace('.', "_"), Role::Library);
    }
    ctx.map_name(library, Role::Library)
}

/// The declaration's Go name, package-qualified when it comes from a dependency.
pub fn qualified(ctx: &Context<'_>, identifier: &CompoundIdentifier) -> Result<String> {
    let name = ctx.declaration_name(identifier)?;
    if ctx.is_local(identifier) {
        return Ok(name);
    }
    Ok(format!("{}.{}", package_alias(ctx, identifier.library())?, name))
}

pub fn map_type(ctx: &Context<'_>, t: &Type) -> Result<String> {
    match t {
        Type::Primitive { subtype } => Ok(primitive(*subtype).to_string()),
        Type::String { .. } => Ok(String::from("string")),
        Type::Vector { element_type, .. } => Ok(format!("[]{}", map_type(ctx, element_type)?)),
        Type::Array { element_type, element_count } => Ok(format!("[{}]{}", element_count, map_type(ctx, element_type)?)),
        Type::Handle { subtype } => handle(*subtype),
        Type::Request { subtype } => {
            ctx.lookup(subtype)?;
            Ok(format!("{}InterfaceRequest", qualified(ctx, subtype)?))
        }
        Type::Named { identifier } => match ctx.lookup(identifier)?.kind() {
            DeclarationKind::Interface => Ok(format!("{}Interface", qualified(ctx, identifier)?)),
            DeclarationKind::Enum | DeclarationKind::Struct => qualified(ctx, identifier)
        },
        Type::Nullable { inner } => nullable(ctx, inner)
    }
}

fn nullable(ctx: &Context<'_>, inner: &Type) -> Result<String> {
    match inner {
        Type::String { .. } | Type::Vector { .. } => Ok(format!("*{}", map_type(ctx, inner)?)),
        Type::Handle { .. } | Type::Request { .. } => map_type(ctx, inner),
        Type::Named { identifier } => match ctx.lookup(identifier)?.kind() {
            DeclarationKind::Struct => Ok(format!("*{}", map_type(ctx, inner)?)),
            DeclarationKind::Interface => map_type(ctx, inner),
            DeclarationKind::Enum => Err(Error::unsupported_nullability(Language::Go, inner))
        },
        _ => Err(Error::unsupported_nullability(Language::Go, inner))
    }
}

/// The `fidl:"..."` struct tag carrying bounds and handle nullability, outermost first.
pub fn field_tag(ctx: &Context<'_>, t: &Type) -> Result<Option<String>> {
    let mut entries = vec!();
    collect_tag_entries(ctx, t, &mut entries)?;
    while entries.last().map_or(false, |e: &String| e.is_empty()) {
        entries.pop();
    }

    if entries.is_empty() {
        return Ok(None);
    }
    Ok(Some(format!("`fidl:\"{}\"`", entries.join(","))))
}

fn collect_tag_entries(ctx: &Context<'_>, t: &Type, entries: &mut Vec<String>) -> Result<()> {
    match t {
        Type::String { maybe_element_count } => {
            entries.push(maybe_element_count.map(|n| n.to_string()).unwrap_or_default());
        }
        Type::Vector { element_type, maybe_element_count } => {
            entries.push(maybe_element_count.map(|n| n.to_string()).unwrap_or_default());
            collect_tag_entries(ctx, element_type, entries)?;
        }
        Type::Array { element_type, .. } => collect_tag_entries(ctx, element_type, entries)?,
        Type::Nullable { inner } => match inner.as_ref() {
            Type::Handle { .. } | Type::Request { .. } => entries.push(String::from("*")),
            Type::Named { identifier } if ctx.lookup(identifier)?.kind() == DeclarationKind::Interface => {
                entries.push(String::from("*"))
            }
            other => collect_tag_entries(ctx, other, entries)?
        },
        _ => ()
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Target;
    use crate::template::Registry;
    use ir::ast::{Dependency, Enum, ExternalDeclaration, Interface, Library, Struct};
    use std::collections::BTreeMap;

    fn library() -> Library {
        let mut external = BTreeMap::new();
        external.insert(
            CompoundIdentifier::new("fuchsia.mem/Buffer"),
            ExternalDeclaration::new(DeclarationKind::Struct, Some(16), Some(8))
        );

        Library::new(
            String::from("fuchsia.math"),
            vec!(Dependency::new(String::from("fuchsia.mem"), external)),
            vec!(Enum::new(CompoundIdentifier::new("fuchsia.math/Color"), PrimitiveSubtype::Uint32, vec!())),
            vec!(Struct::new(CompoundIdentifier::new("fuchsia.math/Point"), vec!())),
            vec!(Interface::new(CompoundIdentifier::new("fuchsia.math/Calc"), vec!()))
        )
    }

    fn map(library: &Library, t: Type) -> Result<String> {
        let ctx = Context::new(library, Target::for_language(Language::Go), Registry::global());
        map_type(&ctx, &t)
    }

    #[test]
    fn test_map_type() {
        let lib = library();
        assert_eq!("uint32", map(&lib, Type::primitive(PrimitiveSubtype::Uint32)).unwrap());
        assert_eq!("[]string", map(&lib, Type::vector(Type::string(Some(32)), Some(4))).unwrap());
        assert_eq!("[16]uint8", map(&lib, Type::array(Type::primitive(PrimitiveSubtype::Uint8), 16)).unwrap());
        assert_eq!("_zx.VMO", map(&lib, Type::handle(HandleSubtype::Vmo)).unwrap());
        assert_eq!("Point", map(&lib, Type::named("fuchsia.math/Point")).unwrap());
        assert_eq!("mem.Buffer", map(&lib, Type::named("fuchsia.mem/Buffer")).unwrap());
        assert_eq!("CalcInterface", map(&lib, Type::named("fuchsia.math/Calc")).unwrap());
        assert_eq!("CalcInterfaceRequest", map(&lib, Type::request("fuchsia.math/Calc")).unwrap());
    }

    #[test]
    fn test_nullable() {
        let lib = library();
        assert_eq!("*Point", map(&lib, Type::nullable(Type::named("fuchsia.math/Point"))).unwrap());
        assert_eq!("*string", map(&lib, Type::nullable(Type::string(None))).unwrap());
        assert_eq!("*[]int8", map(&lib, Type::nullable(Type::vector(Type::primitive(PrimitiveSubtype::Int8), None))).unwrap());
        assert_eq!("_zx.Channel", map(&lib, Type::nullable(Type::handle(HandleSubtype::Channel))).unwrap());
        assert_eq!("CalcInterface", map(&lib, Type::nullable(Type::named("fuchsia.math/Calc"))).unwrap());

        let error = map(&lib, Type::nullable(Type::primitive(PrimitiveSubtype::Uint32))).unwrap_err();
        assert_eq!(
            &ErrorKind::UnsupportedNullability { target: Language::Go, type_name: String::from("uint32") },
            error.kind()
        );
        assert!(map(&lib, Type::nullable(Type::named("fuchsia.math/Color"))).is_err());
        assert!(map(&lib, Type::nullable(Type::nullable(Type::string(None)))).is_err());
    }

    #[test]
    fn test_unsupported_handle() {
        let lib = library();
        let error = map(&lib, Type::handle(HandleSubtype::Job)).unwrap_err();
        assert_eq!(
            &ErrorKind::UnsupportedHandleType { target: Language::Go, subtype: HandleSubtype::Job },
            error.kind()
        );
    }

    #[test]
    fn test_field_tag() {
        let lib = library();
        let ctx = Context::new(&lib, Target::for_language(Language::Go), Registry::global());
        let tag = |t: Type| field_tag(&ctx, &t).unwrap();

        assert_eq!(None, tag(Type::primitive(PrimitiveSubtype::Uint32)));
        assert_eq!(None, tag(Type::string(None)));
        assert_eq!(Some(String::from("`fidl:\"32\"`")), tag(Type::string(Some(32))));
        assert_eq!(Some(String::from("`fidl:\"4,32\"`")), tag(Type::vector(Type::nullable(Type::string(Some(32))), Some(4))));
        assert_eq!(Some(String::from("`fidl:\"*\"`")), tag(Type::nullable(Type::handle(HandleSubtype::Channel))));
        assert_eq!(Some(String::from("`fidl:\",*\"`")), tag(Type::vector(Type::nullable(Type::named("fuchsia.math/Calc")), None)));
    }

    #[test]
    fn test_package_alias() {
        let buffer = |library: &str| {
            let mut external = BTreeMap::new();
            external.insert(
                CompoundIdentifier::new(&format!("{}/Buffer", library)),
                ExternalDeclaration::new(DeclarationKind::Struct, Some(16), Some(8))
            );
            Dependency::new(String::from(library), external)
        };
        let lib = Library::new(
            String::from("fuchsia.math"),
            vec!(buffer("fuchsia.mem"), buffer("other.mem"), buffer("fuchsia.io")),
            vec!(),
            vec!(),
            vec!()
        );
        let ctx = Context::new(&lib, Target::for_language(Language::Go), Registry::global());

        assert_eq!("fuchsia_mem", package_alias(&ctx, "fuchsia.mem").unwrap());
        assert_eq!("other_mem", package_alias(&ctx, "other.mem").unwrap());
        assert_eq!("io", package_alias(&ctx, "fuchsia.io").unwrap());
        assert_eq!("other_mem.Buffer", map(&lib, Type::named("other.mem/Buffer")).unwrap());
    }
}
