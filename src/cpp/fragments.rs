use indoc::indoc;
use ir::ast::{DeclarationKind, Enum, Interface, Member, Method, Struct, Type};
use std::collections::BTreeSet;

use super::types;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::target::{Language, Role};
use crate::template::{Node, Template};

pub fn library(ctx: &Context<'_>, node: Node<'_>) -> Result<String> {
    let declarations = match node {
        Node::Library(declarations) => declarations,
        _ => return Err(Error::unsupported_declaration_kind(Language::Cpp, node.kind()))
    };
    let library = ctx.library();

    let mut sections = vec!(
        String::from("// Code generated by fidlgen; DO NOT EDIT."),
        String::from("#pragma once"),
        ["array", "cstdint", "functional", "memory", "optional", "string", "vector"]
            .iter()
            .map(|header| format!("#include <{}>", header))
            .collect::<Vec<String>>()
            .join("\n")
    );

    let mut binding_includes = vec!();
    let uses_endpoints = ctx.uses_type(&|t| match t {
        Type::Request { .. } => true,
        Type::Named { identifier } => ctx.lookup(identifier).map_or(false, |d| d.kind() == DeclarationKind::Interface),
        _ => false
    });
    if uses_endpoints || !library.interfaces().is_empty() {
        binding_includes.push(String::from("#include <lib/fidl/cpp/interface_handle.h>"));
        binding_includes.push(String::from("#include <lib/fidl/cpp/interface_request.h>"));
    }
    let mut handle_subtypes = BTreeSet::new();
    library.visit_types(&mut |t| {
        if let Type::Handle { subtype } = t {
            handle_subtypes.insert(*subtype);
        }
    });
    for subtype in &handle_subtypes {
        binding_includes.push(format!("#include <lib/zx/{}.h>", subtype));
    }
    if !binding_includes.is_empty() {
        sections.push(binding_includes.join("\n"));
    }

    let dependency_includes = library.dependencies()
        .iter()
        .filter(|dependency| ctx.uses_type(&|t| references_library(t, dependency.name())))
        .map(|dependency| format!("#include <{}/cpp/fidl.h>", dependency.name().replace('.', "/")))
        .collect::<Vec<String>>();
    if !dependency_includes.is_empty() {
        sections.push(dependency_includes.join("\n"));
    }

    let namespace = ctx.map_name(library.name(), Role::Library)?;
    let components: Vec<&str> = namespace.split("::").collect();
    sections.push(
        components.iter()
            .map(|c| format!("namespace {} {{", c))
            .collect::<Vec<String>>()
            .join("\n")
    );

    let mut forward_declarations = vec!();
    for s in library.structs() {
        forward_declarations.push(format!("struct {};", ctx.declaration_name(s.name())?));
    }
    for i in library.interfaces() {
        forward_declarations.push(format!("class {};", ctx.declaration_name(i.name())?));
    }
    if !forward_declarations.is_empty() {
        sections.push(forward_declarations.join("\n"));
    }

    let body = ctx.render_all(declarations)?;
    if !body.is_empty() {
        sections.push(body);
    }

    sections.push(
        components.iter()
            .rev()
            .map(|c| format!("}}  // namespace {}", c))
            .collect::<Vec<String>>()
            .join("\n")
    );

    return Ok(sections.join("\n\n") + "\n");
}

fn references_library(t: &Type, library: &str) -> bool {
    match t {
        Type::Named { identifier } | Type::Request { subtype: identifier } => identifier.library() == library,
        _ => false
    }
}

pub fn enumeration(ctx: &Context<'_>, node: Node<'_>) -> Result<String> {
    let e: &Enum = match node {
        Node::Enum(e) => e,
        _ => return Err(Error::unsupported_declaration_kind(Language::Cpp, node.kind()))
    };
    let suffix = if e.subtype().is_signed() { "" } else { "u" };

    let mut members = vec!();
    for member in e.members() {
        let name = ctx.map_name(member.name(), Role::EnumMember).map_err(|err| err.in_member(member.name()))?;
        members.push(format!("{} = {}{},", name, member.value(), suffix));
    }

    Ok(Template::new(indoc!("
        enum class #NAME : #TYPE {
            #MEMBERS
        };"))
    .render(&[
        ("#NAME", ctx.declaration_name(e.name())?),
        ("#TYPE", types::primitive(e.subtype()).to_string()),
        ("#MEMBERS", members.join("\n"))
    ]))
}

pub fn structure(ctx: &Context<'_>, node: Node<'_>) -> Result<String> {
    let s: &Struct = match node {
        Node::Struct(s) => s,
        _ => return Err(Error::unsupported_declaration_kind(Language::Cpp, node.kind()))
    };

    let mut fields = vec!();
    for member in s.members() {
        let field = format!(
            "{} {};",
            ctx.map_type(member.member_type()).map_err(|e| e.in_member(member.name()))?,
            ctx.map_name(member.name(), Role::Field).map_err(|e| e.in_member(member.name()))?
        );
        fields.push(field);
    }

    Ok(Template::new(indoc!("
        struct #NAME {
            #FIELDS
        };"))
    .render(&[
        ("#NAME", ctx.declaration_name(s.name())?),
        ("#FIELDS", fields.join("\n"))
    ]))
}

fn parameters(ctx: &Context<'_>, method: &Method, members: &[Member]) -> Result<Vec<(String, String)>> {
    let mut params = vec!();
    for member in members {
        let located = |e: Error| e.in_member(&format!("{}.{}", method.name(), member.name()));
        params.push((
            ctx.map_type(member.member_type()).map_err(located)?,
            ctx.map_name(member.name(), Role::Parameter).map_err(located)?
        ));
    }
    Ok(params)
}

pub fn interface(ctx: &Context<'_>, node: Node<'_>) -> Result<String> {
    let i: &Interface = match node {
        Node::Interface(i) => i,
        _ => return Err(Error::unsupported_declaration_kind(Language::Cpp, node.kind()))
    };
    let name = ctx.declaration_name(i.name())?;

    let mut ordinals = vec!();
    let mut callbacks = vec!();
    let mut methods = vec!();
    for method in i.methods() {
        let method_name = ctx.map_name(method.name(), Role::Method).map_err(|e| e.in_member(method.name()))?;
        ordinals.push(format!(
            "static constexpr uint32_t {} = {}u;",
            ctx.map_name(&format!("{}_Ordinal", method.name()), Role::Constant)?,
            method.ordinal()
        ));

        let mut params: Vec<String> = parameters(ctx, method, method.request())?
            .into_iter()
            .map(|(t, n)| format!("{} {}", t, n))
            .collect();

        if let Some(response) = method.response() {
            let callback = ctx.map_name(&format!("{}_Callback", method.name()), Role::Declaration)?;
            let results: Vec<String> = parameters(ctx, method, response)?
                .into_iter()
                .map(|(t, _)| t)
                .collect();
            callbacks.push(format!("using {} = std::function<void({})>;", callback, results.join(", ")));
            params.push(format!("{} callback", callback));
        }

        methods.push(format!("virtual void {}({}) = 0;", method_name, params.join(", ")));
    }

    let mut sections = vec!();
    if !ordinals.is_empty() {
        sections.push(ordinals.join("\n"));
    }
    if !callbacks.is_empty() {
        sections.push(callbacks.join("\n"));
    }
    sections.push(format!("virtual ~{}() = default;", name));
    if !methods.is_empty() {
        sections.push(methods.join("\n"));
    }

    Ok(Template::new(indoc!("
        class #NAME {
        public:
            #MEMBERS
        };"))
    .render(&[
        ("#NAME", name),
        ("#MEMBERS", sections.join("\n\n"))
    ]))
}
