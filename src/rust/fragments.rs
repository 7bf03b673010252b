use indoc::indoc;
use ir::ast::{Enum, Interface, Member, Method, Struct, Type};

use super::types;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::target::{Language, Role};
use crate::template::{Node, Template};

pub fn library(ctx: &Context<'_>, node: Node<'_>) -> Result<String> {
    let declarations = match node {
        Node::Library(declarations) => declarations,
        _ => return Err(Error::unsupported_declaration_kind(Language::Rust, node.kind()))
    };

    let mut sections = vec!(String::from("// Code generated by fidlgen; DO NOT EDIT."));
    if ctx.uses_type(&|t| matches!(t, Type::Handle { .. })) {
        sections.push(String::from("use fuchsia_zircon as zx;"));
    }
    let body = ctx.render_all(declarations)?;
    if !body.is_empty() {
        sections.push(body);
    }

    return Ok(sections.join("\n\n") + "\n");
}

pub fn enumeration(ctx: &Context<'_>, node: Node<'_>) -> Result<String> {
    let e: &Enum = match node {
        Node::Enum(e) => e,
        _ => return Err(Error::unsupported_declaration_kind(Language::Rust, node.kind()))
    };

    let mut members = vec!();
    for member in e.members() {
        let name = ctx.map_name(member.name(), Role::EnumMember).map_err(|err| err.in_member(member.name()))?;
        members.push(format!("{} = {},", name, member.value()));
    }

    let repr = if members.is_empty() {
        String::new()
    } else {
        format!("#[repr({})]", types::primitive(e.subtype()))
    };

    Ok(Template::new(indoc!("
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        #REPR
        pub enum #NAME {
            #MEMBERS
        }"))
    .render(&[
        ("#REPR", repr),
        ("#NAME", ctx.declaration_name(e.name())?),
        ("#MEMBERS", members.join("\n"))
    ]))
}

pub fn structure(ctx: &Context<'_>, node: Node<'_>) -> Result<String> {
    let s: &Struct = match node {
        Node::Struct(s) => s,
        _ => return Err(Error::unsupported_declaration_kind(Language::Rust, node.kind()))
    };

    let mut fields = vec!();
    for member in s.members() {
        let field = format!(
            "pub {}: {},",
            ctx.map_name(member.name(), Role::Field).map_err(|e| e.in_member(member.name()))?,
            ctx.map_type(member.member_type()).map_err(|e| e.in_member(member.name()))?
        );
        fields.push(field);
    }

    Ok(Template::new(indoc!("
        #[derive(Debug, PartialEq)]
        pub struct #NAME {
            #FIELDS
        }"))
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
            ctx.map_name(member.name(), Role::Parameter).map_err(located)?,
            ctx.map_type(member.member_type()).map_err(located)?
        ));
    }
    Ok(params)
}

fn return_type(results: Option<Vec<(String, String)>>) -> String {
    match results {
        None => String::new(),
        Some(results) => match results.len() {
            0 => String::from(" -> ()"),
            1 => format!(" -> {}", results[0].1),
            _ => format!(
                " -> ({})",
                results.into_iter().map(|(_, t)| t).collect::<Vec<String>>().join(", ")
            )
        }
    }
}

pub fn interface(ctx: &Context<'_>, node: Node<'_>) -> Result<String> {
    let i: &Interface = match node {
        Node::Interface(i) => i,
        _ => return Err(Error::unsupported_declaration_kind(Language::Rust, node.kind()))
    };
    let name = ctx.declaration_name(i.name())?;

    let mut ordinals = vec!();
    let mut methods = vec!();
    for method in i.methods() {
        ordinals.push(format!(
            "pub const {}: u32 = {};",
            ctx.map_name(&format!("{}_Ordinal", method.name()), Role::Constant)?,
            method.ordinal()
        ));

        let params = parameters(ctx, method, method.request())?
            .into_iter()
            .map(|(n, t)| format!(", {}: {}", n, t))
            .collect::<Vec<String>>()
            .join("");
        let results = match method.response() {
            Some(response) => Some(parameters(ctx, method, response)?),
            None => None
        };

        methods.push(format!(
            "fn {}(&mut self{}){};",
            ctx.map_name(method.name(), Role::Method).map_err(|e| e.in_member(method.name()))?,
            params,
            return_type(results)
        ));
    }

    Ok(Template::new(indoc!("
        pub struct #NAMEMarker;

        impl #NAMEMarker {
            #ORDINALS
        }

        pub trait #NAME {
            #METHODS
        }"))
    .render(&[
        ("#NAME", name),
        ("#ORDINALS", ordinals.join("\n")),
        ("#METHODS", methods.join("\n"))
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_type() {
        let t = |s: &str| (String::from("x"), String::from(s));
        assert_eq!("", return_type(None));
        assert_eq!(" -> ()", return_type(Some(vec!())));
        assert_eq!(" -> u32", return_type(Some(vec!(t("u32")))));
        assert_eq!(" -> (u32, String)", return_type(Some(vec!(t("u32"), t("String")))));
    }
}
