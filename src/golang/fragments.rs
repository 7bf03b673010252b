use indoc::indoc;
use ir::ast::{CompoundIdentifier, Enum, Interface, Member, Method, Struct, Type};

use super::types;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::layout;
use crate::target::{Language, Role};
use crate::template::{Node, Template};

pub fn library(ctx: &Context<'_>, node: Node<'_>) -> Result<String> {
    let declarations = match node {
        Node::Library(declarations) => declarations,
        _ => return Err(Error::unsupported_declaration_kind(Language::Go, node.kind()))
    };
    let library = ctx.library();

    let mut imports = vec!();
    if ctx.uses_type(&|t| matches!(t, Type::Handle { .. })) || !library.interfaces().is_empty() {
        imports.push(String::from("import _zx \"syscall/zx\""));
    }
    if !library.interfaces().is_empty() {
        imports.push(String::from("import _bindings \"fidl/bindings\""));
    }
    for dependency in library.dependencies() {
        if ctx.uses_type(&|t| references_library(t, dependency.name())) {
            imports.push(format!(
                "import {} \"fidl/{}\"",
                types::package_alias(ctx, dependency.name())?,
                dependency.name().replace('.', "/")
            ));
        }
    }

    let mut sections = vec!(
        String::from("// Code generated by fidlgen; DO NOT EDIT."),
        format!("package {}", ctx.map_name(library.name(), Role::Library)?)
    );
    if !imports.is_empty() {
        sections.push(imports.join("\n"));
    }
    let body = ctx.render_all(declarations)?;
    if !body.is_empty() {
        sections.push(body);
    }

    return Ok((sections.join("\n\n") + "\n").replace("    ", "\t"));
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
        _ => return Err(Error::unsupported_declaration_kind(Language::Go, node.kind()))
    };
    let name = ctx.declaration_name(e.name())?;

    let mut constants = vec!();
    let mut cases = vec!();
    for member in e.members() {
        let member_name = ctx.map_name(member.name(), Role::EnumMember).map_err(|err| err.in_member(member.name()))?;
        constants.push(format!("{}{} {} = {}", name, member_name, name, member.value()));
        cases.push(
            indoc!("
                case #CONSTANT:
                    return \"#MEMBER\"")
            .replace("#CONSTANT", &format!("{}{}", name, member_name))
            .replace("#MEMBER", member.name())
        );
    }

    Ok(Template::new(indoc!("
        type #NAME #TYPE

        const (
            #CONSTANTS
        )

        func (x #NAME) String() string {
            switch x {
            #CASES
            }
            return \"Unknown\"
        }"))
    .render(&[
        ("#NAME", name),
        ("#TYPE", types::primitive(e.subtype()).to_string()),
        ("#CONSTANTS", constants.join("\n")),
        ("#CASES", cases.join("\n"))
    ]))
}

pub fn structure(ctx: &Context<'_>, node: Node<'_>) -> Result<String> {
    let s: &Struct = match node {
        Node::Struct(s) => s,
        _ => return Err(Error::unsupported_declaration_kind(Language::Go, node.kind()))
    };

    let mut fields = vec!();
    for member in s.members() {
        let field = struct_field(ctx, member).map_err(|e| e.in_member(member.name()))?;
        fields.push(field);
    }
    let shape = layout::struct_shape(ctx, s.members())?;

    Ok(Template::new(indoc!("
        type #NAME struct {
            #FIELDS
        }

        // Implements Payload.
        func (_ *#NAME) InlineAlignment() int {
            return #ALIGNMENT
        }

        // Implements Payload.
        func (_ *#NAME) InlineSize() int {
            return #SIZE
        }"))
    .render(&[
        ("#NAME", ctx.declaration_name(s.name())?),
        ("#FIELDS", fields.join("\n")),
        ("#ALIGNMENT", shape.alignment().to_string()),
        ("#SIZE", shape.size().to_string())
    ]))
}

fn struct_field(ctx: &Context<'_>, member: &Member) -> Result<String> {
    let field = format!("{} {}", ctx.map_name(member.name(), Role::Field)?, ctx.map_type(member.member_type())?);
    match types::field_tag(ctx, member.member_type())? {
        Some(tag) => Ok(format!("{} {}", field, tag)),
        None => Ok(field)
    }
}

/// Names and Go types of a method's parameters.
fn parameters(ctx: &Context<'_>, method: &Method, members: &[Member]) -> Result<Vec<(String, String)>> {
    let mut params = vec!();
    for member in members {
        let located = |e: Error| e.in_member(&format!("{}.{}", method.name(), member.name()));
        let name = ctx.map_name(member.name(), Role::Parameter).map_err(located)?;
        let param_type = ctx.map_type(member.member_type()).map_err(located)?;
        layout::type_shape(ctx, member.member_type()).map_err(located)?;
        params.push((name, param_type));
    }
    Ok(params)
}

/// Everything the interface sections need to know about one method.
struct MethodParts {
    name: String,
    ordinal: String,
    request_struct: String,
    response_struct: String,
    request: Vec<(String, String)>,
    response: Option<Vec<(String, String)>>,
    request_fields: Vec<String>,
    response_fields: Vec<String>
}

impl MethodParts {
    fn signature(&self) -> String {
        let params = self.request.iter()
            .map(|(name, t)| format!("{} {}", name, t))
            .collect::<Vec<String>>()
            .join(", ");
        let results = match &self.response {
            Some(response) if !response.is_empty() => format!(
                "({}, error)",
                response.iter().map(|(_, t)| t.clone()).collect::<Vec<String>>().join(", ")
            ),
            _ => String::from("error")
        };
        format!("{}({}) {}", self.name, params, results)
    }
}

fn method_parts(ctx: &Context<'_>, interface_name: &str, method: &Method) -> Result<MethodParts> {
    let request = parameters(ctx, method, method.request())?;
    let response = match method.response() {
        Some(members) => Some(parameters(ctx, method, members)?),
        None => None
    };
    let field_names = |members: &[Member]| -> Result<Vec<String>> {
        members.iter().map(|m| ctx.map_name(m.name(), Role::Field)).collect()
    };

    Ok(MethodParts {
        name: ctx.map_name(method.name(), Role::Method).map_err(|e| e.in_member(method.name()))?,
        ordinal: ctx.map_name(&format!("{}_{}_Ordinal", interface_name, method.name()), Role::Constant)?,
        request_struct: ctx.map_name(&format!("{}_{}_Request", interface_name, method.name()), Role::Declaration)?,
        response_struct: ctx.map_name(&format!("{}_{}_Response", interface_name, method.name()), Role::Declaration)?,
        request_fields: field_names(method.request())?,
        response_fields: match method.response() {
            Some(members) => field_names(members)?,
            None => vec!()
        },
        request,
        response
    })
}

/// Renders a method payload through the struct fragment.
fn payload(ctx: &Context<'_>, interface: &Interface, struct_name: &str, members: &[Member]) -> Result<String> {
    let identifier = CompoundIdentifier::new(&format!("{}/{}", interface.name().library(), struct_name));
    let s = Struct::new(identifier, members.to_vec());
    ctx.render(Node::Struct(&s))
}

fn proxy_method(interface_name: &str, parts: &MethodParts) -> String {
    let assignments = parts.request_fields.iter()
        .zip(parts.request.iter())
        .map(|(field, (param, _))| format!("{}: {},", field, param))
        .collect::<Vec<String>>()
        .join("\n");

    let (call, results) = match &parts.response {
        Some(_) => (
            format!(
                "resp_ := &{}{{}}\nerr_ := ((*_bindings.Proxy)(p)).Call({}, req_, resp_)",
                parts.response_struct, parts.ordinal
            ),
            parts.response_fields.iter()
                .map(|f| format!("resp_.{}", f))
                .chain(vec!(String::from("err_")))
                .collect::<Vec<String>>()
                .join(", ")
        ),
        None => (
            format!("err_ := ((*_bindings.Proxy)(p)).Send({}, req_)", parts.ordinal),
            String::from("err_")
        )
    };

    Template::new(indoc!("
        func (p *#INTERFACEInterface) #SIGNATURE {
            req_ := &#REQUEST{
                #ASSIGNMENTS
            }
            #CALL
            return #RESULTS
        }"))
    .render(&[
        ("#INTERFACE", interface_name.to_string()),
        ("#SIGNATURE", parts.signature()),
        ("#REQUEST", parts.request_struct.clone()),
        ("#ASSIGNMENTS", assignments),
        ("#CALL", call),
        ("#RESULTS", results)
    ])
}

fn dispatch_case(parts: &MethodParts) -> String {
    let args = parts.request_fields.iter()
        .map(|f| format!("in_.{}", f))
        .collect::<Vec<String>>()
        .join(", ");

    let body = match &parts.response {
        Some(response) => {
            let locals: Vec<String> = response.iter().map(|(name, _)| name.clone()).collect();
            let assignments = parts.response_fields.iter()
                .zip(locals.iter())
                .map(|(field, local)| format!("out_.{} = {}", field, local))
                .collect::<Vec<String>>();

            let mut lines = vec!(format!(
                "{} := s.Impl.{}({})",
                locals.iter().cloned().chain(vec!(String::from("err_"))).collect::<Vec<String>>().join(", "),
                parts.name,
                args
            ));
            lines.push(format!("out_ := {}{{}}", parts.response_struct));
            lines.extend(assignments);
            lines.push(String::from("return &out_, err_"));
            lines.join("\n")
        }
        None => format!("err_ := s.Impl.{}({})\nreturn nil, err_", parts.name, args)
    };

    Template::new(indoc!("
        case #ORDINAL:
            in_ := #REQUEST{}
            if err_ := _bindings.Unmarshal(b_, h_, &in_); err_ != nil {
                return nil, err_
            }
            #BODY"))
    .render(&[
        ("#ORDINAL", parts.ordinal.clone()),
        ("#REQUEST", parts.request_struct.clone()),
        ("#BODY", body)
    ])
}

pub fn interface(ctx: &Context<'_>, node: Node<'_>) -> Result<String> {
    let i: &Interface = match node {
        Node::Interface(i) => i,
        _ => return Err(Error::unsupported_declaration_kind(Language::Go, node.kind()))
    };
    let name = ctx.declaration_name(i.name())?;
    let raw_name = i.name().name();

    let mut methods = vec!();
    for method in i.methods() {
        methods.push(method_parts(ctx, raw_name, method)?);
    }

    let mut sections = vec!();

    sections.push(
        Template::new(indoc!("
            const (
                #ORDINALS
            )"))
        .render(&[(
            "#ORDINALS",
            i.methods().iter()
                .zip(methods.iter())
                .map(|(method, parts)| format!("{} uint32 = {}", parts.ordinal, method.ordinal()))
                .collect::<Vec<String>>()
                .join("\n")
        )])
    );

    for method in i.methods() {
        sections.push(payload(ctx, i, &format!("{}_{}_Request", raw_name, method.name()), method.request())?);
        if let Some(response) = method.response() {
            sections.push(payload(ctx, i, &format!("{}_{}_Response", raw_name, method.name()), response)?);
        }
    }

    sections.push(format!("type {}Interface _bindings.Proxy", name));
    for parts in &methods {
        sections.push(proxy_method(&name, parts));
    }

    sections.push(
        Template::new(indoc!("
            type #NAME interface {
                #METHODS
            }"))
        .render(&[
            ("#NAME", name.clone()),
            ("#METHODS", methods.iter().map(MethodParts::signature).collect::<Vec<String>>().join("\n"))
        ])
    );

    sections.push(
        Template::new(indoc!("
            type #NAMEInterfaceRequest _bindings.InterfaceRequest

            func New#NAMEInterfaceRequest() (#NAMEInterfaceRequest, *#NAMEInterface, error) {
                req, cli, err := _bindings.NewInterfaceRequest()
                return #NAMEInterfaceRequest(req), (*#NAMEInterface)(cli), err
            }"))
        .render(&[("#NAME", name.clone())])
    );

    sections.push(
        Template::new(indoc!("
            type #NAMEStub struct {
                Impl #NAME
            }

            func (s *#NAMEStub) Dispatch(ord uint32, b_ []byte, h_ []_zx.Handle) (_bindings.Payload, error) {
                switch ord {
                #CASES
                }
                return nil, _bindings.ErrUnknownOrdinal
            }"))
        .render(&[
            ("#NAME", name.clone()),
            ("#CASES", methods.iter().map(dispatch_case).collect::<Vec<String>>().join("\n"))
        ])
    );

    Ok(sections.join("\n\n"))
}
