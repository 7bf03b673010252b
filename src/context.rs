use getset::{CopyGetters, Getters};
use ir::ast::{CompoundIdentifier, DeclarationKind, Enum, ExternalDeclaration, Interface, Library, Struct, Type};
use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::{Error, ErrorKind, Result};
use crate::layout::{self, TypeShape};
use crate::order::DeclarationRef;
use crate::target::{Language, Role, Target};
use crate::template::{Node, Registry};

/// What a compound identifier resolves to.
#[derive(Clone, Copy, Debug)]
pub enum Declaration<'a> {
    Enum(&'a Enum),
    Struct(&'a Struct),
    Interface(&'a Interface),

    /// Declared by a dependency. Only its kind and wire shape are known.
    External(&'a ExternalDeclaration)
}

impl<'a> Declaration<'a> {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Enum(_) => DeclarationKind::Enum,
            Declaration::Struct(_) => DeclarationKind::Struct,
            Declaration::Interface(_) => DeclarationKind::Interface,
            Declaration::External(e) => e.kind()
        }
    }
}

/// Everything a fragment may consult while rendering one library for one target.
#[derive(Getters, CopyGetters)]
pub struct Context<'a> {
    #[getset(get_copy = "pub")]
    library: &'a Library,

    #[getset(get_copy = "pub")]
    target: &'static Target,

    #[getset(get_copy = "pub")]
    registry: &'a Registry,

    #[getset(get = "pub")]
    declarations: BTreeMap<&'a str, Declaration<'a>>,

    shapes: RefCell<BTreeMap<&'a str, TypeShape>>
}

impl<'a> Context<'a> {
    pub fn new(library: &'a Library, target: &'static Target, registry: &'a Registry) -> Context<'a> {
        let mut declarations = BTreeMap::new();

        for dependency in library.dependencies() {
            for (identifier, declaration) in dependency.declarations() {
                declarations.insert(identifier.as_str(), Declaration::External(declaration));
            }
        }
        for e in library.enums() {
            declarations.insert(e.name().as_str(), Declaration::Enum(e));
        }
        for s in library.structs() {
            declarations.insert(s.name().as_str(), Declaration::Struct(s));
        }
        for i in library.interfaces() {
            declarations.insert(i.name().as_str(), Declaration::Interface(i));
        }

        Context { library, target, registry, declarations, shapes: RefCell::new(BTreeMap::new()) }
    }

    pub fn language(&self) -> Language {
        self.target.language()
    }

    pub fn lookup(&self, identifier: &CompoundIdentifier) -> Result<Declaration<'a>> {
        match self.declarations.get(identifier.as_str()) {
            Some(declaration) => Ok(*declaration),
            None => Err(Error::new(ErrorKind::UnknownDeclaration { identifier: identifier.to_string() }))
        }
    }

    /// Whether `identifier` is declared by the library being generated.
    pub fn is_local(&self, identifier: &CompoundIdentifier) -> bool {
        identifier.library() == self.library.name()
    }

    pub fn map_type(&self, t: &Type) -> Result<String> {
        self.target.map_type(self, t)
    }

    pub fn map_name(&self, identifier: &str, role: Role) -> Result<String> {
        self.target.map_name(identifier, role)
    }

    /// Maps the unqualified part of a declaration name.
    pub fn declaration_name(&self, identifier: &CompoundIdentifier) -> Result<String> {
        self.map_name(identifier.name(), Role::Declaration)
    }

    /// The wire shape of a local struct, laid out on first request and remembered after.
    pub fn struct_shape(&self, s: &'a Struct) -> Result<TypeShape> {
        let known = self.shapes.borrow().get(s.name().as_str()).copied();
        if let Some(shape) = known {
            return Ok(shape);
        }

        let shape = layout::struct_shape(self, s.members())?;
        self.shapes.borrow_mut().insert(s.name().as_str(), shape);
        Ok(shape)
    }

    /// Whether any struct field or method parameter of the library uses a type matching `f`.
    pub fn uses_type(&self, f: &dyn Fn(&Type) -> bool) -> bool {
        let mut found = false;
        self.library.visit_types(&mut |t| found = found || f(t));
        found
    }

    /// Renders `node` with the fragment registered for its kind and this target.
    pub fn render(&self, node: Node<'_>) -> Result<String> {
        let fragment = self.registry
            .fragment(node.kind(), self.language())
            .ok_or_else(|| Error::unsupported_declaration_kind(self.language(), node.kind()))?;

        match node.name() {
            Some(name) => {
                tracing::debug!(language = %self.language(), kind = %node.kind(), name, "rendering declaration");
                fragment(self, node).map_err(|e| e.in_declaration(name))
            }
            None => fragment(self, node)
        }
    }

    /// Renders the declarations in order, separated by one blank line.
    pub fn render_all(&self, declarations: &[DeclarationRef<'_>]) -> Result<String> {
        let mut sections = vec!();
        for declaration in declarations {
            sections.push(self.render(declaration.node())?);
        }
        Ok(sections.join("\n\n"))
    }
}
