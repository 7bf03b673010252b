use getset::Getters;
use ir::ast::{HandleSubtype, Type};
use std::fmt;
use thiserror::Error;

use crate::target::Language;
use crate::template::FragmentKind;

/// Where in the source library a failure was found.
#[derive(Clone, Debug, Default, Getters, PartialEq, Eq)]
#[getset(get = "pub")]
pub struct Location {
    declaration: Option<String>,
    member: Option<String>
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("{target} has no nullable form of `{type_name}`")]
    UnsupportedNullability { target: Language, type_name: String },

    #[error("{target} cannot represent handles of subtype `{subtype}`")]
    UnsupportedHandleType { target: Language, subtype: HandleSubtype },

    #[error("{target} has no fragment for {kind} declarations")]
    UnsupportedDeclarationKind { target: Language, kind: FragmentKind },

    #[error("every disambiguation of `{identifier}` is reserved in {target}")]
    ReservedIdentifierUnresolvable { target: Language, identifier: String },

    #[error("declarations contain each other by value: {}", .declarations.join(" -> "))]
    CyclicValueContainment { declarations: Vec<String> },

    #[error("no wire shape is known for imported declaration `{declaration}`")]
    MissingTypeShape { declaration: String },

    #[error("inline size does not fit in 32 bits")]
    TypeShapeOverflow,

    #[error("`{identifier}` does not name a declaration of this library or its dependencies")]
    UnknownDeclaration { identifier: String }
}

#[derive(Clone, Debug, Error, Getters, PartialEq, Eq)]
#[error("{kind}{location}")]
#[getset(get = "pub")]
pub struct Error {
    kind: ErrorKind,
    location: Location
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error { kind, location: Location::default() }
    }

    pub fn unsupported_nullability(target: Language, inner: &Type) -> Error {
        Error::new(ErrorKind::UnsupportedNullability { target, type_name: inner.to_string() })
    }

    pub fn unsupported_declaration_kind(target: Language, kind: FragmentKind) -> Error {
        Error::new(ErrorKind::UnsupportedDeclarationKind { target, kind })
    }

    /// Records the enclosing declaration unless a more specific one is already known.
    pub fn in_declaration(mut self, declaration: &str) -> Error {
        if self.location.declaration.is_none() {
            self.location.declaration = Some(declaration.to_string());
        }
        self
    }

    /// Records the failing member. Ignored once the declaration is known, since the
    /// member then belongs to an inner declaration.
    pub fn in_member(mut self, member: &str) -> Error {
        if self.location.declaration.is_none() && self.location.member.is_none() {
            self.location.member = Some(member.to_string());
        }
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.declaration, &self.member) {
            (Some(d), Some(m)) => write!(f, " (in `{}`, member `{}`)", d, m),
            (Some(d), None) => write!(f, " (in `{}`)", d),
            (None, Some(m)) => write!(f, " (member `{}`)", m),
            (None, None) => Ok(())
        }
    }
}
