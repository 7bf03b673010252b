use getset::{CopyGetters, Getters};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// A declaration name qualified by its library, e.g. `fuchsia.math/Point`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct CompoundIdentifier(String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveSubtype {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSubtype {
    Handle,
    Process,
    Thread,
    Vmo,
    Channel,
    Event,
    Port,
    Interrupt,
    Log,
    Socket,
    Resource,
    Eventpair,
    Job,
    Vmar,
    Fifo,
    Guest,
    Timer
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Primitive {
        subtype: PrimitiveSubtype
    },
    Named {
        identifier: CompoundIdentifier
    },
    Nullable {
        inner: Box<Type>
    },
    Vector {
        element_type: Box<Type>,
        #[serde(default)]
        maybe_element_count: Option<u32>
    },
    String {
        #[serde(default)]
        maybe_element_count: Option<u32>
    },
    Handle {
        subtype: HandleSubtype
    },
    Array {
        element_type: Box<Type>,
        element_count: u32
    },
    Request {
        subtype: CompoundIdentifier
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    Enum,
    Struct,
    Interface
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IntegerValue {
    Signed(i64),
    Unsigned(u64)
}

#[derive(Clone, Constructor, Getters, CopyGetters, Debug, PartialEq, Deserialize)]
pub struct EnumMember {
    #[getset(get = "pub")]
    name: String,

    #[getset(get_copy = "pub")]
    value: IntegerValue
}

#[derive(Clone, Constructor, Getters, CopyGetters, Debug, PartialEq, Deserialize)]
pub struct Enum {
    #[getset(get = "pub")]
    name: CompoundIdentifier,

    #[getset(get_copy = "pub")]
    #[serde(rename = "type", default = "default_enum_subtype")]
    subtype: PrimitiveSubtype,

    #[getset(get = "pub")]
    members: Vec<EnumMember>
}

/// A struct field or a method parameter.
#[derive(Clone, Constructor, Getters, Debug, PartialEq, Deserialize)]
#[getset(get = "pub")]
pub struct Member {
    name: String,

    #[serde(rename = "type")]
    member_type: Type
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq, Deserialize)]
#[getset(get = "pub")]
pub struct Struct {
    name: CompoundIdentifier,
    members: Vec<Member>
}

#[derive(Clone, Constructor, Getters, CopyGetters, Debug, PartialEq, Deserialize)]
pub struct Method {
    #[getset(get = "pub")]
    name: String,

    #[getset(get_copy = "pub")]
    ordinal: u32,

    #[getset(get = "pub")]
    #[serde(default)]
    request: Vec<Member>,

    /// `None` for one-way methods.
    #[getset(get = "pub")]
    #[serde(default)]
    response: Option<Vec<Member>>
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq, Deserialize)]
#[getset(get = "pub")]
pub struct Interface {
    name: CompoundIdentifier,
    methods: Vec<Method>
}

#[derive(Clone, Constructor, Getters, CopyGetters, Debug, PartialEq, Deserialize)]
pub struct ExternalDeclaration {
    #[getset(get_copy = "pub")]
    kind: DeclarationKind,

    #[getset(get_copy = "pub")]
    #[serde(default)]
    size: Option<u32>,

    #[getset(get_copy = "pub")]
    #[serde(default)]
    alignment: Option<u32>
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq, Deserialize)]
#[getset(get = "pub")]
pub struct Dependency {
    name: String,

    #[serde(default)]
    declarations: BTreeMap<CompoundIdentifier, ExternalDeclaration>
}

#[derive(Clone, Constructor, Getters, Debug, PartialEq, Deserialize)]
#[getset(get = "pub")]
pub struct Library {
    name: String,

    #[serde(default)]
    dependencies: Vec<Dependency>,

    #[serde(default)]
    enums: Vec<Enum>,

    #[serde(default)]
    structs: Vec<Struct>,

    #[serde(default)]
    interfaces: Vec<Interface>
}

fn default_enum_subtype() -> PrimitiveSubtype {
    PrimitiveSubtype::Uint32
}

//
// Misc Impls
//

impl CompoundIdentifier {
    pub fn new(identifier: &str) -> CompoundIdentifier {
        CompoundIdentifier(identifier.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The owning library, or the empty string for an unqualified name.
    pub fn library(&self) -> &str {
        match self.0.rfind('/') {
            Some(index) => &self.0[..index],
            None => ""
        }
    }

    pub fn name(&self) -> &str {
        match self.0.rfind('/') {
            Some(index) => &self.0[index + 1..],
            None => &self.0
        }
    }
}

impl fmt::Display for CompoundIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PrimitiveSubtype {
    pub fn as_str(self) -> &'static str {
        match self {
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

    pub fn bit_width(self) -> u32 {
        match self {
            PrimitiveSubtype::Bool | PrimitiveSubtype::Int8 | PrimitiveSubtype::Uint8 => 8,
            PrimitiveSubtype::Int16 | PrimitiveSubtype::Uint16 => 16,
            PrimitiveSubtype::Int32 | PrimitiveSubtype::Uint32 | PrimitiveSubtype::Float32 => 32,
            PrimitiveSubtype::Int64 | PrimitiveSubtype::Uint64 | PrimitiveSubtype::Float64 => 64
        }
    }

    pub fn is_signed(self) -> bool {
        match self {
            PrimitiveSubtype::Int8 |
            PrimitiveSubtype::Int16 |
            PrimitiveSubtype::Int32 |
            PrimitiveSubtype::Int64 |
            PrimitiveSubtype::Float32 |
            PrimitiveSubtype::Float64 => true,
            _ => false
        }
    }

    pub fn is_float(self) -> bool {
        self == PrimitiveSubtype::Float32 || self == PrimitiveSubtype::Float64
    }
}

impl fmt::Display for PrimitiveSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HandleSubtype {
    pub fn as_str(self) -> &'static str {
        match self {
            HandleSubtype::Handle => "handle",
            HandleSubtype::Process => "process",
            HandleSubtype::Thread => "thread",
            HandleSubtype::Vmo => "vmo",
            HandleSubtype::Channel => "channel",
            HandleSubtype::Event => "event",
            HandleSubtype::Port => "port",
            HandleSubtype::Interrupt => "interrupt",
            HandleSubtype::Log => "log",
            HandleSubtype::Socket => "socket",
            HandleSubtype::Resource => "resource",
            HandleSubtype::Eventpair => "eventpair",
            HandleSubtype::Job => "job",
            HandleSubtype::Vmar => "vmar",
            HandleSubtype::Fifo => "fifo",
            HandleSubtype::Guest => "guest",
            HandleSubtype::Timer => "timer"
        }
    }
}

impl fmt::Display for HandleSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationKind::Enum => f.write_str("enum"),
            DeclarationKind::Struct => f.write_str("struct"),
            DeclarationKind::Interface => f.write_str("interface")
        }
    }
}

impl IntegerValue {
    pub fn is_negative(self) -> bool {
        match self {
            IntegerValue::Signed(v) => v < 0,
            IntegerValue::Unsigned(_) => false
        }
    }
}

impl fmt::Display for IntegerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegerValue::Signed(v) => write!(f, "{}", v),
            IntegerValue::Unsigned(v) => write!(f, "{}", v)
        }
    }
}

impl Type {
    pub fn primitive(subtype: PrimitiveSubtype) -> Type {
        Type::Primitive { subtype }
    }

    pub fn named(identifier: &str) -> Type {
        Type::Named { identifier: CompoundIdentifier::new(identifier) }
    }

    pub fn nullable(inner: Type) -> Type {
        Type::Nullable { inner: Box::new(inner) }
    }

    pub fn vector(element_type: Type, maybe_element_count: Option<u32>) -> Type {
        Type::Vector { element_type: Box::new(element_type), maybe_element_count }
    }

    pub fn string(maybe_element_count: Option<u32>) -> Type {
        Type::String { maybe_element_count }
    }

    pub fn handle(subtype: HandleSubtype) -> Type {
        Type::Handle { subtype }
    }

    pub fn array(element_type: Type, element_count: u32) -> Type {
        Type::Array { element_type: Box::new(element_type), element_count }
    }

    pub fn request(subtype: &str) -> Type {
        Type::Request { subtype: CompoundIdentifier::new(subtype) }
    }

    /// Visits this type and every type nested inside it, outermost first.
    pub fn visit(&self, f: &mut dyn FnMut(&Type)) {
        f(self);
        match self {
            Type::Nullable { inner } => inner.visit(f),
            Type::Vector { element_type, .. } | Type::Array { element_type, .. } => element_type.visit(f),
            _ => ()
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive { subtype } => write!(f, "{}", subtype),
            Type::Named { identifier } => write!(f, "{}", identifier),
            Type::Nullable { inner } => write!(f, "{}?", inner),
            Type::Vector { element_type, maybe_element_count: Some(n) } => write!(f, "vector<{}>:{}", element_type, n),
            Type::Vector { element_type, maybe_element_count: None } => write!(f, "vector<{}>", element_type),
            Type::String { maybe_element_count: Some(n) } => write!(f, "string:{}", n),
            Type::String { maybe_element_count: None } => write!(f, "string"),
            Type::Handle { subtype: HandleSubtype::Handle } => write!(f, "handle"),
            Type::Handle { subtype } => write!(f, "handle<{}>", subtype),
            Type::Array { element_type, element_count } => write!(f, "array<{}>:{}", element_type, element_count),
            Type::Request { subtype } => write!(f, "request<{}>", subtype)
        }
    }
}

impl Library {
    /// Visits every type used by a struct field or a method parameter.
    pub fn visit_types(&self, f: &mut dyn FnMut(&Type)) {
        for s in &self.structs {
            for member in &s.members {
                member.member_type.visit(f);
            }
        }
        for interface in &self.interfaces {
            for method in &interface.methods {
                for member in &method.request {
                    member.member_type.visit(f);
                }
                for member in method.response.iter().flatten() {
                    member.member_type.visit(f);
                }
            }
        }
    }
}
