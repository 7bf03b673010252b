use ir::ast::Type;
use std::fmt;

use crate::context::Context;
use crate::error::Result;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum Language {
    #[display(fmt = "Go")]
    Go,

    #[display(fmt = "C++")]
    Cpp,

    #[display(fmt = "Rust")]
    Rust
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Go, Language::Cpp, Language::Rust];

    pub fn file_extension(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Cpp => "h",
            Language::Rust => "rs"
        }
    }
}

/// What a mapped identifier is used as. Each role has its own casing per target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Library,
    Declaration,
    Field,
    Method,
    EnumMember,
    Parameter,
    Constant
}

pub type TypeMapper = fn(&Context<'_>, &Type) -> Result<String>;
pub type NameMapper = fn(&str, Role) -> Result<String>;

/// The per-language half of code generation that is not a template fragment.
pub struct Target {
    language: Language,
    type_mapper: TypeMapper,
    name_mapper: NameMapper
}

impl Target {
    pub const fn new(language: Language, type_mapper: TypeMapper, name_mapper: NameMapper) -> Target {
        Target { language, type_mapper, name_mapper }
    }

    pub fn for_language(language: Language) -> &'static Target {
        match language {
            Language::Go => &crate::golang::TARGET,
            Language::Cpp => &crate::cpp::TARGET,
            Language::Rust => &crate::rust::TARGET
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn map_type(&self, ctx: &Context<'_>, t: &Type) -> Result<String> {
        (self.type_mapper)(ctx, t)
    }

    pub fn map_name(&self, identifier: &str, role: Role) -> Result<String> {
        (self.name_mapper)(identifier, role)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target").field("language", &self.language).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_display() {
        let names: Vec<String> = Language::ALL.iter().map(|l| l.to_string()).collect();
        assert_eq!(vec!("Go", "C++", "Rust"), names);
    }

    #[test]
    fn test_target_bundles_match_their_language() {
        for language in Language::ALL.iter() {
            assert_eq!(*language, Target::for_language(*language).language());
        }
    }

    #[test]
    fn test_language_from_flag() {
        use clap::ValueEnum;
        assert_eq!(Language::Cpp, Language::from_str("cpp", false).unwrap());
        assert_eq!(Language::Go, Language::from_str("go", false).unwrap());
    }
}
