use crate::error::Result;
use crate::name::{avoid_reserved, Name};
use crate::target::{Language, Role};

const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while",

    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof",
    "unsized", "virtual", "yield"
];

pub fn map_name(identifier: &str, role: Role) -> Result<String> {
    let name = Name::from(identifier);
    let candidate = match role {
        Role::Library => {
            let components = identifier.split('.')
                .map(|c| Name::from(c).to_snake_case())
                .collect::<Vec<String>>();
            format!("fidl_{}", components.join("_"))
        }
        Role::Declaration | Role::EnumMember => name.to_upper_camel_case(),
        Role::Field | Role::Method | Role::Parameter => name.to_snake_case(),
        Role::Constant => name.to_screaming_snake_case()
    };
    avoid_reserved(candidate, RESERVED, Language::Rust)
}
