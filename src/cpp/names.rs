use crate::error::Result;
use crate::name::{avoid_reserved, Name};
use crate::target::{Language, Role};

const RESERVED: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char16_t", "char32_t", "class", "compl", "const", "constexpr",
    "const_cast", "continue", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "return", "short", "signed", "sizeof", "static", "static_assert",
    "static_cast", "struct", "switch", "template", "this", "thread_local", "throw", "true",
    "try", "typedef", "typeid", "typename", "union", "unsigned", "using", "virtual", "void",
    "volatile", "wchar_t", "while", "xor", "xor_eq",

    "callback"
];

pub fn map_name(identifier: &str, role: Role) -> Result<String> {
    if role == Role::Library {
        let mut components = vec!();
        for component in identifier.split('.') {
            components.push(avoid_reserved(Name::from(component).to_snake_case(), RESERVED, Language::Cpp)?);
        }
        return Ok(components.join("::"));
    }

    let name = Name::from(identifier);
    let candidate = match role {
        Role::Declaration | Role::Method => name.to_upper_camel_case(),
        Role::Field | Role::Parameter | Role::Library => name.to_snake_case(),
        Role::EnumMember => name.to_screaming_snake_case(),
        Role::Constant => name.with_prepended("k").to_lower_camel_case()
    };
    avoid_reserved(candidate, RESERVED, Language::Cpp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_casing_per_role() {
        assert_eq!("fuchsia::math", map_name("fuchsia.math", Role::Library).unwrap());
        assert_eq!("Point", map_name("point", Role::Declaration).unwrap());
        assert_eq!("max_value", map_name("maxValue", Role::Field).unwrap());
        assert_eq!("Add", map_name("add", Role::Method).unwrap());
        assert_eq!("DARK_RED", map_name("DarkRed", Role::EnumMember).unwrap());
        assert_eq!("max_value", map_name("MaxValue", Role::Parameter).unwrap());
        assert_eq!("kAddOrdinal", map_name("Add_Ordinal", Role::Constant).unwrap());
    }

    #[test]
    fn test_reserved() {
        assert_eq!("callback_", map_name("callback", Role::Parameter).unwrap());
        assert_eq!("fidl::test::union_", map_name("fidl.test.union", Role::Library).unwrap());
        assert_eq!("delete_", map_name("Delete", Role::Field).unwrap());
    }
}
