use crate::error::Result;
use crate::name::{avoid_reserved, Name};
use crate::target::{Language, Role};

/// Go keywords, predeclared identifiers, and the receivers, arguments and payload methods
/// the bindings declare themselves.
const RESERVED: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",

    "bool", "byte", "complex64", "complex128", "error", "float32", "float64", "int", "int8",
    "int16", "int32", "int64", "rune", "string", "uint", "uint8", "uint16", "uint32", "uint64",
    "uintptr", "true", "false", "iota", "nil", "append", "cap", "close", "complex", "copy",
    "delete", "imag", "len", "make", "new", "panic", "print", "println", "real", "recover",

    "p", "s", "ord",
    "InlineAlignment", "InlineSize"
];

pub fn map_name(identifier: &str, role: Role) -> Result<String> {
    let name = Name::from(identifier);
    let candidate = match role {
        Role::Library => identifier.rsplit('.').next().unwrap_or(identifier).to_lowercase(),
        Role::Parameter => name.to_lower_camel_case(),
        Role::Declaration | Role::Field | Role::Method | Role::EnumMember | Role::Constant => name.to_upper_camel_case()
    };
    avoid_reserved(candidate, RESERVED, Language::Go)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_casing_per_role() {
        assert_eq!("math", map_name("fuchsia.math", Role::Library).unwrap());
        assert_eq!("Point", map_name("Point", Role::Declaration).unwrap());
        assert_eq!("MaxValue", map_name("max_value", Role::Field).unwrap());
        assert_eq!("Add", map_name("add", Role::Method).unwrap());
        assert_eq!("Red", map_name("RED", Role::EnumMember).unwrap());
        assert_eq!("maxValue", map_name("max_value", Role::Parameter).unwrap());
        assert_eq!("CalcAddOrdinal", map_name("Calc_Add_Ordinal", Role::Constant).unwrap());
    }

    #[test]
    fn test_reserved_parameters() {
        assert_eq!("type_", map_name("type", Role::Parameter).unwrap());
        assert_eq!("p_", map_name("p", Role::Parameter).unwrap());
        assert_eq!("func_", map_name("fuchsia.func", Role::Library).unwrap());
    }

    #[test]
    fn test_payload_methods_are_reserved() {
        assert_eq!("InlineSize_", map_name("inline_size", Role::Field).unwrap());
        assert_eq!("InlineAlignment_", map_name("InlineAlignment", Role::Field).unwrap());
        assert_eq!("inlineSize", map_name("inline_size", Role::Parameter).unwrap());
    }
}
