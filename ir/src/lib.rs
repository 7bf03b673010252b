#[macro_use] extern crate derive_more;

pub mod ast;

use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to read the IR: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed IR: {0}")]
    Json(#[from] serde_json::Error)
}

pub fn parse(text: &str) -> Result<ast::Library, Error> {
    Ok(serde_json::from_str(text)?)
}

pub fn read_library(reader: &mut dyn Read) -> Result<ast::Library, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ast::*;
    use pretty_assertions::assert_eq;

    const CALC: &str = r#"{
        "name": "fuchsia.math",
        "dependencies": [
            {
                "name": "fuchsia.mem",
                "declarations": {
                    "fuchsia.mem/Buffer": { "kind": "struct", "size": 16, "alignment": 8 }
                }
            }
        ],
        "enums": [
            {
                "name": "fuchsia.math/Color",
                "members": [
                    { "name": "RED", "value": 1 },
                    { "name": "HUGE", "value": 18446744073709551615 }
                ]
            }
        ],
        "structs": [
            {
                "name": "fuchsia.math/Point",
                "members": [
                    { "name": "x", "type": { "kind": "primitive", "subtype": "uint32" } },
                    { "name": "label", "type": { "kind": "nullable", "inner": { "kind": "string", "maybe_element_count": 32 } } }
                ]
            }
        ],
        "interfaces": [
            {
                "name": "fuchsia.math/Calc",
                "methods": [
                    {
                        "name": "Add",
                        "ordinal": 1,
                        "request": [
                            { "name": "a", "type": { "kind": "named", "identifier": "fuchsia.math/Point" } }
                        ],
                        "response": []
                    },
                    { "name": "Reset", "ordinal": 2 }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_library() {
        let library = parse(CALC).unwrap();

        assert_eq!("fuchsia.math", library.name());
        assert_eq!(1, library.dependencies().len());
        assert_eq!(
            Some(DeclarationKind::Struct),
            library.dependencies()[0]
                .declarations()
                .get(&CompoundIdentifier::new("fuchsia.mem/Buffer"))
                .map(ExternalDeclaration::kind)
        );

        let color = &library.enums()[0];
        assert_eq!(PrimitiveSubtype::Uint32, color.subtype());
        assert_eq!(IntegerValue::Signed(1), color.members()[0].value());
        assert_eq!(IntegerValue::Unsigned(u64::MAX), color.members()[1].value());

        let point = &library.structs()[0];
        assert_eq!(
            &Type::nullable(Type::string(Some(32))),
            point.members()[1].member_type()
        );

        let calc = &library.interfaces()[0];
        assert_eq!(Some(vec!()), calc.methods()[0].response().clone());
        assert_eq!(None, *calc.methods()[1].response());
        assert!(calc.methods()[1].request().is_empty());
    }

    #[test]
    fn test_read_library_from_reader() {
        let library = read_library(&mut CALC.as_bytes()).unwrap();
        assert_eq!(1, library.structs().len());
    }

    #[test]
    fn test_malformed_ir_is_an_error() {
        let error = parse(r#"{ "name": "x", "structs": [ { "name": 3 } ] }"#).unwrap_err();
        assert!(matches!(error, Error::Json(_)));
    }
}
