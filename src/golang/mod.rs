//! Go bindings: one `.go` file per library, written against `syscall/zx` and
//! `fidl/bindings`.

mod fragments;
mod names;
mod types;

use crate::target::{Language, Target};
use crate::template::{FragmentKind, Registry};

pub use names::map_name;
pub use types::map_type;

pub static TARGET: Target = Target::new(Language::Go, types::map_type, names::map_name);

pub fn register(registry: &mut Registry) {
    registry
        .register(FragmentKind::Library, Language::Go, fragments::library)
        .register(FragmentKind::Enum, Language::Go, fragments::enumeration)
        .register(FragmentKind::Struct, Language::Go, fragments::structure)
        .register(FragmentKind::Interface, Language::Go, fragments::interface);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::order;
    use crate::context::Context;
    use crate::template::Node;
    use insta::assert_snapshot;
    use ir::ast::{CompoundIdentifier, Enum, EnumMember, IntegerValue, Library, Member, PrimitiveSubtype, Struct, Type};

    fn render(library: &Library) -> String {
        let ctx = Context::new(library, &TARGET, Registry::global());
        let declarations = order(library).unwrap();
        ctx.render(Node::Library(&declarations)).unwrap()
    }

    #[test]
    fn test_enum_and_struct() {
        let library = Library::new(
            String::from("fuchsia.color"),
            vec!(),
            vec!(Enum::new(
                CompoundIdentifier::new("fuchsia.color/Channel"),
                PrimitiveSubtype::Uint8,
                vec!(
                    EnumMember::new(String::from("RED"), IntegerValue::Signed(1)),
                    EnumMember::new(String::from("GREEN"), IntegerValue::Signed(2))
                )
            )),
            vec!(Struct::new(
                CompoundIdentifier::new("fuchsia.color/Pixel"),
                vec!(
                    Member::new(String::from("channel"), Type::named("fuchsia.color/Channel")),
                    Member::new(String::from("label"), Type::string(Some(8)))
                )
            )),
            vec!()
        );

        assert_snapshot!(render(&library), @r###"
        // Code generated by fidlgen; DO NOT EDIT.

        package color

        type Channel uint8

        const (
        	ChannelRed Channel = 1
        	ChannelGreen Channel = 2
        )

        func (x Channel) String() string {
        	switch x {
        	case ChannelRed:
        		return "RED"
        	case ChannelGreen:
        		return "GREEN"
        	}
        	return "Unknown"
        }

        type Pixel struct {
        	Channel Channel
        	Label string `fidl:"8"`
        }

        // Implements Payload.
        func (_ *Pixel) InlineAlignment() int {
        	return 8
        }

        // Implements Payload.
        func (_ *Pixel) InlineSize() int {
        	return 24
        }
        "###);
    }
}
