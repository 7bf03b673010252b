//! Rust bindings: one module of plain data types, interface markers, and traits.

mod fragments;
mod names;
mod types;

use crate::target::{Language, Target};
use crate::template::{FragmentKind, Registry};

pub use names::map_name;
pub use types::map_type;

pub static TARGET: Target = Target::new(Language::Rust, types::map_type, names::map_name);

pub fn register(registry: &mut Registry) {
    registry
        .register(FragmentKind::Library, Language::Rust, fragments::library)
        .register(FragmentKind::Enum, Language::Rust, fragments::enumeration)
        .register(FragmentKind::Struct, Language::Rust, fragments::structure)
        .register(FragmentKind::Interface, Language::Rust, fragments::interface);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::order::order;
    use crate::template::Node;
    use insta::assert_snapshot;
    use ir::ast::{
        CompoundIdentifier, Enum, HandleSubtype, Interface, Library, Member, Method, PrimitiveSubtype, Struct, Type
    };

    fn render(library: &Library) -> String {
        let ctx = Context::new(library, &TARGET, Registry::global());
        let declarations = order(library).unwrap();
        ctx.render(Node::Library(&declarations)).unwrap()
    }

    #[test]
    fn test_module() {
        let library = Library::new(
            String::from("fuchsia.sys"),
            vec!(),
            vec!(Enum::new(CompoundIdentifier::new("fuchsia.sys/Empty"), PrimitiveSubtype::Uint32, vec!())),
            vec!(Struct::new(
                CompoundIdentifier::new("fuchsia.sys/LaunchInfo"),
                vec!(
                    Member::new(String::from("url"), Type::string(None)),
                    Member::new(String::from("out"), Type::nullable(Type::handle(HandleSubtype::Socket)))
                )
            )),
            vec!(Interface::new(
                CompoundIdentifier::new("fuchsia.sys/Launcher"),
                vec!(
                    Method::new(
                        String::from("CreateComponent"),
                        1,
                        vec!(
                            Member::new(String::from("launch_info"), Type::named("fuchsia.sys/LaunchInfo")),
                            Member::new(String::from("controller"), Type::nullable(Type::request("fuchsia.sys/Launcher")))
                        ),
                        None
                    ),
                    Method::new(
                        String::from("Ping"),
                        2,
                        vec!(),
                        Some(vec!(
                            Member::new(String::from("ok"), Type::primitive(PrimitiveSubtype::Bool)),
                            Member::new(String::from("count"), Type::primitive(PrimitiveSubtype::Int64))
                        ))
                    )
                )
            ))
        );

        assert_snapshot!(render(&library), @r###"
        // Code generated by fidlgen; DO NOT EDIT.

        use fuchsia_zircon as zx;

        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum Empty {
        }

        #[derive(Debug, PartialEq)]
        pub struct LaunchInfo {
            pub url: String,
            pub out: Option<zx::Socket>,
        }

        pub struct LauncherMarker;

        impl LauncherMarker {
            pub const CREATE_COMPONENT_ORDINAL: u32 = 1;
            pub const PING_ORDINAL: u32 = 2;
        }

        pub trait Launcher {
            fn create_component(&mut self, launch_info: LaunchInfo, controller: Option<fidl::endpoints::ServerEnd<LauncherMarker>>);
            fn ping(&mut self) -> (bool, i64);
        }
        "###);
    }
}
