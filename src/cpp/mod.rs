//! C++ bindings: one self-contained header per library.

mod fragments;
mod names;
mod types;

use crate::target::{Language, Target};
use crate::template::{FragmentKind, Registry};

pub use names::map_name;
pub use types::map_type;

pub static TARGET: Target = Target::new(Language::Cpp, types::map_type, names::map_name);

pub fn register(registry: &mut Registry) {
    registry
        .register(FragmentKind::Library, Language::Cpp, fragments::library)
        .register(FragmentKind::Enum, Language::Cpp, fragments::enumeration)
        .register(FragmentKind::Struct, Language::Cpp, fragments::structure)
        .register(FragmentKind::Interface, Language::Cpp, fragments::interface);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::order::order;
    use crate::template::Node;
    use insta::assert_snapshot;
    use ir::ast::{
        CompoundIdentifier, Enum, EnumMember, HandleSubtype, IntegerValue, Interface, Library, Member, Method,
        PrimitiveSubtype, Struct, Type
    };

    fn render(library: &Library) -> String {
        let ctx = Context::new(library, &TARGET, Registry::global());
        let declarations = order(library).unwrap();
        ctx.render(Node::Library(&declarations)).unwrap()
    }

    #[test]
    fn test_header() {
        let library = Library::new(
            String::from("fuchsia.io"),
            vec!(),
            vec!(Enum::new(
                CompoundIdentifier::new("fuchsia.io/SeekOrigin"),
                PrimitiveSubtype::Int8,
                vec!(
                    EnumMember::new(String::from("Start"), IntegerValue::Signed(0)),
                    EnumMember::new(String::from("End"), IntegerValue::Signed(-1))
                )
            )),
            vec!(Struct::new(
                CompoundIdentifier::new("fuchsia.io/NodeInfo"),
                vec!(
                    Member::new(String::from("vmo"), Type::nullable(Type::handle(HandleSubtype::Vmo))),
                    Member::new(String::from("name"), Type::nullable(Type::string(None)))
                )
            )),
            vec!(Interface::new(
                CompoundIdentifier::new("fuchsia.io/File"),
                vec!(
                    Method::new(
                        String::from("Seek"),
                        3,
                        vec!(Member::new(String::from("origin"), Type::named("fuchsia.io/SeekOrigin"))),
                        Some(vec!(Member::new(String::from("offset"), Type::primitive(PrimitiveSubtype::Uint64))))
                    ),
                    Method::new(String::from("Close"), 4, vec!(), None)
                )
            ))
        );

        assert_snapshot!(render(&library), @r###"
        // Code generated by fidlgen; DO NOT EDIT.

        #pragma once

        #include <array>
        #include <cstdint>
        #include <functional>
        #include <memory>
        #include <optional>
        #include <string>
        #include <vector>

        #include <lib/fidl/cpp/interface_handle.h>
        #include <lib/fidl/cpp/interface_request.h>
        #include <lib/zx/vmo.h>

        namespace fuchsia {
        namespace io {

        struct NodeInfo;
        class File;

        enum class SeekOrigin : int8_t {
            START = 0,
            END = -1,
        };

        struct NodeInfo {
            zx::vmo vmo;
            std::optional<std::string> name;
        };

        class File {
        public:
            static constexpr uint32_t kSeekOrdinal = 3u;
            static constexpr uint32_t kCloseOrdinal = 4u;

            using SeekCallback = std::function<void(uint64_t)>;

            virtual ~File() = default;

            virtual void Seek(SeekOrigin origin, SeekCallback callback) = 0;
            virtual void Close() = 0;
        };

        }  // namespace io
        }  // namespace fuchsia
        "###);
    }
}
