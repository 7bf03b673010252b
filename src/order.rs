use ir::ast::{Enum, Interface, Library, Struct, Type};
use multimap::MultiMap;
use std::collections::BTreeMap;

use crate::error::{Error, ErrorKind, Result};
use crate::template::Node;

/// A declaration of the library being generated, in emission order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeclarationRef<'a> {
    Enum(&'a Enum),
    Struct(&'a Struct),
    Interface(&'a Interface)
}

impl<'a> DeclarationRef<'a> {
    pub fn name(&self) -> &'a str {
        match *self {
            DeclarationRef::Enum(e) => e.name().as_str(),
            DeclarationRef::Struct(s) => s.name().as_str(),
            DeclarationRef::Interface(i) => i.name().as_str()
        }
    }

    pub fn node(&self) -> Node<'a> {
        match *self {
            DeclarationRef::Enum(e) => Node::Enum(e),
            DeclarationRef::Struct(s) => Node::Struct(s),
            DeclarationRef::Interface(i) => Node::Interface(i)
        }
    }
}

/// Orders enums and structs so every declaration follows the ones it contains by value,
/// keeping source order wherever no containment forces otherwise. Interfaces come last.
#[tracing::instrument(skip(library), fields(library = %library.name()))]
pub fn order(library: &Library) -> Result<Vec<DeclarationRef<'_>>> {
    let mut value_types: BTreeMap<&str, DeclarationRef> = BTreeMap::new();
    for e in library.enums() {
        value_types.insert(e.name().as_str(), DeclarationRef::Enum(e));
    }
    for s in library.structs() {
        value_types.insert(s.name().as_str(), DeclarationRef::Struct(s));
    }

    let mut deps: MultiMap<&str, &str> = MultiMap::new();
    for s in library.structs() {
        for member in s.members() {
            for dep in contained_by_value(member.member_type()) {
                if value_types.contains_key(dep) {
                    deps.insert(s.name().as_str(), dep);
                }
            }
        }
    }

    let mut sorted: Vec<&str> = vec!();
    let source_order = library.enums().iter()
        .map(|e| e.name().as_str())
        .chain(library.structs().iter().map(|s| s.name().as_str()));
    for name in source_order {
        insert_names_sorted_by_dependencies(&mut sorted, name, &deps, vec!())?;
    }

    let mut result: Vec<DeclarationRef> = sorted.iter()
        .filter_map(|name| value_types.get(name).copied())
        .collect();
    result.extend(library.interfaces().iter().map(DeclarationRef::Interface));

    tracing::debug!(count = result.len(), "ordered declarations");
    Ok(result)
}

/// The named types stored inline by a value of type `t`.
fn contained_by_value(t: &Type) -> Vec<&str> {
    match t {
        Type::Named { identifier } => vec!(identifier.as_str()),
        Type::Array { element_type, .. } => contained_by_value(element_type),
        _ => vec!()
    }
}

fn insert_names_sorted_by_dependencies<'a>(
    dst: &mut Vec<&'a str>,
    name: &'a str,
    deps: &MultiMap<&'a str, &'a str>,
    queue: Vec<&'a str>
) -> Result<()> {
    if dst.contains(&name) {
        return Ok(());
    }

    if let Some(pos) = queue.iter().position(|queued| *queued == name) {
        return Err(Error::new(ErrorKind::CyclicValueContainment {
            declarations: queue[pos..].iter().map(|n| n.to_string()).collect()
        }));
    }

    if let Some(dep_list) = deps.get_vec(name) {
        for dep in dep_list {
            let mut new_queue = queue.clone();
            new_queue.push(name);
            insert_names_sorted_by_dependencies(dst, *dep, deps, new_queue)?;
        }
    }

    dst.push(name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ir::ast::{CompoundIdentifier, Member, Method, PrimitiveSubtype};

    fn field(name: &str, t: Type) -> Member {
        Member::new(String::from(name), t)
    }

    fn structure(name: &str, members: Vec<Member>) -> Struct {
        Struct::new(CompoundIdentifier::new(&format!("l/{}", name)), members)
    }

    fn library(structs: Vec<Struct>) -> Library {
        Library::new(String::from("l"), vec!(), vec!(), structs, vec!())
    }

    fn names(order: &[DeclarationRef]) -> Vec<String> {
        order.iter().map(|d| d.name().to_string()).collect()
    }

    #[test]
    fn test_source_order_is_kept() {
        let lib = library(vec!(
            structure("B", vec!(field("x", Type::primitive(PrimitiveSubtype::Bool)))),
            structure("A", vec!())
        ));
        assert_eq!(vec!("l/B", "l/A"), names(&order(&lib).unwrap()));
    }

    #[test]
    fn test_dependency_is_pulled_forward() {
        let lib = library(vec!(
            structure("Line", vec!(field("start", Type::named("l/Point")), field("end", Type::named("l/Point")))),
            structure("Other", vec!()),
            structure("Point", vec!())
        ));
        assert_eq!(vec!("l/Point", "l/Line", "l/Other"), names(&order(&lib).unwrap()));
    }

    #[test]
    fn test_array_elements_are_contained() {
        let lib = library(vec!(
            structure("Polygon", vec!(field("corners", Type::array(Type::named("l/Point"), 3)))),
            structure("Point", vec!())
        ));
        assert_eq!(vec!("l/Point", "l/Polygon"), names(&order(&lib).unwrap()));
    }

    #[test]
    fn test_indirection_is_not_containment() {
        let lib = library(vec!(
            structure("Node", vec!(
                field("next", Type::nullable(Type::named("l/Node"))),
                field("children", Type::vector(Type::named("l/Leaf"), None))
            )),
            structure("Leaf", vec!())
        ));
        assert_eq!(vec!("l/Node", "l/Leaf"), names(&order(&lib).unwrap()));
    }

    #[test]
    fn test_enums_before_structs_and_interfaces_last() {
        let lib = Library::new(
            String::from("l"),
            vec!(),
            vec!(Enum::new(CompoundIdentifier::new("l/Color"), PrimitiveSubtype::Uint8, vec!())),
            vec!(structure("Pixel", vec!(field("color", Type::named("l/Color"))))),
            vec!(Interface::new(
                CompoundIdentifier::new("l/Screen"),
                vec!(Method::new(String::from("Draw"), 1, vec!(field("p", Type::named("l/Pixel"))), None))
            ))
        );
        assert_eq!(vec!("l/Color", "l/Pixel", "l/Screen"), names(&order(&lib).unwrap()));
    }

    #[test]
    fn test_cycle_names_every_participant() {
        let lib = library(vec!(
            structure("A", vec!(field("b", Type::named("l/B")))),
            structure("B", vec!(field("a", Type::named("l/A"))))
        ));
        let error = order(&lib).unwrap_err();
        assert_eq!(
            &ErrorKind::CyclicValueContainment { declarations: vec!(String::from("l/A"), String::from("l/B")) },
            error.kind()
        );
    }

    #[test]
    fn test_self_containment_is_a_cycle() {
        let lib = library(vec!(structure("A", vec!(field("a", Type::array(Type::named("l/A"), 2))))));
        let error = order(&lib).unwrap_err();
        assert_eq!(
            &ErrorKind::CyclicValueContainment { declarations: vec!(String::from("l/A")) },
            error.kind()
        );
    }

    #[test]
    fn test_external_references_are_ignored() {
        let lib = library(vec!(
            structure("File", vec!(field("buffer", Type::named("fuchsia.mem/Buffer")))),
            structure("Dir", vec!())
        ));
        assert_eq!(vec!("l/File", "l/Dir"), names(&order(&lib).unwrap()));
    }
}
