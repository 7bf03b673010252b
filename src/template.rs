use ir::ast::{Enum, Interface, Struct};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt;

use crate::context::Context;
use crate::error::Result;
use crate::order::DeclarationRef;
use crate::target::Language;

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FragmentKind {
    #[display(fmt = "library")]
    Library,

    #[display(fmt = "enum")]
    Enum,

    #[display(fmt = "struct")]
    Struct,

    #[display(fmt = "interface")]
    Interface
}

/// The value a fragment renders.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    /// The whole file, with its declarations already ordered.
    Library(&'a [DeclarationRef<'a>]),
    Enum(&'a Enum),
    Struct(&'a Struct),
    Interface(&'a Interface)
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> FragmentKind {
        match self {
            Node::Library(_) => FragmentKind::Library,
            Node::Enum(_) => FragmentKind::Enum,
            Node::Struct(_) => FragmentKind::Struct,
            Node::Interface(_) => FragmentKind::Interface
        }
    }

    /// The qualified name of the declaration, if this node is one.
    pub fn name(&self) -> Option<&'a str> {
        match *self {
            Node::Library(_) => None,
            Node::Enum(e) => Some(e.name().as_str()),
            Node::Struct(s) => Some(s.name().as_str()),
            Node::Interface(i) => Some(i.name().as_str())
        }
    }
}

pub type Fragment = fn(&Context<'_>, Node<'_>) -> Result<String>;

/// Fragments keyed by what they render and for which language.
#[derive(Clone, Default)]
pub struct Registry {
    fragments: BTreeMap<(FragmentKind, Language), Fragment>
}

static GLOBAL: Lazy<Registry> = Lazy::new(|| {
    let mut registry = Registry::new();
    crate::golang::register(&mut registry);
    crate::cpp::register(&mut registry);
    crate::rust::register(&mut registry);
    registry
});

impl Registry {
    pub fn new() -> Registry {
        Registry { fragments: BTreeMap::new() }
    }

    /// The registry holding the fragments of every built-in language.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    pub fn register(&mut self, kind: FragmentKind, language: Language, fragment: Fragment) -> &mut Registry {
        self.fragments.insert((kind, language), fragment);
        self
    }

    pub fn fragment(&self, kind: FragmentKind, language: Language) -> Option<Fragment> {
        self.fragments.get(&(kind, language)).copied()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.fragments.keys()).finish()
    }
}

/// Template text with `#PLACEHOLDER` markers.
///
/// A placeholder standing alone on its line is replaced by a block: each line of the
/// value is indented to the placeholder's column and an empty value drops the line.
/// Anywhere else a placeholder is replaced inline, trying longer keys first so that
/// `#NAME_LOWER` is never read as `#NAME`.
pub struct Template<'t> {
    text: &'t str
}

impl<'t> Template<'t> {
    pub fn new(text: &'t str) -> Template<'t> {
        Template { text }
    }

    pub fn render(&self, values: &[(&str, String)]) -> String {
        let mut keys: Vec<&(&str, String)> = values.iter().collect();
        keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(b.0)));

        let mut lines: Vec<String> = vec!();
        for line in self.text.split('\n') {
            let trimmed = line.trim();
            match keys.iter().find(|(key, _)| *key == trimmed) {
                Some((_, value)) if !trimmed.is_empty() => {
                    let indent = &line[..line.len() - line.trim_start().len()];
                    if value.is_empty() {
                        continue;
                    }
                    for value_line in value.split('\n') {
                        if value_line.is_empty() {
                            lines.push(String::new());
                        } else {
                            lines.push(format!("{}{}", indent, value_line));
                        }
                    }
                }
                _ => lines.push(substitute_inline(line, &keys))
            }
        }
        lines.join("\n")
    }
}

fn substitute_inline(line: &str, keys: &[&(&str, String)]) -> String {
    let mut result = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(c) = rest.chars().next() {
        match keys.iter().find(|(key, _)| !key.is_empty() && rest.starts_with(*key)) {
            Some((key, value)) => {
                result.push_str(value);
                rest = &rest[key.len()..];
            }
            None => {
                result.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    result
}
