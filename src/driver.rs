use ir::ast::Library;
use rayon::prelude::*;

use crate::context::Context;
use crate::error::Result;
use crate::order;
use crate::target::{Language, Target};
use crate::template::{Node, Registry};

/// Generates the source text of `library` for `language`.
pub fn generate(library: &Library, language: Language) -> Result<String> {
    generate_with_registry(library, language, Registry::global())
}

/// Like [`generate`], but renders with the fragments of `registry`.
#[tracing::instrument(skip(library, registry), fields(library = %library.name()))]
pub fn generate_with_registry(library: &Library, language: Language, registry: &Registry) -> Result<String> {
    let ctx = Context::new(library, Target::for_language(language), registry);
    let declarations = order::order(library)?;
    let text = ctx.render(Node::Library(&declarations))?;

    tracing::info!(bytes = text.len(), "generated");
    Ok(text)
}

/// Generates `library` for every language in `languages`, in parallel. Results are in
/// the order of `languages`.
pub fn generate_all(library: &Library, languages: &[Language]) -> Vec<(Language, Result<String>)> {
    languages
        .par_iter()
        .map(|language| (*language, generate(library, *language)))
        .collect()
}
