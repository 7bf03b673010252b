#[macro_use] extern crate derive_more;

pub mod context;
pub mod cpp;
mod driver;
pub mod error;
pub mod golang;
pub mod layout;
pub mod name;
pub mod order;
pub mod rust;
pub mod target;
pub mod template;

pub use ir;

pub use driver::{generate, generate_all, generate_with_registry};
pub use error::{Error, ErrorKind, Location, Result};
pub use target::{Language, Role, Target};
