mod arch;
mod breed;
mod catalog;
pub mod document;
mod error;
mod field;
mod version;

pub use arch::{OsArchitecture, RepositoryBreed, UnknownName};
pub use breed::OsBreed;
pub use catalog::{Catalog, CatalogState};
pub use document::RenderStyle;
pub use error::{FieldKind, SignaturesError, ValidationError};
pub use field::VersionField;
pub use version::OsVersion;
