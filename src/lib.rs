//! Catalog of Cobbler operating system signatures: the breeds and versions
//! provisioning tools use to recognise installation media, together with the
//! JSON document they are exchanged in.

pub mod settings;
pub mod signatures;
pub mod sources;

pub use signatures::{Catalog, OsBreed, OsVersion, SignaturesError, VersionField};
pub use sources::{ExportType, ImportType, SourceAdapter, StandardSources};
