use serde_json::{Map, Value};

use super::document::{self, RenderStyle};
use super::{OsBreed, OsVersion, SignaturesError, VersionField};
use crate::sources::{ExportType, ImportType, SourceAdapter};

/// Whether the catalog currently reflects an imported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogState {
    #[default]
    Empty,
    Loaded,
}

/// The signatures catalog: every breed with its versions.
///
/// Breed names are expected to be unique, but `add_breed` does not refuse a
/// duplicate. Lookups by name resolve to the first breed in insertion order,
/// and dumping merges later duplicates into that first entry.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    breeds: Vec<OsBreed>,
    state: CatalogState,
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.breeds == other.breeds
    }
}

#[allow(unused)]
impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CatalogState {
        self.state
    }

    pub fn breeds(&self) -> &[OsBreed] {
        &self.breeds
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }

    pub fn breed_names(&self) -> Vec<String> {
        self.breeds.iter().map(|b| b.name().to_string()).collect()
    }

    pub fn breed(&self, index: usize) -> Result<&OsBreed, SignaturesError> {
        let len = self.breeds.len();
        self.breeds.get(index).ok_or(SignaturesError::BreedIndex { index, len })
    }

    fn breed_mut(&mut self, index: usize) -> Result<&mut OsBreed, SignaturesError> {
        let len = self.breeds.len();
        self.breeds
            .get_mut(index)
            .ok_or(SignaturesError::BreedIndex { index, len })
    }

    /// Position of the first breed called `name`, scanning all of them.
    pub fn find_breed_by_name(&self, name: &str) -> Option<usize> {
        self.breeds.iter().position(|b| b.name() == name)
    }

    /// Append an empty breed and return its index.
    pub fn add_breed(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if self.find_breed_by_name(&name).is_some() {
            tracing::warn!(breed = %name, "breed name already present; lookups resolve to the first one");
        }
        tracing::debug!(breed = %name, "adding breed");
        self.breeds.push(OsBreed::new(name));
        self.breeds.len() - 1
    }

    pub fn remove_breed(&mut self, index: usize) -> Result<OsBreed, SignaturesError> {
        let len = self.breeds.len();
        if index >= len {
            return Err(SignaturesError::BreedIndex { index, len });
        }
        let removed = self.breeds.remove(index);
        tracing::debug!(breed = %removed.name(), "removed breed");
        Ok(removed)
    }

    pub fn rename_breed(&mut self, index: usize, new_name: impl Into<String>) -> Result<(), SignaturesError> {
        let new_name = new_name.into();
        let breed = self.breed_mut(index)?;
        tracing::debug!(from = %breed.name(), to = %new_name, "renaming breed");
        breed.set_name(new_name);
        Ok(())
    }

    /// Insert `name` into the breed at `breed_index`, overwriting any version
    /// of the same name. Returns the record that was replaced, if any.
    pub fn add_version(
        &mut self,
        breed_index: usize,
        name: impl Into<String>,
        version: Option<OsVersion>,
    ) -> Result<Option<OsVersion>, SignaturesError> {
        let name = name.into();
        let breed = self.breed_mut(breed_index)?;
        tracing::debug!(breed = %breed.name(), version = %name, "adding version");
        Ok(breed.insert_version(name, version.unwrap_or_default()))
    }

    pub fn remove_version(&mut self, breed_index: usize, name: &str) -> Result<OsVersion, SignaturesError> {
        let breed = self.breed_mut(breed_index)?;
        tracing::debug!(breed = %breed.name(), version = %name, "removing version");
        breed.remove_version(name)
    }

    pub fn version(&self, breed_index: usize, name: &str) -> Result<&OsVersion, SignaturesError> {
        self.breed(breed_index)?.version(name)
    }

    /// Mutable access for the version editor. The record stays owned here.
    pub fn version_mut(&mut self, breed_index: usize, name: &str) -> Result<&mut OsVersion, SignaturesError> {
        self.breed_mut(breed_index)?.version_mut(name)
    }

    /// Type-checked assignment of one attribute of one version.
    pub fn edit_version(
        &mut self,
        breed_index: usize,
        name: &str,
        field: VersionField,
        value: Value,
    ) -> Result<(), SignaturesError> {
        self.version_mut(breed_index, name)?.set(field, value)?;
        Ok(())
    }

    /// Replace every breed with the content of `document`. Nothing changes
    /// unless the whole document decodes.
    pub fn load_from_document(&mut self, document: &Value) -> Result<(), SignaturesError> {
        let mut breeds = Vec::new();
        for (breed_name, versions) in document::breeds(document)? {
            let mut breed = OsBreed::new(breed_name.as_str());
            for (version_name, fragment) in document::versions(breed_name, versions)? {
                let fragment = document::fragment(breed_name, version_name, fragment)?;
                breed.insert_version(version_name.as_str(), OsVersion::from_fragment(fragment)?);
            }
            breeds.push(breed);
        }

        tracing::debug!(breeds = breeds.len(), "loaded signatures document");
        self.breeds = breeds;
        self.state = CatalogState::Loaded;
        Ok(())
    }

    /// Parse raw text and load it.
    pub fn load_from_str(&mut self, raw: &str) -> Result<(), SignaturesError> {
        let document = document::parse(raw)?;
        self.load_from_document(&document)
    }

    /// Build the document for the current state without touching it.
    pub fn dump_to_document(&self) -> Value {
        let mut root = Map::new();
        for breed in &self.breeds {
            if root.contains_key(breed.name()) {
                tracing::warn!(breed = %breed.name(), "merging duplicate breed into its first occurrence");
            }
            let entry = root
                .entry(breed.name().to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(versions) = entry {
                for (name, version) in breed.versions() {
                    versions.insert(name.clone(), Value::Object(version.encode()));
                }
            }
        }
        Value::Object(root)
    }

    pub fn to_json_string(&self, style: RenderStyle) -> Result<String, SignaturesError> {
        document::render(&self.dump_to_document(), style)
    }

    /// Fetch a document through `sources` and load it. A failed fetch or a
    /// bad document leaves the catalog as it was.
    pub async fn import_signatures(
        &mut self,
        sources: &dyn SourceAdapter,
        kind: ImportType,
        locator: &str,
    ) -> Result<(), SignaturesError> {
        tracing::info!(%kind, "importing signatures");
        let raw = sources.fetch(kind, locator).await?;
        self.load_from_str(&raw)
    }

    /// Render the catalog and hand it to `sources`. Returns the text for
    /// [`ExportType::String`], nothing for [`ExportType::File`].
    pub async fn export_signatures(
        &self,
        sources: &dyn SourceAdapter,
        kind: ExportType,
        target: Option<&str>,
        style: RenderStyle,
    ) -> Result<Option<String>, SignaturesError> {
        tracing::info!(%kind, breeds = self.breeds.len(), "exporting signatures");
        let text = self.to_json_string(style)?;
        sources.store(kind, target, &text).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::{Value, json};

    use super::{Catalog, CatalogState};
    use crate::signatures::document::RenderStyle;
    use crate::signatures::{OsVersion, SignaturesError, VersionField};
    use crate::sources::{ExportType, ImportType, SourceAdapter};

    /// Serves one canned document and records what gets stored.
    #[derive(Default)]
    struct MemorySources {
        document: Option<String>,
        stored: Mutex<Vec<(Option<String>, String)>>,
    }

    #[async_trait::async_trait]
    impl SourceAdapter for MemorySources {
        async fn fetch(&self, kind: ImportType, locator: &str) -> Result<String, SignaturesError> {
            match (kind, &self.document) {
                (ImportType::String, _) => Ok(locator.to_string()),
                (_, Some(doc)) => Ok(doc.clone()),
                (_, None) => Err(SignaturesError::SourceUnavailable {
                    locator: locator.to_string(),
                    reason: "offline".to_string(),
                }),
            }
        }

        async fn store(
            &self,
            kind: ExportType,
            target: Option<&str>,
            data: &str,
        ) -> Result<Option<String>, SignaturesError> {
            self.stored
                .lock()
                .expect("lock")
                .push((target.map(str::to_string), data.to_string()));
            Ok(match kind {
                ExportType::String => Some(data.to_string()),
                ExportType::File => None,
            })
        }
    }

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        let suse = catalog.add_breed("opensuse");
        let mut leap = OsVersion::new();
        leap.set_kernel_arch("x86_64");
        leap.set_supported_repo_breeds(vec!["yum".to_string()]);
        catalog.add_version(suse, "15.2", Some(leap)).expect("add");
        catalog.add_version(suse, "15.3", None).expect("add");
        let debian = catalog.add_breed("debian");
        catalog.add_version(debian, "10", None).expect("add");
        catalog
    }

    #[test]
    fn add_then_remove_version_leaves_empty_breed() {
        let mut catalog = Catalog::new();
        let index = catalog.add_breed("opensuse");
        catalog.add_version(index, "15.2", None).expect("add");
        catalog.remove_version(index, "15.2").expect("remove");

        assert_eq!(catalog.breed_names(), ["opensuse"]);
        assert!(catalog.breed(0).expect("breed").versions().is_empty());
    }

    #[test]
    fn add_version_overwrites() {
        let mut catalog = Catalog::new();
        catalog.add_breed("opensuse");
        let mut a = OsVersion::new();
        a.set_kernel_file("a");
        let mut b = OsVersion::new();
        b.set_kernel_file("b");

        catalog.add_version(0, "15.2", Some(a.clone())).expect("add");
        let replaced = catalog.add_version(0, "15.2", Some(b.clone())).expect("add");

        assert_eq!(replaced, Some(a));
        assert_eq!(catalog.breed(0).expect("breed").versions().len(), 1);
        assert_eq!(catalog.version(0, "15.2").expect("version"), &b);
    }

    #[test]
    fn out_of_range_breed_index_is_rejected() {
        let mut catalog = Catalog::new();
        catalog.add_breed("a");
        catalog.add_breed("b");

        assert!(matches!(
            catalog.remove_breed(5),
            Err(SignaturesError::BreedIndex { index: 5, len: 2 })
        ));
        assert!(catalog.rename_breed(2, "c").is_err());
        assert!(catalog.add_version(9, "1", None).is_err());
        assert_eq!(catalog.breed_names(), ["a", "b"]);
    }

    #[test]
    fn remove_missing_version_is_not_found() {
        let mut catalog = sample();
        assert!(matches!(
            catalog.remove_version(1, "11"),
            Err(SignaturesError::VersionNotFound { .. })
        ));
    }

    #[test]
    fn rename_keeps_versions() {
        let mut catalog = sample();
        catalog.rename_breed(0, "suse").expect("rename");
        assert_eq!(catalog.breed(0).expect("breed").name(), "suse");
        assert_eq!(catalog.breed(0).expect("breed").version_names(), ["15.2", "15.3"]);
    }

    #[test]
    fn load_keeps_document_version_order() {
        let mut catalog = Catalog::new();
        catalog
            .load_from_str(r#"{"suse": {"15.3": {}, "15.10": {}, "15.2": {}}}"#)
            .expect("load");
        assert_eq!(catalog.breed(0).expect("breed").version_names(), ["15.3", "15.10", "15.2"]);

        let doc = catalog.dump_to_document();
        let names: Vec<&String> = doc["suse"].as_object().expect("object").keys().collect();
        assert_eq!(names, ["15.3", "15.10", "15.2"]);
    }

    #[test]
    fn find_breed_scans_every_entry() {
        let mut catalog = Catalog::new();
        for name in ["a", "b", "c", "d"] {
            catalog.add_breed(name);
        }
        assert_eq!(catalog.find_breed_by_name("c"), Some(2));
        assert_eq!(catalog.find_breed_by_name("z"), None);
    }

    #[test]
    fn duplicate_breeds_resolve_to_first_and_merge_on_dump() {
        let mut catalog = Catalog::new();
        catalog.add_breed("fedora");
        catalog.add_breed("fedora");
        catalog.add_version(0, "33", None).expect("add");
        catalog.add_version(1, "34", None).expect("add");

        assert_eq!(catalog.find_breed_by_name("fedora"), Some(0));
        let doc = catalog.dump_to_document();
        let fedora = doc["fedora"].as_object().expect("object");
        assert_eq!(fedora.len(), 2);
    }

    #[test]
    fn dump_then_load_reproduces_catalog() {
        let original = sample();
        let mut restored = Catalog::new();
        restored
            .load_from_document(&original.dump_to_document())
            .expect("load");
        assert_eq!(restored, original);
        assert_eq!(restored.breed_names(), ["opensuse", "debian"]);
        assert_eq!(restored.state(), CatalogState::Loaded);
    }

    #[test]
    fn failed_load_keeps_previous_state() {
        let mut catalog = sample();
        let bad = json!({
            "ubuntu": {"20.04": {"kernel_arch": "amd64"}},
            "debian": {"10": {"boot_files": "not-a-list"}}
        });
        let err = catalog.load_from_document(&bad).unwrap_err();
        assert!(matches!(err, SignaturesError::Validation(_)));
        assert_eq!(catalog, sample());
        assert_eq!(catalog.state(), CatalogState::Empty);

        assert!(matches!(
            catalog.load_from_document(&json!(["debian"])),
            Err(SignaturesError::MalformedDocument(_))
        ));
        assert_eq!(catalog, sample());
    }

    #[test]
    fn empty_catalog_dumps_empty_document() {
        assert_eq!(Catalog::new().dump_to_document(), json!({}));
    }

    #[test]
    fn edit_version_is_type_checked() {
        let mut catalog = sample();
        catalog
            .edit_version(0, "15.2", VersionField::IsolinuxOk, Value::Bool(true))
            .expect("edit");
        assert!(catalog.version(0, "15.2").expect("version").isolinux_ok());

        let err = catalog
            .edit_version(0, "15.2", VersionField::IsolinuxOk, json!("no"))
            .unwrap_err();
        assert!(matches!(err, SignaturesError::Validation(_)));
        assert!(catalog.version(0, "15.2").expect("version").isolinux_ok());
    }

    #[tokio::test]
    async fn import_string_then_export_string() {
        let sources = MemorySources::default();
        let mut catalog = Catalog::new();
        catalog
            .import_signatures(
                &sources,
                ImportType::String,
                r#"{"debian": {"10": {"kernel_arch": "x86_64", "isolinux_ok": true}}}"#,
            )
            .await
            .expect("import");

        let version = catalog.version(0, "10").expect("version");
        assert_eq!(version.kernel_arch(), "x86_64");
        assert!(version.isolinux_ok());

        let text = catalog
            .export_signatures(&sources, ExportType::String, None, RenderStyle::Compact)
            .await
            .expect("export")
            .expect("text");
        let exported: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(exported["debian"]["10"]["kernel_arch"], "x86_64");
        assert_eq!(exported["debian"]["10"]["isolinux_ok"], true);
        assert_eq!(exported["debian"]["10"]["signatures"], json!([]));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_catalog_untouched() {
        let sources = MemorySources::default();
        let mut catalog = sample();
        let err = catalog
            .import_signatures(&sources, ImportType::Url, "https://example.invalid/sigs.json")
            .await
            .unwrap_err();
        assert!(matches!(err, SignaturesError::SourceUnavailable { .. }));
        assert_eq!(catalog, sample());
    }

    #[tokio::test]
    async fn export_to_file_returns_nothing() {
        let sources = MemorySources::default();
        let out = sample()
            .export_signatures(&sources, ExportType::File, Some("/tmp/out.json"), RenderStyle::Pretty)
            .await
            .expect("export");
        assert!(out.is_none());

        let stored = sources.stored.lock().expect("lock");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].0.as_deref(), Some("/tmp/out.json"));
    }
}
