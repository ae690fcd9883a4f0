use serde_json::{Map, Value};

use super::{FieldKind, OsArchitecture, RepositoryBreed, SignaturesError, ValidationError, VersionField};

/// A version of an operating system breed such as `openSUSE Leap 15.2`: the
/// attributes provisioning tools use to recognise its installation media.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OsVersion {
    signatures: Vec<String>,
    version_file: String,
    version_file_regex: String,
    kernel_arch: String,
    kernel_arch_regex: String,
    supported_arches: Vec<String>,
    supported_repo_breeds: Vec<String>,
    kernel_file: String,
    initrd_file: String,
    isolinux_ok: bool,
    default_autoinstall: String,
    kernel_options: String,
    kernel_options_post: String,
    template_files: String,
    boot_files: Vec<String>,
    boot_loaders: Map<String, Value>,
}

fn text(field: VersionField, value: Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(ValidationError::new(field.key(), FieldKind::Text)),
    }
}

fn flag(field: VersionField, value: Value) -> Result<bool, ValidationError> {
    value
        .as_bool()
        .ok_or_else(|| ValidationError::new(field.key(), FieldKind::Flag))
}

fn text_list(field: VersionField, value: Value) -> Result<Vec<String>, ValidationError> {
    let invalid = || ValidationError::new(field.key(), FieldKind::TextList);
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(invalid()),
            })
            .collect(),
        _ => Err(invalid()),
    }
}

fn mapping(field: VersionField, value: Value) -> Result<Map<String, Value>, ValidationError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ValidationError::new(field.key(), FieldKind::Mapping)),
    }
}

#[allow(unused)]
impl OsVersion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record straight from a document fragment.
    pub fn from_fragment(fragment: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut version = Self::default();
        version.decode(fragment)?;
        Ok(version)
    }

    // Borrowing getters (no clones).
    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    pub fn version_file(&self) -> &str {
        &self.version_file
    }

    pub fn version_file_regex(&self) -> &str {
        &self.version_file_regex
    }

    pub fn kernel_arch(&self) -> &str {
        &self.kernel_arch
    }

    pub fn kernel_arch_regex(&self) -> &str {
        &self.kernel_arch_regex
    }

    pub fn supported_arches(&self) -> &[String] {
        &self.supported_arches
    }

    pub fn supported_repo_breeds(&self) -> &[String] {
        &self.supported_repo_breeds
    }

    pub fn kernel_file(&self) -> &str {
        &self.kernel_file
    }

    pub fn initrd_file(&self) -> &str {
        &self.initrd_file
    }

    pub fn isolinux_ok(&self) -> bool {
        self.isolinux_ok
    }

    pub fn default_autoinstall(&self) -> &str {
        &self.default_autoinstall
    }

    pub fn kernel_options(&self) -> &str {
        &self.kernel_options
    }

    pub fn kernel_options_post(&self) -> &str {
        &self.kernel_options_post
    }

    pub fn template_files(&self) -> &str {
        &self.template_files
    }

    pub fn boot_files(&self) -> &[String] {
        &self.boot_files
    }

    /// Opaque per-loader settings; only the outer mapping is checked.
    pub fn boot_loaders(&self) -> &Map<String, Value> {
        &self.boot_loaders
    }

    // Typed setters. The types already guarantee validity.
    pub fn set_signatures(&mut self, value: Vec<String>) {
        self.signatures = value;
    }

    pub fn set_version_file(&mut self, value: impl Into<String>) {
        self.version_file = value.into();
    }

    pub fn set_version_file_regex(&mut self, value: impl Into<String>) {
        self.version_file_regex = value.into();
    }

    pub fn set_kernel_arch(&mut self, value: impl Into<String>) {
        self.kernel_arch = value.into();
    }

    pub fn set_kernel_arch_regex(&mut self, value: impl Into<String>) {
        self.kernel_arch_regex = value.into();
    }

    pub fn set_supported_arches(&mut self, value: Vec<String>) {
        self.supported_arches = value;
    }

    pub fn set_supported_repo_breeds(&mut self, value: Vec<String>) {
        self.supported_repo_breeds = value;
    }

    pub fn set_kernel_file(&mut self, value: impl Into<String>) {
        self.kernel_file = value.into();
    }

    pub fn set_initrd_file(&mut self, value: impl Into<String>) {
        self.initrd_file = value.into();
    }

    pub fn set_isolinux_ok(&mut self, value: bool) {
        self.isolinux_ok = value;
    }

    pub fn set_default_autoinstall(&mut self, value: impl Into<String>) {
        self.default_autoinstall = value.into();
    }

    pub fn set_kernel_options(&mut self, value: impl Into<String>) {
        self.kernel_options = value.into();
    }

    pub fn set_kernel_options_post(&mut self, value: impl Into<String>) {
        self.kernel_options_post = value.into();
    }

    pub fn set_template_files(&mut self, value: impl Into<String>) {
        self.template_files = value.into();
    }

    pub fn set_boot_files(&mut self, value: Vec<String>) {
        self.boot_files = value;
    }

    pub fn set_boot_loaders(&mut self, value: Map<String, Value>) {
        self.boot_loaders = value;
    }

    /// Current value of `field` as a document value (copied, never aliased).
    pub fn get(&self, field: VersionField) -> Value {
        match field {
            VersionField::Signatures => Value::from(self.signatures.clone()),
            VersionField::VersionFile => Value::from(self.version_file.as_str()),
            VersionField::VersionFileRegex => Value::from(self.version_file_regex.as_str()),
            VersionField::KernelArch => Value::from(self.kernel_arch.as_str()),
            VersionField::KernelArchRegex => Value::from(self.kernel_arch_regex.as_str()),
            VersionField::SupportedArches => Value::from(self.supported_arches.clone()),
            VersionField::SupportedRepoBreeds => Value::from(self.supported_repo_breeds.clone()),
            VersionField::KernelFile => Value::from(self.kernel_file.as_str()),
            VersionField::InitrdFile => Value::from(self.initrd_file.as_str()),
            VersionField::IsolinuxOk => Value::Bool(self.isolinux_ok),
            VersionField::DefaultAutoinstall => Value::from(self.default_autoinstall.as_str()),
            VersionField::KernelOptions => Value::from(self.kernel_options.as_str()),
            VersionField::KernelOptionsPost => Value::from(self.kernel_options_post.as_str()),
            VersionField::TemplateFiles => Value::from(self.template_files.as_str()),
            VersionField::BootFiles => Value::from(self.boot_files.clone()),
            VersionField::BootLoaders => Value::Object(self.boot_loaders.clone()),
        }
    }

    /// Type-checked assignment. The value is converted before anything is
    /// stored, so a rejected value leaves the field untouched.
    pub fn set(&mut self, field: VersionField, value: Value) -> Result<(), ValidationError> {
        match field {
            VersionField::Signatures => self.signatures = text_list(field, value)?,
            VersionField::VersionFile => self.version_file = text(field, value)?,
            VersionField::VersionFileRegex => self.version_file_regex = text(field, value)?,
            VersionField::KernelArch => self.kernel_arch = text(field, value)?,
            VersionField::KernelArchRegex => self.kernel_arch_regex = text(field, value)?,
            VersionField::SupportedArches => self.supported_arches = text_list(field, value)?,
            VersionField::SupportedRepoBreeds => self.supported_repo_breeds = text_list(field, value)?,
            VersionField::KernelFile => self.kernel_file = text(field, value)?,
            VersionField::InitrdFile => self.initrd_file = text(field, value)?,
            VersionField::IsolinuxOk => self.isolinux_ok = flag(field, value)?,
            VersionField::DefaultAutoinstall => self.default_autoinstall = text(field, value)?,
            VersionField::KernelOptions => self.kernel_options = text(field, value)?,
            VersionField::KernelOptionsPost => self.kernel_options_post = text(field, value)?,
            VersionField::TemplateFiles => self.template_files = text(field, value)?,
            VersionField::BootFiles => self.boot_files = text_list(field, value)?,
            VersionField::BootLoaders => self.boot_loaders = mapping(field, value)?,
        }
        Ok(())
    }

    /// Restore the documented default. The field stays part of the record.
    pub fn reset(&mut self, field: VersionField) {
        match field {
            VersionField::Signatures => self.signatures.clear(),
            VersionField::VersionFile => self.version_file.clear(),
            VersionField::VersionFileRegex => self.version_file_regex.clear(),
            VersionField::KernelArch => self.kernel_arch.clear(),
            VersionField::KernelArchRegex => self.kernel_arch_regex.clear(),
            VersionField::SupportedArches => self.supported_arches.clear(),
            VersionField::SupportedRepoBreeds => self.supported_repo_breeds.clear(),
            VersionField::KernelFile => self.kernel_file.clear(),
            VersionField::InitrdFile => self.initrd_file.clear(),
            VersionField::IsolinuxOk => self.isolinux_ok = false,
            VersionField::DefaultAutoinstall => self.default_autoinstall.clear(),
            VersionField::KernelOptions => self.kernel_options.clear(),
            VersionField::KernelOptionsPost => self.kernel_options_post.clear(),
            VersionField::TemplateFiles => self.template_files.clear(),
            VersionField::BootFiles => self.boot_files.clear(),
            VersionField::BootLoaders => self.boot_loaders.clear(),
        }
    }

    fn entries(&self, field: VersionField) -> Result<&Vec<String>, ValidationError> {
        match field {
            VersionField::Signatures => Ok(&self.signatures),
            VersionField::SupportedArches => Ok(&self.supported_arches),
            VersionField::SupportedRepoBreeds => Ok(&self.supported_repo_breeds),
            VersionField::BootFiles => Ok(&self.boot_files),
            _ => Err(ValidationError::new(field.key(), FieldKind::TextList)),
        }
    }

    fn entries_mut(&mut self, field: VersionField) -> Result<&mut Vec<String>, ValidationError> {
        match field {
            VersionField::Signatures => Ok(&mut self.signatures),
            VersionField::SupportedArches => Ok(&mut self.supported_arches),
            VersionField::SupportedRepoBreeds => Ok(&mut self.supported_repo_breeds),
            VersionField::BootFiles => Ok(&mut self.boot_files),
            _ => Err(ValidationError::new(field.key(), FieldKind::TextList)),
        }
    }

    /// Entries of a list field, for pickers.
    pub fn list(&self, field: VersionField) -> Result<&[String], ValidationError> {
        self.entries(field).map(Vec::as_slice)
    }

    pub fn push_entry(&mut self, field: VersionField, entry: impl Into<String>) -> Result<(), ValidationError> {
        self.entries_mut(field)?.push(entry.into());
        Ok(())
    }

    pub fn replace_entry(
        &mut self,
        field: VersionField,
        index: usize,
        entry: impl Into<String>,
    ) -> Result<String, SignaturesError> {
        let entries = self.entries_mut(field)?;
        let len = entries.len();
        let slot = entries.get_mut(index).ok_or(SignaturesError::EntryIndex {
            field: field.key(),
            index,
            len,
        })?;
        Ok(std::mem::replace(slot, entry.into()))
    }

    pub fn remove_entry(&mut self, field: VersionField, index: usize) -> Result<String, SignaturesError> {
        let entries = self.entries_mut(field)?;
        if index >= entries.len() {
            return Err(SignaturesError::EntryIndex {
                field: field.key(),
                index,
                len: entries.len(),
            });
        }
        Ok(entries.remove(index))
    }

    /// Entries of `supported_arches` Cobbler does not know about.
    pub fn unknown_arches(&self) -> Vec<&str> {
        self.supported_arches
            .iter()
            .map(String::as_str)
            .filter(|arch| arch.parse::<OsArchitecture>().is_err())
            .collect()
    }

    /// Entries of `supported_repo_breeds` Cobbler does not know about.
    pub fn unknown_repo_breeds(&self) -> Vec<&str> {
        self.supported_repo_breeds
            .iter()
            .map(String::as_str)
            .filter(|breed| breed.parse::<RepositoryBreed>().is_err())
            .collect()
    }

    /// Encode into a document fragment holding all sixteen keys.
    pub fn encode(&self) -> Map<String, Value> {
        VersionField::ALL
            .into_iter()
            .map(|field| (field.key().to_string(), self.get(field)))
            .collect()
    }

    /// Decode a document fragment. Missing keys fall back to their defaults,
    /// unknown keys are ignored. Either every field is taken over or, when a
    /// present key carries the wrong type, none is.
    pub fn decode(&mut self, fragment: &Map<String, Value>) -> Result<(), ValidationError> {
        let mut decoded = Self::default();
        for field in VersionField::ALL {
            let value = fragment
                .get(field.key())
                .cloned()
                .unwrap_or_else(|| field.kind().default_value());
            decoded.set(field, value)?;
        }
        *self = decoded;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::OsVersion;
    use crate::signatures::{FieldKind, SignaturesError, VersionField};

    fn fragment(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn populated() -> OsVersion {
        let mut version = OsVersion::new();
        version.set_signatures(vec!["boot".to_string(), "suse".to_string()]);
        version.set_version_file("(openSUSE-release)-15.2-(.*).rpm");
        version.set_kernel_arch("kernel-default-(.*).rpm");
        version.set_supported_arches(vec!["x86_64".to_string(), "ppc64".to_string()]);
        version.set_supported_repo_breeds(vec!["yum".to_string()]);
        version.set_kernel_file("linux");
        version.set_initrd_file("initrd");
        version.set_isolinux_ok(true);
        version.set_default_autoinstall("sample_autoyast.xml");
        version.set_kernel_options("install=$tree");
        version.set_boot_files(vec!["boot/$arch/loader/*".to_string()]);
        version.set_boot_loaders(fragment(json!({"x86_64": ["grub", "pxe"]})));
        version
    }

    #[test]
    fn decode_of_encode_reproduces_record() {
        let original = populated();
        let mut decoded = OsVersion::new();
        decoded.decode(&original.encode()).expect("decode");
        assert_eq!(decoded, original);
    }

    #[test]
    fn encode_emits_all_keys() {
        let encoded = OsVersion::new().encode();
        assert_eq!(encoded.len(), 16);
        for field in VersionField::ALL {
            assert_eq!(encoded.get(field.key()), Some(&field.kind().default_value()));
        }
    }

    #[test]
    fn decode_empty_fragment_yields_defaults() {
        let mut version = populated();
        version.decode(&Map::new()).expect("decode");
        assert_eq!(version, OsVersion::new());
        assert!(!version.isolinux_ok());
        assert_eq!(version.kernel_file(), "");
        assert!(version.boot_loaders().is_empty());
    }

    #[test]
    fn decode_ignores_unknown_keys() {
        let version = OsVersion::from_fragment(&fragment(json!({
            "kernel_arch": "x86_64",
            "not_a_field": 42
        })))
        .expect("decode");
        assert_eq!(version.kernel_arch(), "x86_64");
    }

    #[test]
    fn decode_rejects_wrong_type_and_keeps_state() {
        let mut version = populated();
        let err = version
            .decode(&fragment(json!({"kernel_arch": "x86_64", "isolinux_ok": "yes"})))
            .unwrap_err();
        assert_eq!(err.field(), "isolinux_ok");
        assert_eq!(err.expected(), FieldKind::Flag);
        assert_eq!(version, populated());
    }

    #[test]
    fn set_rejects_non_boolean_flag() {
        let mut version = OsVersion::new();
        version.set_isolinux_ok(true);
        assert!(version.set(VersionField::IsolinuxOk, json!("false")).is_err());
        assert!(version.set(VersionField::IsolinuxOk, json!(0)).is_err());
        assert!(version.isolinux_ok());
    }

    #[test]
    fn set_rejects_lists_with_non_string_entries() {
        let mut version = populated();
        let err = version
            .set(VersionField::SupportedArches, json!(["x86_64", 7]))
            .unwrap_err();
        assert_eq!(err.expected(), FieldKind::TextList);
        assert_eq!(version.supported_arches(), ["x86_64", "ppc64"]);
    }

    #[test]
    fn boot_loaders_must_be_mapping() {
        let mut version = OsVersion::new();
        assert!(version.set(VersionField::BootLoaders, json!(["grub"])).is_err());
        version
            .set(VersionField::BootLoaders, json!({"ppc64": {"anything": [1, 2]}}))
            .expect("mapping accepted");
        assert_eq!(version.get(VersionField::BootLoaders), json!({"ppc64": {"anything": [1, 2]}}));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut version = populated();
        for field in VersionField::ALL {
            version.reset(field);
            assert_eq!(version.get(field), field.kind().default_value());
        }
        assert_eq!(version, OsVersion::new());
    }

    #[test]
    fn equality_ignores_boot_loader_key_order() {
        let mut a = OsVersion::new();
        a.set_boot_loaders(fragment(json!({"x86_64": ["grub"], "ppc64": ["pxe"]})));
        let mut b = OsVersion::new();
        b.set_boot_loaders(fragment(json!({"ppc64": ["pxe"], "x86_64": ["grub"]})));
        assert_eq!(a, b);
    }

    #[test]
    fn list_entries_can_be_edited() {
        let mut version = OsVersion::new();
        version.push_entry(VersionField::BootFiles, "a").expect("push");
        version.push_entry(VersionField::BootFiles, "b").expect("push");
        assert_eq!(version.replace_entry(VersionField::BootFiles, 1, "c").expect("replace"), "b");
        assert_eq!(version.remove_entry(VersionField::BootFiles, 0).expect("remove"), "a");
        assert_eq!(version.boot_files(), ["c"]);

        assert!(matches!(
            version.remove_entry(VersionField::BootFiles, 3),
            Err(SignaturesError::EntryIndex { index: 3, len: 1, .. })
        ));
        assert!(version.push_entry(VersionField::KernelArch, "x").is_err());
    }

    #[test]
    fn advisory_lookups_report_unknown_values() {
        let mut version = OsVersion::new();
        version.set_supported_arches(vec!["x86_64".to_string(), "riscv64".to_string()]);
        version.set_supported_repo_breeds(vec!["apt".to_string(), "zypper".to_string()]);
        assert_eq!(version.unknown_arches(), ["riscv64"]);
        assert_eq!(version.unknown_repo_breeds(), ["zypper"]);
    }
}
