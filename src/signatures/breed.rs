use super::{OsVersion, SignaturesError};

/// A family of operating systems (e.g. `opensuse`) and its named versions.
///
/// Versions keep the order they were first inserted in; re-inserting a name
/// replaces the record in place.
#[derive(Debug, Clone, Default)]
pub struct OsBreed {
    name: String,
    versions: Vec<(String, OsVersion)>,
}

/// Same name and the same records under the same version names, in any order.
impl PartialEq for OsBreed {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.versions.len() == other.versions.len()
            && self
                .versions
                .iter()
                .all(|(name, version)| other.version(name).is_ok_and(|v| v == version))
    }
}

#[allow(unused)]
impl OsBreed {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            versions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Borrow the `(name, record)` pairs in insertion order.
    pub fn versions(&self) -> &[(String, OsVersion)] {
        &self.versions
    }

    pub fn version_names(&self) -> Vec<String> {
        self.versions.iter().map(|(name, _)| name.clone()).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.versions.iter().position(|(n, _)| n == name)
    }

    pub fn version(&self, name: &str) -> Result<&OsVersion, SignaturesError> {
        match self.position(name) {
            Some(idx) => Ok(&self.versions[idx].1),
            None => Err(self.missing(name)),
        }
    }

    pub fn version_mut(&mut self, name: &str) -> Result<&mut OsVersion, SignaturesError> {
        match self.position(name) {
            Some(idx) => Ok(&mut self.versions[idx].1),
            None => Err(self.missing(name)),
        }
    }

    /// Insert or overwrite `name`. Returns the record that was replaced.
    pub fn insert_version(&mut self, name: impl Into<String>, version: OsVersion) -> Option<OsVersion> {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => Some(std::mem::replace(&mut self.versions[idx].1, version)),
            None => {
                self.versions.push((name, version));
                None
            }
        }
    }

    pub fn remove_version(&mut self, name: &str) -> Result<OsVersion, SignaturesError> {
        match self.position(name) {
            Some(idx) => Ok(self.versions.remove(idx).1),
            None => Err(self.missing(name)),
        }
    }

    fn missing(&self, version: &str) -> SignaturesError {
        SignaturesError::VersionNotFound {
            breed: self.name.clone(),
            version: version.to_string(),
        }
    }
}
