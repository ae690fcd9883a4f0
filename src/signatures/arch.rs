use std::{fmt, str::FromStr};

/// Architectures Cobbler knows about. Advisory only: version records accept
/// any string in `supported_arches` and `kernel_arch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsArchitecture {
    I386,
    X86_64,
    Ppc,
    Ppc64,
    /// Synonym for `x86_64`.
    Amd64,
}

impl OsArchitecture {
    pub const ALL: [OsArchitecture; 5] = [
        OsArchitecture::I386,
        OsArchitecture::X86_64,
        OsArchitecture::Ppc,
        OsArchitecture::Ppc64,
        OsArchitecture::Amd64,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OsArchitecture::I386 => "i386",
            OsArchitecture::X86_64 => "x86_64",
            OsArchitecture::Ppc => "ppc",
            OsArchitecture::Ppc64 => "ppc64",
            OsArchitecture::Amd64 => "amd64",
        }
    }
}

impl fmt::Display for OsArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsArchitecture {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Repository types a version may declare in `supported_repo_breeds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryBreed {
    Rsync,
    Rhn,
    Yum,
    Apt,
}

impl RepositoryBreed {
    pub const ALL: [RepositoryBreed; 4] = [
        RepositoryBreed::Rsync,
        RepositoryBreed::Rhn,
        RepositoryBreed::Yum,
        RepositoryBreed::Apt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryBreed::Rsync => "rsync",
            RepositoryBreed::Rhn => "rhn",
            RepositoryBreed::Yum => "yum",
            RepositoryBreed::Apt => "apt",
        }
    }
}

impl fmt::Display for RepositoryBreed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepositoryBreed {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|breed| breed.as_str() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown name '{0}'")]
pub struct UnknownName(pub String);
