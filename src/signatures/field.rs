use std::{fmt, str::FromStr};

use super::FieldKind;

/// Every attribute of an operating system version, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionField {
    Signatures,
    VersionFile,
    VersionFileRegex,
    KernelArch,
    KernelArchRegex,
    SupportedArches,
    SupportedRepoBreeds,
    KernelFile,
    InitrdFile,
    IsolinuxOk,
    DefaultAutoinstall,
    KernelOptions,
    KernelOptionsPost,
    TemplateFiles,
    BootFiles,
    BootLoaders,
}

impl VersionField {
    pub const ALL: [VersionField; 16] = [
        VersionField::Signatures,
        VersionField::VersionFile,
        VersionField::VersionFileRegex,
        VersionField::KernelArch,
        VersionField::KernelArchRegex,
        VersionField::SupportedArches,
        VersionField::SupportedRepoBreeds,
        VersionField::KernelFile,
        VersionField::InitrdFile,
        VersionField::IsolinuxOk,
        VersionField::DefaultAutoinstall,
        VersionField::KernelOptions,
        VersionField::KernelOptionsPost,
        VersionField::TemplateFiles,
        VersionField::BootFiles,
        VersionField::BootLoaders,
    ];

    /// Key used for this field in the serialized document.
    pub fn key(&self) -> &'static str {
        match self {
            VersionField::Signatures => "signatures",
            VersionField::VersionFile => "version_file",
            VersionField::VersionFileRegex => "version_file_regex",
            VersionField::KernelArch => "kernel_arch",
            VersionField::KernelArchRegex => "kernel_arch_regex",
            VersionField::SupportedArches => "supported_arches",
            VersionField::SupportedRepoBreeds => "supported_repo_breeds",
            VersionField::KernelFile => "kernel_file",
            VersionField::InitrdFile => "initrd_file",
            VersionField::IsolinuxOk => "isolinux_ok",
            VersionField::DefaultAutoinstall => "default_autoinstall",
            VersionField::KernelOptions => "kernel_options",
            VersionField::KernelOptionsPost => "kernel_options_post",
            VersionField::TemplateFiles => "template_files",
            VersionField::BootFiles => "boot_files",
            VersionField::BootLoaders => "boot_loaders",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            VersionField::Signatures
            | VersionField::SupportedArches
            | VersionField::SupportedRepoBreeds
            | VersionField::BootFiles => FieldKind::TextList,
            VersionField::IsolinuxOk => FieldKind::Flag,
            VersionField::BootLoaders => FieldKind::Mapping,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for VersionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for VersionField {
    type Err = super::UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| super::UnknownName(s.to_string()))
    }
}
