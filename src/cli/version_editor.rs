use anyhow::{Context, Result};
use cobbler_signatures::signatures::{FieldKind, OsArchitecture, RepositoryBreed};
use cobbler_signatures::{OsVersion, VersionField};
use serde_json::Value;

use crate::helpers::{ask, choose, choose_index, confirm};

const LIST_ACTIONS: [&str; 4] = ["Add", "Edit", "Remove", "Reset"];
const TEXT_ACTIONS: [&str; 2] = ["Set", "Reset"];

/// Label shown in the field picker, previewing the current value.
fn field_label(version: &OsVersion, field: VersionField) -> String {
    let mut preview = version.get(field).to_string();
    if preview.len() > 60 {
        let cut = (0..=57).rev().find(|i| preview.is_char_boundary(*i)).unwrap_or(0);
        preview.truncate(cut);
        preview.push_str("...");
    }
    format!("{field} = {preview}")
}

/// Field-by-field editor for one version record. Loops until "Go Back".
pub fn edit_version(version: &mut OsVersion) -> Result<()> {
    loop {
        let labels: Vec<String> = VersionField::ALL
            .iter()
            .map(|f| field_label(version, *f))
            .collect();
        let Some(idx) = choose_index("What key of the signatures do you want to edit?", labels)? else {
            return Ok(());
        };
        let field = VersionField::ALL[idx];

        let outcome = match field.kind() {
            FieldKind::Text => edit_text(version, field),
            FieldKind::Flag => edit_flag(version, field),
            FieldKind::TextList => edit_list(version, field),
            FieldKind::Mapping => edit_mapping(version, field),
        };
        if let Err(err) = outcome {
            eprintln!("Error: {err:#}");
        }
    }
}

fn edit_text(version: &mut OsVersion, field: VersionField) -> Result<()> {
    let Some(action) = choose(&format!("What do you want to do with \"{field}\"?"), TEXT_ACTIONS.to_vec())? else {
        return Ok(());
    };
    match action.as_str() {
        "Set" => {
            let value = ask(&format!("What shall be the new value for \"{field}\"?"))?;
            version.set(field, Value::String(value))?;
        }
        _ => version.reset(field),
    }
    Ok(())
}

fn edit_flag(version: &mut OsVersion, field: VersionField) -> Result<()> {
    let value = confirm(&format!("Set \"{field}\" to true?"))?;
    version.set(field, Value::Bool(value))?;
    Ok(())
}

fn edit_list(version: &mut OsVersion, field: VersionField) -> Result<()> {
    let Some(action) = choose("What do you want to do?", LIST_ACTIONS.to_vec())? else {
        return Ok(());
    };

    match action.as_str() {
        "Add" => {
            let entry = ask("What should the new entry be?")?;
            version.push_entry(field, entry)?;
        }
        "Edit" => {
            let entries = version.list(field)?.to_vec();
            if let Some(idx) = choose_index("Which entry shall be edited?", entries)? {
                let entry = ask("What shall be the new value of the selected entry?")?;
                version.replace_entry(field, idx, entry)?;
            }
        }
        "Remove" => {
            let entries = version.list(field)?.to_vec();
            if let Some(idx) = choose_index("Which entry shall be removed?", entries)? {
                version.remove_entry(field, idx)?;
            }
        }
        _ => version.reset(field),
    }

    warn_unknown_values(version, field);
    Ok(())
}

/// Boot loader settings are opaque; they are entered as a JSON object.
fn edit_mapping(version: &mut OsVersion, field: VersionField) -> Result<()> {
    let raw = ask(&format!("Enter \"{field}\" as a JSON object (empty to reset):"))?;
    if raw.is_empty() {
        version.reset(field);
        return Ok(());
    }
    let value: Value = serde_json::from_str(&raw).with_context(|| format!("parse \"{field}\" as JSON"))?;
    version.set(field, value)?;
    Ok(())
}

/// Cobbler only knows a fixed set of architectures and repository breeds.
/// Other values are kept but flagged.
fn warn_unknown_values(version: &OsVersion, field: VersionField) {
    let (unknown, known): (Vec<&str>, Vec<&str>) = match field {
        VersionField::SupportedArches => (
            version.unknown_arches(),
            OsArchitecture::ALL.iter().map(|a| a.as_str()).collect(),
        ),
        VersionField::SupportedRepoBreeds => (
            version.unknown_repo_breeds(),
            RepositoryBreed::ALL.iter().map(|b| b.as_str()).collect(),
        ),
        _ => return,
    };

    if !unknown.is_empty() {
        tracing::warn!(%field, ?unknown, "values outside the known set");
        println!(
            "Warning: {} not in the known values ({}).",
            unknown.join(", "),
            known.join(", ")
        );
    }
}
