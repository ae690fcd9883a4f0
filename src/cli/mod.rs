mod version_editor;

use anyhow::Result;
use cobbler_signatures::settings::Settings;
use cobbler_signatures::signatures::RenderStyle;
use cobbler_signatures::{Catalog, ExportType, ImportType, SourceAdapter};

use crate::helpers::{ask, choose, choose_index};

const MAIN_MENU: [&str; 4] = ["Import", "Export", "Edit", "Exit"];

const EDIT_MENU: [&str; 7] = [
    "Add Operating System Breed",
    "Remove Operating System Breed",
    "Edit the name of an Operating System Breed",
    "Add Operating System Version",
    "Remove Operating System Version",
    "Edit the information of an Operating System Version",
    "Start from scratch",
];

const TYPED_URL: &str = "Enter a URL";

/// Owns the catalog for one interactive session.
pub struct Session<'a> {
    catalog: Catalog,
    sources: &'a dyn SourceAdapter,
    settings: &'a Settings,
}

impl<'a> Session<'a> {
    pub fn new(sources: &'a dyn SourceAdapter, settings: &'a Settings) -> Self {
        Self {
            catalog: Catalog::new(),
            sources,
            settings,
        }
    }

    fn render_style(&self) -> RenderStyle {
        if self.settings.pretty_export() {
            RenderStyle::Pretty
        } else {
            RenderStyle::Compact
        }
    }

    /// Main menu loop. Operation failures are reported and the loop goes on.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let Some(choice) = choose("What do you want to do?", MAIN_MENU.to_vec())? else {
                continue;
            };

            let outcome = match choice.as_str() {
                "Import" => self.import_menu().await,
                "Export" => self.export_menu().await,
                "Edit" => self.edit_menu(),
                "Exit" => {
                    println!("Any progress which is not exported will be lost. Bye.");
                    return Ok(());
                }
                _ => {
                    println!("Unknown option chosen. Redisplaying menu.");
                    Ok(())
                }
            };

            if let Err(err) = outcome {
                tracing::debug!(error = ?err, "menu action failed");
                eprintln!("Error: {err:#}");
            }
        }
    }

    async fn import_menu(&mut self) -> Result<()> {
        let Some(kind) = choose("What is your desired source of input?", ImportType::ALL.to_vec())? else {
            return Ok(());
        };
        let kind: ImportType = kind.parse()?;

        let locator = match kind {
            ImportType::Url => match self.pick_url()? {
                Some(url) => url,
                None => return Ok(()),
            },
            ImportType::String => ask("Please enter the JSON in a single line:")?,
            ImportType::File => ask("Please enter the path of the file:")?,
        };
        if locator.is_empty() {
            println!("Source was not entered correctly.");
            return Ok(());
        }

        self.catalog
            .import_signatures(self.sources, kind, &locator)
            .await?;
        println!("Imported {} Operating System Breeds.", self.catalog.len());
        Ok(())
    }

    /// Offer the configured upstream documents first, then free input.
    fn pick_url(&self) -> Result<Option<String>> {
        let mut options: Vec<String> = self
            .settings
            .sources()
            .iter()
            .map(|s| match s.description() {
                Some(desc) => format!("{} | {}", s.name(), desc),
                None => s.name().to_string(),
            })
            .collect();
        options.push(TYPED_URL.to_string());

        let Some(idx) = choose_index("Which document do you want to import?", options)? else {
            return Ok(None);
        };
        match self.settings.sources().get(idx) {
            Some(source) => Ok(Some(source.url().to_string())),
            None => Ok(Some(ask("Please enter the URL:")?)),
        }
    }

    async fn export_menu(&mut self) -> Result<()> {
        let Some(kind) = choose("What is your desired export target?", ExportType::ALL.to_vec())? else {
            return Ok(());
        };
        let kind: ExportType = kind.parse()?;

        let target = match kind {
            ExportType::String => None,
            ExportType::File => {
                let path = ask("Please enter the target path:")?;
                if path.is_empty() {
                    println!("Target path for the file was not correctly entered.");
                    return Ok(());
                }
                Some(path)
            }
        };

        let text = self
            .catalog
            .export_signatures(self.sources, kind, target.as_deref(), self.render_style())
            .await?;
        match (text, target) {
            (Some(text), _) => println!("{text}"),
            (None, Some(path)) => println!("Signatures written to {path}"),
            (None, None) => {}
        }
        Ok(())
    }

    fn pick_breed(&self, title: &str) -> Result<Option<usize>> {
        if self.catalog.is_empty() {
            println!("There are no Operating System Breeds yet.");
            return Ok(None);
        }
        choose_index(title, self.catalog.breed_names())
    }

    fn pick_version(&self, breed: usize, title: &str) -> Result<Option<String>> {
        let names = self.catalog.breed(breed)?.version_names();
        if names.is_empty() {
            println!("This Operating System Breed has no versions yet.");
            return Ok(None);
        }
        choose(title, names)
    }

    fn edit_menu(&mut self) -> Result<()> {
        let Some(choice) = choose("What do you want to do?", EDIT_MENU.to_vec())? else {
            return Ok(());
        };

        match choice.as_str() {
            "Add Operating System Breed" => {
                let name = ask("What should the name of the new Operating System Breed be?")?;
                if self.catalog.find_breed_by_name(&name).is_some() {
                    println!("Note: a breed named '{name}' already exists; lookups use the first one.");
                }
                self.catalog.add_breed(name);
                println!("We now have {} Operating System Breeds.", self.catalog.len());
            }
            "Remove Operating System Breed" => {
                let title = "What Operating System Breed (and all its versions) do you want to remove?";
                if let Some(idx) = self.pick_breed(title)? {
                    let removed = self.catalog.remove_breed(idx)?;
                    println!("Removed '{}'.", removed.name());
                }
            }
            "Edit the name of an Operating System Breed" => {
                if let Some(idx) = self.pick_breed("Which Operating System Breed do you want to edit?")? {
                    let name = ask("What shall be the new name?")?;
                    self.catalog.rename_breed(idx, name)?;
                }
            }
            "Add Operating System Version" => {
                let title = "Under what Operating System Breed shall the new version be put?";
                if let Some(idx) = self.pick_breed(title)? {
                    let name = ask("What shall be the name of the new version?")?;
                    if self.catalog.add_version(idx, name, None)?.is_some() {
                        println!("The existing version of that name was replaced.");
                    }
                }
            }
            "Remove Operating System Version" => {
                let title = "In what Operating System Breed is the version to be removed?";
                if let Some(idx) = self.pick_breed(title)? {
                    if let Some(name) = self.pick_version(idx, "What is the version that you wish to remove?")? {
                        self.catalog.remove_version(idx, &name)?;
                    }
                }
            }
            "Edit the information of an Operating System Version" => {
                let title = "In which Operating System Breed is the version?";
                if let Some(idx) = self.pick_breed(title)? {
                    let title = "Which Operating System Version do you want to edit?";
                    if let Some(name) = self.pick_version(idx, title)? {
                        let version = self.catalog.version_mut(idx, &name)?;
                        version_editor::edit_version(version)?;
                    }
                }
            }
            "Start from scratch" => {
                self.catalog = Catalog::new();
                println!("All Operating System Breeds were discarded.");
            }
            _ => println!("Unknown option selected. Returning to the main menu."),
        }
        Ok(())
    }
}
