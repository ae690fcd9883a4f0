use std::fmt::Display;
use std::io;
use termenu::{Item, Menu};

/// fzf-like list picker on top of `termenu`.
pub struct MenuPicker<T> {
    title: String,
    items: Vec<T>,
}

impl<T> MenuPicker<T>
where
    T: Display,
{
    pub fn new(title: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    /// Show the menu and return the position of the selected item, or `None`
    /// when the user cancelled. Items with identical labels stay distinct.
    pub fn invoke(&self) -> io::Result<Option<usize>> {
        if self.items.is_empty() {
            return Ok(None);
        }

        let mut menu = Menu::new()?;

        let list: Vec<Item<usize>> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| Item::new(&item.to_string(), idx))
            .collect();

        let selected = menu.set_title(&self.title).add_list(list).select()?;

        Ok(selected.copied().filter(|idx| *idx < self.items.len()))
    }
}
