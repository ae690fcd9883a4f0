pub mod picker;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use self::picker::MenuPicker;

/// Label appended to every sub-menu so users can back out.
pub const GO_BACK: &str = "Go Back";

/// Map a picker position onto `item_count` real items followed by the
/// appended "Go Back" entry. Only that trailing position means cancel.
fn resolve_pick(picked: Option<usize>, item_count: usize) -> Option<usize> {
    picked.filter(|idx| *idx < item_count)
}

/// Wrapper around the `termenu` picker that keeps the UX consistent across the
/// tool. Returns the position of the picked item, or `None` when the menu was
/// cancelled or "Go Back" was picked.
pub fn choose_index<S: ToString>(title: &str, items: Vec<S>) -> Result<Option<usize>> {
    let mut display_items: Vec<String> = items.into_iter().map(|s| s.to_string()).collect();
    let item_count = display_items.len();
    display_items.push(GO_BACK.to_string());

    let picked = MenuPicker::new(title, display_items)
        .invoke()
        .context("show menu")?;
    Ok(resolve_pick(picked, item_count))
}

/// Like [`choose_index`], but returns the label of the picked item.
pub fn choose<S: ToString>(title: &str, items: Vec<S>) -> Result<Option<String>> {
    let mut labels: Vec<String> = items.into_iter().map(|s| s.to_string()).collect();
    let picked = choose_index(title, labels.clone())?;
    Ok(picked.map(|idx| labels.swap_remove(idx)))
}

/// Read a single line of free text. Surrounding whitespace is trimmed.
pub fn ask(question: &str) -> Result<String> {
    print!("{question} ");
    io::stdout().flush().context("flush stdout")?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("read answer")?;
    Ok(line.trim().to_string())
}

/// Yes/no question; anything but `y`/`yes` counts as no.
pub fn confirm(question: &str) -> Result<bool> {
    let answer = ask(&format!("{question} [y/N]"))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::resolve_pick;

    #[test]
    fn duplicate_labels_keep_their_own_position() {
        // ["fedora", "fedora", "Go Back"]
        assert_eq!(resolve_pick(Some(1), 2), Some(1));
        assert_eq!(resolve_pick(Some(0), 2), Some(0));
    }

    #[test]
    fn only_the_trailing_entry_cancels() {
        // ["Go Back", "Go Back"]: the first one is a real item.
        assert_eq!(resolve_pick(Some(0), 1), Some(0));
        assert_eq!(resolve_pick(Some(1), 1), None);
        assert_eq!(resolve_pick(None, 1), None);
    }
}
