//! Path utilities for locating contact book data on the host.
//!
//! Follows the XDG base directory layout: data lives in
//! `$XDG_DATA_HOME/contactbook`, falling back to `~/.local/share/contactbook`.

use std::path::PathBuf;

const APP_DIR: &str = "contactbook";

/// File name of the contacts store inside the data directory.
pub const CONTACTS_FILE: &str = "contacts.json";

/// Returns the data directory for contact book storage.
///
/// `None` when neither `XDG_DATA_HOME` nor `HOME` is set.
#[must_use]
pub fn get_data_dir() -> Option<PathBuf> {
    data_dir_with(|key| std::env::var(key).ok())
}

/// Resolves the data directory using `lookup` for environment variables.
///
/// Empty values are treated as unset.
///
/// # Examples
///
/// ```
/// use contactbook::infrastructure::paths::data_dir_with;
/// use std::path::PathBuf;
///
/// let dir = data_dir_with(|key| (key == "HOME").then(|| "/home/ana".to_string()));
/// assert_eq!(dir, Some(PathBuf::from("/home/ana/.local/share/contactbook")));
/// ```
pub fn data_dir_with(lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(xdg) = non_empty("XDG_DATA_HOME") {
        return Some(PathBuf::from(xdg).join(APP_DIR));
    }

    non_empty("HOME").map(|home| {
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR)
    })
}

/// Default location of the contacts file, if a data directory can be found.
#[must_use]
pub fn default_storage_path() -> Option<PathBuf> {
    get_data_dir().map(|dir| dir.join(CONTACTS_FILE))
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and all paths when `HOME` is unset, are returned
/// unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_with(path, std::env::var("HOME").ok().as_deref())
}

/// Expands a leading `~` against `home`.
///
/// # Examples
///
/// ```
/// use contactbook::infrastructure::paths::expand_tilde_with;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde_with("~/contacts.json", Some("/home/ana")), PathBuf::from("/home/ana/contacts.json"));
/// assert_eq!(expand_tilde_with("~", Some("/home/ana")), PathBuf::from("/home/ana"));
/// assert_eq!(expand_tilde_with("/srv/contacts.json", Some("/home/ana")), PathBuf::from("/srv/contacts.json"));
/// ```
#[must_use]
pub fn expand_tilde_with(path: &str, home: Option<&str>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => PathBuf::from(home),
        (_, Some(home)) if path.starts_with("~/") => PathBuf::from(home).join(&path[2..]),
        _ => PathBuf::from(path),
    }
}
