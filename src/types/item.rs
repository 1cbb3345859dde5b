use std::borrow::Borrow;
use std::path::PathBuf;

/// Identifier of a catalog item.
///
/// The id doubles as the item's directory name under the install root, so it
/// must be a safe path segment. Construction does not validate; validation
/// happens at the join point in [`crate::paths::InstallRoot::resolve`], before
/// any filesystem or process operation.
///
/// # Example
///
/// ```
/// use shelf::types::ItemId;
///
/// let id = ItemId::new("asteroids");
/// assert_eq!(id.as_str(), "asteroids");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new item id.
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Deref for ItemId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == **other
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One catalog entry representing an installable unit of content.
///
/// `installed` is derived from filesystem presence at load time and flipped by
/// the install coordinator when a job completes. `local_path` is `Some` iff
/// `installed` is true, and always equals `install_root/id`.
#[derive(Debug, Clone)]
pub struct Item {
    /// Unique id, also the directory name under the install root.
    pub id: ItemId,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Display author.
    pub author: String,
    /// Display version string, opaque to the core.
    pub version: String,
    /// Reference the item's content is retrieved from (a clone URL).
    pub source_url: String,
    /// Whether the item's content is present on disk.
    pub installed: bool,
    /// Installation directory, present iff `installed`.
    pub local_path: Option<PathBuf>,
}
