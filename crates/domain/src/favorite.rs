//! Favorites — user-marked service/number pairs, keyed by number.

use serde::{Deserialize, Deserializer, Serialize};

/// A favorited service. Two entries with the same `number` are the same
/// favorite regardless of the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub service_name: String,
    pub number: String,
}

impl FavoriteEntry {
    #[must_use]
    pub fn new(service_name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            number: number.into(),
        }
    }
}

/// Result of toggling a number in the favorite set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FavoriteState {
    Added,
    Removed,
}

/// Set of favorites with at most one entry per number.
///
/// Insertion order is kept so the persisted list stays stable between writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Favorites(Vec<FavoriteEntry>);

impl Favorites {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, number: &str) -> bool {
        self.0.iter().any(|fav| fav.number == number)
    }

    /// Remove the entry with `entry.number` if present, add it otherwise.
    pub fn toggle(&mut self, entry: FavoriteEntry) -> FavoriteState {
        if let Some(index) = self.0.iter().position(|fav| fav.number == entry.number) {
            self.0.remove(index);
            FavoriteState::Removed
        } else {
            self.0.push(entry);
            FavoriteState::Added
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavoriteEntry> {
        self.0.iter()
    }
}

impl FromIterator<FavoriteEntry> for Favorites {
    /// Later duplicates of a number are dropped.
    fn from_iter<I: IntoIterator<Item = FavoriteEntry>>(iter: I) -> Self {
        let mut set = Self::new();
        for entry in iter {
            if !set.contains(&entry.number) {
                set.0.push(entry);
            }
        }
        set
    }
}

impl<'de> Deserialize<'de> for Favorites {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<FavoriteEntry>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
