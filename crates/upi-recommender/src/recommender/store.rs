use std::collections::HashMap;

use super::domain::{Category, UserId, UserProfile};

/// Storage abstraction so the service can be exercised against in-memory
/// tables in tests and against whatever the host system supplies in
/// production. Profiles are immutable reference data; the trait is read-only.
pub trait ProfileStore: Send + Sync {
    fn fetch(&self, id: &UserId) -> Result<Option<UserProfile>, StoreError>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Error enumeration for profile lookups against fallible backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

/// Category-to-typical-amount table. Owned outright since it is small,
/// immutable after startup, and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAverages {
    amounts: HashMap<Category, f64>,
}

impl CategoryAverages {
    pub fn empty() -> Self {
        Self {
            amounts: HashMap::new(),
        }
    }

    pub fn from_map(amounts: HashMap<Category, f64>) -> Self {
        Self { amounts }
    }

    /// The table shipped with the service, matching the mock dataset the
    /// profiles were built from. Hosts override it via `UPI_CATEGORIES_PATH`.
    pub fn builtin() -> Self {
        let entries = [
            ("Food & Dining", 245.0),
            ("Transportation", 132.0),
            ("Shopping", 842.0),
            ("Bills & Utilities", 658.0),
            ("Entertainment", 398.0),
            ("Healthcare", 776.0),
            ("Education", 1950.0),
            ("Groceries", 362.0),
            ("Fuel", 518.0),
            ("Transfer to Friends", 1420.0),
        ];
        let amounts = entries
            .into_iter()
            .map(|(name, amount)| (Category(name.to_string()), amount))
            .collect();
        Self { amounts }
    }

    pub fn insert(&mut self, category: Category, amount: f64) {
        self.amounts.insert(category, amount);
    }

    pub fn get(&self, category: &Category) -> Option<f64> {
        self.amounts.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, f64)> {
        self.amounts.iter().map(|(category, amount)| (category, *amount))
    }
}
