use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::fs::File;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use upi_recommender::config::DataConfig;
use upi_recommender::error::AppError;
use upi_recommender::recommender::domain::{Category, ClusterId, UserId, UserProfile};
use upi_recommender::recommender::import::{load_category_averages, load_profiles};
use upi_recommender::recommender::insights::cluster_label;
use upi_recommender::recommender::store::{CategoryAverages, ProfileStore, StoreError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Profile table held fully in memory. The table is immutable after
/// construction, so lookups need no locking.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    profiles: Arc<HashMap<UserId, UserProfile>>,
}

impl InMemoryProfileStore {
    pub(crate) fn new(profiles: HashMap<UserId, UserProfile>) -> Self {
        Self {
            profiles: Arc::new(profiles),
        }
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn fetch(&self, id: &UserId) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.get(id).cloned())
    }

    fn len(&self) -> usize {
        self.profiles.len()
    }
}

/// Build the profile store from the configured CSV, or fall back to the
/// seeded demo table when no path is set.
pub(crate) fn build_profile_store(data: &DataConfig) -> Result<InMemoryProfileStore, AppError> {
    let profiles = match &data.profiles_path {
        Some(path) => load_profiles(File::open(path)?)?,
        None => demo_profiles(),
    };
    Ok(InMemoryProfileStore::new(profiles))
}

pub(crate) fn build_category_averages(data: &DataConfig) -> Result<CategoryAverages, AppError> {
    match &data.categories_path {
        Some(path) => Ok(load_category_averages(File::open(path)?)?),
        None => Ok(CategoryAverages::builtin()),
    }
}

fn demo_profile(
    avg_amount: f64,
    cluster: u8,
    transactions: u32,
    preferred: &str,
    avg_hour: f64,
    weekend_ratio: f64,
) -> UserProfile {
    UserProfile {
        avg_amount,
        cluster: ClusterId(cluster),
        cluster_name: cluster_label(cluster).to_string(),
        transactions,
        preferred_category: Category(preferred.to_string()),
        amount_std: Some(avg_amount * 0.3),
        avg_hour: Some(avg_hour),
        weekend_ratio: Some(weekend_ratio),
    }
}

/// Seeded profiles used when no CSV export is configured. One per cluster so
/// demos exercise every segment label.
pub(crate) fn demo_profiles() -> HashMap<UserId, UserProfile> {
    let entries = [
        ("USER_0001", demo_profile(1017.0, 1, 8, "Entertainment", 14.2, 0.31)),
        ("USER_0002", demo_profile(186.0, 2, 47, "Food & Dining", 12.8, 0.22)),
        ("USER_0003", demo_profile(412.0, 0, 5, "Groceries", 10.4, 0.18)),
        ("USER_0004", demo_profile(738.0, 3, 23, "Shopping", 19.6, 0.44)),
        ("USER_0005", demo_profile(529.0, 4, 14, "Bills & Utilities", 16.1, 0.27)),
    ];
    entries
        .into_iter()
        .map(|(id, profile)| (UserId(id.to_string()), profile))
        .collect()
}
