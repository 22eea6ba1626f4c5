use std::collections::HashMap;
use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::domain::{Category, ClusterId, UserId, UserProfile};
use super::store::CategoryAverages;

/// Failure while ingesting one of the reference tables.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("csv parse failure: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: user id is blank")]
    BlankUserId { line: u64 },
    #[error("line {line}: amount must be positive, got {amount}")]
    NonPositiveAmount { line: u64, amount: f64 },
    #[error("category '{name}' appears more than once")]
    DuplicateCategory { name: String },
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    user_id: String,
    avg_amount: f64,
    cluster: u8,
    cluster_name: String,
    transaction_count: u32,
    preferred_category: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    amount_std: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    avg_hour: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    weekend_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    category: String,
    avg_amount: f64,
}

/// Load the user profile table. Header row expected; rows with blank ids or
/// non-positive averages are rejected rather than skipped so bad exports
/// surface at startup instead of as skewed recommendations.
pub fn load_profiles<R: Read>(reader: R) -> Result<HashMap<UserId, UserProfile>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut profiles = HashMap::new();

    for (index, record) in csv_reader.deserialize::<ProfileRow>().enumerate() {
        let line = index as u64 + 2;
        let row = record?;

        if row.user_id.trim().is_empty() {
            return Err(ImportError::BlankUserId { line });
        }
        if row.avg_amount <= 0.0 {
            return Err(ImportError::NonPositiveAmount {
                line,
                amount: row.avg_amount,
            });
        }

        profiles.insert(
            UserId(row.user_id),
            UserProfile {
                avg_amount: row.avg_amount,
                cluster: ClusterId(row.cluster),
                cluster_name: row.cluster_name,
                transactions: row.transaction_count,
                preferred_category: Category(row.preferred_category),
                amount_std: row.amount_std,
                avg_hour: row.avg_hour,
                weekend_ratio: row.weekend_ratio,
            },
        );
    }

    Ok(profiles)
}

/// Load the category averages table. Duplicate category names are rejected;
/// silently keeping the last row would hide a corrupted export.
pub fn load_category_averages<R: Read>(reader: R) -> Result<CategoryAverages, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut averages = CategoryAverages::empty();

    for (index, record) in csv_reader.deserialize::<CategoryRow>().enumerate() {
        let line = index as u64 + 2;
        let row = record?;

        if row.avg_amount <= 0.0 {
            return Err(ImportError::NonPositiveAmount {
                line,
                amount: row.avg_amount,
            });
        }

        let category = Category(row.category);
        if averages.get(&category).is_some() {
            return Err(ImportError::DuplicateCategory { name: category.0 });
        }
        averages.insert(category, row.avg_amount);
    }

    Ok(averages)
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| value.trim().parse::<f64>().map_err(serde::de::Error::custom))
        .transpose()
}
