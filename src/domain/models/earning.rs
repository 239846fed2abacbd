use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EarningRecord {
    pub id: String,
    pub guild_id: String,
    pub date: String,
    pub total_cut: f64,
    pub gross_revenue: f64,
    pub period: String,
    pub shift: String,
    pub role: String,
    #[sqlx(json)]
    pub models: Vec<String>,
    pub hours_worked: f64,
    pub user_mention: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewEarning {
    #[validate(length(min = 1, message = "id is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[validate(range(min = 0.0, message = "total_cut must not be negative"))]
    pub total_cut: f64,
    #[validate(range(min = 0.0, message = "gross_revenue must not be negative"))]
    pub gross_revenue: f64,
    #[validate(length(min = 1, message = "period is required"))]
    pub period: String,
    #[validate(length(min = 1, message = "shift is required"))]
    pub shift: String,
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
    #[serde(deserialize_with = "one_or_many")]
    #[validate(length(min = 1, message = "models must not be empty"))]
    pub models: Vec<String>,
    #[validate(range(min = 0.0, message = "hours_worked must not be negative"))]
    pub hours_worked: f64,
    #[validate(length(min = 1, message = "user_mention is required"))]
    pub user_mention: String,
}

impl EarningRecord {
    pub fn new(guild_id: String, input: NewEarning) -> Self {
        let now = Utc::now();
        Self {
            id: input.id,
            guild_id,
            date: input.date,
            total_cut: input.total_cut,
            gross_revenue: input.gross_revenue,
            period: input.period,
            shift: input.shift,
            role: input.role,
            models: input.models,
            hours_worked: input.hours_worked,
            user_mention: input.user_mention,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update. `id` and `guild_id` are not part of the patch, so a
/// payload carrying them is accepted but those keys are dropped.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct EarningPatch {
    #[validate(length(min = 1, message = "date must not be empty"))]
    pub date: Option<String>,
    #[validate(range(min = 0.0, message = "total_cut must not be negative"))]
    pub total_cut: Option<f64>,
    #[validate(range(min = 0.0, message = "gross_revenue must not be negative"))]
    pub gross_revenue: Option<f64>,
    #[validate(length(min = 1, message = "period must not be empty"))]
    pub period: Option<String>,
    #[validate(length(min = 1, message = "shift must not be empty"))]
    pub shift: Option<String>,
    #[validate(length(min = 1, message = "role must not be empty"))]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "one_or_many_opt")]
    #[validate(length(min = 1, message = "models must not be empty"))]
    pub models: Option<Vec<String>>,
    #[validate(range(min = 0.0, message = "hours_worked must not be negative"))]
    pub hours_worked: Option<f64>,
    #[validate(length(min = 1, message = "user_mention must not be empty"))]
    pub user_mention: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

// Older bot builds send `models` as a single string.
fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    OneOrMany::deserialize(deserializer).map(Into::into)
}

fn one_or_many_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<String>>, D::Error> {
    Option::<OneOrMany>::deserialize(deserializer).map(|v| v.map(Into::into))
}
