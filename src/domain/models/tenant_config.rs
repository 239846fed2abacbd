//! Per-guild settings document consumed by the Shift Calculator bot.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusRule {
    pub from: f64,
    pub to: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    pub ephemeral_responses: bool,
    #[serde(default = "default_true")]
    pub show_average: bool,
    #[serde(default = "default_agency_name")]
    pub agency_name: String,
    #[serde(default = "default_true")]
    pub show_ids: bool,
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    #[serde(default)]
    pub logo_image_base64: String,
    #[serde(default)]
    pub logo_text: String,
}

fn default_true() -> bool {
    true
}

fn default_agency_name() -> String {
    "Agency".to_string()
}

fn default_bot_name() -> String {
    "Shift Calculator".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            ephemeral_responses: false,
            show_average: true,
            agency_name: default_agency_name(),
            show_ids: true,
            bot_name: default_bot_name(),
            logo_image_base64: String::new(),
            logo_text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleCommission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserCommission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_role: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommissionSettings {
    #[serde(default)]
    pub roles: BTreeMap<String, RoleCommission>,
    #[serde(default)]
    pub users: BTreeMap<String, UserCommission>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TenantConfig {
    pub guild_id: String,
    #[sqlx(json)]
    pub models: Vec<String>,
    #[sqlx(json)]
    pub shifts: Vec<String>,
    #[sqlx(json)]
    pub periods: Vec<String>,
    #[sqlx(json)]
    pub bonus_rules: Vec<BonusRule>,
    #[sqlx(json)]
    pub display_settings: DisplaySettings,
    #[sqlx(json)]
    pub commission_settings: CommissionSettings,
    #[sqlx(json)]
    pub roles: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TenantConfigPatch {
    pub models: Option<Vec<String>>,
    pub shifts: Option<Vec<String>>,
    pub periods: Option<Vec<String>>,
    pub bonus_rules: Option<Vec<BonusRule>>,
    pub display_settings: Option<DisplaySettings>,
    pub commission_settings: Option<CommissionSettings>,
    pub roles: Option<BTreeMap<String, f64>>,
}

impl TenantConfigPatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(rules) = &self.bonus_rules {
            for (i, rule) in rules.iter().enumerate() {
                if rule.from > rule.to {
                    return Err(AppError::Validation(format!(
                        "Validation failed for field 'bonus_rules': rule {} has 'from' greater than 'to'",
                        i
                    )));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Models,
    Shifts,
    Periods,
    BonusRules,
    DisplaySettings,
    CommissionSettings,
    Roles,
}

impl ConfigField {
    pub const ALL: [ConfigField; 7] = [
        ConfigField::Models,
        ConfigField::Shifts,
        ConfigField::Periods,
        ConfigField::BonusRules,
        ConfigField::DisplaySettings,
        ConfigField::CommissionSettings,
        ConfigField::Roles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigField::Models => "models",
            ConfigField::Shifts => "shifts",
            ConfigField::Periods => "periods",
            ConfigField::BonusRules => "bonus_rules",
            ConfigField::DisplaySettings => "display_settings",
            ConfigField::CommissionSettings => "commission_settings",
            ConfigField::Roles => "roles",
        }
    }

    pub fn value_of(&self, config: &TenantConfig) -> Result<Value, AppError> {
        let value = match self {
            ConfigField::Models => serde_json::to_value(&config.models),
            ConfigField::Shifts => serde_json::to_value(&config.shifts),
            ConfigField::Periods => serde_json::to_value(&config.periods),
            ConfigField::BonusRules => serde_json::to_value(&config.bonus_rules),
            ConfigField::DisplaySettings => serde_json::to_value(&config.display_settings),
            ConfigField::CommissionSettings => serde_json::to_value(&config.commission_settings),
            ConfigField::Roles => serde_json::to_value(&config.roles),
        };
        value.map_err(|e| AppError::InternalWithMsg(format!("Failed to serialize {}: {}", self, e)))
    }

    /// Builds a single-field patch, checking `value` against the field's schema.
    pub fn patch_with(&self, value: Value) -> Result<TenantConfigPatch, AppError> {
        let invalid = |e: serde_json::Error| {
            AppError::Validation(format!("Validation failed for field '{}': {}", self, e))
        };
        let mut patch = TenantConfigPatch::default();
        match self {
            ConfigField::Models => patch.models = Some(serde_json::from_value(value).map_err(invalid)?),
            ConfigField::Shifts => patch.shifts = Some(serde_json::from_value(value).map_err(invalid)?),
            ConfigField::Periods => patch.periods = Some(serde_json::from_value(value).map_err(invalid)?),
            ConfigField::BonusRules => patch.bonus_rules = Some(serde_json::from_value(value).map_err(invalid)?),
            ConfigField::DisplaySettings => patch.display_settings = Some(serde_json::from_value(value).map_err(invalid)?),
            ConfigField::CommissionSettings => patch.commission_settings = Some(serde_json::from_value(value).map_err(invalid)?),
            ConfigField::Roles => patch.roles = Some(serde_json::from_value(value).map_err(invalid)?),
        }
        Ok(patch)
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Field '{}' is not a valid configuration field.", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> TenantConfig {
        TenantConfig {
            guild_id: "g1".into(),
            models: vec!["A".into(), "B".into()],
            shifts: vec![],
            periods: vec![],
            bonus_rules: vec![BonusRule { from: 0.0, to: 1000.0, amount: 50.0 }],
            display_settings: DisplaySettings::default(),
            commission_settings: CommissionSettings::default(),
            roles: BTreeMap::new(),
        }
    }

    #[test]
    fn test_config_field_names_round_trip() {
        for field in ConfigField::ALL {
            assert_eq!(field.as_str().parse::<ConfigField>().unwrap(), field);
        }
    }

    #[test]
    fn test_unknown_and_internal_field_names_are_rejected() {
        for name in ["guild_id", "_id", "password", "Models", ""] {
            let err = name.parse::<ConfigField>().unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{} should be rejected", name);
        }
    }

    #[test]
    fn test_patch_with_checks_schema() {
        let patch = ConfigField::Models.patch_with(json!(["A", "B", "C"])).unwrap();
        assert_eq!(patch.models, Some(vec!["A".into(), "B".into(), "C".into()]));
        assert!(patch.shifts.is_none());

        assert!(ConfigField::Models.patch_with(json!("A")).is_err());
        assert!(ConfigField::BonusRules.patch_with(json!([{ "from": 0 }])).is_err());
        assert!(ConfigField::Roles.patch_with(json!({ "123": "ten" })).is_err());
    }

    #[test]
    fn test_value_of_reads_single_field() {
        let config = sample();
        assert_eq!(ConfigField::Models.value_of(&config).unwrap(), json!(["A", "B"]));
        assert_eq!(
            ConfigField::BonusRules.value_of(&config).unwrap(),
            json!([{ "from": 0.0, "to": 1000.0, "amount": 50.0 }])
        );
    }

    #[test]
    fn test_display_settings_defaults_fill_missing_keys() {
        let settings: DisplaySettings = serde_json::from_value(json!({ "agency_name": "Nova" })).unwrap();
        assert_eq!(settings.agency_name, "Nova");
        assert!(settings.show_average);
        assert!(settings.show_ids);
        assert!(!settings.ephemeral_responses);
        assert_eq!(settings.bot_name, "Shift Calculator");

        let empty: DisplaySettings = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, DisplaySettings::default());
    }

    #[test]
    fn test_inverted_bonus_rule_fails_validation() {
        let patch = TenantConfigPatch {
            bonus_rules: Some(vec![BonusRule { from: 500.0, to: 100.0, amount: 10.0 }]),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(AppError::Validation(_))));
        assert!(TenantConfigPatch::default().validate().is_ok());
    }
}
