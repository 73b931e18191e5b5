use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Limits attached to a plan. Stored as JSONB in the database.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PlanFeatures {
    #[serde(default)]
    pub session_discount_percent: Option<i64>,

    #[serde(default)]
    pub max_bookings_per_month: Option<i64>,
}

impl PlanFeatures {
    pub fn session_discount_or_default(&self) -> i64 {
        self.session_discount_percent.unwrap_or(0)
    }

    pub fn max_bookings_per_month_or_default(&self) -> i64 {
        self.max_bookings_per_month.unwrap_or(i64::MAX)
    }

    pub fn from_value(features: &Value) -> Self {
        serde_json::from_value(features.clone()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanModel {
    pub id: Uuid,
    pub name: String,
    pub price_minor: i32,
    pub duration_days: i32,
    pub features: PlanFeatures,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let features = PlanFeatures::from_value(&json!({}));
        assert_eq!(features.session_discount_or_default(), 0);
        assert_eq!(features.max_bookings_per_month_or_default(), i64::MAX);
    }

    #[test]
    fn reads_limits_from_jsonb_payload() {
        let features = PlanFeatures::from_value(&json!({
            "session_discount_percent": 10,
            "max_bookings_per_month": 20,
        }));
        assert_eq!(features.session_discount_or_default(), 10);
        assert_eq!(features.max_bookings_per_month_or_default(), 20);
    }

    #[test]
    fn malformed_payload_is_treated_as_empty() {
        let features = PlanFeatures::from_value(&json!("not an object"));
        assert_eq!(features, PlanFeatures::default());
    }
}
