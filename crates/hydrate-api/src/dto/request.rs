//! Request DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use hydrate_entity::notification::{DeliveryMethod, NotificationCategory, Tone};
use hydrate_service::ReminderRequest;

/// Send-reminder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendReminderRequest {
    /// Target user.
    #[validate(custom(function = "validate_user_id"))]
    pub user_id: Uuid,
    /// Reminder category.
    pub category: NotificationCategory,
    /// Tone override.
    #[serde(default)]
    pub tone_override: Option<Tone>,
    /// Delivery method override.
    #[serde(default)]
    pub method_override: Option<DeliveryMethod>,
    /// Skip the frequency gate and leave the last-sent time alone.
    #[serde(default)]
    pub test_mode: bool,
}

impl From<SendReminderRequest> for ReminderRequest {
    fn from(req: SendReminderRequest) -> Self {
        Self {
            user_id: req.user_id,
            category: req.category,
            tone_override: req.tone_override,
            method_override: req.method_override,
            test_mode: req.test_mode,
        }
    }
}

fn validate_user_id(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("nil_user_id"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_user_rejected() {
        let req: SendReminderRequest = serde_json::from_value(serde_json::json!({
            "user_id": Uuid::nil(),
            "category": "sip"
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_optional_fields_default() {
        let req: SendReminderRequest = serde_json::from_value(serde_json::json!({
            "user_id": Uuid::new_v4(),
            "category": "herbal_tea"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        let internal = ReminderRequest::from(req);
        assert!(!internal.test_mode);
        assert_eq!(internal.category, NotificationCategory::HerbalTea);
    }
}
