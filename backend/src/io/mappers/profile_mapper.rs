//! Mappers for member profiles, businesses and per-user settings.

use shared::{
    Business, BusinessRow, Profile, ProfileRow, UserSettings, UserSettingsRow,
};

use super::EntityMapper;

pub struct ProfileMapper;

impl EntityMapper for ProfileMapper {
    type Row = ProfileRow;
    type Model = Profile;

    const NAME: &'static str = "profile";
    const DATE_FIELDS: &'static [&'static str] = &["createdAt", "updatedAt"];
}

pub struct BusinessMapper;

impl EntityMapper for BusinessMapper {
    type Row = BusinessRow;
    type Model = Business;

    const NAME: &'static str = "business";
    const DATE_FIELDS: &'static [&'static str] = &["createdAt", "updatedAt"];
    const JSON_FIELDS: &'static [&'static str] = &["metadata"];
}

pub struct UserSettingsMapper;

impl EntityMapper for UserSettingsMapper {
    type Row = UserSettingsRow;
    type Model = UserSettings;

    const NAME: &'static str = "user_settings";
    const DATE_FIELDS: &'static [&'static str] = &["updatedAt"];
    const JSON_FIELDS: &'static [&'static str] = &["notificationPreferences", "privacy"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample_profile_row() -> ProfileRow {
        ProfileRow {
            id: "user-1".to_string(),
            username: "kemi".to_string(),
            full_name: Some("Kemi Adeyemi".to_string()),
            avatar_url: None,
            bio: Some("Bakery owner".to_string()),
            city: Some("Atlanta".to_string()),
            state: Some("GA".to_string()),
            latitude: Some(33.749),
            longitude: Some(-84.388),
            is_business_owner: true,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-02-01T12:30:00Z".to_string(),
        }
    }

    #[test]
    fn test_profile_to_model() {
        let profile = ProfileMapper::to_model(&sample_profile_row()).unwrap();

        assert_eq!(profile.username, "kemi");
        assert_eq!(profile.latitude, Some(33.749));
        assert!(profile.is_business_owner);
        assert_eq!(profile.created_at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(profile.updated_at, Utc.with_ymd_and_hms(2024, 2, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_profile_bidirectional_conversion() {
        let row = sample_profile_row();
        let profile = ProfileMapper::to_model(&row).unwrap();
        let converted_back = ProfileMapper::to_row(&profile).unwrap();
        assert_eq!(row, converted_back);
    }

    #[test]
    fn test_business_metadata_parsed_and_rendered() {
        let row = BusinessRow {
            id: "biz-1".to_string(),
            owner_id: "user-1".to_string(),
            name: "Sweet Auburn Bakery".to_string(),
            category: Some("food".to_string()),
            description: None,
            website: Some("https://example.com".to_string()),
            is_verified: false,
            metadata: Some("{\"hours\":\"8-5\",\"delivery\":true}".to_string()),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        };

        let business = BusinessMapper::to_model(&row).unwrap();
        assert_eq!(business.metadata, Some(json!({"hours": "8-5", "delivery": true})));

        let converted_back = BusinessMapper::to_row(&business).unwrap();
        assert_eq!(converted_back, row);
    }

    #[test]
    fn test_user_settings_json_columns() {
        let row = UserSettingsRow {
            id: "set-1".to_string(),
            user_id: "user-1".to_string(),
            theme: Some("dark".to_string()),
            notification_preferences: Some("{\"email\":true,\"push\":false}".to_string()),
            privacy: None,
            updated_at: "2024-06-01T08:00:00Z".to_string(),
        };

        let settings = UserSettingsMapper::to_model(&row).unwrap();
        assert_eq!(
            settings.notification_preferences,
            Some(json!({"email": true, "push": false}))
        );
        assert_eq!(settings.privacy, None);
    }

    #[test]
    fn test_malformed_settings_json_is_an_error() {
        let row = UserSettingsRow {
            privacy: Some("{public".to_string()),
            updated_at: "2024-06-01T08:00:00Z".to_string(),
            ..Default::default()
        };

        let err = UserSettingsMapper::to_model(&row).unwrap_err();
        assert!(err.to_string().contains("privacy"));
    }
}
