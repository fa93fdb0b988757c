//! Behavior of `SettingsRepository` over memory and file storage.

use std::sync::Arc;

use shoplist_core::{LocationAccuracy, NotificationSettings, Settings, SettingsPatch};
use shoplist_settings::{
    FileStorage, KeyValueStorage, MemoryStorage, SettingsError, SettingsRepository,
    SETTINGS_STORAGE_KEY,
};

fn memory_repo() -> SettingsRepository<Arc<MemoryStorage>> {
    SettingsRepository::new(Arc::new(MemoryStorage::new()))
}

fn radius(meters: f64) -> SettingsPatch {
    SettingsPatch {
        search_radius: Some(meters),
        ..SettingsPatch::default()
    }
}

#[test]
fn first_read_returns_defaults_without_writing() {
    let repo = memory_repo();
    let settings = repo.get_settings();

    assert!(settings.location_sharing);
    assert_eq!(settings.location_accuracy, LocationAccuracy::Balanced);
    assert!((settings.search_radius - 100.0).abs() < f64::EPSILON);
    assert_eq!(
        settings.notifications,
        NotificationSettings {
            new_stores: true,
            item_availability: true,
            price_alerts: false,
        }
    );
    assert_eq!(repo.storage().get(SETTINGS_STORAGE_KEY).unwrap(), None);
}

#[test]
fn update_radius_leaves_other_fields_unchanged() {
    let repo = memory_repo();
    repo.update_settings(&SettingsPatch {
        location_accuracy: Some(LocationAccuracy::High),
        ..SettingsPatch::default()
    })
    .unwrap();
    let before = repo.get_settings();

    let returned = repo.update_settings(&radius(250.0)).unwrap();
    let after = repo.get_settings();

    assert_eq!(returned, after);
    assert!((after.search_radius - 250.0).abs() < f64::EPSILON);
    assert_eq!(after.location_accuracy, before.location_accuracy);
    assert_eq!(after.location_sharing, before.location_sharing);
    assert_eq!(after.notifications, before.notifications);
}

#[test]
fn notifications_patch_replaces_whole_object() {
    let repo = memory_repo();
    let current = repo.get_settings().notifications;
    let updated = repo
        .update_settings(&SettingsPatch {
            notifications: Some(NotificationSettings {
                price_alerts: true,
                ..current
            }),
            ..SettingsPatch::default()
        })
        .unwrap();
    assert!(updated.notifications.price_alerts);
    assert!(updated.notifications.new_stores);
}

#[test]
fn reset_restores_defaults_after_mutations() {
    let repo = memory_repo();
    repo.update_settings(&radius(400.0)).unwrap();
    repo.update_settings(&SettingsPatch {
        location_sharing: Some(false),
        ..SettingsPatch::default()
    })
    .unwrap();

    let reset = repo.reset_settings().unwrap();
    assert_eq!(reset, Settings::default());
    assert_eq!(repo.get_settings(), Settings::default());
    assert!(repo.storage().get(SETTINGS_STORAGE_KEY).unwrap().is_some());
}

#[test]
fn applying_current_settings_is_idempotent() {
    let repo = memory_repo();
    repo.update_settings(&radius(150.0)).unwrap();
    let stored_before = repo.storage().get(SETTINGS_STORAGE_KEY).unwrap();

    let current = repo.get_settings();
    repo.update_settings(&SettingsPatch::from(current.clone()))
        .unwrap();

    assert_eq!(repo.get_settings(), current);
    assert_eq!(repo.storage().get(SETTINGS_STORAGE_KEY).unwrap(), stored_before);
}

#[test]
fn malformed_value_yields_defaults_and_is_not_repaired() {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(SETTINGS_STORAGE_KEY, "{not json").unwrap();
    let repo = SettingsRepository::new(Arc::clone(&storage));

    assert_eq!(repo.get_settings(), Settings::default());
    assert_eq!(
        storage.get(SETTINGS_STORAGE_KEY).unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn stored_value_missing_a_field_is_not_back_filled() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(
            SETTINGS_STORAGE_KEY,
            r#"{"locationSharing":false,"locationAccuracy":"low","searchRadius":300}"#,
        )
        .unwrap();
    let repo = SettingsRepository::new(storage);
    assert_eq!(repo.get_settings(), Settings::default());
}

#[test]
fn unknown_accuracy_in_storage_yields_defaults() {
    let storage = Arc::new(MemoryStorage::new());
    let mut json = serde_json::to_value(Settings::default()).unwrap();
    json["locationAccuracy"] = "precise".into();
    storage
        .set(SETTINGS_STORAGE_KEY, &json.to_string())
        .unwrap();
    let repo = SettingsRepository::new(storage);
    assert_eq!(repo.get_settings(), Settings::default());
}

#[test]
fn out_of_range_radius_is_rejected_and_not_persisted() {
    let repo = memory_repo();
    repo.update_settings(&radius(200.0)).unwrap();

    for bad in [10.0, 1_000.0, f64::NAN, -50.0] {
        let err = repo.update_settings(&radius(bad)).unwrap_err();
        assert!(matches!(err, SettingsError::Validation(_)), "got {err:?}");
    }
    assert!((repo.get_settings().search_radius - 200.0).abs() < f64::EPSILON);
}

#[test]
fn file_storage_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    {
        let repo = SettingsRepository::new(FileStorage::open(dir.path()).unwrap());
        repo.update_settings(&radius(350.0)).unwrap();
    }
    let repo = SettingsRepository::new(FileStorage::open(dir.path()).unwrap());
    assert!((repo.get_settings().search_radius - 350.0).abs() < f64::EPSILON);
}

#[test]
fn persisted_document_uses_camel_case_keys() {
    let repo = memory_repo();
    repo.reset_settings().unwrap();
    let raw = repo.storage().get(SETTINGS_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["searchRadius"], 100.0);
    assert_eq!(value["notifications"]["priceAlerts"], false);
}

#[test]
fn out_of_range_stored_radius_reads_as_defaults_and_allows_updates() {
    let storage = Arc::new(MemoryStorage::new());
    let mut json = serde_json::to_value(Settings::default()).unwrap();
    json["searchRadius"] = 1_000.0.into();
    json["locationSharing"] = false.into();
    storage
        .set(SETTINGS_STORAGE_KEY, &json.to_string())
        .unwrap();
    let repo = SettingsRepository::new(Arc::clone(&storage));

    let current = repo.get_settings();
    assert_eq!(current, Settings::default());
    assert_eq!(repo.update_settings(&SettingsPatch::from(current.clone())).unwrap(), current);

    let updated = repo
        .update_settings(&SettingsPatch {
            location_sharing: Some(false),
            ..SettingsPatch::default()
        })
        .unwrap();
    assert!(!updated.location_sharing);
    assert!((updated.search_radius - 100.0).abs() < f64::EPSILON);
}
