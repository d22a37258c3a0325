//! 設定ストアテスト
//!
//! プロジェクト・ユーザーの保存と読み込みを検証する

use inward_register_rust::settings::{Settings, UserAccount, UserCategory};
use tempfile::tempdir;

/// 設定ファイルがなければ既定値（初期管理者のみ）
#[test]
fn test_load_without_file_returns_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let settings = Settings::load(dir.path());

    assert!(settings.project_names().is_empty());
    assert!(settings.find_user("admin", "admin").is_some());
}

/// 保存と読み込みの往復
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut settings = Settings::load(dir.path());
    settings.add_project("Alpha").expect("追加失敗");
    settings.add_project("Beta").expect("追加失敗");
    settings
        .add_user(UserAccount {
            user_name: "staff1".into(),
            password: "pass1".into(),
            category: UserCategory::User,
        })
        .expect("追加失敗");

    settings.save(dir.path()).expect("保存失敗");

    let loaded = Settings::load(dir.path());
    assert_eq!(loaded.project_names(), vec!["Alpha", "Beta"]);
    assert!(loaded.find_user("staff1", "pass1").is_some());
    assert_eq!(
        loaded.find_user("staff1", "pass1").unwrap().category,
        UserCategory::User
    );
}

/// 壊れた設定ファイルは既定値として扱われる
#[test]
fn test_corrupted_file_falls_back_to_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("settings.json"), "{ invalid json }").unwrap();

    let settings = Settings::load(dir.path());
    assert!(settings.project_names().is_empty());
    assert!(settings.find_user("admin", "admin").is_some());
}

/// プロジェクト名変更が保存後も保持される
#[test]
fn test_rename_project_persists() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut settings = Settings::load(dir.path());
    settings.add_project("Alpha").expect("追加失敗");
    settings.rename_project("Alpha", "Gamma").expect("変更失敗");
    settings.save(dir.path()).expect("保存失敗");

    let loaded = Settings::load(dir.path());
    assert_eq!(loaded.project_names(), vec!["Gamma"]);
}

/// パスワードが違えばログインできない
#[test]
fn test_find_user_requires_exact_password() {
    let dir = tempdir().expect("Failed to create temp dir");
    let settings = Settings::load(dir.path());

    assert!(settings.find_user("admin", "Admin").is_none());
    assert!(settings.find_user("admin", "admin ").is_none());
}
