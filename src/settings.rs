//! 設定ストアモジュール
//!
//! プロジェクト一覧とログインユーザーをデータディレクトリのJSONファイルに
//! 保持する。壊れたファイルや未作成のファイルは既定値として扱う。

use crate::error::{InwardError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

const SETTINGS_FILE_NAME: &str = "settings.json";

/// プロジェクト（入力フォームのドロップダウンに使う）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
}

/// ユーザー区分
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserCategory {
    #[default]
    User,
    Admin,
}

impl UserCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserCategory::User => "User",
            UserCategory::Admin => "Admin",
        }
    }

    pub fn choices() -> &'static [&'static str] {
        &["User", "Admin"]
    }
}

impl std::str::FromStr for UserCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "User" => Ok(UserCategory::User),
            "Admin" => Ok(UserCategory::Admin),
            _ => Err(format!("Unknown category: {}. Use User or Admin", s)),
        }
    }
}

impl std::fmt::Display for UserCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ログインユーザー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub user_name: String,
    pub password: String,
    pub category: UserCategory,
}

/// 設定ファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    version: u32,
    projects: Vec<Project>,
    users: Vec<UserAccount>,
}

impl Settings {
    const CURRENT_VERSION: u32 = 1;

    /// 設定ファイルを読み込み。存在しない・壊れている場合は既定値
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(SETTINGS_FILE_NAME);
        if !path.exists() {
            return Self::default();
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, Settings>(reader) {
            Ok(settings) => {
                if settings.version != Self::CURRENT_VERSION {
                    eprintln!("設定ファイルのバージョン不一致、既定値を使用します");
                    return Self::default();
                }
                settings
            }
            Err(_) => Self::default(),
        }
    }

    /// 設定ファイルを保存
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(SETTINGS_FILE_NAME);
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// ドロップダウン用のプロジェクト名リスト（登録順）
    pub fn project_names(&self) -> Vec<String> {
        self.projects.iter().map(|p| p.name.clone()).collect()
    }

    /// プロジェクトを追加。空文字・重複は拒否する
    pub fn add_project(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(InwardError::Settings("プロジェクト名が空です".into()));
        }
        if self.projects.iter().any(|p| p.name == name) {
            return Err(InwardError::Settings(format!(
                "プロジェクトは既に登録されています: {}",
                name
            )));
        }

        self.projects.push(Project { name: name.to_string() });
        Ok(())
    }

    /// プロジェクト名を変更
    pub fn rename_project(&mut self, old: &str, new: &str) -> Result<()> {
        let new = new.trim();
        if new.is_empty() {
            return Err(InwardError::Settings("新しいプロジェクト名が空です".into()));
        }
        if self.projects.iter().any(|p| p.name == new) {
            return Err(InwardError::Settings(format!(
                "プロジェクトは既に登録されています: {}",
                new
            )));
        }

        let Some(project) = self.projects.iter_mut().find(|p| p.name == old) else {
            return Err(InwardError::Settings(format!(
                "プロジェクトが見つかりません: {}",
                old
            )));
        };
        project.name = new.to_string();
        Ok(())
    }

    /// ユーザーを追加。ユーザー名の重複は拒否する
    pub fn add_user(&mut self, account: UserAccount) -> Result<()> {
        if account.user_name.trim().is_empty() {
            return Err(InwardError::Settings("ユーザー名が空です".into()));
        }
        if self.users.iter().any(|u| u.user_name == account.user_name) {
            return Err(InwardError::Settings(format!(
                "ユーザーは既に登録されています: {}",
                account.user_name
            )));
        }

        self.users.push(account);
        Ok(())
    }

    pub fn users(&self) -> &[UserAccount] {
        &self.users
    }

    /// ユーザー名とパスワードの平文照合
    pub fn find_user(&self, user_name: &str, password: &str) -> Option<&UserAccount> {
        self.users
            .iter()
            .find(|u| u.user_name == user_name && u.password == password)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            projects: Vec::new(),
            // 初回起動用の管理者アカウント
            users: vec![UserAccount {
                user_name: "admin".into(),
                password: "admin".into(),
                category: UserCategory::Admin,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_project_rejects_duplicate() {
        let mut settings = Settings::default();
        settings.add_project("Alpha").unwrap();
        assert!(settings.add_project("Alpha").is_err());
        assert!(settings.add_project("  ").is_err());
        assert_eq!(settings.project_names(), vec!["Alpha"]);
    }

    #[test]
    fn test_rename_project() {
        let mut settings = Settings::default();
        settings.add_project("Alpha").unwrap();
        settings.add_project("Beta").unwrap();

        settings.rename_project("Alpha", "Gamma").unwrap();
        assert_eq!(settings.project_names(), vec!["Gamma", "Beta"]);

        // 既存名への変更と未知の旧名は拒否
        assert!(settings.rename_project("Gamma", "Beta").is_err());
        assert!(settings.rename_project("Alpha", "Delta").is_err());
    }

    #[test]
    fn test_find_user_plaintext_scan() {
        let settings = Settings::default();
        assert!(settings.find_user("admin", "admin").is_some());
        assert!(settings.find_user("admin", "wrong").is_none());
        assert!(settings.find_user("nobody", "admin").is_none());
    }

    #[test]
    fn test_add_user_rejects_duplicate_name() {
        let mut settings = Settings::default();
        let account = UserAccount {
            user_name: "admin".into(),
            password: "other".into(),
            category: UserCategory::User,
        };
        assert!(settings.add_user(account).is_err());
    }
}
