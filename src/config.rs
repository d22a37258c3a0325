use crate::error::{InwardError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 台帳ファイル名（データディレクトリ直下）
pub const REGISTER_FILE_NAME: &str = "Inward Material Register.xlsx";

/// 検索結果ファイル名
pub const FILTERED_FILE_NAME: &str = "Filtered_Inward_Material.xlsx";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 台帳・設定ファイルを置くディレクトリ
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Self::default_config()
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| InwardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("inward-register").join("config.json"))
    }

    fn default_config() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| InwardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(Self {
            data_dir: home.join("Inward_logistic_master"),
        })
    }

    /// 台帳ファイルのフルパス
    pub fn register_path(&self) -> PathBuf {
        self.data_dir.join(REGISTER_FILE_NAME)
    }

    /// 検索結果ファイルのフルパス
    pub fn filtered_path(&self) -> PathBuf {
        self.data_dir.join(FILTERED_FILE_NAME)
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.data_dir = dir;
        self.save()
    }
}
