use thiserror::Error;

#[derive(Error, Debug)]
pub enum InwardError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力エラー: {0}")]
    Validation(String),

    #[error("台帳ファイルエラー: {0}")]
    Store(String),

    #[error("レコードが見つかりません: ID {0}")]
    RecordNotFound(u64),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ログインに失敗しました")]
    LoginFailed,

    #[error("管理者権限が必要です")]
    AdminRequired,

    #[error("設定ストアエラー: {0}")]
    Settings(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("プロンプト入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, InwardError>;
