//! ログインセッション
//!
//! 設定ストアのユーザー一覧と平文照合する。3回失敗で中断。

use crate::error::{InwardError, Result};
use crate::settings::{Settings, UserCategory};
use dialoguer::{Input, Password};

const MAX_ATTEMPTS: u32 = 3;

/// ログイン済みセッション
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub username: String,
    pub category: UserCategory,
}

impl LoginSession {
    pub fn is_admin(&self) -> bool {
        self.category == UserCategory::Admin
    }
}

/// 対話ログイン
pub fn login(settings: &Settings) -> Result<LoginSession> {
    for attempt in 1..=MAX_ATTEMPTS {
        let username: String = Input::new()
            .with_prompt("ユーザー名")
            .interact_text()
            .map_err(|e| InwardError::Prompt(e.to_string()))?;

        let password: String = Password::new()
            .with_prompt("パスワード")
            .interact()
            .map_err(|e| InwardError::Prompt(e.to_string()))?;

        if let Some(user) = settings.find_user(username.trim(), password.trim()) {
            println!("✔ ログイン成功: {} ({})\n", user.user_name, user.category);
            return Ok(LoginSession {
                username: user.user_name.clone(),
                category: user.category,
            });
        }

        eprintln!("✗ ログイン失敗 ({}/{})\n", attempt, MAX_ATTEMPTS);
    }

    Err(InwardError::LoginFailed)
}

/// 管理者チェック。設定変更系コマンドの前に呼ぶ
pub fn require_admin(session: &LoginSession) -> Result<()> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(InwardError::AdminRequired)
    }
}
