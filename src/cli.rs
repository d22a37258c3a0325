use crate::filter::FilterCondition;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inward-register")]
#[command(about = "入庫資材の登録・検索・Excel出力ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 入庫レコードを対話的に登録
    Entry,

    /// 台帳を検索して結果をExcelへ出力
    Search {
        /// フィルタ指定 (COLUMN=VALUE / COLUMN!=VALUE / COLUMN~VALUE / COLUMN!~VALUE)。複数指定可
        #[arg(short, long = "filter")]
        filters: Vec<FilterCondition>,

        /// 結果の出力先（省略時はデータディレクトリ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 検索結果をダウンロードフォルダへコピー
        #[arg(long)]
        download: bool,
    },

    /// 既存レコードを表示・編集（編集の有効化が必要）
    Edit {
        /// 対象レコードのID
        #[arg(required = true)]
        id: u64,
    },

    /// 台帳または直近の検索結果をダウンロードフォルダへコピー
    Download {
        /// コピー対象 (master/filtered)
        #[arg(short, long, default_value = "master")]
        target: DownloadTarget,
    },

    /// プロジェクト・ユーザーの管理（管理者のみ）
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// 設定を表示/編集
    Config {
        /// データディレクトリを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// プロジェクトを追加
    AddProject {
        /// プロジェクト名
        name: String,
    },

    /// プロジェクト名を変更
    RenameProject {
        /// 変更前の名前
        old: String,

        /// 変更後の名前
        new: String,
    },

    /// プロジェクト一覧を表示
    ListProjects,

    /// ユーザーを対話的に追加
    AddUser,

    /// ユーザー一覧を表示
    ListUsers,
}

/// ダウンロード対象
#[derive(Clone, Copy, Debug, Default)]
pub enum DownloadTarget {
    /// 台帳本体
    #[default]
    Master,
    /// 直近の検索結果
    Filtered,
}

impl std::str::FromStr for DownloadTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "master" => Ok(DownloadTarget::Master),
            "filtered" | "filterdata" => Ok(DownloadTarget::Filtered),
            _ => Err(format!("Unknown target: {}. Use master or filtered", s)),
        }
    }
}

impl std::fmt::Display for DownloadTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownloadTarget::Master => write!(f, "master"),
            DownloadTarget::Filtered => write!(f, "filtered"),
        }
    }
}
