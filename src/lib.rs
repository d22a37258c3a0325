//! 入庫資材の登録・検索・Excel出力ツール
//!
//! 台帳（Excelブック）への入庫レコードの登録と、
//! (列, 演算子, 値) の条件列による検索・結果出力を行う。

pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod export;
pub mod filter;
pub mod record;
pub mod schema;
pub mod session;
pub mod settings;
pub mod store;

pub use config::Config;
pub use error::{InwardError, Result};
pub use filter::executor::{execute, QueryOutcome};
pub use filter::{FilterCondition, Operator, Predicate};
pub use record::Record;
pub use store::RegisterStore;
