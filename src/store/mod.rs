//! 台帳ストアモジュール
//!
//! Excelブック1冊（`Inward Material Register.xlsx`）をそのまま台帳として使う。
//! 操作ごとにファイルを開いて読み切り、変更時は全行を書き直す。
//! 単一操作者前提のため、接続の使い回しや操作をまたぐトランザクションはない。

use crate::config::Config;
use crate::error::{InwardError, Result};
use crate::record::Record;
use crate::schema::{self, ID_COLUMN};
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::{Path, PathBuf};

/// 台帳シート名
pub const SHEET_NAME: &str = "Inward Entry";

/// 入庫台帳ストア
pub struct RegisterStore {
    path: PathBuf,
}

impl RegisterStore {
    pub fn new(config: &Config) -> Self {
        Self {
            path: config.register_path(),
        }
    }

    /// テスト・任意パス用
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 台帳ファイルがなければヘッダー付きで新規作成する
    ///
    /// 既存ファイルには触れない。作成したときだけ true を返す
    pub fn initialize(&self) -> Result<bool> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if self.path.exists() {
            return Ok(false);
        }

        self.write_all(&[])?;
        Ok(true)
    }

    /// 全レコードをシート順に読み込む
    pub fn select_all(&self) -> Result<Vec<Record>> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| InwardError::Store(format!("台帳を開けません: {}", e)))?;
        let range = workbook
            .worksheet_range(SHEET_NAME)
            .map_err(|e| InwardError::Store(format!("シート読み込みエラー: {}", e)))?;

        let mut records = Vec::new();

        // 先頭行はヘッダー
        for (row_index, row) in range.rows().enumerate().skip(1) {
            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                continue;
            }

            let id_cell = row.first().map(cell_to_string).unwrap_or_default();
            let id: u64 = id_cell.trim().parse().map_err(|_| {
                InwardError::Store(format!("{}行目のID列が不正です: {}", row_index + 1, id_cell))
            })?;

            let cells: Vec<String> = row.iter().skip(1).map(cell_to_string).collect();
            records.push(Record::from_row(id, &cells));
        }

        Ok(records)
    }

    /// 直近 n 件を新しい順で返す
    pub fn select_last(&self, n: usize) -> Result<Vec<Record>> {
        let mut records = self.select_all()?;
        records.sort_by_key(|r| r.id);
        Ok(records.into_iter().rev().take(n).collect())
    }

    /// レコードを追加して採番したIDを返す
    pub fn insert(&self, record: &Record) -> Result<u64> {
        let mut records = self.select_all()?;
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;

        let mut record = record.clone();
        record.id = id;
        records.push(record);

        self.write_all(&records)?;
        Ok(id)
    }

    /// 指定IDのレコードを置き換える。IDは変更されない
    pub fn update(&self, id: u64, record: &Record) -> Result<()> {
        let mut records = self.select_all()?;

        let Some(target) = records.iter_mut().find(|r| r.id == id) else {
            return Err(InwardError::RecordNotFound(id));
        };

        let mut record = record.clone();
        record.id = id;
        *target = record;

        self.write_all(&records)
    }

    /// 台帳全体を書き直す
    fn write_all(&self, records: &[Record]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| InwardError::Store(format!("シート名設定エラー: {}", e)))?;

        // ヘッダー書式
        let header_format = Format::new()
            .set_bold()
            .set_font_name("Bookman Old Style")
            .set_font_size(11.0)
            .set_background_color(Color::RGB(0x87CEEB))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thick);

        let body_format = Format::new()
            .set_font_name("Bookman Old Style")
            .set_font_size(11.0)
            .set_border(FormatBorder::Thin);

        worksheet
            .write_string_with_format(0, 0, ID_COLUMN, &header_format)
            .map_err(|e| InwardError::Store(format!("ヘッダー書き込みエラー: {}", e)))?;
        worksheet
            .set_column_width(0, 6)
            .map_err(|e| InwardError::Store(format!("列幅設定エラー: {}", e)))?;

        for (i, column) in schema::COLUMNS.iter().enumerate() {
            let col = (i + 1) as u16;
            worksheet
                .write_string_with_format(0, col, column.name, &header_format)
                .map_err(|e| InwardError::Store(format!("ヘッダー書き込みエラー: {}", e)))?;
            worksheet
                .set_column_width(col, column.width as f64)
                .map_err(|e| InwardError::Store(format!("列幅設定エラー: {}", e)))?;
        }

        for (r, record) in records.iter().enumerate() {
            let row = (r + 1) as u32;
            worksheet
                .write_number_with_format(row, 0, record.id as f64, &body_format)
                .map_err(|e| InwardError::Store(format!("ID書き込みエラー: {}", e)))?;

            for (i, cell) in record.to_row().iter().enumerate() {
                worksheet
                    .write_string_with_format(row, (i + 1) as u16, cell, &body_format)
                    .map_err(|e| InwardError::Store(format!("セル書き込みエラー: {}", e)))?;
            }
        }

        workbook
            .save(&self.path)
            .map_err(|e| InwardError::Store(format!("台帳保存エラー: {}", e)))?;

        Ok(())
    }
}

/// セル値を文字列へ変換する。数値セルの整数は小数点なしで返す
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
