//! 検索結果のExcel生成
//!
//! ヘッダー行に書式を付け、列幅は内容の長さに合わせて調整する。

use crate::error::{InwardError, Result};
use crate::record::Record;
use crate::schema::{self, ID_COLUMN};
use indicatif::ProgressBar;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;

/// 列幅の上限（文字数換算）
const MAX_COLUMN_WIDTH: usize = 50;

/// 折り返しを入れるセル長
const WRAP_THRESHOLD: usize = 50;

pub fn write_result_workbook(records: &[Record], output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new()
        .set_bold()
        .set_font_name("Bookman Old Style")
        .set_font_size(11.0)
        .set_background_color(Color::RGB(0xD9FFFF))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    let body_format = Format::new()
        .set_font_name("Bookman Old Style")
        .set_font_size(11.0)
        .set_align(FormatAlign::VerticalCenter);

    let wrap_format = Format::new()
        .set_font_name("Bookman Old Style")
        .set_font_size(11.0)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap();

    let err = |e: rust_xlsxwriter::XlsxError| InwardError::ExcelGeneration(e.to_string());

    // ヘッダー行
    worksheet
        .write_string_with_format(0, 0, ID_COLUMN, &header_format)
        .map_err(err)?;
    for (i, column) in schema::COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, (i + 1) as u16, column.name, &header_format)
            .map_err(err)?;
    }

    // データ行
    let bar = ProgressBar::new(records.len() as u64);
    for (r, record) in records.iter().enumerate() {
        let row = (r + 1) as u32;
        worksheet
            .write_number_with_format(row, 0, record.id as f64, &body_format)
            .map_err(err)?;

        for (i, cell) in record.to_row().iter().enumerate() {
            let format = if cell.chars().count() > WRAP_THRESHOLD {
                &wrap_format
            } else {
                &body_format
            };
            worksheet
                .write_string_with_format(row, (i + 1) as u16, cell, format)
                .map_err(err)?;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    // 列幅は「ヘッダー長+5」と「最長セル+5」の大きい方、上限50
    worksheet.set_column_width(0, 6).map_err(err)?;
    for (i, column) in schema::COLUMNS.iter().enumerate() {
        let longest_cell = records
            .iter()
            .map(|record| record.field(column.name).unwrap_or_default().chars().count())
            .max()
            .unwrap_or(0);
        let width = (column.name.len() + 5)
            .max(longest_cell + 5)
            .min(MAX_COLUMN_WIDTH);
        worksheet
            .set_column_width((i + 1) as u16, width as f64)
            .map_err(err)?;
    }

    workbook
        .save(output_path)
        .map_err(|e| InwardError::ExcelGeneration(format!("保存エラー: {}", e)))?;

    Ok(())
}
