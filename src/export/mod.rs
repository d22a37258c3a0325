pub mod excel;

use crate::error::{InwardError, Result};
use crate::record::Record;
use std::path::{Path, PathBuf};

/// 検索結果を整形済みExcelへ出力する
pub fn export_results(records: &[Record], output_path: &Path) -> Result<()> {
    println!("- Excelを生成中...");
    excel::write_result_workbook(records, output_path)?;
    println!("✔ Excel出力: {}", output_path.display());

    Ok(())
}

/// ファイルをダウンロードフォルダへコピーして、コピー先のパスを返す
pub fn download(source: &Path) -> Result<PathBuf> {
    if !source.exists() {
        return Err(InwardError::FileNotFound(source.display().to_string()));
    }

    let download_dir = dirs::download_dir()
        .ok_or_else(|| InwardError::Config("ダウンロードフォルダが見つかりません".into()))?;

    let file_name = source
        .file_name()
        .ok_or_else(|| InwardError::FileNotFound(source.display().to_string()))?;
    let destination = download_dir.join(file_name);

    std::fs::copy(source, &destination)?;

    Ok(destination)
}
