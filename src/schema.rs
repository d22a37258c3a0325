//! 台帳の列スキーマ定義
//!
//! 各列の型をここで一度だけ宣言し、フィルタ評価は実行時の型推測ではなく
//! この宣言を参照する。

/// 列の宣言型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// 数値比較される列（Qty）
    Integer,
    /// YYYY-MM-DD 形式
    Date,
    /// HH:MM:SS 形式
    Time,
    /// 自由テキスト
    Text,
}

/// 列定義（表示名・宣言型・シート上の列幅）
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub width: u16,
}

/// ユーザーが入力・検索できる21列。シート上の並び順そのまま。
/// （レコードIDは台帳側が管理する22列目で、検索対象には含まない）
pub const COLUMNS: &[ColumnDef] = &[
    ColumnDef { name: "Inward No", kind: ColumnKind::Text, width: 12 },
    ColumnDef { name: "Return Type", kind: ColumnKind::Text, width: 12 },
    ColumnDef { name: "Benefit Type", kind: ColumnKind::Text, width: 12 },
    ColumnDef { name: "Date", kind: ColumnKind::Date, width: 10 },
    ColumnDef { name: "Time", kind: ColumnKind::Time, width: 8 },
    ColumnDef { name: "Gate Entry No", kind: ColumnKind::Text, width: 15 },
    ColumnDef { name: "Invoice No", kind: ColumnKind::Text, width: 12 },
    ColumnDef { name: "PO No", kind: ColumnKind::Text, width: 10 },
    ColumnDef { name: "BOE No", kind: ColumnKind::Text, width: 10 },
    ColumnDef { name: "Return Date", kind: ColumnKind::Date, width: 8 },
    ColumnDef { name: "Return Time", kind: ColumnKind::Time, width: 8 },
    ColumnDef { name: "Supplier", kind: ColumnKind::Text, width: 20 },
    ColumnDef { name: "Material", kind: ColumnKind::Text, width: 25 },
    ColumnDef { name: "Qty", kind: ColumnKind::Integer, width: 8 },
    ColumnDef { name: "Department", kind: ColumnKind::Text, width: 12 },
    ColumnDef { name: "Project", kind: ColumnKind::Text, width: 15 },
    ColumnDef { name: "Vehicle", kind: ColumnKind::Text, width: 12 },
    ColumnDef { name: "Received", kind: ColumnKind::Text, width: 15 },
    ColumnDef { name: "Authorized", kind: ColumnKind::Text, width: 15 },
    ColumnDef { name: "Security", kind: ColumnKind::Text, width: 15 },
    ColumnDef { name: "Remark", kind: ColumnKind::Text, width: 20 },
];

/// ID列の表示名（シート1列目）
pub const ID_COLUMN: &str = "Id";

/// 表示名で列定義を引く（完全一致）
pub fn find_column(name: &str) -> Option<&'static ColumnDef> {
    COLUMNS.iter().find(|c| c.name == name)
}

/// 列の宣言型を返す。未知の列は None
pub fn column_kind(name: &str) -> Option<ColumnKind> {
    find_column(name).map(|c| c.kind)
}

/// 選択肢用の列名リスト
pub fn column_names() -> Vec<&'static str> {
    COLUMNS.iter().map(|c| c.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count() {
        assert_eq!(COLUMNS.len(), 21);
    }

    #[test]
    fn test_find_column() {
        assert!(find_column("Qty").is_some());
        assert!(find_column("Department").is_some());
        assert!(find_column("qty").is_none()); // 大文字小文字は区別
        assert!(find_column("Unknown").is_none());
    }

    #[test]
    fn test_declared_kinds() {
        assert_eq!(column_kind("Qty"), Some(ColumnKind::Integer));
        assert_eq!(column_kind("Date"), Some(ColumnKind::Date));
        assert_eq!(column_kind("Return Time"), Some(ColumnKind::Time));
        assert_eq!(column_kind("Supplier"), Some(ColumnKind::Text));
    }

    #[test]
    fn test_names_unique() {
        let names = column_names();
        let mut dedup = names.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), names.len());
    }
}
