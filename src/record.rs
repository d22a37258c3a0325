//! 入庫レコードの型定義
//!
//! 台帳1行分のレコードと、区分値（返却区分・ベネフィット区分）を定義する。
//! 日付は YYYY-MM-DD、時刻は HH:MM:SS、Qty は数字のみの文字列として保持する。

use crate::error::{InwardError, Result};
use crate::schema;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 返却区分
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnType {
    #[default]
    #[serde(rename = "Non-Returnable")]
    NonReturnable,
    #[serde(rename = "Returnable")]
    Returnable,
}

impl ReturnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnType::NonReturnable => "Non-Returnable",
            ReturnType::Returnable => "Returnable",
        }
    }

    /// 入力フォームの選択肢
    pub fn choices() -> &'static [&'static str] {
        &["Non-Returnable", "Returnable"]
    }
}

impl std::str::FromStr for ReturnType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Non-Returnable" => Ok(ReturnType::NonReturnable),
            "Returnable" => Ok(ReturnType::Returnable),
            _ => Err(format!("Unknown return type: {}. Use Non-Returnable or Returnable", s)),
        }
    }
}

impl std::fmt::Display for ReturnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// ベネフィット区分
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BenefitType {
    #[default]
    #[serde(rename = "Non-Benefit")]
    NonBenefit,
    #[serde(rename = "Benefit")]
    Benefit,
    #[serde(rename = "None")]
    None,
}

impl BenefitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BenefitType::NonBenefit => "Non-Benefit",
            BenefitType::Benefit => "Benefit",
            BenefitType::None => "None",
        }
    }

    pub fn choices() -> &'static [&'static str] {
        &["Non-Benefit", "Benefit", "None"]
    }
}

impl std::str::FromStr for BenefitType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Non-Benefit" => Ok(BenefitType::NonBenefit),
            "Benefit" => Ok(BenefitType::Benefit),
            "None" => Ok(BenefitType::None),
            _ => Err(format!("Unknown benefit type: {}. Use Non-Benefit, Benefit, or None", s)),
        }
    }
}

impl std::fmt::Display for BenefitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 入庫レコード（台帳1行分）
///
/// `id` は台帳側が採番し、一度割り当てられたら変更しない。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub id: u64,
    pub inward_no: String,
    pub return_type: ReturnType,
    pub benefit_type: BenefitType,
    pub date: String,
    pub time: String,
    pub gate_entry_no: String,
    pub invoice_no: String,
    pub po_no: String,
    pub boe_no: String,
    pub return_date: String,
    pub return_time: String,
    pub supplier: String,
    pub material: String,
    pub qty: String,
    pub department: String,
    pub project: String,
    pub vehicle: String,
    pub received: String,
    pub authorized: String,
    pub security: String,
    pub remark: String,
}

impl Record {
    /// 列の表示名で値を引く。未知の列名は None
    pub fn field(&self, column: &str) -> Option<&str> {
        let value = match column {
            "Inward No" => self.inward_no.as_str(),
            "Return Type" => self.return_type.as_str(),
            "Benefit Type" => self.benefit_type.as_str(),
            "Date" => self.date.as_str(),
            "Time" => self.time.as_str(),
            "Gate Entry No" => self.gate_entry_no.as_str(),
            "Invoice No" => self.invoice_no.as_str(),
            "PO No" => self.po_no.as_str(),
            "BOE No" => self.boe_no.as_str(),
            "Return Date" => self.return_date.as_str(),
            "Return Time" => self.return_time.as_str(),
            "Supplier" => self.supplier.as_str(),
            "Material" => self.material.as_str(),
            "Qty" => self.qty.as_str(),
            "Department" => self.department.as_str(),
            "Project" => self.project.as_str(),
            "Vehicle" => self.vehicle.as_str(),
            "Received" => self.received.as_str(),
            "Authorized" => self.authorized.as_str(),
            "Security" => self.security.as_str(),
            "Remark" => self.remark.as_str(),
            _ => return None,
        };
        Some(value)
    }

    /// 保存前の入力チェック
    ///
    /// - Qty は数字のみ
    /// - Invoice No は空白不可
    /// - 日付は YYYY-MM-DD として解釈できること（Return Date は空でも可）
    pub fn validate(&self) -> Result<()> {
        lazy_static::lazy_static! {
            static ref QTY_RE: Regex = Regex::new(r"^[0-9]+$").unwrap();
        }

        if !QTY_RE.is_match(&self.qty) {
            return Err(InwardError::Validation("Qty は数値で入力してください".into()));
        }

        if self.invoice_no.trim().is_empty() {
            return Err(InwardError::Validation("Invoice No は空白にできません".into()));
        }

        if NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err(InwardError::Validation(format!(
                "日付形式が不正です: {}",
                self.date
            )));
        }

        if !self.return_date.is_empty()
            && NaiveDate::parse_from_str(&self.return_date, "%Y-%m-%d").is_err()
        {
            return Err(InwardError::Validation(format!(
                "返却日の形式が不正です: {}",
                self.return_date
            )));
        }

        Ok(())
    }

    /// シート行（ID列を除く21セル）へ変換
    pub fn to_row(&self) -> Vec<String> {
        schema::COLUMNS
            .iter()
            .map(|c| self.field(c.name).unwrap_or_default().to_string())
            .collect()
    }

    /// シート行から復元。セル数が不足している行は空文字で埋める
    pub fn from_row(id: u64, cells: &[String]) -> Self {
        let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();

        Record {
            id,
            inward_no: cell(0),
            return_type: cell(1).parse().unwrap_or_default(),
            benefit_type: cell(2).parse().unwrap_or_default(),
            date: cell(3),
            time: cell(4),
            gate_entry_no: cell(5),
            invoice_no: cell(6),
            po_no: cell(7),
            boe_no: cell(8),
            return_date: cell(9),
            return_time: cell(10),
            supplier: cell(11),
            material: cell(12),
            qty: cell(13),
            department: cell(14),
            project: cell(15),
            vehicle: cell(16),
            received: cell(17),
            authorized: cell(18),
            security: cell(19),
            remark: cell(20),
        }
    }
}

/// 日付入力を YYYY-MM-DD に正規化する
///
/// YYYY-MM-DD と MM/DD/YY の両方を受け付ける
pub fn normalize_date(input: &str) -> Result<String> {
    let trimmed = input.trim();

    for format in ["%Y-%m-%d", "%m/%d/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.format("%Y-%m-%d").to_string());
        }
    }

    Err(InwardError::Validation(format!("日付形式が不正です: {}", trimmed)))
}

/// 時刻入力の正規化。コロンを含まない入力は 00:00:00 に落とす
pub fn normalize_time(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.contains(':') {
        trimmed.to_string()
    } else {
        "00:00:00".to_string()
    }
}
