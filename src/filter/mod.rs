//! フィルタ条件モジュール
//!
//! 検索画面で組み立てた (列, 演算子, 値) の条件列を、台帳レコードへ
//! 適用できる述語へコンパイルする。
//!
//! ## 評価の流れ
//! 1. 空の列名・空の値を持つ条件を捨てる（エラーにはしない）
//! 2. 残った条件を並び順のまま AND で結合する
//! 3. 列の宣言型（schema）に従って数値比較か文字列比較かを決める

pub mod executor;

use crate::record::Record;
use crate::schema::{self, ColumnKind};

/// フィルタ演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
}

impl std::str::FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "equals" | "=" => Ok(Operator::Equals),
            "not equals" | "notequals" | "!=" => Ok(Operator::NotEquals),
            "contains" | "~" => Ok(Operator::Contains),
            "not contains" | "notcontains" | "!~" => Ok(Operator::NotContains),
            _ => Err(format!(
                "Unknown operator: {}. Use Equals, Not Equals, Contains, or Not Contains",
                s
            )),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Equals => write!(f, "Equals"),
            Operator::NotEquals => write!(f, "Not Equals"),
            Operator::Contains => write!(f, "Contains"),
            Operator::NotContains => write!(f, "Not Contains"),
        }
    }
}

/// 行単位の評価結果
///
/// 例外で行を読み飛ばす代わりに、スキップを結果として返して
/// 実行側で集計する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Matched,
    NotMatched,
    Skipped(SkipReason),
}

/// スキップ理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 条件の列名がスキーマに存在しない
    UnknownColumn,
    /// 数値列のセルが数値として解釈できない
    BadCellNumber,
}

impl RowOutcome {
    /// Not系演算子用の反転。スキップは反転しない
    fn invert(self) -> Self {
        match self {
            RowOutcome::Matched => RowOutcome::NotMatched,
            RowOutcome::NotMatched => RowOutcome::Matched,
            skipped => skipped,
        }
    }
}

/// ユーザーが指定した1条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub column: String,
    pub operator: Operator,
    pub value: String,
}

impl FilterCondition {
    pub fn new(column: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    /// 列名か値が空の条件は不活性（無視される）
    pub fn is_active(&self) -> bool {
        !self.column.trim().is_empty() && !self.value.trim().is_empty()
    }

    /// レコード1件に対してこの条件を評価する
    fn eval(&self, record: &Record) -> RowOutcome {
        let Some(actual) = record.field(&self.column) else {
            return RowOutcome::Skipped(SkipReason::UnknownColumn);
        };
        let kind = schema::column_kind(&self.column).unwrap_or(ColumnKind::Text);

        let base = match self.operator {
            Operator::Equals | Operator::NotEquals => eval_equals(kind, actual, &self.value),
            // Contains はリテラルな部分文字列一致。値はパターンとして
            // 解釈しないので、正規表現のメタ文字もそのまま文字として扱う
            Operator::Contains | Operator::NotContains => {
                if !actual.is_empty() && actual.contains(self.value.as_str()) {
                    RowOutcome::Matched
                } else {
                    RowOutcome::NotMatched
                }
            }
        };

        match self.operator {
            Operator::NotEquals | Operator::NotContains => base.invert(),
            _ => base,
        }
    }
}

impl std::fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.column, self.operator, self.value)
    }
}

/// `"列名=値"` / `"列名!=値"` / `"列名~値"` / `"列名!~値"` 形式の
/// フィルタ指定を解釈する。列名はスキーマにあるものだけ受け付ける
impl std::str::FromStr for FilterCondition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // 2文字演算子を先に探す
        for (token, operator) in [
            ("!=", Operator::NotEquals),
            ("!~", Operator::NotContains),
            ("=", Operator::Equals),
            ("~", Operator::Contains),
        ] {
            if let Some((column, value)) = s.split_once(token) {
                let column = column.trim();
                if schema::find_column(column).is_none() {
                    return Err(format!("Unknown column: {}", column));
                }
                return Ok(FilterCondition::new(column, operator, value.trim()));
            }
        }
        Err(format!(
            "Invalid filter spec: {}. Use COLUMN=VALUE, COLUMN!=VALUE, COLUMN~VALUE, or COLUMN!~VALUE",
            s
        ))
    }
}

/// Equals 系の比較。数値列は両辺を数値へ変換してから比べる
fn eval_equals(kind: ColumnKind, actual: &str, value: &str) -> RowOutcome {
    match kind {
        ColumnKind::Integer => {
            // 数値にならないフィルタ値はどの行にも一致しない
            let Ok(wanted) = value.trim().parse::<i64>() else {
                return RowOutcome::NotMatched;
            };
            if actual.trim().is_empty() {
                return RowOutcome::NotMatched;
            }
            match actual.trim().parse::<i64>() {
                Ok(cell) if cell == wanted => RowOutcome::Matched,
                Ok(_) => RowOutcome::NotMatched,
                Err(_) => RowOutcome::Skipped(SkipReason::BadCellNumber),
            }
        }
        _ => {
            if actual == value {
                RowOutcome::Matched
            } else {
                RowOutcome::NotMatched
            }
        }
    }
}

/// コンパイル済み述語（有効な条件の AND 結合）
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    conditions: Vec<FilterCondition>,
}

impl Predicate {
    /// 条件リストを述語へコンパイルする。不活性条件はここで落ちる。
    /// 条件が1つも残らなければ全レコードに一致する述語になる
    pub fn compile(conditions: Vec<FilterCondition>) -> Self {
        Self {
            conditions: conditions.into_iter().filter(|c| c.is_active()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    /// レコード1件を評価する。条件は追加順に評価し、
    /// 最初の不一致・スキップで打ち切る
    pub fn eval_record(&self, record: &Record) -> RowOutcome {
        for condition in &self.conditions {
            match condition.eval(record) {
                RowOutcome::Matched => continue,
                other => return other,
            }
        }
        RowOutcome::Matched
    }
}
