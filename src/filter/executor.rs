//! 検索実行モジュール
//!
//! コンパイル済み述語を全レコードへ適用し、一致したレコードと件数、
//! スキップ行数を返す。台帳を変更することはない。

use super::{Predicate, RowOutcome};
use crate::record::Record;

/// 検索結果
#[derive(Debug, Clone, Default)]
pub struct QueryOutcome {
    /// 一致したレコード（入力順のまま）
    pub matches: Vec<Record>,
    /// 一致件数（matches.len() と常に等しい）
    pub count: usize,
    /// 評価に失敗して除外した行数
    pub skipped: usize,
}

/// 述語をレコード集合へ適用する
///
/// 状態を持たず、同じ入力に対して常に同じ結果を返す。
/// 0件は正常な結果であり、エラーにはならない。
pub fn execute(predicate: &Predicate, records: &[Record]) -> QueryOutcome {
    let mut matches = Vec::new();
    let mut skipped = 0;

    for record in records {
        match predicate.eval_record(record) {
            RowOutcome::Matched => matches.push(record.clone()),
            RowOutcome::NotMatched => {}
            RowOutcome::Skipped(_) => skipped += 1,
        }
    }

    QueryOutcome {
        count: matches.len(),
        matches,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterCondition, Operator};

    fn records() -> Vec<Record> {
        ["QA", "QA", "Prod"]
            .iter()
            .enumerate()
            .map(|(i, department)| Record {
                id: i as u64 + 1,
                department: (*department).into(),
                qty: format!("{}", (i + 1) * 10),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_department_scenario() {
        let records = records();

        let equals = Predicate::compile(vec![FilterCondition::new(
            "Department",
            Operator::Equals,
            "QA",
        )]);
        let outcome = execute(&equals, &records);
        assert_eq!(outcome.count, 2);

        let not_equals = Predicate::compile(vec![FilterCondition::new(
            "Department",
            Operator::NotEquals,
            "QA",
        )]);
        let outcome = execute(&not_equals, &records);
        assert_eq!(outcome.count, 1);
        assert_eq!(outcome.matches[0].department, "Prod");
    }

    #[test]
    fn test_empty_record_set() {
        let predicate = Predicate::compile(vec![FilterCondition::new(
            "Department",
            Operator::Equals,
            "QA",
        )]);
        let outcome = execute(&predicate, &[]);
        assert_eq!(outcome.count, 0);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.skipped, 0);
    }

    #[test]
    fn test_execute_is_idempotent() {
        let records = records();
        let predicate = Predicate::compile(vec![FilterCondition::new(
            "Qty",
            Operator::Equals,
            "20",
        )]);
        let first = execute(&predicate, &records);
        let second = execute(&predicate, &records);
        assert_eq!(first.count, second.count);
        assert_eq!(first.matches, second.matches);
    }

    #[test]
    fn test_skipped_rows_are_counted() {
        let mut records = records();
        records[2].qty = "数量未定".into();

        let predicate = Predicate::compile(vec![FilterCondition::new(
            "Qty",
            Operator::Equals,
            "10",
        )]);
        let outcome = execute(&predicate, &records);
        assert_eq!(outcome.count, 1);
        assert_eq!(outcome.skipped, 1);
    }
}
