//! フィルタ・検索実行テスト
//!
//! 述語のコンパイルと実行の性質を検証する

use inward_register_rust::filter::executor::execute;
use inward_register_rust::filter::{FilterCondition, Operator, Predicate};
use inward_register_rust::record::Record;

fn sample_records() -> Vec<Record> {
    let rows = [
        ("QA", "10", "Acme", "部品A.B-100"),
        ("QA", "20", "Beta Works", "部品AxB-100"),
        ("Prod", "5", "Acme", "梱包材"),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (department, qty, supplier, material))| Record {
            id: i as u64 + 1,
            department: (*department).into(),
            qty: (*qty).into(),
            supplier: (*supplier).into(),
            material: (*material).into(),
            invoice_no: format!("INV-{:03}", i + 1),
            date: "2026-08-06".into(),
            ..Default::default()
        })
        .collect()
}

/// 空の述語は全レコードに一致する
#[test]
fn test_empty_predicate_matches_all() {
    let records = sample_records();
    let predicate = Predicate::compile(vec![]);

    let outcome = execute(&predicate, &records);
    assert_eq!(outcome.count, records.len());
    assert_eq!(outcome.skipped, 0);
}

/// 同じ入力に対して常に同じ結果を返す
#[test]
fn test_execute_is_idempotent() {
    let records = sample_records();
    let predicate = Predicate::compile(vec![FilterCondition::new(
        "Department",
        Operator::Equals,
        "QA",
    )]);

    let first = execute(&predicate, &records);
    let second = execute(&predicate, &records);
    assert_eq!(first.matches, second.matches);
    assert_eq!(first.count, second.count);
}

/// Not Equals は Equals の補集合
#[test]
fn test_not_equals_is_complement() {
    let records = sample_records();

    let equals = Predicate::compile(vec![FilterCondition::new(
        "Supplier",
        Operator::Equals,
        "Acme",
    )]);
    let not_equals = Predicate::compile(vec![FilterCondition::new(
        "Supplier",
        Operator::NotEquals,
        "Acme",
    )]);

    let matched = execute(&equals, &records);
    let complement = execute(&not_equals, &records);

    assert_eq!(matched.count + complement.count, records.len());
    for record in &complement.matches {
        assert!(!matched.matches.contains(record));
    }
}

/// Not Contains は Contains の補集合
#[test]
fn test_not_contains_is_complement() {
    let records = sample_records();

    let contains = Predicate::compile(vec![FilterCondition::new(
        "Material",
        Operator::Contains,
        "部品",
    )]);
    let not_contains = Predicate::compile(vec![FilterCondition::new(
        "Material",
        Operator::NotContains,
        "部品",
    )]);

    let matched = execute(&contains, &records);
    let complement = execute(&not_contains, &records);

    assert_eq!(matched.count + complement.count, records.len());
    for record in &complement.matches {
        assert!(!matched.matches.contains(record));
    }
}

/// Qty は数値として比較される
#[test]
fn test_numeric_comparison_on_qty() {
    let records = sample_records();

    let predicate = Predicate::compile(vec![FilterCondition::new("Qty", Operator::Equals, "5")]);
    let outcome = execute(&predicate, &records);
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.matches[0].department, "Prod");

    // "05" も数値として 5 に一致する（文字列比較なら一致しない）
    let predicate = Predicate::compile(vec![FilterCondition::new("Qty", Operator::Equals, "05")]);
    let outcome = execute(&predicate, &records);
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.matches[0].qty, "5");
}

/// テキスト列は文字列として比較される
#[test]
fn test_string_comparison_on_text_column() {
    let mut records = sample_records();
    records[0].inward_no = "5".into();

    let predicate = Predicate::compile(vec![FilterCondition::new(
        "Inward No",
        Operator::Equals,
        "05",
    )]);
    let outcome = execute(&predicate, &records);
    assert_eq!(outcome.count, 0);
}

/// Contains の値はパターンではなくリテラル
#[test]
fn test_contains_value_is_literal() {
    let records = sample_records();

    let predicate = Predicate::compile(vec![FilterCondition::new(
        "Material",
        Operator::Contains,
        "A.B",
    )]);
    let outcome = execute(&predicate, &records);

    // "部品A.B-100" だけに一致し、"部品AxB-100" には一致しない
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.matches[0].material, "部品A.B-100");
}

/// Department の検索シナリオ
#[test]
fn test_department_scenario() {
    let records = sample_records();

    let equals = Predicate::compile(vec![FilterCondition::new(
        "Department",
        Operator::Equals,
        "QA",
    )]);
    assert_eq!(execute(&equals, &records).count, 2);

    let not_equals = Predicate::compile(vec![FilterCondition::new(
        "Department",
        Operator::NotEquals,
        "QA",
    )]);
    assert_eq!(execute(&not_equals, &records).count, 1);
}

/// 空のレコード集合でも例外にならず0件を返す
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
}

/// 複数条件は AND で結合される
#[test]
fn test_multiple_conditions_are_anded() {
    let records = sample_records();

    let predicate = Predicate::compile(vec![
        FilterCondition::new("Department", Operator::Equals, "QA"),
        FilterCondition::new("Supplier", Operator::Contains, "Acme"),
    ]);
    let outcome = execute(&predicate, &records);
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.matches[0].id, 1);
}

/// 数値列の壊れたセルは行ごと除外され、件数として報告される
#[test]
fn test_skipped_rows_reported() {
    let mut records = sample_records();
    records[1].qty = "未定".into();

    let predicate = Predicate::compile(vec![FilterCondition::new("Qty", Operator::Equals, "10")]);
    let outcome = execute(&predicate, &records);
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.skipped, 1);
}

/// 不活性な条件（空の値）は無視され、エラーにもならない
#[test]
fn test_inactive_condition_is_ignored() {
    let records = sample_records();

    let predicate = Predicate::compile(vec![
        FilterCondition::new("Department", Operator::Equals, ""),
        FilterCondition::new("", Operator::Contains, "QA"),
    ]);
    assert!(predicate.is_empty());

    let outcome = execute(&predicate, &records);
    assert_eq!(outcome.count, records.len());
}
