//! 対話式入力フォームモジュール
//!
//! 入庫レコードの新規登録と、既存レコードの表示・編集を対話式で行う。
//! 編集は「編集を有効化」の確認を挟んでからしか書き込めない。

use crate::error::{InwardError, Result};
use crate::record::{self, BenefitType, Record, ReturnType};
use crate::schema;
use crate::settings::Settings;
use crate::store::RegisterStore;
use chrono::Local;
use dialoguer::{Confirm, Input, Select};

/// 画面表示する検索結果の上限行数
const MAX_ROWS_FOR_DISPLAY: usize = 50;

fn prompt_err(e: dialoguer::Error) -> InwardError {
    InwardError::Prompt(e.to_string())
}

/// 空セルの表示値
pub fn display_value(value: &str) -> &str {
    if value.trim().is_empty() {
        "NA"
    } else {
        value
    }
}

/// 登録ループ。保存ごとに直近5件を表示する
pub fn run_entry_loop(store: &RegisterStore, settings: &Settings) -> Result<()> {
    loop {
        let record = prompt_record(settings, None)?;

        if let Err(e) = record.validate() {
            eprintln!("✗ {}", e);
            let retry = Confirm::new()
                .with_prompt("入力をやり直しますか?")
                .default(true)
                .interact()
                .map_err(prompt_err)?;
            if retry {
                println!();
                continue;
            }
            break;
        }

        let id = store.insert(&record)?;
        println!("✔ 保存しました (ID: {})\n", id);

        println!("直近の登録:");
        print_records_table(&store.select_last(5)?);

        let another = Confirm::new()
            .with_prompt("続けて登録しますか?")
            .default(false)
            .interact()
            .map_err(prompt_err)?;
        if !another {
            break;
        }
        println!();
    }

    Ok(())
}

/// 表示・編集フロー
pub fn run_edit_flow(store: &RegisterStore, settings: &Settings, id: u64) -> Result<()> {
    let records = store.select_all()?;
    let Some(current) = records.iter().find(|r| r.id == id) else {
        return Err(InwardError::RecordNotFound(id));
    };

    print_record_detail(current);

    let enable = Confirm::new()
        .with_prompt("編集を有効にしますか?")
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    if !enable {
        println!("変更せずに終了します");
        return Ok(());
    }

    loop {
        println!();
        let updated = prompt_record(settings, Some(current))?;

        match updated.validate() {
            Ok(()) => {
                store.update(id, &updated)?;
                println!("✔ レコードを更新して保存しました (ID: {})", id);
                return Ok(());
            }
            Err(e) => {
                eprintln!("✗ {}", e);
                let retry = Confirm::new()
                    .with_prompt("入力をやり直しますか?")
                    .default(true)
                    .interact()
                    .map_err(prompt_err)?;
                if !retry {
                    println!("変更せずに終了します");
                    return Ok(());
                }
            }
        }
    }
}

/// フィールドを順に入力してレコードを組み立てる
///
/// `current` があればその値を既定値にする（編集時）。
/// 返却日・返却時刻は Return Type が Returnable のときだけ尋ねる
fn prompt_record(settings: &Settings, current: Option<&Record>) -> Result<Record> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    let now = Local::now().format("%H:%M:%S").to_string();

    let inward_no = text_prompt("Inward No", current.map(|c| c.inward_no.as_str()))?;

    let return_type: ReturnType = choice_prompt(
        "Return Type",
        ReturnType::choices(),
        current.map(|c| c.return_type.as_str()),
    )?;
    let benefit_type: BenefitType = choice_prompt(
        "Benefit Type",
        BenefitType::choices(),
        current.map(|c| c.benefit_type.as_str()),
    )?;

    let date = date_prompt("Date", current.map_or(today.clone(), |c| c.date.clone()))?;
    let time = record::normalize_time(&required_prompt(
        "Time",
        &current.map_or(now.clone(), |c| c.time.clone()),
    )?);

    let gate_entry_no = text_prompt("Gate Entry No", current.map(|c| c.gate_entry_no.as_str()))?;
    let invoice_no = required_prompt(
        "Invoice No",
        current.map_or(String::new(), |c| c.invoice_no.clone()).as_str(),
    )?;
    let po_no = text_prompt("PO No", current.map(|c| c.po_no.as_str()))?;
    let boe_no = text_prompt("BOE No", current.map(|c| c.boe_no.as_str()))?;

    let (return_date, return_time) = if return_type == ReturnType::Returnable {
        let default_date = current
            .filter(|c| !c.return_date.is_empty())
            .map_or(today, |c| c.return_date.clone());
        let default_time = current
            .filter(|c| !c.return_time.is_empty())
            .map_or(now, |c| c.return_time.clone());
        let date = date_prompt("Return Date", default_date)?;
        let time = record::normalize_time(&required_prompt("Return Time", &default_time)?);
        (date, time)
    } else {
        (String::new(), String::new())
    };

    let supplier = text_prompt("Supplier", current.map(|c| c.supplier.as_str()))?;
    let material = text_prompt("Material", current.map(|c| c.material.as_str()))?;
    let qty = qty_prompt(current.map(|c| c.qty.as_str()))?;
    let department = text_prompt("Department", current.map(|c| c.department.as_str()))?;
    let project = project_prompt(settings, current.map(|c| c.project.as_str()))?;
    let vehicle = text_prompt("Vehicle", current.map(|c| c.vehicle.as_str()))?;
    let received = text_prompt("Received", current.map(|c| c.received.as_str()))?;
    let authorized = text_prompt("Authorized", current.map(|c| c.authorized.as_str()))?;
    let security = text_prompt("Security", current.map(|c| c.security.as_str()))?;
    let remark = text_prompt("Remark", current.map(|c| c.remark.as_str()))?;

    Ok(Record {
        id: current.map_or(0, |c| c.id),
        inward_no,
        return_type,
        benefit_type,
        date,
        time,
        gate_entry_no,
        invoice_no,
        po_no,
        boe_no,
        return_date,
        return_time,
        supplier,
        material,
        qty,
        department,
        project,
        vehicle,
        received,
        authorized,
        security,
        remark,
    })
}

/// 空欄可の自由入力
fn text_prompt(label: &str, default: Option<&str>) -> Result<String> {
    let input = Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true);
    let input = match default {
        Some(value) if !value.is_empty() => input.default(value.to_string()),
        _ => input,
    };
    Ok(input.interact_text().map_err(prompt_err)?.trim().to_string())
}

/// 空欄不可の入力
fn required_prompt(label: &str, default: &str) -> Result<String> {
    let input = Input::<String>::new().with_prompt(label).validate_with(
        |value: &String| -> std::result::Result<(), &str> {
            if value.trim().is_empty() {
                Err("空白にできません")
            } else {
                Ok(())
            }
        },
    );
    let input = if default.is_empty() {
        input
    } else {
        input.default(default.to_string())
    };
    Ok(input.interact_text().map_err(prompt_err)?.trim().to_string())
}

/// 数量入力（数字のみ）
fn qty_prompt(default: Option<&str>) -> Result<String> {
    let input = Input::<String>::new().with_prompt("Qty").validate_with(
        |value: &String| -> std::result::Result<(), &str> {
            if value.trim().chars().all(|c| c.is_ascii_digit()) && !value.trim().is_empty() {
                Ok(())
            } else {
                Err("数値で入力してください")
            }
        },
    );
    let input = match default {
        Some(value) if !value.is_empty() => input.default(value.to_string()),
        _ => input,
    };
    Ok(input.interact_text().map_err(prompt_err)?.trim().to_string())
}

/// 日付入力。YYYY-MM-DD に正規化できるまで聞き直す
fn date_prompt(label: &str, default: String) -> Result<String> {
    loop {
        let input: String = Input::new()
            .with_prompt(label)
            .default(default.clone())
            .interact_text()
            .map_err(prompt_err)?;
        match record::normalize_date(&input) {
            Ok(date) => return Ok(date),
            Err(e) => eprintln!("✗ {}", e),
        }
    }
}

/// 選択式の入力
fn choice_prompt<T: std::str::FromStr>(
    label: &str,
    choices: &[&str],
    default: Option<&str>,
) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let default_index = default
        .and_then(|value| choices.iter().position(|c| *c == value))
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt(label)
        .items(choices)
        .default(default_index)
        .interact()
        .map_err(prompt_err)?;

    choices[index]
        .parse()
        .map_err(|e: T::Err| InwardError::Prompt(e.to_string()))
}

/// プロジェクト選択。登録済みリストから選ぶか、直接入力する
fn project_prompt(settings: &Settings, default: Option<&str>) -> Result<String> {
    let names = settings.project_names();
    if names.is_empty() {
        return text_prompt("Project", default);
    }

    let mut items: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
    items.push("(直接入力)");

    let default_index = default
        .and_then(|value| items.iter().position(|n| *n == value))
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt("Project")
        .items(&items)
        .default(default_index)
        .interact()
        .map_err(prompt_err)?;

    if index == items.len() - 1 {
        text_prompt("Project", default)
    } else {
        Ok(items[index].to_string())
    }
}

/// 主要列のみの一覧表示。上限を超えたら省略して出力ファイルへ誘導する
pub fn print_records_table(records: &[Record]) {
    if records.is_empty() {
        return;
    }

    if records.len() > MAX_ROWS_FOR_DISPLAY {
        println!(
            "({}件は画面表示の上限{}件を超えるため省略します。出力ファイルを確認してください)",
            records.len(),
            MAX_ROWS_FOR_DISPLAY
        );
        return;
    }

    println!(
        "{:>4}  {:<10} {:<10} {:<16} {:<20} {:>6}  {:<10} {:<10}",
        "Id", "Inward No", "Date", "Supplier", "Material", "Qty", "Department", "Project"
    );
    for record in records {
        println!(
            "{:>4}  {:<10} {:<10} {:<16} {:<20} {:>6}  {:<10} {:<10}",
            record.id,
            display_value(&record.inward_no),
            display_value(&record.date),
            display_value(&record.supplier),
            display_value(&record.material),
            display_value(&record.qty),
            display_value(&record.department),
            display_value(&record.project),
        );
    }
}

/// 1レコードの全フィールドを縦に表示
pub fn print_record_detail(record: &Record) {
    println!("{:<14}: {}", schema::ID_COLUMN, record.id);
    for column in schema::COLUMNS {
        let value = record.field(column.name).unwrap_or_default();
        println!("{:<14}: {}", column.name, display_value(value));
    }
    println!();
}
