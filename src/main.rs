use clap::Parser;
use dialoguer::{Confirm, Input, Password, Select};
use inward_register_rust::{cli, config, entry, error, export, filter, schema, session, settings, store};

use cli::{Cli, Commands, DownloadTarget, SettingsAction};
use config::Config;
use error::{InwardError, Result};
use filter::{executor, FilterCondition, Operator, Predicate};
use settings::{Settings, UserAccount, UserCategory};
use store::RegisterStore;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Entry => {
            println!("📦 inward-register - 入庫登録\n");

            let store = RegisterStore::new(&config);
            if store.initialize()? {
                println!("✔ 台帳を新規作成しました: {}\n", store.path().display());
            }

            let settings = Settings::load(&config.data_dir);
            let session = session::login(&settings)?;
            println!("ようこそ {} さん\n", session.username);

            entry::run_entry_loop(&store, &settings)?;

            println!("\n✅ 登録を終了しました");
        }

        Commands::Search { filters, output, download } => {
            println!("🔍 inward-register - 台帳検索\n");

            let store = RegisterStore::new(&config);
            if store.initialize()? {
                println!("✔ 台帳を新規作成しました: {}\n", store.path().display());
            }

            let conditions = if filters.is_empty() {
                prompt_filter_rows()?
            } else {
                filters
            };
            let predicate = Predicate::compile(conditions);
            if cli.verbose {
                for condition in predicate.conditions() {
                    println!("- 条件: {}", condition);
                }
            }

            println!("[1/3] 台帳を読み込み中...");
            let records = store.select_all()?;
            println!("✔ {}件を読み込み\n", records.len());

            println!("[2/3] フィルタを適用中...");
            let outcome = executor::execute(&predicate, &records);
            if outcome.count > 0 {
                println!("✔ {}件のレコードが見つかりました\n", outcome.count);
            } else {
                println!("0件のレコードが見つかりました\n");
            }
            if outcome.skipped > 0 {
                eprintln!("⚠ 評価できなかった{}行を除外しました", outcome.skipped);
            }
            entry::print_records_table(&outcome.matches);

            println!("\n[3/3] 結果を出力中...");
            let output_path = output.unwrap_or_else(|| config.filtered_path());
            export::export_results(&outcome.matches, &output_path)?;

            if download {
                let destination = export::download(&output_path)?;
                println!("✔ ダウンロード: {}", destination.display());
            }

            println!("\n✅ 検索完了");
        }

        Commands::Edit { id } => {
            println!("📝 inward-register - レコード編集\n");

            let store = RegisterStore::new(&config);
            if store.initialize()? {
                println!("✔ 台帳を新規作成しました: {}\n", store.path().display());
            }

            let settings = Settings::load(&config.data_dir);
            let session = session::login(&settings)?;
            println!("ようこそ {} さん\n", session.username);

            entry::run_edit_flow(&store, &settings, id)?;
        }

        Commands::Download { target } => {
            println!("⬇ inward-register - ダウンロード ({})\n", target);

            let source = match target {
                DownloadTarget::Master => config.register_path(),
                DownloadTarget::Filtered => config.filtered_path(),
            };
            let destination = export::download(&source)?;
            println!("✔ ダウンロード完了: {}", destination.display());
        }

        Commands::Settings { action } => {
            println!("⚙ inward-register - 設定管理\n");

            let mut settings = Settings::load(&config.data_dir);
            let session = session::login(&settings)?;
            session::require_admin(&session)?;

            match action {
                SettingsAction::AddProject { name } => {
                    settings.add_project(&name)?;
                    settings.save(&config.data_dir)?;
                    println!("✔ プロジェクトを追加しました: {}", name);
                }
                SettingsAction::RenameProject { old, new } => {
                    settings.rename_project(&old, &new)?;
                    settings.save(&config.data_dir)?;
                    println!("✔ プロジェクト名を変更しました: {} → {}", old, new);
                }
                SettingsAction::ListProjects => {
                    let names = settings.project_names();
                    if names.is_empty() {
                        println!("プロジェクトは登録されていません");
                    } else {
                        println!("プロジェクト一覧:");
                        for (i, name) in names.iter().enumerate() {
                            println!("  {}. {}", i + 1, name);
                        }
                    }
                }
                SettingsAction::AddUser => {
                    let account = prompt_new_user()?;
                    let user_name = account.user_name.clone();
                    settings.add_user(account)?;
                    settings.save(&config.data_dir)?;
                    println!("✔ ユーザーを追加しました: {}", user_name);
                }
                SettingsAction::ListUsers => {
                    println!("ユーザー一覧:");
                    for user in settings.users() {
                        println!("  {} ({})", user.user_name, user.category);
                    }
                }
            }
        }

        Commands::Config { set_data_dir, show } => {
            let mut config = config;

            if let Some(dir) = set_data_dir {
                config.set_data_dir(dir)?;
                println!("✔ データディレクトリを設定しました");
            }

            if show {
                println!("設定:");
                println!("  データディレクトリ: {}", config.data_dir.display());
                println!("  台帳ファイル: {}", config.register_path().display());
                println!("  検索結果ファイル: {}", config.filtered_path().display());
            }
        }
    }

    Ok(())
}

/// 検索条件を対話的に組み立てる。値を空にした条件は無視される
fn prompt_filter_rows() -> Result<Vec<FilterCondition>> {
    let prompt_err = |e: dialoguer::Error| InwardError::Prompt(e.to_string());
    let columns = schema::column_names();
    let operators = ["Equals", "Not Equals", "Contains", "Not Contains"];

    let mut conditions = Vec::new();

    loop {
        let column_index = Select::new()
            .with_prompt("Column")
            .items(&columns)
            .default(0)
            .interact()
            .map_err(prompt_err)?;

        let operator_index = Select::new()
            .with_prompt("Operator")
            .items(&operators)
            .default(0)
            .interact()
            .map_err(prompt_err)?;
        let operator = match operator_index {
            0 => Operator::Equals,
            1 => Operator::NotEquals,
            2 => Operator::Contains,
            _ => Operator::NotContains,
        };

        let value: String = Input::new()
            .with_prompt("Value")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err)?;

        conditions.push(FilterCondition::new(columns[column_index], operator, value.trim()));

        let more = Confirm::new()
            .with_prompt("条件を追加しますか?")
            .default(false)
            .interact()
            .map_err(prompt_err)?;
        if !more {
            break;
        }
    }

    Ok(conditions)
}

/// 新規ユーザーを対話的に入力する
fn prompt_new_user() -> Result<UserAccount> {
    let prompt_err = |e: dialoguer::Error| InwardError::Prompt(e.to_string());

    let user_name: String = Input::new()
        .with_prompt("ユーザー名")
        .interact_text()
        .map_err(prompt_err)?;

    let password: String = Password::new()
        .with_prompt("パスワード")
        .with_confirmation("パスワード（確認）", "パスワードが一致しません")
        .interact()
        .map_err(prompt_err)?;

    let categories = UserCategory::choices();
    let category_index = Select::new()
        .with_prompt("区分")
        .items(categories)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let category: UserCategory = categories[category_index]
        .parse()
        .map_err(|e: String| InwardError::Prompt(e))?;

    Ok(UserAccount {
        user_name: user_name.trim().to_string(),
        password: password.trim().to_string(),
        category,
    })
}
