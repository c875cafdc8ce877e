use clap::Parser;
use diary_dashboard::{cli, config, error, export, loader, render};
use cli::{Cli, Commands};
use config::Config;
use diary_dashboard_common::{apply_filters, event_detail, filter_options, project, Dataset};
use error::{DashboardError, Result};
use indicatif::ProgressBar;
use serde::Serialize;
use std::time::Duration;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn load(source: &str, config: &Config) -> Result<Dataset> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("データを読み込み中... {}", source));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = loader::load_dataset(source, &config.valid_range).await;
    spinner.finish_and_clear();
    result
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli)?;
    let source = cli.data.clone().unwrap_or_else(|| config.data_source.clone());

    if let Commands::Config { set_data_source, .. } = &cli.command {
        if let Some(source) = set_data_source {
            config.data_source = source.clone();
            match &cli.config {
                Some(path) => config.save_to(path)?,
                None => config.save()?,
            }
            println!("✔ データソースを設定しました");
        }

        if cli.command.shows_config() {
            println!("設定:");
            println!("  データソース: {}", config.data_source);
            println!(
                "  有効期間: {} 〜 {}",
                config.valid_range.from, config.valid_range.to
            );
            println!("  表示名プリセット: {}", config.labels_preset);
            if let Some(file) = &config.labels_file {
                println!("  表示名定義ファイル: {}", file.display());
            }
            println!("  カテゴリ定義: {}件", config.labels.categories.len());
            println!("  キーワード表示数: {}", config.view.keyword_top_n);
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => Config::config_path()?,
            };
            println!("  設定ファイル: {}", path.display());
        }
        return Ok(());
    }

    let dataset = load(&source, &config).await?;
    let labels = &config.labels;
    let options = &config.view;

    match cli.command {
        Commands::Summary { filters, json } => {
            let state = filters.to_filter_state();
            let filtered = apply_filters(dataset.events(), &state);
            let stats = diary_dashboard_common::view::stats(&dataset, filtered.len());
            if json {
                print_json(&stats)?;
            } else {
                print!("{}", render::render_stats(&stats, &state.active_tags(labels)));
            }
        }

        Commands::Table { filters, sort, limit, json } => {
            let filtered = apply_filters(dataset.events(), &filters.to_filter_state());
            let rows = diary_dashboard_common::view::table_rows(&filtered, &sort.to_sort_state(), labels);
            if json {
                print_json(&rows)?;
            } else {
                print!("{}", render::render_table(&rows, limit));
            }
        }

        Commands::Charts { filters, json } => {
            let filtered = apply_filters(dataset.events(), &filters.to_filter_state());
            let charts = diary_dashboard_common::view::charts(&dataset, &filtered, labels, options);
            if json {
                print_json(&charts)?;
            } else {
                print!("{}", render::render_charts(&charts));
            }
        }

        Commands::Keywords { filters, json } => {
            let filtered = apply_filters(dataset.events(), &filters.to_filter_state());
            let cloud = diary_dashboard_common::view::keyword_cloud(&filtered, options);
            if json {
                print_json(&cloud)?;
            } else {
                print!("{}", render::render_keywords(&cloud));
            }
        }

        Commands::Chronology { filters, json } => {
            let filtered = apply_filters(dataset.events(), &filters.to_filter_state());
            let items = diary_dashboard_common::view::emotion_chronology(&filtered, options);
            if json {
                print_json(&items)?;
            } else {
                print!("{}", render::render_chronology(&items));
            }
        }

        Commands::Dashboard { filters, sort, json } => {
            let view = project(
                &dataset,
                &filters.to_filter_state(),
                &sort.to_sort_state(),
                labels,
                options,
            );
            if json {
                print_json(&view)?;
            } else {
                print!("{}", render::render_stats(&view.stats, &view.active_filters));
                println!();
                print!("{}", render::render_charts(&view.charts));
                println!();
                print!("{}", render::render_table(&view.table, Some(20)));
                println!();
                print!("{}", render::render_keywords(&view.keyword_cloud));
                println!();
                print!("{}", render::render_chronology(&view.chronology));
            }
        }

        Commands::Options { json } => {
            let options = filter_options(&dataset, labels);
            if json {
                print_json(&options)?;
            } else {
                print!("{}", render::render_options(&options));
            }
        }

        Commands::Detail { id, json } => {
            let detail = event_detail(&dataset, &id, labels)
                .ok_or(DashboardError::EventNotFound(id))?;
            if json {
                print_json(&detail)?;
            } else {
                print!("{}", render::render_detail(&detail));
            }
        }

        Commands::Export { filters, output } => {
            let filtered = apply_filters(dataset.events(), &filters.to_filter_state());
            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));

            match export::export_csv(&filtered, &output_dir, export::today()) {
                Ok(path) => println!("✔ CSV出力: {} ({}件)", path.display(), filtered.len()),
                Err(DashboardError::NothingToExport) => {
                    println!("Нет данных для экспорта");
                }
                Err(e) => return Err(e),
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("✖ {}", e);
        if e.is_load_failure() {
            eprintln!("データの読み込みに失敗したため処理を中止しました");
        }
        std::process::exit(1);
    }
}
