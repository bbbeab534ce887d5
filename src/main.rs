//! Command-line entry point for the EduReach translation pipeline.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{
    Parser,
    Subcommand,
};
use edureach_i18n::config::{
    ConfigError,
    WorkspaceConfig,
};
use edureach_i18n::fetch::HttpFetcher;
use edureach_i18n::input::{
    LanguageCode,
    LanguageCodeError,
};
use edureach_i18n::page::{
    ApplyReport,
    Document,
};
use edureach_i18n::storage::{
    FileStore,
    LanguagePreference,
};
use edureach_i18n::{
    LoadOutcome,
    TranslationPipeline,
};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// コマンドライン引数
#[derive(Parser)]
#[command(name = "edureach-i18n")]
#[command(version)]
#[command(about = "Load EduReach translations and apply them to a page")]
struct Cli {
    /// Directory holding `.edureach-i18n.json` and the preference storage
    #[arg(short, long, global = true, default_value = ".")]
    workspace: PathBuf,

    /// 実行するコマンド
    #[command(subcommand)]
    command: Commands,
}

/// サブコマンド
#[derive(Subcommand)]
enum Commands {
    /// Apply the saved (or default) language to a page
    Apply {
        /// Page JSON file
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Write the translated page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Save a language preference and apply it to a page
    Select {
        /// Language code (e.g. "te")
        #[arg(value_name = "LANGUAGE")]
        language: String,

        /// Page JSON file
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Write the translated page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the saved language (or the default)
    Current,
}

/// CLI のエラー
#[derive(Error, Debug)]
enum CliError {
    /// 設定ファイルの読み込み・検証に失敗
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 不正な言語コード
    #[error(transparent)]
    Language(#[from] LanguageCodeError),

    /// HTTP クライアントの作成に失敗
    #[error("Failed to set up HTTP client: {0}")]
    Client(#[from] edureach_i18n::api::ApiError),

    /// ページファイルを読めない
    #[error("Failed to read page {path:?}: {source}")]
    ReadPage {
        /// ページファイル
        path: PathBuf,
        /// 原因
        source: std::io::Error,
    },

    /// ページファイルが JSON として不正
    #[error("Failed to parse page {path:?}: {source}")]
    ParsePage {
        /// ページファイル
        path: PathBuf,
        /// 原因
        source: serde_json::Error,
    },

    /// 出力先への書き込みに失敗
    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),

    /// 出力のシリアライズに失敗
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// 翻訳を適用できなかった（取得失敗または破棄）
    #[error("Translations for '{language}' could not be applied")]
    NotApplied {
        /// 対象の言語
        language: LanguageCode,
    },
}

/// `apply` / `select` の出力
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageOutput<'a> {
    /// 適用した言語
    language: &'a LanguageCode,
    /// 適用結果
    report: &'a ApplyReport,
    /// 翻訳後のページ
    document: &'a Document,
}

/// ロガーを設定してサブコマンドを実行する
#[tokio::main]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

/// サブコマンドを実行する
async fn run(cli: Cli) -> Result<(), CliError> {
    let config = WorkspaceConfig::load(cli.workspace)?;
    let settings = config.settings();
    let store = Arc::new(FileStore::new(config.storage_path()));

    match cli.command {
        Commands::Current => {
            let preference = LanguagePreference::new(store, settings.preference_key.clone());
            let language = preference.get().unwrap_or_else(|| settings.default_language_code());
            writeln!(std::io::stdout().lock(), "{language}")?;
            Ok(())
        }
        Commands::Apply { page, output } => {
            let pipeline = build_pipeline(&config, store, &page)?;
            let outcome = pipeline.initialize().await;
            write_page(&pipeline, outcome, output.as_deref()).await
        }
        Commands::Select { language, page, output } => {
            let language = LanguageCode::new(language)?;
            if !language.is_known_locale() {
                tracing::warn!("'{language}' is not a known locale code");
            }
            let pipeline = build_pipeline(&config, store, &page)?;
            let outcome = pipeline.select_language(language).await;
            write_page(&pipeline, outcome, output.as_deref()).await
        }
    }
}

/// ページを読み込み、パイプラインを組み立てる
fn build_pipeline(
    config: &WorkspaceConfig,
    store: Arc<FileStore>,
    page: &Path,
) -> Result<TranslationPipeline, CliError> {
    let settings = config.settings();
    let fetcher = Arc::new(HttpFetcher::from_settings(settings)?);
    let document = read_page(page)?;
    Ok(TranslationPipeline::new(settings, store, fetcher, Arc::new(Mutex::new(document))))
}

/// ページ JSON を読み込む
fn read_page(path: &Path) -> Result<Document, CliError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| CliError::ReadPage { path: path.to_path_buf(), source })?;
    serde_json::from_str(&content)
        .map_err(|source| CliError::ParsePage { path: path.to_path_buf(), source })
}

/// 読み込み結果に応じてページを出力する
async fn write_page(
    pipeline: &TranslationPipeline,
    outcome: LoadOutcome,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let (language, report) = match outcome {
        LoadOutcome::Applied { language, report } => (language, report),
        LoadOutcome::Failed { language, .. } | LoadOutcome::Discarded { language } => {
            return Err(CliError::NotApplied { language });
        }
    };

    let document = pipeline.document();
    let document = document.lock().await;
    let json = serde_json::to_string_pretty(&PageOutput {
        language: &language,
        report: &report,
        document: &document,
    })?;

    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!("Wrote translated page to {}", path.display());
        }
        None => writeln!(std::io::stdout().lock(), "{json}")?,
    }
    Ok(())
}
