use anyhow::Result;
use blobdrop_core::azure::AzureContainerClient;
use blobdrop_core::config::Config;
use blobdrop_core::session::{self, SessionOptions};
use blobdrop_core::upload::FailurePolicy;
use blobdrop_core::{Console, LineKind, StorageClient};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "blobdrop")]
#[command(
    author,
    version,
    about = "Upload local files to a storage container with a SAS URL",
    long_about = None
)]
struct Cli {
    /// デバッグログを表示
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// フォルダ内のファイルをコンテナにアップロード（デフォルト）
    Upload(UploadArgs),

    /// 設定ファイルの管理
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Default)]
struct UploadArgs {
    /// ストレージアカウント名（省略時は入力を求める）
    #[arg(short, long)]
    account: Option<String>,

    /// コンテナの SAS URL（省略時は入力を求める）
    #[arg(long)]
    sas_url: Option<String>,

    /// アップロード元フォルダ（省略時は入力を求める）
    #[arg(short, long)]
    path: Option<String>,

    /// アップロードするファイル番号（例: "1,3"、空文字で全件）
    #[arg(short, long)]
    select: Option<String>,

    /// 最初の失敗で中断
    #[arg(long)]
    fail_fast: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// 現在の設定を表示
    Show,
    /// デフォルト設定ファイルを作成
    Init,
}

/// 標準入出力を使う Console
struct TerminalConsole {
    stdin: io::Stdin,
}

impl TerminalConsole {
    fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> blobdrop_core::Result<String> {
        print!("{}", prompt.cyan().bold());
        io::stdout().flush()?;

        let mut input = String::new();
        self.stdin.lock().read_line(&mut input)?;
        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }

    fn write_styled(&mut self, kind: LineKind, line: &str) -> blobdrop_core::Result<()> {
        match kind {
            LineKind::Plain => println!("{}", line),
            LineKind::Heading => println!("{}", line.yellow().bold()),
            LineKind::Success => println!("{} {}", "✅".green(), line.green()),
            LineKind::Failure => println!("{} {}", "❌".red(), line.red()),
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        None => upload(UploadArgs::default()),
        Some(Commands::Upload(args)) => upload(args),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => config_show().map(|_| ExitCode::SUCCESS),
            ConfigAction::Init => config_init().map(|_| ExitCode::SUCCESS),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e.to_string().red());
            ExitCode::FAILURE
        }
    }
}

fn upload(args: UploadArgs) -> Result<ExitCode> {
    let config = Config::load()?;

    let policy = if args.fail_fast {
        FailurePolicy::Abort
    } else {
        config.failure_policy()
    };

    let options = SessionOptions {
        account: args.account,
        sas_url: args.sas_url,
        folder: args.path,
        selection: args.select,
        domain: config.storage.domain.clone(),
        policy,
    };

    let api_version = config.storage.api_version.clone();
    let mut console = TerminalConsole::new();
    let summary = session::run(&mut console, &options, move |sas_url| {
        let client = AzureContainerClient::new(sas_url, &api_version)?;
        log::debug!("connected to {}", client.container());
        Ok(Box::new(client) as Box<dyn StorageClient>)
    })?;

    if summary.failed() > 0 {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn config_show() -> Result<()> {
    let config = Config::load()?;

    println!(
        "{} {}",
        "📄".cyan(),
        Config::config_path()?.display().to_string().bright_blue()
    );
    println!();
    print!("{}", config.to_toml()?);

    Ok(())
}

fn config_init() -> Result<()> {
    let path = Config::config_path()?;

    if path.exists() {
        println!(
            "{} {}",
            "ℹ".cyan(),
            format!("Config already exists: {}", path.display()).dimmed()
        );
        return Ok(());
    }

    let path = Config::default().save()?;
    println!(
        "{} {}",
        "✅".green(),
        format!("Created {}", path.display()).green()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_upload_args() {
        let cli = Cli::try_parse_from([
            "blobdrop",
            "upload",
            "--account",
            "stg2025demo",
            "--sas-url",
            "https://stg2025demo.blob.core.windows.net/c?sig=x",
            "--path",
            "/tmp/data",
            "--select",
            "1,2",
            "--fail-fast",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Upload(args)) => {
                assert_eq!(args.account.as_deref(), Some("stg2025demo"));
                assert_eq!(args.path.as_deref(), Some("/tmp/data"));
                assert_eq!(args.select.as_deref(), Some("1,2"));
                assert!(args.fail_fast);
            }
            _ => panic!("expected upload command"),
        }
    }

    #[test]
    fn test_no_subcommand_defaults_to_upload() {
        let cli = Cli::try_parse_from(["blobdrop", "-v"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }
}
