//! 対話セッション: アカウント → SAS URL → フォルダ → 選択 → アップロード

use log::debug;

use crate::console::{Console, LineKind};
use crate::credential::ContainerSasUrl;
use crate::endpoint::{self, DEFAULT_STORAGE_DOMAIN};
use crate::files::{self, FileCatalog};
use crate::upload::{FailurePolicy, UploadOutcome, UploadSummary, Uploader};
use crate::{Result, StorageClient};

pub const ACCOUNT_PROMPT: &str = "Storage account name (e.g. stg2025demo): ";
pub const SAS_URL_PROMPT: &str = "Signed container URL: ";
pub const FOLDER_PROMPT: &str = "Local folder path: ";
pub const SELECTION_PROMPT: &str = "Comma-separated numbers, or blank for all: ";

/// 事前に与えられた回答（`Some` のものはプロンプトを省略）
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub account: Option<String>,
    pub sas_url: Option<String>,
    pub folder: Option<String>,
    pub selection: Option<String>,
    pub domain: String,
    pub policy: FailurePolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            account: None,
            sas_url: None,
            folder: None,
            selection: None,
            domain: DEFAULT_STORAGE_DOMAIN.to_string(),
            policy: FailurePolicy::default(),
        }
    }
}

fn answer<C: Console>(console: &mut C, preset: &Option<String>, prompt: &str) -> Result<String> {
    match preset {
        Some(value) => Ok(value.clone()),
        None => console.read_line(prompt),
    }
}

/// セッションを最後まで実行
///
/// `connect` は SAS URL の検証に通った後にだけ呼ばれる。
/// 入力の拒否はネットワーク I/O の前にエラーとして返る。
pub fn run<C, F>(console: &mut C, options: &SessionOptions, connect: F) -> Result<UploadSummary>
where
    C: Console,
    F: FnOnce(ContainerSasUrl) -> Result<Box<dyn StorageClient>>,
{
    let account_input = answer(console, &options.account, ACCOUNT_PROMPT)?;
    let (account, endpoint) = endpoint::validate(account_input.trim(), &options.domain)?;

    console.write_line("")?;
    console.write_line(&format!("Base URL: {}", endpoint))?;
    console.write_line("")?;
    console.write_styled(LineKind::Heading, "=== INSTRUCTIONS ===")?;
    console.write_line(
        "In the portal or Azure CLI, create a container SAS with permissions \
         Read, Add, Create, Write (racw) and a short expiry.",
    )?;
    console.write_line(&format!(
        "Copy the full SAS URL (e.g. {}<container>?sp=racw&...&sig=...).",
        endpoint
    ))?;

    let sas_input = answer(console, &options.sas_url, SAS_URL_PROMPT)?;
    let sas_url = ContainerSasUrl::parse(&sas_input, &account, &options.domain)?;
    debug!("using container {}", sas_url);
    let client = connect(sas_url)?;

    let folder = answer(console, &options.folder, FOLDER_PROMPT)?;
    let catalog = FileCatalog::new(files::list_files(&folder)?);

    console.write_line("")?;
    console.write_styled(LineKind::Heading, "Files found:")?;
    for (index, file) in catalog.entries() {
        console.write_line(&format!("{}. {}", index, file.name))?;
    }

    let selection = answer(console, &options.selection, SELECTION_PROMPT)?;
    let selected = files::select_files(&catalog, &selection)?;

    let uploader = Uploader::new(client.as_ref(), options.policy);
    let summary = uploader.upload_all(&selected, |result| match &result.outcome {
        UploadOutcome::Success => console.write_styled(
            LineKind::Success,
            &format!("Uploaded: {}", result.file.name),
        ),
        UploadOutcome::Failure(reason) => console.write_styled(
            LineKind::Failure,
            &format!("Failed: {}: {}", result.file.name, reason),
        ),
    })?;

    console.write_line("")?;
    console.write_line(&format!(
        "Completed: {} uploaded, {} failed.",
        summary.succeeded(),
        summary.failed()
    ))?;

    Ok(summary)
}
