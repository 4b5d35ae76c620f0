use std::fs::File;

use log::{debug, info};

use crate::content_type;
use crate::files::LocalFile;
use crate::{Result, StorageClient};

/// 1 ファイルが失敗したときの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// 失敗を記録して残りを続行
    #[default]
    Continue,
    /// 最初の失敗で中断
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success,
    Failure(String),
}

/// ファイルごとのアップロード結果
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub file: LocalFile,
    pub content_type: Option<&'static str>,
    pub outcome: UploadOutcome,
}

impl UploadResult {
    pub fn is_success(&self) -> bool {
        self.outcome == UploadOutcome::Success
    }
}

/// バッチ全体の結果
#[derive(Debug, Clone, Default)]
pub struct UploadSummary {
    pub results: Vec<UploadResult>,
}

impl UploadSummary {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

/// 選択されたファイルを 1 つずつ順番にアップロードする
pub struct Uploader<'a> {
    client: &'a dyn StorageClient,
    policy: FailurePolicy,
}

impl<'a> Uploader<'a> {
    pub fn new(client: &'a dyn StorageClient, policy: FailurePolicy) -> Self {
        Self { client, policy }
    }

    /// 1 ファイルをアップロード。ファイルハンドルはこの呼び出しの中で閉じる
    fn transfer(&self, file: &LocalFile, content_type: Option<&str>) -> Result<()> {
        let body = File::open(&file.path).map_err(|e| crate::Error::Transfer {
            object: file.name.clone(),
            reason: format!("cannot read {}: {}", file.path.display(), e),
        })?;

        self.client.put_object(&file.name, body, content_type)
    }

    /// 1 ファイルを処理して結果を返す（失敗もエラーにしない）
    pub fn upload_one(&self, file: &LocalFile) -> UploadResult {
        let content_type = content_type::infer(&file.path);

        let outcome = match self.transfer(file, content_type) {
            Ok(()) => {
                info!(
                    "uploaded {} ({})",
                    file.name,
                    content_type.unwrap_or("no content type")
                );
                UploadOutcome::Success
            }
            Err(e) => {
                // 失敗はコンソールの結果行で報告済み
                debug!("upload of {} failed: {}", file.name, e);
                UploadOutcome::Failure(match e {
                    crate::Error::Transfer { reason, .. } => reason,
                    other => other.to_string(),
                })
            }
        };

        UploadResult {
            file: file.clone(),
            content_type,
            outcome,
        }
    }

    /// 全ファイルを順番にアップロードし、完了ごとに `report` を呼ぶ
    ///
    /// `Abort` の場合は最初の失敗を `Error::Transfer` として返し、失敗分は報告しない。
    pub fn upload_all<F>(&self, files: &[LocalFile], mut report: F) -> Result<UploadSummary>
    where
        F: FnMut(&UploadResult) -> Result<()>,
    {
        let mut summary = UploadSummary::default();

        for file in files {
            let result = self.upload_one(file);

            if let (FailurePolicy::Abort, UploadOutcome::Failure(reason)) =
                (self.policy, &result.outcome)
            {
                return Err(crate::Error::Transfer {
                    object: file.name.clone(),
                    reason: reason.clone(),
                });
            }

            report(&result)?;
            summary.results.push(result);
        }

        Ok(summary)
    }
}
