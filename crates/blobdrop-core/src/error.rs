use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to walk directory: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 必須入力が空
    #[error("{0} is required")]
    MissingInput(&'static str),

    #[error("Invalid account name '{0}': use only lowercase letters and digits (3-24)")]
    InvalidAccountName(String),

    #[error("Signed URL is not a valid absolute URL: {0}")]
    InvalidUrl(String),

    /// SAS URL のホストがアカウントと一致しない
    #[error("Signed URL host '{host}' does not belong to '{expected}'")]
    ScopeMismatch { host: String, expected: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("No files found in {}", .0.display())]
    NoFilesFound(PathBuf),

    #[error("No valid files selected")]
    NoValidSelection,

    /// ストレージへの書き込み失敗
    #[error("Upload of '{object}' failed: {reason}")]
    Transfer { object: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
