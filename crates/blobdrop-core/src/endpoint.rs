use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// Azure Blob Storage の既定ドメイン
pub const DEFAULT_STORAGE_DOMAIN: &str = "blob.core.windows.net";

static ACCOUNT_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z0-9]{3,24}$").expect("valid account name pattern"));

/// 検証済みのストレージアカウント名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountName(String);

impl AccountName {
    /// アカウント名を検証（小文字英数字のみ、3〜24文字）
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(Error::MissingInput("Storage account name"));
        }

        if !ACCOUNT_NAME_PATTERN.is_match(input) {
            return Err(Error::InvalidAccountName(input.to_string()));
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 期待されるホスト名（`{account}.{domain}`）
    pub fn host(&self, domain: &str) -> String {
        format!("{}.{}", self.0, domain)
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 表示用のエンドポイント。実際のリクエスト先は SAS URL のホストを使う
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn for_account(account: &AccountName, domain: &str) -> Self {
        Self(format!("https://{}/", account.host(domain)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// アカウント名を検証してエンドポイントを導出
pub fn validate(account_name: &str, domain: &str) -> Result<(AccountName, Endpoint)> {
    let account = AccountName::parse(account_name)?;
    let endpoint = Endpoint::for_account(&account, domain);
    Ok((account, endpoint))
}
