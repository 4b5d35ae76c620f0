use std::fmt;

use reqwest::Url;

use crate::endpoint::AccountName;
use crate::{Error, Result};

/// アカウントに対して検証済みのコンテナ SAS URL
///
/// 権限（RACW）や有効期限はローカルでは検証しない。サーバー側で初回利用時に判定される。
#[derive(Clone, PartialEq, Eq)]
pub struct ContainerSasUrl {
    url: Url,
}

impl ContainerSasUrl {
    /// SAS URL をパースし、ホストがアカウントのエンドポイントで始まることを確認
    pub fn parse(raw: &str, account: &AccountName, domain: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::MissingInput("Signed container URL"));
        }

        let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let expected = account.host(domain).to_ascii_lowercase();
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
        if !host.starts_with(&expected) {
            return Err(Error::ScopeMismatch { host, expected });
        }

        Ok(Self { url })
    }

    #[cfg(test)]
    pub(crate) fn from_url_unchecked(url: Url) -> Self {
        Self { url }
    }

    /// 認証クエリを含む URL そのもの
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// コンテナ内のオブジェクト URL（SAS クエリはそのまま保持）
    pub fn blob_url(&self, object_name: &str) -> Result<Url> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot hold a blob path", self)))?
            .pop_if_empty()
            .push(object_name);
        Ok(url)
    }
}

/// ログや表示に署名を出さないよう、クエリを伏せて表示
impl fmt::Display for ContainerSasUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut redacted = self.url.clone();
        redacted.set_query(None);
        write!(f, "{}", redacted)?;
        if self.url.query().is_some() {
            f.write_str("?<sas>")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContainerSasUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContainerSasUrl")
            .field(&self.to_string())
            .finish()
    }
}
