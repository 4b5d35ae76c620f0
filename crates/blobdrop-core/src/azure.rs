use std::fs::File;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::credential::ContainerSasUrl;
use crate::{Result, StorageClient};

/// Blob REST API の既定バージョン
pub const DEFAULT_API_VERSION: &str = "2023-11-03";

/// SAS URL で認可されたコンテナへの Put Blob クライアント
pub struct AzureContainerClient {
    http: Client,
    container: ContainerSasUrl,
    api_version: String,
}

impl AzureContainerClient {
    /// タイムアウトなしの HTTP クライアントで作成
    pub fn new(container: ContainerSasUrl, api_version: &str) -> Result<Self> {
        let http = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self::with_http_client(http, container, api_version))
    }

    pub fn with_http_client(http: Client, container: ContainerSasUrl, api_version: &str) -> Self {
        Self {
            http,
            container,
            api_version: api_version.to_string(),
        }
    }

    pub fn container(&self) -> &ContainerSasUrl {
        &self.container
    }
}

impl StorageClient for AzureContainerClient {
    fn put_object(&self, object_name: &str, body: File, content_type: Option<&str>) -> Result<()> {
        let url = self.container.blob_url(object_name)?;
        debug!(
            "PUT {}/{} (content-type: {})",
            self.container,
            object_name,
            content_type.unwrap_or("-")
        );

        let mut request = self
            .http
            .put(url)
            .header("x-ms-blob-type", "BlockBlob")
            .header("x-ms-version", &self.api_version)
            .body(body);
        if let Some(ct) = content_type {
            request = request.header(CONTENT_TYPE, ct);
        }

        let response = request.send().map_err(|e| crate::Error::Transfer {
            object: object_name.to_string(),
            reason: e.without_url().to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let code = response
                .headers()
                .get("x-ms-error-code")
                .and_then(|v| v.to_str().ok())
                .map(|c| format!(" ({})", c))
                .unwrap_or_default();
            return Err(crate::Error::Transfer {
                object: object_name.to_string(),
                reason: format!("HTTP {}{}", status, code),
            });
        }

        Ok(())
    }
}
