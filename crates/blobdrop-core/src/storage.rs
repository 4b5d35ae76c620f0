use std::fs::File;

use crate::Result;

/// コンテナへの書き込み口の共通インターフェース
pub trait StorageClient {
    /// ファイルの中身を `object_name` としてアップロード
    ///
    /// `content_type` が `None` の場合は Content-Type ヘッダーを付けない。
    /// `body` は呼び出しの終了時に閉じられる。
    fn put_object(
        &self,
        object_name: &str,
        body: File,
        content_type: Option<&str>,
    ) -> Result<()>;
}
