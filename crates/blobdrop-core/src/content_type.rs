use std::path::Path;

/// 拡張子から Content-Type を推定（大文字小文字を区別しない）
///
/// 表にない拡張子は `None` を返し、ヘッダー自体を付けない。
/// `.txt` のようなドットで始まる名前も拡張子として扱う。
/// UTF-8 でないファイル名でも拡張子部分で判定する。
pub fn infer(path: &Path) -> Option<&'static str> {
    let name = path.file_name()?.to_string_lossy();
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();

    match ext.as_str() {
        "txt" => Some("text/plain"),
        "json" => Some("application/json"),
        "csv" => Some("text/csv"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "pdf" => Some("application/pdf"),
        "html" => Some("text/html"),
        _ => None,
    }
}
