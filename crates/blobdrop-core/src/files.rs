use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::{Error, Result};

/// アップロード候補のローカルファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    /// ファイル名（そのままオブジェクト名になる）
    pub name: String,
}

impl LocalFile {
    /// UTF-8 でないファイル名は U+FFFD に置き換えた名前でアップロードする
    pub fn new(path: PathBuf) -> Self {
        let name = match path.file_name() {
            Some(raw) => match raw.to_str() {
                Some(name) => name.to_string(),
                None => {
                    let lossy = raw.to_string_lossy().to_string();
                    warn!(
                        "file name {:?} is not valid UTF-8, uploading as '{}'",
                        raw, lossy
                    );
                    lossy
                }
            },
            None => String::new(),
        };
        Self { path, name }
    }
}

/// 番号付きのファイル一覧（番号は 1 始まり）
#[derive(Debug, Clone)]
pub struct FileCatalog {
    entries: Vec<(String, LocalFile)>,
}

impl FileCatalog {
    pub fn new(files: Vec<LocalFile>) -> Self {
        let entries = files
            .into_iter()
            .enumerate()
            .map(|(i, file)| ((i + 1).to_string(), file))
            .collect();
        Self { entries }
    }

    /// 表示用の `(番号, ファイル)` 一覧
    pub fn entries(&self) -> impl Iterator<Item = (&str, &LocalFile)> {
        self.entries.iter().map(|(index, file)| (index.as_str(), file))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 選択式からファイルを絞り込む
    ///
    /// 空なら全件。それ以外はカンマ区切りの番号で、範囲外の番号は無視する。
    /// 結果は番号の指定順ではなく一覧の順序を保つ。
    pub fn select(&self, expression: &str) -> Vec<LocalFile> {
        if expression.trim().is_empty() {
            return self.entries.iter().map(|(_, file)| file.clone()).collect();
        }

        let tokens: Vec<&str> = expression
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        self.entries
            .iter()
            .filter(|(index, _)| tokens.contains(&index.as_str()))
            .map(|(_, file)| file.clone())
            .collect()
    }
}

/// ディレクトリ直下のファイルを列挙（サブディレクトリは対象外）
///
/// 番号を安定させるためファイル名順に並べる。
pub fn list_files(dir: &str) -> Result<Vec<LocalFile>> {
    if dir.trim().is_empty() {
        return Err(Error::MissingInput("Local folder path"));
    }

    let root = Path::new(dir.trim());
    if !root.is_dir() {
        return Err(Error::InvalidPath(root.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e.into()),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_file() {
            files.push(LocalFile::new(entry.into_path()));
        }
    }

    if files.is_empty() {
        return Err(Error::NoFilesFound(root.to_path_buf()));
    }

    debug!("found {} files in {}", files.len(), root.display());
    Ok(files)
}

/// 選択結果が空ならエラー
pub fn select_files(catalog: &FileCatalog, expression: &str) -> Result<Vec<LocalFile>> {
    let selected = catalog.select(expression);
    if selected.is_empty() {
        return Err(Error::NoValidSelection);
    }

    debug!("selected {} of {} files", selected.len(), catalog.len());
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn catalog(names: &[&str]) -> FileCatalog {
        FileCatalog::new(
            names
                .iter()
                .map(|n| LocalFile::new(PathBuf::from("/data").join(n)))
                .collect(),
        )
    }

    fn names(files: &[LocalFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_list_files_non_recursive() -> Result<()> {
        let temp = TempDir::new()?;
        fs::write(temp.path().join("b.png"), "png")?;
        fs::write(temp.path().join("a.txt"), "text")?;
        fs::create_dir(temp.path().join("nested"))?;
        fs::write(temp.path().join("nested").join("c.txt"), "hidden")?;

        let files = list_files(temp.path().to_str().unwrap())?;

        assert_eq!(names(&files), vec!["a.txt", "b.png"]);
        assert_eq!(files[0].path, temp.path().join("a.txt"));

        Ok(())
    }

    #[test]
    fn test_list_files_trims_path() -> Result<()> {
        let temp = TempDir::new()?;
        fs::write(temp.path().join("a.txt"), "text")?;

        let padded = format!("  {}  ", temp.path().display());
        assert_eq!(list_files(&padded)?.len(), 1);

        Ok(())
    }

    #[test]
    fn test_list_files_empty_dir() -> Result<()> {
        let temp = TempDir::new()?;
        fs::create_dir(temp.path().join("only-dir"))?;

        let result = list_files(temp.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::NoFilesFound(_))));

        Ok(())
    }

    #[test]
    fn test_list_files_invalid_path() -> Result<()> {
        let temp = TempDir::new()?;
        let missing = temp.path().join("missing");
        let file = temp.path().join("file.txt");
        fs::write(&file, "x")?;

        assert!(matches!(
            list_files(missing.to_str().unwrap()),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(
            list_files(file.to_str().unwrap()),
            Err(Error::InvalidPath(_))
        ));
        assert!(matches!(list_files("  "), Err(Error::MissingInput(_))));

        Ok(())
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_files_non_utf8_name() -> Result<()> {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new()?;
        let raw = OsStr::from_bytes(b"caf\xe9.txt");
        fs::write(temp.path().join(raw), "text")?;

        let files = list_files(temp.path().to_str().unwrap())?;

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, temp.path().join(raw));
        assert_eq!(files[0].name, "caf\u{FFFD}.txt");
        assert_eq!(
            crate::content_type::infer(&files[0].path),
            Some("text/plain")
        );

        Ok(())
    }

    #[test]
    fn test_select_all() {
        let catalog = catalog(&["A", "B", "C"]);
        assert_eq!(names(&catalog.select("")), vec!["A", "B", "C"]);
        assert_eq!(names(&catalog.select("   ")), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_select_keeps_list_order() {
        let catalog = catalog(&["A", "B", "C"]);
        assert_eq!(names(&catalog.select("2,1")), vec!["A", "B"]);
        assert_eq!(names(&catalog.select(" 3 , 1 ")), vec!["A", "C"]);
    }

    #[test]
    fn test_select_duplicates_and_noise() {
        let catalog = catalog(&["A", "B", "C"]);
        assert_eq!(names(&catalog.select("2,2,,2")), vec!["B"]);
        assert_eq!(names(&catalog.select("x,3,02,-1")), vec!["C"]);
    }

    #[test]
    fn test_select_out_of_range() {
        let catalog = catalog(&["A", "B", "C"]);
        assert!(catalog.select("5").is_empty());
        assert!(matches!(
            select_files(&catalog, "5"),
            Err(Error::NoValidSelection)
        ));
        assert!(matches!(
            select_files(&catalog, ",,"),
            Err(Error::NoValidSelection)
        ));
    }

    #[test]
    fn test_catalog_entries() {
        let catalog = catalog(&["A", "B"]);
        let entries: Vec<(&str, &str)> = catalog
            .entries()
            .map(|(i, f)| (i, f.name.as_str()))
            .collect();
        assert_eq!(entries, vec![("1", "A"), ("2", "B")]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
    }
}
