//! 렌더링 결과 파일 저장 어댑터.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;

use crate::application::ports::ComicWriter;

/// 출력 디렉터리에 HTML 파일을 쓰는 어댑터. 같은 이름이 있으면 덮어쓴다.
pub struct FileComicWriter;

#[async_trait]
impl ComicWriter for FileComicWriter {
    async fn write(&self, dir: &Path, file_name: &str, html: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;

        let path = dir.join(file_name);
        tokio::fs::write(&path, html)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;

        info!(path = %path.display(), bytes = html.len(), "comic page written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_directory_and_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("nested").join("comics");

        let path = FileComicWriter
            .write(&dir, "pagina.html", "<p>uno</p>")
            .await
            .unwrap();
        assert_eq!(path, dir.join("pagina.html"));

        FileComicWriter
            .write(&dir, "pagina.html", "<p>due</p>")
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>due</p>");
    }
}
