use std::path::PathBuf;

use anyhow::Context;
use aud_client::UploadFile;

/// Read every path into memory before the first byte is sent.
pub async fn load_files(paths: &[PathBuf]) -> anyhow::Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = UploadFile::from_path(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        files.push(file);
    }
    Ok(files)
}

/// `"3 files"` / `"report.pdf"` for progress bar labels.
pub fn upload_label(files: &[UploadFile]) -> String {
    match files {
        [single] => single.file_name.clone(),
        many => format!("{} files", many.len()),
    }
}
