use std::path::{Path, PathBuf};

/// Write a generated artifact to `path`, creating parent directories.
///
/// An existing file is never overwritten.
pub fn write_new(path: &Path, content: &str) -> Result<(), EjectError> {
    if path.exists() {
        return Err(EjectError::AlreadyExists(path.to_path_buf()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| EjectError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, content).map_err(|e| EjectError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "wrote generated file");
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum EjectError {
    #[error("{0} already exists; edit it directly or delete it to regenerate")]
    AlreadyExists(PathBuf),
    #[error("failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
