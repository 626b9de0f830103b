//! Loading files to send as media.

use std::path::Path;

use crate::error::ClientError;

/// A file ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Content type derived from the file extension.
pub fn media_type_for(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match ext.as_str() {
        "png" | "jpg" | "jpeg" | "gif" => format!("image/{ext}"),
        "mp4" | "avi" | "mov" | "mkv" => format!("video/{ext}"),
        "" => "application/octet-stream".to_string(),
        _ => format!("application/{ext}"),
    }
}

/// Read a file, refusing anything over `max_size` bytes.
pub async fn load(path: &Path, max_size: u64) -> Result<MediaFile, ClientError> {
    let io_err = |source| ClientError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = tokio::fs::metadata(path).await.map_err(io_err)?.len();
    if size > max_size {
        return Err(ClientError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max: max_size,
        });
    }

    let data = tokio::fs::read(path).await.map_err(io_err)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(MediaFile {
        file_name,
        media_type: media_type_for(path),
        data,
    })
}
