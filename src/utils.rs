use std::path::{Component, Path, PathBuf};

/// Simple MIME type detection based on file extension
pub fn get_mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("tif") | Some("tiff") => "image/tiff",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Joins a request path onto `base`, refusing anything that could leave it.
pub fn safe_join(base: &Path, requested: &str) -> Option<PathBuf> {
    let relative = Path::new(requested);
    if requested.is_empty() || relative.is_absolute() {
        return None;
    }
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(base.join(relative))
}

/// File name for the Content-Disposition header
pub fn file_name_of(requested: &str) -> &str {
    requested.rsplit('/').next().unwrap_or(requested)
}
