//! Human readable rendering helpers for assets.

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Lower-cased substring after the last `.`, empty when the name has none.
pub fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, extension)| extension.to_lowercase())
        .unwrap_or_default()
}

/// Formats a byte count with base-1024 units, rounded to two decimals.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    while unit + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(unit as u32 + 1) {
        unit += 1;
    }
    let value = bytes as f64 / 1024f64.powi(unit as i32);
    let rounded = format!("{value:.2}");
    let rounded = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{rounded} {}", SIZE_UNITS[unit])
}

/// Icon shown next to a file, based on its extension.
pub fn icon_for(extension: &str) -> &'static str {
    match extension {
        "zip" | "rar" | "7z" => "📦",
        "pdf" => "📄",
        "doc" | "docx" => "📝",
        "xls" | "xlsx" => "📊",
        "ppt" | "pptx" => "📽️",
        "jpg" | "jpeg" | "png" | "gif" => "🖼️",
        "mp3" | "wav" => "🎵",
        "mp4" | "avi" => "🎬",
        "exe" | "app" => "⚙️",
        _ => "📁",
    }
}
