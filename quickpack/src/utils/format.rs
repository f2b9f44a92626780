//! Formatting utilities

use humansize::{DECIMAL, format_size};

/// Format file size in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a size in whole KB of 1000 bytes, the unit size warnings use
pub fn format_kilobytes(bytes: u64) -> String {
    format!("{} KB", bytes / 1000)
}

/// Pluralize a count of files
pub fn format_file_count(count: usize) -> String {
    if count == 1 {
        "1 file".to_string()
    } else {
        format!("{count} files")
    }
}
