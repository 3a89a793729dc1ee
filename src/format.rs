/// Render a byte count as a short human string ("1.5 MB").
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

pub fn human_size_opt(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) => human_size(b),
        None => "N/A".to_string(),
    }
}

/// Render a backend timestamp for display. The server sends RFC 3339; if the
/// string does not parse we show it untouched rather than hide the record.
pub fn human_time(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%b %e, %Y %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1024), "1.0 KB");
        assert_eq!(human_size(1536), "1.5 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn missing_size_is_na() {
        assert_eq!(human_size_opt(None), "N/A");
        assert_eq!(human_size_opt(Some(1024)), "1.0 KB");
    }

    #[test]
    fn unparseable_time_passes_through() {
        assert_eq!(human_time("yesterday"), "yesterday");
    }

    #[test]
    fn rfc3339_time_is_formatted() {
        let out = human_time("2025-11-02T10:15:00Z");
        assert!(out.contains("2025"));
        assert!(out.contains("10:15"));
    }
}
