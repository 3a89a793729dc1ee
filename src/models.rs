use serde::Deserialize;

/// One row of a remote directory listing, as returned by `GET /api/files`.
/// Snapshots are replaced wholesale on every path change; nothing here is
/// cached across listings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    /// Absolute path on the server. Backup requests use this, never a
    /// client-reconstructed path.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

impl RemoteEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// A stored backup as reported by `GET /api/backups`. Server-originated and
/// read-only on this side; restores reference it by `id`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BackupRecord {
    #[serde(rename = "fid")]
    pub id: i64,
    #[serde(rename = "fname")]
    pub name: String,
    #[serde(rename = "fsize")]
    pub size: Option<u64>,
    #[serde(rename = "fsavedtime")]
    pub saved_at: Option<String>,
    #[serde(rename = "fpath")]
    pub stored_path: Option<String>,
}

/// Storage consumption for the logged-in user, `GET /api/storage/<uid>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageUsage {
    #[serde(rename = "usedBytes")]
    pub used_bytes: Option<u64>,
    #[serde(rename = "usedPretty")]
    pub used_pretty: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_entry_wire_format() {
        let raw = r#"[
            {"name":"docs","path":"/home/u/docs","type":"directory"},
            {"name":"notes.txt","path":"/home/u/notes.txt","type":"file","size":512}
        ]"#;
        let entries: Vec<RemoteEntry> = serde_json::from_str(raw).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_directory());
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[1].size, Some(512));
    }

    #[test]
    fn backup_record_wire_format() {
        let raw = r#"{"fid":7,"fname":"notes.txt","fsize":512,
                      "fsavedtime":"2025-11-02T10:15:00Z","fpath":"/vault/7.enc"}"#;
        let record: BackupRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.name, "notes.txt");
        assert_eq!(record.stored_path.as_deref(), Some("/vault/7.enc"));
    }

    #[test]
    fn backup_record_tolerates_missing_optionals() {
        let record: BackupRecord =
            serde_json::from_str(r#"{"fid":1,"fname":"a"}"#).unwrap();
        assert_eq!(record.size, None);
        assert_eq!(record.saved_at, None);
    }
}
