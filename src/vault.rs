use crate::error::ApiError;
use crate::models::BackupRecord;

/// A vault refresh to perform; the generation ties the completion back to
/// the request that is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshRequest {
    pub generation: u64,
}

/// Read side of the vault: the user's stored backup records.
///
/// Refreshed on login and whenever a backup completes. Refreshes follow the
/// same last-requested-wins discipline as the file browser so an out-of-order
/// completion can never roll the list back.
#[derive(Debug, Default)]
pub struct VaultLister {
    records: Vec<BackupRecord>,
    selected: usize,
    generation: u64,
    loading: bool,
}

impl VaultLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[BackupRecord] {
        &self.records
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&BackupRecord> {
        self.records.get(self.selected)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_refresh(&mut self) -> RefreshRequest {
        self.generation += 1;
        self.loading = true;
        RefreshRequest {
            generation: self.generation,
        }
    }

    /// Apply a refresh completion; stale generations are dropped untouched.
    /// Returns the message to surface when the current refresh failed.
    pub fn apply_refresh(
        &mut self,
        generation: u64,
        result: Result<Vec<BackupRecord>, ApiError>,
    ) -> Option<String> {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Dropping stale vault refresh"
            );
            return None;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                if self.selected >= self.records.len() {
                    self.selected = self.records.len().saturating_sub(1);
                }
                None
            }
            Err(err) => {
                self.records.clear();
                self.selected = 0;
                Some(err.user_message("Failed to load backups"))
            }
        }
    }

    pub fn select_next(&mut self) {
        if self.records.is_empty() {
            return;
        }
        if self.selected >= self.records.len() - 1 {
            self.selected = 0;
        } else {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.records.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.records.len() - 1;
        } else {
            self.selected -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str) -> BackupRecord {
        BackupRecord {
            id,
            name: name.to_string(),
            size: None,
            saved_at: None,
            stored_path: None,
        }
    }

    #[test]
    fn stale_refresh_is_dropped() {
        let mut vault = VaultLister::new();
        let first = vault.begin_refresh();
        let second = vault.begin_refresh();

        // First refresh resolves after it was superseded.
        assert!(vault
            .apply_refresh(first.generation, Ok(vec![record(1, "old")]))
            .is_none());
        assert!(vault.records().is_empty());

        assert!(vault
            .apply_refresh(second.generation, Ok(vec![record(2, "new")]))
            .is_none());
        assert_eq!(vault.records().len(), 1);
        assert_eq!(vault.records()[0].name, "new");
    }

    #[test]
    fn out_of_order_completions_keep_latest() {
        let mut vault = VaultLister::new();
        let first = vault.begin_refresh();
        let second = vault.begin_refresh();

        vault.apply_refresh(second.generation, Ok(vec![record(2, "b")]));
        vault.apply_refresh(first.generation, Ok(vec![record(1, "a")]));
        assert_eq!(vault.records()[0].name, "b");
    }

    #[test]
    fn failed_refresh_surfaces_message() {
        let mut vault = VaultLister::new();
        let req = vault.begin_refresh();
        let msg = vault.apply_refresh(req.generation, Err(ApiError::Connectivity));
        assert_eq!(msg.as_deref(), Some("Failed to connect to server"));
        assert!(!vault.is_loading());
    }

    #[test]
    fn selection_clamps_when_list_shrinks() {
        let mut vault = VaultLister::new();
        let req = vault.begin_refresh();
        vault.apply_refresh(
            req.generation,
            Ok(vec![record(1, "a"), record(2, "b"), record(3, "c")]),
        );
        vault.select_next();
        vault.select_next();
        assert_eq!(vault.selected_index(), 2);

        let req = vault.begin_refresh();
        vault.apply_refresh(req.generation, Ok(vec![record(1, "a")]));
        assert_eq!(vault.selected_index(), 0);
    }
}
