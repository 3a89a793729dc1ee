use crate::models::RemoteEntry;
use crate::error::ApiError;

/// A listing the app layer still has to perform. The generation number ties
/// the eventual completion back to the path that was current when the request
/// was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub path: String,
    pub generation: u64,
}

/// Root sentinel for the remote tree; the backend resolves it relative to the
/// served directory.
pub const ROOT_PATH: &str = ".";

/// Tracks the current remote directory and the listing shown for it.
///
/// The browser itself never performs I/O: `enter`/`up`/`begin_listing` hand
/// back a [`ListingRequest`], and the response comes back through
/// [`Browser::apply_listing`]. Only the completion matching the most recently
/// issued generation is applied; anything older raced a later navigation and
/// is dropped.
#[derive(Debug)]
pub struct Browser {
    segments: Vec<String>,
    entries: Vec<RemoteEntry>,
    selected: usize,
    generation: u64,
    loading: bool,
}

impl Default for Browser {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            entries: Vec::new(),
            selected: 0,
            generation: 0,
            loading: false,
        }
    }
}

impl Browser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative path of the current directory, `"."` at the root.
    pub fn current_path(&self) -> String {
        if self.segments.is_empty() {
            ROOT_PATH.to_string()
        } else {
            self.segments.join("/")
        }
    }

    pub fn is_at_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn entries(&self) -> &[RemoteEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&RemoteEntry> {
        self.entries.get(self.selected)
    }

    /// Issue a listing for the current directory. Every navigation goes
    /// through here, including the initial load at the root.
    pub fn begin_listing(&mut self) -> ListingRequest {
        self.generation += 1;
        self.loading = true;
        ListingRequest {
            path: self.current_path(),
            generation: self.generation,
        }
    }

    /// Descend into `entry`. Only directories can be entered; files are
    /// ignored here (backup is a separate action).
    pub fn enter(&mut self, entry: &RemoteEntry) -> Option<ListingRequest> {
        if !entry.is_directory() {
            return None;
        }
        self.segments.push(entry.name.clone());
        self.selected = 0;
        Some(self.begin_listing())
    }

    /// Ascend one level. A no-op at the root.
    pub fn up(&mut self) -> Option<ListingRequest> {
        if self.segments.is_empty() {
            return None;
        }
        self.segments.pop();
        self.selected = 0;
        Some(self.begin_listing())
    }

    /// Feed a listing completion back in. Returns the error message to show
    /// when the current listing failed; stale completions return `None` and
    /// leave all state untouched.
    pub fn apply_listing(
        &mut self,
        generation: u64,
        result: Result<Vec<RemoteEntry>, ApiError>,
    ) -> Option<String> {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "Dropping stale listing response"
            );
            return None;
        }
        self.loading = false;
        match result {
            Ok(entries) => {
                self.entries = entries;
                if self.selected >= self.entries.len() {
                    self.selected = 0;
                }
                None
            }
            Err(err) => {
                // No stale entries on failure, the panel goes empty.
                self.entries.clear();
                self.selected = 0;
                Some(err.user_message("Failed to load files"))
            }
        }
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        if self.selected >= self.entries.len() - 1 {
            self.selected = 0;
        } else {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.entries.len() - 1;
        } else {
            self.selected -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryKind;

    fn dir(name: &str) -> RemoteEntry {
        RemoteEntry {
            name: name.to_string(),
            path: format!("/srv/{}", name),
            kind: EntryKind::Directory,
            size: None,
        }
    }

    fn file(name: &str) -> RemoteEntry {
        RemoteEntry {
            name: name.to_string(),
            path: format!("/srv/{}", name),
            kind: EntryKind::File,
            size: Some(42),
        }
    }

    #[test]
    fn up_at_root_is_noop() {
        let mut browser = Browser::new();
        assert!(browser.up().is_none());
        assert_eq!(browser.current_path(), ".");
    }

    #[test]
    fn never_ascends_past_root() {
        let mut browser = Browser::new();
        browser.enter(&dir("a"));
        browser.enter(&dir("b"));
        browser.up();
        browser.up();
        assert!(browser.up().is_none());
        assert!(browser.up().is_none());
        assert_eq!(browser.current_path(), ".");
    }

    #[test]
    fn enter_appends_segment_and_requests_listing() {
        let mut browser = Browser::new();
        let initial = browser.begin_listing();
        browser.apply_listing(
            initial.generation,
            Ok(vec![dir("docs"), file("notes.txt")]),
        );

        let req = browser.enter(&dir("docs")).unwrap();
        assert_eq!(req.path, "docs");
        assert_eq!(browser.current_path(), "docs");

        let deeper = browser.enter(&dir("work")).unwrap();
        assert_eq!(deeper.path, "docs/work");
    }

    #[test]
    fn files_cannot_be_entered() {
        let mut browser = Browser::new();
        assert!(browser.enter(&file("notes.txt")).is_none());
        assert_eq!(browser.current_path(), ".");
    }

    #[test]
    fn stale_listing_is_dropped() {
        let mut browser = Browser::new();
        let first = browser.begin_listing();
        let second = browser.enter(&dir("docs")).unwrap();

        // The superseded request resolves after the navigation; its payload
        // must not land.
        assert!(browser
            .apply_listing(first.generation, Ok(vec![file("old.txt")]))
            .is_none());
        assert!(browser.entries().is_empty());
        assert!(browser.is_loading());

        assert!(browser
            .apply_listing(second.generation, Ok(vec![file("new.txt")]))
            .is_none());
        assert_eq!(browser.entries().len(), 1);
        assert_eq!(browser.entries()[0].name, "new.txt");
        assert!(!browser.is_loading());
    }

    #[test]
    fn out_of_order_arrival_keeps_latest_path() {
        let mut browser = Browser::new();
        let for_a = browser.enter(&dir("a")).unwrap();
        browser.up();
        let for_b = browser.enter(&dir("b")).unwrap();

        // B's response arrives first, then A's late one.
        browser.apply_listing(for_b.generation, Ok(vec![file("b.txt")]));
        browser.apply_listing(for_a.generation, Ok(vec![file("a.txt")]));

        assert_eq!(browser.entries().len(), 1);
        assert_eq!(browser.entries()[0].name, "b.txt");
    }

    #[test]
    fn failure_clears_listing_and_surfaces_message() {
        let mut browser = Browser::new();
        let req = browser.begin_listing();
        browser.apply_listing(req.generation, Ok(vec![file("keep.txt")]));

        let req = browser.begin_listing();
        let msg = browser.apply_listing(
            req.generation,
            Err(ApiError::Backend {
                status: 500,
                message: Some("disk offline".into()),
            }),
        );
        assert_eq!(msg.as_deref(), Some("disk offline"));
        assert!(browser.entries().is_empty());
    }

    #[test]
    fn selection_wraps() {
        let mut browser = Browser::new();
        let req = browser.begin_listing();
        browser.apply_listing(req.generation, Ok(vec![file("a"), file("b")]));
        browser.select_next();
        assert_eq!(browser.selected_index(), 1);
        browser.select_next();
        assert_eq!(browser.selected_index(), 0);
        browser.select_previous();
        assert_eq!(browser.selected_index(), 1);
    }
}
