//! Ordered playlist with a wrapping cursor
//!
//! The cursor is either unset (no entry selected, shown to UIs as `-1`)
//! or a valid index. Every mutation keeps it that way.

use pariszik_core::types::{ContentId, MediaItem};

/// Ordered sequence of items the controller cycles through
///
/// ```text
///   [ A ][ B ][ C ]
///          ^ current
///   next:     B -> C -> A -> ...
///   previous: B -> A -> C -> ...
/// ```
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    /// Entries in play order
    items: Vec<MediaItem>,

    /// Selected entry (None = nothing selected)
    current: Option<usize>,
}

impl Playlist {
    /// Create new empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all entries
    ///
    /// `start` selects an entry; an out-of-range start leaves nothing selected.
    pub fn set_items(&mut self, items: Vec<MediaItem>, start: Option<usize>) {
        self.current = start.filter(|&i| i < items.len());
        self.items = items;
    }

    /// Append entries at the end (cursor unchanged)
    pub fn append(&mut self, items: impl IntoIterator<Item = MediaItem>) {
        self.items.extend(items);
    }

    /// Remove entry at `index`
    ///
    /// Entries after the removed one shift down and the cursor follows them.
    /// When the selected entry itself is removed the cursor stays on the
    /// entry that slid into its place, or moves to the new last entry.
    pub fn remove(&mut self, index: usize) -> Option<MediaItem> {
        if index >= self.items.len() {
            return None;
        }

        let removed = self.items.remove(index);

        self.current = match self.current {
            _ if self.items.is_empty() => None,
            Some(cur) if cur > index => Some(cur - 1),
            Some(cur) if cur == index => Some(cur.min(self.items.len() - 1)),
            other => other,
        };

        Some(removed)
    }

    /// Remove every entry and unset the cursor
    pub fn clear(&mut self) {
        self.items.clear();
        self.current = None;
    }

    /// Move the cursor forward one entry, wrapping at the end
    ///
    /// An unset cursor moves to the first entry. Returns the new index,
    /// or `None` when the playlist is empty.
    pub fn advance(&mut self) -> Option<usize> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }

        let next = match self.current {
            Some(cur) => (cur + 1) % len,
            None => 0,
        };
        self.current = Some(next);
        Some(next)
    }

    /// Move the cursor back one entry, wrapping at the start
    ///
    /// An unset cursor moves to the last entry. Returns the new index,
    /// or `None` when the playlist is empty.
    pub fn retreat(&mut self) -> Option<usize> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }

        let prev = match self.current {
            Some(cur) => (cur + len - 1) % len,
            None => len - 1,
        };
        self.current = Some(prev);
        Some(prev)
    }

    /// Point the cursor at `index`
    ///
    /// Returns `false` (cursor unchanged) when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Point the cursor at the first entry with `id`, if any
    pub fn select_id(&mut self, id: &ContentId) -> Option<usize> {
        let pos = self.position_of(id)?;
        self.current = Some(pos);
        Some(pos)
    }

    /// Index of the first entry with `id`
    pub fn position_of(&self, id: &ContentId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Selected index
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Selected entry
    pub fn current(&self) -> Option<&MediaItem> {
        self.current.and_then(|i| self.items.get(i))
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    /// All entries in order
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Mutable access to every entry carrying `id`
    pub fn entries_mut<'a>(
        &'a mut self,
        id: &'a ContentId,
    ) -> impl Iterator<Item = &'a mut MediaItem> + 'a {
        self.items.iter_mut().filter(move |item| &item.id == id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_item(id: &str) -> MediaItem {
        MediaItem::new(
            format!("Track {}", id),
            "Test Artist",
            format!("/media/{}.mp3", id),
        )
        .with_id(id)
    }

    fn abc() -> Playlist {
        let mut playlist = Playlist::new();
        playlist.set_items(
            vec![create_test_item("a"), create_test_item("b"), create_test_item("c")],
            Some(0),
        );
        playlist
    }

    #[test]
    fn empty_playlist_navigation_is_noop() {
        let mut playlist = Playlist::new();
        assert_eq!(playlist.advance(), None);
        assert_eq!(playlist.retreat(), None);
        assert_eq!(playlist.current_index(), None);
    }

    #[test]
    fn advance_wraps_to_start() {
        let mut playlist = abc();
        assert_eq!(playlist.advance(), Some(1));
        assert_eq!(playlist.advance(), Some(2));
        assert_eq!(playlist.advance(), Some(0));
        assert_eq!(playlist.current().unwrap().id.as_str(), "a");
    }

    #[test]
    fn retreat_wraps_to_end() {
        let mut playlist = abc();
        assert_eq!(playlist.retreat(), Some(2));
        assert_eq!(playlist.retreat(), Some(1));
        assert_eq!(playlist.retreat(), Some(0));
    }

    #[test]
    fn unset_cursor_enters_at_either_end() {
        let mut playlist = abc();
        playlist.set_items(playlist.items().to_vec(), None);
        assert_eq!(playlist.advance(), Some(0));

        playlist.set_items(playlist.items().to_vec(), None);
        assert_eq!(playlist.retreat(), Some(2));
    }

    #[test]
    fn out_of_range_start_is_unset() {
        let mut playlist = Playlist::new();
        playlist.set_items(vec![create_test_item("a")], Some(5));
        assert_eq!(playlist.current_index(), None);
    }

    #[test]
    fn remove_before_cursor_shifts_it() {
        let mut playlist = abc();
        playlist.select(2);

        let removed = playlist.remove(0).unwrap();
        assert_eq!(removed.id.as_str(), "a");
        assert_eq!(playlist.current_index(), Some(1));
        assert_eq!(playlist.current().unwrap().id.as_str(), "c");
    }

    #[test]
    fn remove_after_cursor_keeps_it() {
        let mut playlist = abc();
        playlist.remove(2);
        assert_eq!(playlist.current_index(), Some(0));
    }

    #[test]
    fn remove_selected_last_entry_moves_to_new_last() {
        let mut playlist = abc();
        playlist.select(2);
        playlist.remove(2);
        assert_eq!(playlist.current_index(), Some(1));
    }

    #[test]
    fn remove_selected_middle_entry_keeps_index() {
        let mut playlist = abc();
        playlist.select(1);
        playlist.remove(1);
        assert_eq!(playlist.current_index(), Some(1));
        assert_eq!(playlist.current().unwrap().id.as_str(), "c");
    }

    #[test]
    fn remove_only_entry_unsets_cursor() {
        let mut playlist = Playlist::new();
        playlist.set_items(vec![create_test_item("a")], Some(0));
        playlist.remove(0);
        assert!(playlist.is_empty());
        assert_eq!(playlist.current_index(), None);
    }

    #[test]
    fn remove_out_of_bounds() {
        let mut playlist = abc();
        assert!(playlist.remove(3).is_none());
        assert_eq!(playlist.len(), 3);
    }

    #[test]
    fn append_keeps_cursor() {
        let mut playlist = abc();
        playlist.select(1);
        playlist.append(vec![create_test_item("d")]);
        assert_eq!(playlist.len(), 4);
        assert_eq!(playlist.current_index(), Some(1));
    }

    #[test]
    fn select_by_id() {
        let mut playlist = abc();
        assert_eq!(playlist.select_id(&ContentId::new("c")), Some(2));
        assert_eq!(playlist.select_id(&ContentId::new("zz")), None);
        assert_eq!(playlist.current_index(), Some(2));
    }

    #[test]
    fn clear_unsets_cursor() {
        let mut playlist = abc();
        playlist.clear();
        assert!(playlist.is_empty());
        assert_eq!(playlist.current_index(), None);
    }
}
