//! Segment list edit model
//!
//! Ordered lists of clip segments (trim requests) and video references
//! (merge-only entries), mutated through four pure operations: append, move,
//! delete, clear. Every operation is total and side-effect-free on its input:
//! it returns a fresh list, so the caller can always recover the prior state
//! by discarding the new one. Indices in the external contract are 1-based;
//! an out-of-range index is a no-op, never an error.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// One trim request on one source file. Invariant: `end_sec > start_sec`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipSegment {
    pub input_path: PathBuf,
    pub start_sec: f64,
    pub end_sec: f64,
}

impl ClipSegment {
    /// Build a segment, rejecting degenerate or inverted ranges
    pub fn new(input_path: PathBuf, start_sec: f64, end_sec: f64) -> Option<Self> {
        if !(start_sec >= 0.0 && end_sec > start_sec) {
            return None;
        }
        Some(Self {
            input_path,
            start_sec,
            end_sec,
        })
    }
}

/// One entry in the merge-only list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRef {
    pub label: String,
    pub path: PathBuf,
}

/// Display row for a clip segment list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRow {
    pub index: usize,
    pub label: String,
    pub start_sec: f64,
    pub end_sec: f64,
}

/// Display row for a merge-only video list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoRow {
    pub index: usize,
    pub label: String,
}

/// Append a segment if its range is valid, otherwise return the list unchanged
pub fn append_segment(
    list: &[ClipSegment],
    input_path: PathBuf,
    start_sec: f64,
    end_sec: f64,
) -> Vec<ClipSegment> {
    let mut next = list.to_vec();
    if let Some(segment) = ClipSegment::new(input_path, start_sec, end_sec) {
        next.push(segment);
    }
    next
}

/// Append a video unless an entry with the same path already exists.
///
/// Set-like-by-path over an ordered sequence: adding a duplicate is an
/// idempotent no-op.
pub fn append_video(list: &[VideoRef], label: String, path: PathBuf) -> Vec<VideoRef> {
    let mut next = list.to_vec();
    if !next.iter().any(|v| v.path == path) {
        next.push(VideoRef { label, path });
    }
    next
}

/// Swap the entry at the 1-based `index` with its neighbor in `delta`
/// (-1 = up, +1 = down). No-op if either position is out of range.
pub fn move_entry<T: Clone>(list: &[T], index: usize, delta: isize) -> Vec<T> {
    let mut next = list.to_vec();
    if index == 0 || index > next.len() {
        return next;
    }
    let i = index - 1;
    let j = i as isize + delta;
    if j < 0 || j as usize >= next.len() {
        return next;
    }
    next.swap(i, j as usize);
    next
}

/// Remove the entry at the 1-based `index`; no-op if out of range
pub fn delete_entry<T: Clone>(list: &[T], index: usize) -> Vec<T> {
    let mut next = list.to_vec();
    if index == 0 || index > next.len() {
        return next;
    }
    next.remove(index - 1);
    next
}

/// Empty list of either kind
pub fn clear<T>() -> Vec<T> {
    Vec::new()
}

/// Root-relative display label for a path
fn relative_label(path: &Path, media_root: &Path) -> String {
    path.strip_prefix(media_root)
        .map(|rel| rel.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string_lossy().into_owned())
}

/// Project a segment list into display rows.
///
/// Recomputed fresh on every call so row numbering always matches list order.
pub fn segment_rows(list: &[ClipSegment], media_root: &Path) -> Vec<SegmentRow> {
    list.iter()
        .enumerate()
        .map(|(i, s)| SegmentRow {
            index: i + 1,
            label: relative_label(&s.input_path, media_root),
            start_sec: s.start_sec,
            end_sec: s.end_sec,
        })
        .collect()
}

/// Project a video list into display rows.
///
/// Labels were fixed at insertion time (`VideoRef::label`); only the row
/// numbering is recomputed here.
pub fn video_rows(list: &[VideoRef]) -> Vec<VideoRow> {
    list.iter()
        .enumerate()
        .map(|(i, v)| VideoRow {
            index: i + 1,
            label: v.label.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(name: &str, start: f64, end: f64) -> ClipSegment {
        ClipSegment::new(PathBuf::from(name), start, end).unwrap()
    }

    fn sample() -> Vec<ClipSegment> {
        vec![seg("/m/a.mp4", 0.0, 5.0), seg("/m/a.mp4", 10.0, 12.0), seg("/m/b.mp4", 1.0, 2.0)]
    }

    #[test]
    fn test_append_segment_valid_range() {
        let list = append_segment(&[], PathBuf::from("/m/a.mp4"), 0.0, 5.0);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], seg("/m/a.mp4", 0.0, 5.0));
    }

    #[test]
    fn test_append_segment_rejects_degenerate_range() {
        let before = sample();
        for (start, end) in [(3.0, 3.0), (5.0, 2.0), (-1.0, 4.0)] {
            let after = append_segment(&before, PathBuf::from("/m/a.mp4"), start, end);
            assert_eq!(after, before);
        }
    }

    #[test]
    fn test_append_segment_does_not_mutate_input() {
        let before = sample();
        let snapshot = before.clone();
        let _ = append_segment(&before, PathBuf::from("/m/c.mp4"), 0.0, 1.0);
        assert_eq!(before, snapshot);
    }

    #[test]
    fn test_append_video_deduplicates_by_path() {
        let list = append_video(&[], "a.mp4".into(), PathBuf::from("/m/a.mp4"));
        let list = append_video(&list, "b.mp4".into(), PathBuf::from("/m/b.mp4"));
        let again = append_video(&list, "a.mp4".into(), PathBuf::from("/m/a.mp4"));
        assert_eq!(again, list);
        assert_eq!(again.len(), 2);
    }

    #[test]
    fn test_move_entry_swaps_neighbors() {
        let list = sample();
        let moved = move_entry(&list, 1, 1);
        assert_eq!(moved[0], list[1]);
        assert_eq!(moved[1], list[0]);
        assert_eq!(moved[2], list[2]);
    }

    #[test]
    fn test_move_entry_is_its_own_inverse() {
        let list = sample();
        for index in 1..=list.len() {
            for delta in [-1isize, 1] {
                let target = index as isize + delta;
                if target < 1 || target > list.len() as isize {
                    continue;
                }
                let back = move_entry(&move_entry(&list, index, delta), target as usize, -delta);
                assert_eq!(back, list);
            }
        }
    }

    #[test]
    fn test_move_entry_out_of_range_is_noop() {
        let list = sample();
        assert_eq!(move_entry(&list, 0, 1), list);
        assert_eq!(move_entry(&list, 1, -1), list);
        assert_eq!(move_entry(&list, 3, 1), list);
        assert_eq!(move_entry(&list, 4, -1), list);
    }

    #[test]
    fn test_delete_entry_removes_at_index() {
        let list = sample();
        let after = delete_entry(&list, 2);
        assert_eq!(after, vec![list[0].clone(), list[2].clone()]);
    }

    #[test]
    fn test_delete_entry_out_of_range_is_noop() {
        let list = sample();
        assert_eq!(delete_entry(&list, 0), list);
        assert_eq!(delete_entry(&list, 4), list);
    }

    #[test]
    fn test_delete_then_append_restores_content() {
        let list = sample();
        let removed = list[0].clone();
        let after = delete_entry(&list, 1);
        let restored = append_segment(&after, removed.input_path.clone(), removed.start_sec, removed.end_sec);
        assert_eq!(restored.len(), list.len());
        assert!(restored.contains(&removed));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let empty: Vec<ClipSegment> = clear();
        assert!(empty.is_empty());
        let again: Vec<ClipSegment> = clear();
        assert_eq!(again, empty);
    }

    #[test]
    fn test_segment_rows_are_one_based_and_relative() {
        let root = Path::new("/m");
        let rows = segment_rows(&sample(), root);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].label, "a.mp4");
        assert_eq!(rows[2].index, 3);
        assert_eq!(rows[2].label, "b.mp4");
        assert_eq!(rows[1].start_sec, 10.0);
    }

    #[test]
    fn test_video_rows_keep_insertion_labels() {
        let list = append_video(&[], "sub/a.mp4".into(), PathBuf::from("/m/sub/a.mp4"));
        let list = append_video(&list, "b.mp4".into(), PathBuf::from("/m/b.mp4"));
        let rows = video_rows(&list);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].label, "sub/a.mp4");
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[1].label, "b.mp4");
    }

    #[test]
    fn test_video_rows_renumber_after_move() {
        let list = append_video(&[], "a.mp4".into(), PathBuf::from("/m/a.mp4"));
        let list = append_video(&list, "b.mp4".into(), PathBuf::from("/m/b.mp4"));
        let rows = video_rows(&move_entry(&list, 2, -1));
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].label, "b.mp4");
        assert_eq!(rows[1].index, 2);
        assert_eq!(rows[1].label, "a.mp4");
    }
}
