//! General data-wrangling helpers
//!
//! Slice chunking, buffered file line counting, and JSON object
//! key manipulation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::slice::Chunks;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::{Result, ToolbeltError};

const LINE_COUNT_BUFFER_SIZE: usize = 1024 * 1024;

/// Iterate a slice in chunks of at most `size` elements
///
/// Fails when `size` is zero.
pub fn chunker<T>(seq: &[T], size: usize) -> Result<Chunks<'_, T>> {
    if size == 0 {
        return Err(ToolbeltError::InvalidChunkSize(size));
    }
    Ok(seq.chunks(size))
}

/// Count the number of lines in a file
///
/// Every file has at least one line: the count is the number of newline
/// bytes plus one.
pub fn count_lines_in_file(path: impl AsRef<Path>) -> Result<u64> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::with_capacity(LINE_COUNT_BUFFER_SIZE, file);

    let mut count: u64 = 1;
    loop {
        let buffer = reader.fill_buf()?;
        if buffer.is_empty() {
            break;
        }
        count += buffer.iter().filter(|&&byte| byte == b'\n').count() as u64;
        let consumed = buffer.len();
        reader.consume(consumed);
    }
    Ok(count)
}

/// Rename a key of a JSON object in place
///
/// The renamed entry moves to the end of the object, as removal plus
/// reinsertion implies. Returns whether the source key was present; an
/// existing destination key is overwritten.
pub fn rename_key(obj: &mut JsonMap<String, JsonValue>, src_key: &str, dest_key: &str) -> bool {
    // shift_remove keeps the order of the remaining entries
    match obj.shift_remove(src_key) {
        Some(value) => {
            obj.insert(dest_key.to_string(), value);
            true
        }
        None => false,
    }
}

/// Copying variant of [`rename_key`]: the original object is untouched
pub fn renamed_key(
    obj: &JsonMap<String, JsonValue>,
    src_key: &str,
    dest_key: &str,
) -> JsonMap<String, JsonValue> {
    let mut copy = obj.clone();
    rename_key(&mut copy, src_key, dest_key);
    copy
}

/// Fetch a value from a deeply nested JSON object
///
/// Follows `keys` in order; returns `None` as soon as a step is missing
/// or the current value is not an object.
pub fn unnest_key<'a>(obj: &'a JsonValue, keys: &[&str]) -> Option<&'a JsonValue> {
    let mut found = obj;
    for key in keys {
        found = found.get(key)?;
    }
    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_chunker_even_split() {
        let seq = [1, 2, 3, 4, 5, 6];
        let chunks: Vec<&[i32]> = chunker(&seq, 2).unwrap().collect();
        assert_eq!(chunks, vec![&[1, 2][..], &[3, 4][..], &[5, 6][..]]);
    }

    #[test]
    fn test_chunker_short_tail() {
        let seq = [1, 2, 3, 4, 5];
        let chunks: Vec<&[i32]> = chunker(&seq, 2).unwrap().collect();
        assert_eq!(chunks.last().unwrap(), &&[5][..]);
    }

    #[test]
    fn test_chunker_size_larger_than_slice() {
        let seq = [1, 2];
        let chunks: Vec<&[i32]> = chunker(&seq, 10).unwrap().collect();
        assert_eq!(chunks, vec![&[1, 2][..]]);
    }

    #[test]
    fn test_chunker_zero_size_fails() {
        let seq = [1, 2, 3];
        assert!(matches!(
            chunker(&seq, 0),
            Err(ToolbeltError::InvalidChunkSize(0))
        ));
    }

    #[test]
    fn test_count_lines_single_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "no newline here").unwrap();
        assert_eq!(count_lines_in_file(file.path()).unwrap(), 1);
    }

    #[test]
    fn test_count_lines_multiple() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "one\ntwo\nthree").unwrap();
        assert_eq!(count_lines_in_file(file.path()).unwrap(), 3);
    }

    #[test]
    fn test_count_lines_trailing_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "one\ntwo\n").unwrap();
        assert_eq!(count_lines_in_file(file.path()).unwrap(), 3);
    }

    #[test]
    fn test_count_lines_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(count_lines_in_file(file.path()).unwrap(), 1);
    }

    #[test]
    fn test_count_lines_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = count_lines_in_file(dir.path().join("absent.txt"));
        assert!(matches!(result, Err(ToolbeltError::Io(_))));
    }

    #[test]
    fn test_rename_key_in_place() {
        let mut obj = json!({"a": 1, "b": 2})
            .as_object()
            .cloned()
            .unwrap();
        assert!(rename_key(&mut obj, "a", "z"));
        assert_eq!(obj.get("z"), Some(&json!(1)));
        assert!(!obj.contains_key("a"));
    }

    #[test]
    fn test_rename_key_missing_source() {
        let mut obj = json!({"a": 1}).as_object().cloned().unwrap();
        assert!(!rename_key(&mut obj, "x", "y"));
        assert_eq!(obj.len(), 1);
    }

    #[test]
    fn test_rename_key_overwrites_destination() {
        let mut obj = json!({"a": 1, "b": 2}).as_object().cloned().unwrap();
        assert!(rename_key(&mut obj, "a", "b"));
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("b"), Some(&json!(1)));
    }

    #[test]
    fn test_rename_key_keeps_remaining_order() {
        let mut obj = json!({"a": 1, "b": 2, "c": 3, "d": 4})
            .as_object()
            .cloned()
            .unwrap();
        assert!(rename_key(&mut obj, "b", "z"));
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c", "d", "z"]);
    }

    #[test]
    fn test_renamed_key_leaves_original_untouched() {
        let obj = json!({"a": 1}).as_object().cloned().unwrap();
        let renamed = renamed_key(&obj, "a", "b");
        assert!(obj.contains_key("a"));
        assert!(renamed.contains_key("b"));
        assert!(!renamed.contains_key("a"));
    }

    #[test]
    fn test_unnest_key_found() {
        let obj = json!({"a": {"b": {"c": 42}}});
        assert_eq!(unnest_key(&obj, &["a", "b", "c"]), Some(&json!(42)));
    }

    #[test]
    fn test_unnest_key_partial_depth() {
        let obj = json!({"a": {"b": 1}});
        assert_eq!(unnest_key(&obj, &["a"]), Some(&json!({"b": 1})));
    }

    #[test]
    fn test_unnest_key_missing_step() {
        let obj = json!({"a": {"b": 1}});
        assert_eq!(unnest_key(&obj, &["a", "x"]), None);
        assert_eq!(unnest_key(&obj, &["a", "b", "c"]), None);
    }

    #[test]
    fn test_unnest_key_no_keys_returns_root() {
        let obj = json!({"a": 1});
        assert_eq!(unnest_key(&obj, &[]), Some(&obj));
    }
}
