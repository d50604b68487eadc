//! # Lookup Integration Tests
//!
//! End-to-end coverage of the read path over files produced by the writer:
//! round-trips, misses, ordering-sensitive key sets, zero-copy guarantees,
//! and concurrent readers. Every scenario goes through the full pipeline —
//! writer bytes, header parse, tree descent, heap resolution — with nothing
//! mocked.

use std::sync::Arc;
use std::thread;

use rofldb::{Database, DbReader, DbWriter};
use tempfile::tempdir;

fn build_db(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = DbWriter::new();
    for (key, value) in entries {
        writer.insert(*key, *value).unwrap();
    }
    writer.finish().unwrap()
}

mod basic {
    use super::*;

    #[test]
    fn empty_db_misses_everything() {
        let bytes = build_db(&[]);
        let reader = DbReader::new(&bytes).unwrap();
        assert_eq!(reader.get("anything").unwrap(), None);
        assert_eq!(reader.get("").unwrap(), None);
    }

    #[test]
    fn single_entry() {
        let bytes = build_db(&[("a", "1")]);
        let reader = DbReader::new(&bytes).unwrap();
        assert_eq!(reader.get("a").unwrap(), Some(&b"1"[..]));
        assert_eq!(reader.get("b").unwrap(), None);
        assert_eq!(reader.get("").unwrap(), None);
    }

    #[test]
    fn three_entries_balanced() {
        let bytes = build_db(&[("b", "2"), ("a", "1"), ("c", "3")]);
        let reader = DbReader::new(&bytes).unwrap();

        assert_eq!(reader.get("a").unwrap(), Some(&b"1"[..]));
        assert_eq!(reader.get("b").unwrap(), Some(&b"2"[..]));
        assert_eq!(reader.get("c").unwrap(), Some(&b"3"[..]));

        // neighbors of stored keys must miss, not alias
        assert_eq!(reader.get("aa").unwrap(), None);
        assert_eq!(reader.get("ba").unwrap(), None);
    }

    #[test]
    fn prefix_keys_respect_shorter_is_less() {
        let bytes = build_db(&[("k", "v1"), ("kk", "v22"), ("kkk", "v333")]);
        let reader = DbReader::new(&bytes).unwrap();

        assert_eq!(reader.get("k").unwrap(), Some(&b"v1"[..]));
        assert_eq!(reader.get("kk").unwrap(), Some(&b"v22"[..]));
        assert_eq!(reader.get("kkk").unwrap(), Some(&b"v333"[..]));
        assert_eq!(reader.get("kkkk").unwrap(), None);
    }

    #[test]
    fn binary_keys_and_values() {
        let mut writer = DbWriter::new();
        writer.insert(vec![0u8, 1, 2, 255], vec![0xDE, 0xAD]).unwrap();
        writer.insert(vec![0u8, 1, 3], vec![0xBE, 0xEF]).unwrap();
        let bytes = writer.finish().unwrap();

        let reader = DbReader::new(&bytes).unwrap();
        assert_eq!(
            reader.get([0u8, 1, 2, 255]).unwrap(),
            Some(&[0xDE, 0xAD][..])
        );
        assert_eq!(reader.get([0u8, 1, 3]).unwrap(), Some(&[0xBE, 0xEF][..]));
        assert_eq!(reader.get([0u8, 1]).unwrap(), None);
    }
}

mod properties {
    use super::*;

    #[test]
    fn thousand_entries_roundtrip_and_miss() {
        let entries: Vec<(String, String)> = (0..1000)
            .map(|i| (format!("key{i:05}"), format!("value-{i}")))
            .collect();

        let mut writer = DbWriter::new();
        for (key, value) in &entries {
            writer.insert(key.as_str(), value.as_str()).unwrap();
        }
        let bytes = writer.finish().unwrap();
        let reader = DbReader::new(&bytes).unwrap();

        for (key, value) in &entries {
            assert_eq!(reader.get(key).unwrap(), Some(value.as_bytes()));
        }

        // keys adjacent to every stored key miss
        assert_eq!(reader.get("key").unwrap(), None);
        assert_eq!(reader.get("key00000 ").unwrap(), None);
        assert_eq!(reader.get("key01000").unwrap(), None);
        assert_eq!(reader.get("zzz").unwrap(), None);
    }

    #[test]
    fn repeated_gets_return_the_same_address() {
        let bytes = build_db(&[("stable", "view")]);
        let reader = DbReader::new(&bytes).unwrap();

        let first = reader.get("stable").unwrap().unwrap();
        let second = reader.get("stable").unwrap().unwrap();
        assert_eq!(first.as_ptr(), second.as_ptr());
        assert_eq!(first, second);
    }

    #[test]
    fn views_point_into_the_source_buffer() {
        let bytes = build_db(&[("k", "somewhere in the buffer")]);
        let reader = DbReader::new(&bytes).unwrap();
        let value = reader.get("k").unwrap().unwrap();

        let base = bytes.as_ptr() as usize;
        let addr = value.as_ptr() as usize;
        assert!(addr >= base && addr + value.len() <= base + bytes.len());
    }

    #[test]
    fn concurrent_gets_match_sequential_results() {
        let entries: Vec<(String, String)> = (0..200)
            .map(|i| (format!("k{i:03}"), format!("v{i}")))
            .collect();

        let mut writer = DbWriter::new();
        for (key, value) in &entries {
            writer.insert(key.as_str(), value.as_str()).unwrap();
        }
        let bytes = Arc::new(writer.finish().unwrap());

        let mut handles = Vec::new();
        for worker in 0..4 {
            let bytes = Arc::clone(&bytes);
            handles.push(thread::spawn(move || {
                let reader = DbReader::new(&bytes).unwrap();
                for i in (worker..200).step_by(4) {
                    let expected = format!("v{i}");
                    let got = reader.get(format!("k{i:03}")).unwrap();
                    assert_eq!(got, Some(expected.as_bytes()));
                }
                assert_eq!(reader.get(format!("w{worker}")).unwrap(), None);
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}

mod mapped {
    use super::*;

    #[test]
    fn large_value_is_returned_without_copy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("large.rofldb");

        let mut writer = DbWriter::new();
        writer.insert("x", vec![0xAB; 1 << 20]).unwrap();
        writer.insert("y", "small").unwrap();
        writer.write_to_file(&path).unwrap();

        let db = Database::open(&path).unwrap();
        let value = db.get("x").unwrap().unwrap();

        assert_eq!(value.len(), 1 << 20);
        assert_eq!(value[0], 0xAB);
        assert_eq!(value[value.len() / 2], 0xAB);
        assert_eq!(value[value.len() - 1], 0xAB);

        // the view must lie inside the mapping, proving no copy happened
        let base = db.as_bytes().as_ptr() as usize;
        let addr = value.as_ptr() as usize;
        assert!(addr >= base && addr + value.len() <= base + db.file_size() as usize);
    }

    #[test]
    fn mapped_db_shared_across_threads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shared.rofldb");

        let mut writer = DbWriter::new();
        for i in 0..50 {
            writer.insert(format!("key{i}"), format!("val{i}")).unwrap();
        }
        writer.write_to_file(&path).unwrap();

        let db = Arc::new(Database::open(&path).unwrap());
        let mut handles = Vec::new();
        for _ in 0..4 {
            let db = Arc::clone(&db);
            handles.push(thread::spawn(move || {
                for i in 0..50 {
                    let expected = format!("val{i}");
                    assert_eq!(
                        db.get(format!("key{i}")).unwrap(),
                        Some(expected.as_bytes())
                    );
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
