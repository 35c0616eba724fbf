// `decompress_multiple_filenames`: suffix handling, sentinels, worker pool.

use std::fs;

use tempfile::TempDir;
use unlzw::io::{decompress_multiple_filenames, Prefs, NUL_MARK};

use crate::lzw_encoder::{compress, text_corpus, EncoderOptions};

fn make_set(dir: &TempDir, n: usize) -> Vec<(String, Vec<u8>)> {
    (0..n)
        .map(|i| {
            let data = text_corpus(5_000 + i * 3_000, i as u64 + 1);
            let path = dir.path().join(format!("f{i}.txt.Z"));
            fs::write(&path, compress(&data, EncoderOptions::default())).unwrap();
            (path.to_str().unwrap().to_owned(), data)
        })
        .collect()
}

fn prefs(nb_workers: usize) -> Prefs {
    let mut p = Prefs::new();
    p.set_overwrite(true);
    p.set_nb_workers(nb_workers);
    p
}

fn check_outputs(set: &[(String, Vec<u8>)]) {
    for (src, data) in set {
        let dst = src.strip_suffix(".Z").unwrap();
        assert_eq!(&fs::read(dst).unwrap(), data, "{dst}");
    }
}

#[test]
fn sequential_strips_suffix() {
    let dir = TempDir::new().unwrap();
    let set = make_set(&dir, 3);
    let srcs: Vec<&str> = set.iter().map(|(s, _)| s.as_str()).collect();
    decompress_multiple_filenames(&srcs, ".Z", &prefs(1)).unwrap();
    check_outputs(&set);
}

#[test]
fn worker_pool_produces_same_files() {
    let dir = TempDir::new().unwrap();
    let set = make_set(&dir, 8);
    let srcs: Vec<&str> = set.iter().map(|(s, _)| s.as_str()).collect();
    decompress_multiple_filenames(&srcs, ".Z", &prefs(4)).unwrap();
    check_outputs(&set);
}

#[test]
fn files_without_suffix_are_skipped_and_counted() {
    let dir = TempDir::new().unwrap();
    let set = make_set(&dir, 2);
    let stray = dir.path().join("readme.txt");
    fs::write(&stray, b"plain").unwrap();

    let mut srcs: Vec<&str> = set.iter().map(|(s, _)| s.as_str()).collect();
    srcs.push(stray.to_str().unwrap());
    let err = decompress_multiple_filenames(&srcs, ".Z", &prefs(2)).unwrap_err();
    assert!(err.to_string().contains("1 file(s) skipped"), "{err}");
    check_outputs(&set);
    assert_eq!(fs::read(&stray).unwrap(), b"plain");
}

#[test]
fn one_bad_file_does_not_stop_the_others() {
    let dir = TempDir::new().unwrap();
    let set = make_set(&dir, 3);
    let bad = dir.path().join("broken.Z");
    fs::write(&bad, b"\x1F\x9D").unwrap();

    let mut srcs: Vec<&str> = set.iter().map(|(s, _)| s.as_str()).collect();
    srcs.insert(1, bad.to_str().unwrap());
    let err = decompress_multiple_filenames(&srcs, ".Z", &prefs(1)).unwrap_err();
    assert!(err.to_string().starts_with("1 file(s) could not be decompressed"), "{err}");
    check_outputs(&set);
    assert!(!dir.path().join("broken").exists());
}

#[test]
fn null_destination_tests_every_file() {
    let dir = TempDir::new().unwrap();
    let set = make_set(&dir, 3);
    let srcs: Vec<&str> = set.iter().map(|(s, _)| s.as_str()).collect();
    let mut p = prefs(2);
    p.set_test_mode(true);
    decompress_multiple_filenames(&srcs, NUL_MARK, &p).unwrap();
    for (src, _) in &set {
        assert!(fs::metadata(src.strip_suffix(".Z").unwrap()).is_err());
    }
}
