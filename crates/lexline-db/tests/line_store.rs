use std::fs::{self, File};

use lexline_db::line::{INITIAL_CHUNK, read_line_at, read_line_with};

fn file_with(contents: &str) -> (tempfile::TempDir, File) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.noun");
    fs::write(&path, contents).unwrap();
    (dir, File::open(&path).unwrap())
}

#[test]
fn reads_lines_by_offset() {
    let (_dir, file) = file_with("first line\nsecond line\nthird\n");
    assert_eq!(read_line_at(&file, 0).unwrap(), "first line");
    assert_eq!(read_line_at(&file, 11).unwrap(), "second line");
    assert_eq!(read_line_at(&file, 23).unwrap(), "third");
}

#[test]
fn grows_the_buffer_until_the_terminator_appears() {
    let long = "x".repeat(INITIAL_CHUNK * 4 + 17);
    let contents = format!("short\n{long}\ntail\n");
    let (_dir, file) = file_with(&contents);

    // The long record starts past the short one and dwarfs the default
    // chunk, forcing several regrowth rounds.
    assert_eq!(read_line_at(&file, 6).unwrap(), long);

    // The result must not depend on the initial chunk size.
    for initial in [1, 2, 7, 64, INITIAL_CHUNK] {
        assert_eq!(read_line_with(&file, 6, initial).unwrap(), long);
    }
}

#[test]
fn regrowth_does_not_overshoot_into_later_lines() {
    let (_dir, file) = file_with("aa\nbb\ncc\n");
    // A tiny chunk that ends exactly at the terminator boundary.
    assert_eq!(read_line_with(&file, 3, 2).unwrap(), "bb");
}

#[test]
fn missing_terminator_at_eof_returns_the_rest() {
    let (_dir, file) = file_with("complete\ndangling tail");
    assert_eq!(read_line_at(&file, 9).unwrap(), "dangling tail");
}

#[test]
fn offset_at_eof_reads_empty() {
    let (_dir, file) = file_with("only\n");
    assert_eq!(read_line_at(&file, 5).unwrap(), "");
}

#[test]
fn strips_carriage_returns() {
    let (_dir, file) = file_with("crlf line\r\nnext\r\n");
    assert_eq!(read_line_at(&file, 0).unwrap(), "crlf line");
    assert_eq!(read_line_at(&file, 11).unwrap(), "next");
}
