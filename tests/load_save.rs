use std::fs;

use ini_tree::{Document, Error};

#[test]
fn load_missing_file_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("missing.ini");

    let result = ini_tree::load(&path);

    assert!(matches!(result, Err(Error::ReadFailure { path: p, .. }) if p == path));
}

#[test]
fn save_into_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("no-such-dir").join("out.ini");

    let result = ini_tree::save(&Document::new(), &path);

    assert!(matches!(result, Err(Error::WriteFailure { .. })));
}

#[test]
fn save_then_load_keeps_structure_and_comments() {
    let text = "; settings\n[net]\nhost = localhost ; primary\nport=8080\n\n[paths]\nroot=\"C:/Program Files\"\n";
    let dir = tempfile::tempdir().expect("create temp dir");
    let input = dir.path().join("in.ini");
    let output = dir.path().join("out.ini");
    fs::write(&input, text).expect("write input");

    let mut document = ini_tree::load(&input).expect("load input");
    document.set_string("NET", "port", "9090");
    document.set_int("paths", "depth", 3);
    ini_tree::save(&document, &output).expect("save output");

    let reloaded = ini_tree::load(&output).expect("load output");

    assert_eq!(reloaded, document);
    assert_eq!(reloaded.comment(), Some("; settings\n"));
    assert_eq!(reloaded.get_string("net", "port", "_"), "9090");
    assert_eq!(reloaded.get_string("paths", "root", "_"), "C:/Program Files");
    assert_eq!(reloaded.get_int("paths", "depth", 0), 3);
    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "; settings\n[net]\nhost=localhost ; primary\nport=9090\n\n[paths]\nroot=\"C:/Program Files\"\ndepth=3\n"
    );
}

#[test]
fn garbage_file_loads_as_comment() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("garbage.ini");
    fs::write(&path, "]]]\n==\n\"unterminated").expect("write input");

    let document = ini_tree::load(&path).expect("readable files always load");

    assert!(document.sections().is_empty());
    assert_eq!(document.comment(), Some("]]]\n==\n\"unterminated"));
}
