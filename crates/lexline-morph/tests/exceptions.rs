use std::fs;
use std::sync::Arc;

use lexline_morph::Morph;
use lexline_types::Pos;

fn dict_with_exceptions() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("noun.exc"),
        "children child\noxen ox\nAxes ax axis\n",
    )
    .unwrap();
    fs::write(dir.path().join("verb.exc"), "ran run\nate eat\n").unwrap();
    dir
}

#[test]
fn loads_tables_lazily_and_caches_them() {
    let dir = dict_with_exceptions();
    let morph = Morph::new(dir.path());

    let first = morph.exceptions(Pos::Noun).unwrap();
    assert_eq!(first.get("children"), Some(&vec!["child".to_string()]));
    // Surfaces and bases are normalized on load.
    assert_eq!(
        first.get("axes"),
        Some(&vec!["ax".to_string(), "axis".to_string()])
    );

    // Second use hands back the cached table, not a re-read.
    let second = morph.exceptions(Pos::Noun).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn missing_exception_files_are_empty_tables() {
    let dir = dict_with_exceptions();
    let morph = Morph::new(dir.path());
    assert!(morph.exceptions(Pos::Adj).unwrap().is_empty());
}

#[test]
fn load_all_covers_every_part_of_speech() {
    let dir = dict_with_exceptions();
    let morph = Morph::new(dir.path());

    let all = morph.load_all().unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[&Pos::Verb].get("ran"), Some(&vec!["run".to_string()]));
    assert!(all[&Pos::Adv].is_empty());
}

#[test]
fn base_forms_use_loaded_exceptions() {
    let dir = dict_with_exceptions();
    let morph = Morph::new(dir.path());

    let forms = morph.base_forms(Pos::Verb, "ran").unwrap();
    assert_eq!(forms, vec!["run", "ran"]);

    let forms = morph.base_forms(Pos::Noun, "oxen").unwrap();
    assert_eq!(forms.first().map(String::as_str), Some("ox"));
}
