mod common;

use common::{Fixture, SynsetSpec};

use lexline_db::{DbError, LexDb};
use lexline_types::{Pos, SynsetType};

fn fixture() -> Fixture {
    Fixture::build(&[
        SynsetSpec {
            key: "wood_golf",
            words: &[("wood", "2")],
            pointers: &[
                ("@", "club", 'n', "0000"),
                ("~", "driver", 'n', "0000"),
                ("~", "metalwood", 'n', "0000"),
            ],
            gloss: "a golf club with a long shaft used to hit long shots; originally made with a wooden head; \"metal woods are now standard\"  ",
            ..Default::default()
        },
        SynsetSpec {
            key: "club",
            words: &[("golf_club", "0"), ("club", "1")],
            gloss: "golf equipment used by a golfer to hit a golf ball",
            ..Default::default()
        },
        SynsetSpec {
            key: "driver",
            words: &[("driver", "0")],
            pointers: &[("@", "wood_golf", 'n', "0000")],
            gloss: "a golf club with a near vertical face",
            ..Default::default()
        },
        SynsetSpec {
            key: "metalwood",
            words: &[("metalwood", "0")],
            gloss: "a wood with a metal head",
            ..Default::default()
        },
        SynsetSpec {
            key: "walk",
            pos: 'v',
            ss_type: 'v',
            lex_filenum: "29",
            words: &[("walk", "0"), ("perambulate", "1")],
            frames: "02 + 01 01 + 02 00",
            gloss: "use one's feet to advance; \"walk, don't run!\"",
            ..Default::default()
        },
        SynsetSpec {
            key: "pretty",
            pos: 'a',
            ss_type: 's',
            words: &[("pretty", "0")],
            gloss: "pleasing by delicacy or grace",
            ..Default::default()
        },
    ])
}

#[test]
fn index_and_data_round_trip() {
    let fx = fixture();
    let db = LexDb::open(fx.path()).unwrap();

    let entry = db.find(Pos::Noun, "wood").unwrap().expect("wood indexed");
    assert_eq!(entry.synset_offsets, vec![fx.offset("wood_golf")]);

    let record = db.resolve(Pos::Noun, fx.offset("wood_golf")).unwrap();
    assert_eq!(record.offset(), fx.offset("wood_golf"));
    assert_eq!(record.pos(), Pos::Noun);
    assert_eq!(record.word_count, 1);
    assert_eq!(record.synonyms.len(), record.word_count);
    assert_eq!(record.lemma(), "wood");
    assert_eq!(record.lex_id(), 2);
    assert_eq!(record.pointers.len(), 3);
    assert_eq!(
        record.gloss.definition,
        "a golf club with a long shaft used to hit long shots"
    );
    assert!(record.gloss.raw.ends_with("\"metal woods are now standard\"  "));
    assert_eq!(record.gloss.examples, vec!["metal woods are now standard"]);
}

#[test]
fn lookup_normalizes_queries() {
    let fx = fixture();
    let db = LexDb::open(fx.path()).unwrap();

    assert!(db.lemma_exists(Pos::Noun, "WOOD").unwrap());
    assert!(db.lemma_exists(Pos::Noun, "golf club").unwrap());
    assert!(!db.lemma_exists(Pos::Noun, "plastic").unwrap());
    assert!(db.find(Pos::Noun, "").unwrap().is_none());
}

#[test]
fn pointer_resolution_is_one_hop_and_idempotent() {
    let fx = fixture();
    let db = LexDb::open(fx.path()).unwrap();

    let record = db.resolve(Pos::Noun, fx.offset("wood_golf")).unwrap();
    let hypernym = db.resolve_pointer(&record.pointers[0]).unwrap();
    assert_eq!(hypernym.offset(), fx.offset("club"));
    assert_eq!(hypernym.synonyms[0].lemma, "golf_club");

    // Re-fetching the original by its offset yields the same record.
    let again = db.resolve(Pos::Noun, fx.offset("wood_golf")).unwrap();
    assert_eq!(again, record);
}

#[test]
fn verb_records_carry_frames() {
    let fx = fixture();
    let db = LexDb::open(fx.path()).unwrap();

    let record = db.resolve(Pos::Verb, fx.offset("walk")).unwrap();
    assert_eq!(record.synset_type, SynsetType::Verb);
    assert_eq!(record.lex_filenum, 29);
    assert_eq!(record.frames.len(), 2);
    assert_eq!(record.frames[0].frame_number, 1);
    assert_eq!(record.frames[0].word_number, Some(1));
    assert_eq!(record.frames[1].word_number, None);
}

#[test]
fn satellite_adjectives_keep_their_type() {
    let fx = fixture();
    let db = LexDb::open(fx.path()).unwrap();

    let record = db.resolve(Pos::Adj, fx.offset("pretty")).unwrap();
    assert_eq!(record.synset_type, SynsetType::AdjSatellite);
    assert_eq!(record.pos(), Pos::Adj);
}

#[test]
fn misanchored_offsets_are_corruption() {
    let fx = fixture();
    let db = LexDb::open(fx.path()).unwrap();

    // One byte past the record start: the line's leading field no longer
    // matches the requested offset.
    let res = db.resolve(Pos::Noun, fx.offset("wood_golf") + 1);
    assert!(matches!(
        res,
        Err(DbError::Corrupt { .. } | DbError::Parse { .. })
    ));
}

#[test]
fn closed_handles_refuse_further_work() {
    let fx = fixture();
    let mut db = LexDb::open(fx.path()).unwrap();
    assert!(db.is_open());

    db.close();
    assert!(!db.is_open());
    assert!(matches!(db.find(Pos::Noun, "wood"), Err(DbError::Closed)));
    assert!(matches!(db.resolve(Pos::Noun, 0), Err(DbError::Closed)));

    // Idempotent.
    db.close();
}

#[test]
fn open_requires_every_file() {
    let fx = fixture();
    std::fs::remove_file(fx.path().join("data.adv")).unwrap();
    assert!(matches!(
        LexDb::open(fx.path()),
        Err(DbError::MissingFile(_))
    ));
}
