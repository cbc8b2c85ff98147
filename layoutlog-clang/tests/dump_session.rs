//! Feeding parsed dumps through a session.

use layoutlog_clang::{DumpedRecord, parse_dump};
use layoutlog_core::{Observation, Options, RecordDecl, Session};

/// Two translation units that both include `shape.h`.
const SHAPES_TU: &str = "
*** Dumping AST Record Layout
         0 | struct geo::Point
         0 |   int x
         4 |   int y
           | [sizeof=8, dsize=8, align=4,
           |  nvsize=8, nvalign=4]

*** Dumping AST Record Layout
         0 | class geo::Shape
         0 |   (Shape vtable pointer)
         8 |   struct geo::Point origin
         8 |     int x
        12 |     int y
           | [sizeof=16, dsize=16, align=8,
           |  nvsize=16, nvalign=8]

*** Dumping AST Record Layout
         0 | struct geo::Point
         0 |   int x
         4 |   int y
           | [sizeof=8, dsize=8, align=4,
           |  nvsize=8, nvalign=4]

*** Dumping AST Record Layout
         0 | struct util::Flags
     0:0-0 |   unsigned int dirty
     0:1-1 |   unsigned int hidden
           | [sizeof=4, dsize=4, align=4,
           |  nvsize=4, nvalign=4]
";

fn observe_all(session: &mut Session, records: &[DumpedRecord]) -> Vec<Observation> {
    records
        .iter()
        .map(|record| {
            let layout = record.layout.clone();
            session.observe(&record.decl, &move |_: &RecordDecl| layout.clone())
        })
        .collect()
}

#[test]
fn test_repeated_definitions_are_recorded_once() {
    let records = parse_dump(SHAPES_TU, "shapes.layout").unwrap();
    assert_eq!(records.len(), 4);

    let mut session = Session::new(Options::default());
    let observations = observe_all(&mut session, &records);

    assert_eq!(
        observations,
        vec![
            Observation::Recorded,
            Observation::Recorded,
            Observation::Duplicate,
            Observation::Recorded,
        ]
    );

    let mut out = Vec::new();
    session.finalize(&mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert_eq!(out.matches("------ Record Decl: ").count(), 3);
    assert!(out.starts_with("------ Record Decl: geo::Point\n         0 | struct geo::Point\n"));
    assert!(out.contains("     0:1-1 |   unsigned int hidden\n"));
}

#[test]
fn test_filter_applies_to_dumped_names() {
    let records = parse_dump(SHAPES_TU, "shapes.layout").unwrap();
    let options = Options {
        filter: "geo::".into(),
        ..Options::default()
    };
    let mut session = Session::new(options);
    observe_all(&mut session, &records);

    let names: Vec<_> = session.table().names().collect();
    assert_eq!(names, vec!["geo::Point", "geo::Shape"]);
    assert_eq!(session.stats().filtered, 1);
}
