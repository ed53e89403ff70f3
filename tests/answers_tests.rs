mod common;

use common::payload;
use inverted_wordles::answers::{self, AnswerFile, AnswerRecord, WordCount};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case::empty_payload("{}", vec![])]
#[case::single(r#"{"u1": {"answers": ["cat"]}}"#, vec![("cat", 1)])]
#[case::across_records(
    r#"{"u1": {"answers": ["cat", "dog"]}, "u2": {"answers": ["cat"]}}"#,
    vec![("cat", 2), ("dog", 1)]
)]
#[case::case_sensitive(r#"{"u1": {"answers": ["Cat", "cat"]}}"#, vec![("Cat", 1), ("cat", 1)])]
#[case::not_trimmed(r#"{"u1": {"answers": ["cat", " cat"]}}"#, vec![("cat", 1), (" cat", 1)])]
#[case::repeat_within_record(r#"{"u1": {"answers": ["owl", "owl", "owl"]}}"#, vec![("owl", 3)])]
fn test_aggregate_counts(#[case] json: &str, #[case] expected: Vec<(&str, usize)>) {
    let file = AnswerFile::from_json_str(json).unwrap();
    let counts = answers::aggregate(file.records());
    let expected: Vec<WordCount> = expected
        .into_iter()
        .map(|(w, c)| WordCount::new(w, c))
        .collect();
    assert_eq!(counts, expected);
}

#[test]
fn test_first_occurrence_order_follows_document() {
    let file = payload(&[("b", &["kiwi", "apple"]), ("a", &["apple", "fig"])]);
    let words: Vec<String> = answers::aggregate(file.records())
        .into_iter()
        .map(|c| c.word)
        .collect();
    assert_eq!(words, vec!["kiwi", "apple", "fig"]);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("answers.json");
    std::fs::write(&path, r#"{"x": {"answers": ["sun", "moon"]}}"#).unwrap();

    let file = AnswerFile::load_from_file(&path).unwrap();
    assert_eq!(file.len(), 1);
    assert_eq!(answers::total(&answers::aggregate(file.records())), 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = AnswerFile::load_from_file("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, inverted_wordles::WordleError::Io(_)));
}

fn arb_records() -> impl Strategy<Value = Vec<AnswerRecord>> {
    let word = prop::sample::select(vec!["cat", "dog", "Cat", " cat", "owl", "", "émeu"]);
    prop::collection::vec(
        prop::collection::vec(word, 0..6).prop_map(|answers| AnswerRecord {
            answers: answers.into_iter().map(String::from).collect(),
        }),
        0..12,
    )
}

proptest! {
    #[test]
    fn prop_aggregate_conserves_answers(records in arb_records()) {
        let counts = answers::aggregate(&records);
        let submitted: usize = records.iter().map(|r| r.answers.len()).sum();

        prop_assert_eq!(answers::total(&counts), submitted);
        prop_assert!(counts.iter().all(|c| c.count >= 1));

        let mut seen = std::collections::HashSet::new();
        for c in &counts {
            prop_assert!(seen.insert(c.word.clone()), "duplicate word {:?}", c.word);
        }
    }
}
