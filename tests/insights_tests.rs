// Property tests for the insight aggregations
//
// Tests cover:
// - Ranking bounds and ordering
// - Mood band boundaries
// - Sorter idempotence and latest-entry agreement
// - Empty input behavior

use mindmirror::insights::{
    DEFAULT_TOP_N, Dashboard, MoodBand, average_emotions, count_concerns, latest_entry, mood_label,
    sorted_by_date_desc,
};
use mindmirror::models::JournalEntry;
use rstest::rstest;

fn many_emotions() -> Vec<JournalEntry> {
    let labels = [
        "joy", "sadness", "anger", "fear", "surprise", "disgust", "trust", "anticipation", "calm",
        "pride",
    ];
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            JournalEntry::new(i.to_string(), format!("2024-01-{:02}", i + 1), "text")
                .with_emotions([(*label, (i as f64 + 1.0) / 10.0)])
        })
        .collect()
}

#[test]
fn test_emotion_ranking_bounded_and_descending() {
    let averages = average_emotions(&many_emotions(), DEFAULT_TOP_N);

    assert_eq!(averages.len(), DEFAULT_TOP_N);
    assert!(averages.windows(2).all(|w| w[0].average >= w[1].average));
    assert_eq!(averages[0].label, "pride");
}

#[test]
fn test_worked_example() {
    let entries = vec![
        JournalEntry::new("1", "2024-01-01", "a").with_emotions([("joy", 0.8)]),
        JournalEntry::new("2", "2024-01-02", "b").with_emotions([("joy", 0.4), ("sad", 0.2)]),
    ];
    let averages = average_emotions(&entries, DEFAULT_TOP_N);

    assert_eq!(averages.len(), 2);
    assert_eq!(averages[0].label, "joy");
    assert!((averages[0].average - 0.6).abs() < 1e-9);
    assert_eq!(averages[1].label, "sad");
    assert!((averages[1].average - 0.2).abs() < 1e-9);
}

#[test]
fn test_blank_concerns_ignored() {
    let entries = vec![JournalEntry::new("1", "2024-01-01", "a").with_concerns(["", "  ", "Work"])];
    let counts = count_concerns(&entries, DEFAULT_TOP_N);

    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].concern, "Work");
    assert_eq!(counts[0].count, 1);
}

#[rstest]
#[case(Some(0.51), "Very Positive")]
#[case(Some(0.5), "Positive")]
#[case(Some(0.1), "Neutral")]
#[case(Some(0.0), "Neutral")]
#[case(Some(-0.1), "Neutral")]
#[case(Some(-0.11), "Negative")]
#[case(Some(-0.5), "Negative")]
#[case(Some(-0.51), "Very Negative")]
#[case(None, "N/A")]
fn test_mood_band_boundaries(#[case] score: Option<f64>, #[case] expected: &str) {
    assert_eq!(mood_label(score), expected);
    assert_eq!(MoodBand::classify(score).to_string(), expected);
}

#[test]
fn test_sorter_idempotent_and_agrees_with_latest() {
    let entries = vec![
        JournalEntry::new("b", "2024-02-10", "x"),
        JournalEntry::new("a", "2024-03-01", "y"),
        JournalEntry::new("c", "2024-01-15", "z"),
    ];

    let once = sorted_by_date_desc(&entries);
    let twice = sorted_by_date_desc(&once);
    assert_eq!(once, twice);

    let ids: Vec<&str> = once.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(latest_entry(&entries).map(|e| &e.id), once.first().map(|e| &e.id));
}

#[test]
fn test_empty_input_yields_empty_results() {
    assert!(average_emotions(&[], DEFAULT_TOP_N).is_empty());
    assert!(count_concerns(&[], DEFAULT_TOP_N).is_empty());
    assert!(sorted_by_date_desc(&[]).is_empty());
    assert!(latest_entry(&[]).is_none());
    assert!(Dashboard::build(&[], DEFAULT_TOP_N).is_empty());
}
