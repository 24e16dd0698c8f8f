use super::*;
use crate::TypesyncError;

fn sample_lines() -> Vec<LyricLine> {
    vec![
        LyricLine::new(0.0, "a"),
        LyricLine::new(2.0, "bb"),
        LyricLine::new(4.0, "ccc"),
    ]
}

#[test]
fn test_parse_basic_lines() {
    let source = "[00:00.00]a\n[00:02.00]bb\n[00:04.00]ccc\n";
    let track = parse_lrc(source, ParseOptions::default());

    assert_eq!(track.lines(), sample_lines().as_slice());
}

#[test]
fn test_parse_sorts_out_of_order_input() {
    let source = "[01:05.10]third\n[00:10.00]first\n[00:30.25]second\n";
    let track = parse_lrc(source, ParseOptions::default());

    let times: Vec<f64> = track.lines().iter().map(|l| l.time).collect();
    assert_eq!(times.len(), 3);
    for (actual, expected) in times.iter().zip([10.0, 30.25, 65.1]) {
        assert!((actual - expected).abs() < 1e-9, "{} vs {}", actual, expected);
    }
    assert_eq!(track.lines()[2].text, "third");
}

#[test]
fn test_parse_keeps_input_order_for_equal_times() {
    let source = "[00:05.00]one\n[00:05.00]two\n[00:01.00]zero\n";
    let track = parse_lrc(source, ParseOptions::default());

    let texts: Vec<&str> = track.lines().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["zero", "one", "two"]);
}

#[test]
fn test_parse_skips_malformed_and_metadata_lines() {
    let source = "\
[ti:Some Song]
[ar:Some Artist]
plain text without a tag
[0:05.00]short minutes
[00:5.00]one digit seconds
[00:75.00]seconds out of range
[00:10.0]one digit fraction
[aa:bb.cc]letters
[00:12.00 missing bracket
[00:20.00]kept
";
    let track = parse_lrc(source, ParseOptions::default());

    let texts: Vec<&str> = track.lines().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["short minutes", "kept"]);
}

#[test]
fn test_parse_millisecond_fraction() {
    let track = parse_lrc("[00:01.250]ms\n", ParseOptions::default());
    assert_eq!(track.len(), 1);
    assert!((track.lines()[0].time - 1.25).abs() < 1e-9);
}

#[test]
fn test_parse_multiple_timestamps_on_one_line() {
    let source = "[00:10.00][00:40.00]chorus\n[00:20.00]verse\n";
    let track = parse_lrc(source, ParseOptions::default());

    let lines: Vec<(f64, &str)> = track
        .lines()
        .iter()
        .map(|l| (l.time, l.text.as_str()))
        .collect();
    assert_eq!(lines, vec![(10.0, "chorus"), (20.0, "verse"), (40.0, "chorus")]);
}

#[test]
fn test_parse_trims_text_and_handles_crlf() {
    let source = "[00:01.00]   padded text   \r\n[00:02.00]next\r\n";
    let track = parse_lrc(source, ParseOptions::default());

    assert_eq!(track.lines()[0].text, "padded text");
    assert_eq!(track.lines()[1].text, "next");
}

#[test]
fn test_parse_keeps_empty_lines_without_filter() {
    let source = "[00:00.00]\n[00:04.00]words\n";
    let track = parse_lrc(source, ParseOptions::default());

    assert_eq!(track.len(), 2);
    assert_eq!(track.lines()[0].text, "");
}

#[test]
fn test_parse_with_ad_lib_removal_drops_empty_lines() {
    let source = "[00:00.00]\n[00:01.00](Yeah, yeah)\n[00:04.00]Guess who's back (back)\n";
    let track = parse_lrc(source, ParseOptions::with_ad_libs_removed(true));

    assert_eq!(track.len(), 1);
    assert_eq!(track.lines()[0].text, "Guess who's back");
    assert_eq!(track.lines()[0].time, 4.0);
}

#[test]
fn test_parse_without_ad_lib_removal_keeps_parentheses() {
    let source = "[00:04.00]Guess who's back (back)\n";
    let track = parse_lrc(source, ParseOptions::with_ad_libs_removed(false));

    assert_eq!(track.lines()[0].text, "Guess who's back (back)");
}

#[test]
fn test_parse_bytes_rejects_invalid_utf8() {
    let mut bytes = b"[00:01.00]ok\n[00:02.00]bad ".to_vec();
    bytes.push(0xff);

    let result = parse_lrc_bytes(&bytes, ParseOptions::default());
    match result {
        Err(TypesyncError::ParseError { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_parse_bytes_accepts_utf8() {
    let result = parse_lrc_bytes("[00:01.00]café\n".as_bytes(), ParseOptions::default());
    assert!(result.is_ok());
    let track = result.unwrap();
    assert_eq!(track.lines()[0].char_len(), 4);
}

#[test]
fn test_to_lrc_renders_sorted_lines() {
    let track = LyricTrack::new(vec![
        LyricLine::new(62.5, "later"),
        LyricLine::new(1.0, "early"),
    ]);

    assert_eq!(track.to_lrc(), "[00:01.00]early\n[01:02.50]later\n");
}

#[test]
fn test_lookup_greatest_index_at_or_before() {
    let lines = sample_lines();

    assert_eq!(current_index(&lines, -1.0), None);
    assert_eq!(current_index(&lines, 0.0), Some(0));
    assert_eq!(current_index(&lines, 1.99), Some(0));
    assert_eq!(current_index(&lines, 2.0), Some(1));
    assert_eq!(current_index(&lines, 3.5), Some(1));
    assert_eq!(current_index(&lines, 4.0), Some(2));
    assert_eq!(current_index(&lines, 1000.0), Some(2));
}

#[test]
fn test_lookup_matches_linear_scan() {
    let track = parse_lrc(
        "[00:01.00]a\n[00:01.00]b\n[00:03.00]c\n[00:07.50]d\n[00:07.50]e\n[00:09.00]f\n",
        ParseOptions::default(),
    );
    let lines = track.lines();

    let mut t = -1.0;
    while t < 11.0 {
        let expected = lines.iter().rposition(|l| l.time <= t);
        assert_eq!(current_index(lines, t), expected, "time {}", t);
        t += 0.25;
    }
}

#[test]
fn test_lookup_duplicate_timestamps_last_wins() {
    let lines = vec![
        LyricLine::new(1.0, "x"),
        LyricLine::new(2.0, "y"),
        LyricLine::new(2.0, "z"),
        LyricLine::new(3.0, "w"),
    ];

    assert_eq!(current_index(&lines, 2.0), Some(2));
    assert_eq!(current_index(&lines, 2.9), Some(2));
}

#[test]
fn test_lookup_empty_and_nan() {
    assert_eq!(current_index(&[], 5.0), None);
    assert_eq!(current_index(&sample_lines(), f64::NAN), None);
}

#[test]
fn test_next_line_time() {
    let lines = sample_lines();

    assert_eq!(next_line_time(&lines, None), Some(0.0));
    assert_eq!(next_line_time(&lines, Some(0)), Some(2.0));
    assert_eq!(next_line_time(&lines, Some(2)), None);
    assert_eq!(next_line_time(&[], None), None);
}

#[test]
fn test_ad_lib_filter_nested_groups() {
    assert_eq!(remove_ad_libs("I'm (so (so)) tired"), "I'm tired");
    assert_eq!(remove_ad_libs("((deep)) cut"), "cut");
}

#[test]
fn test_ad_lib_filter_punctuation_cleanup() {
    assert_eq!(remove_ad_libs("Hello (hello) , world (world) !"), "Hello, world!");
    assert_eq!(remove_ad_libs("(Oh), baby"), "baby");
    assert_eq!(remove_ad_libs("wait (a) , (b) , go"), "wait, go");
    assert_eq!(remove_ad_libs("and so... (yeah) we go"), "and so... we go");
}

#[test]
fn test_ad_lib_filter_keeps_words_apart() {
    assert_eq!(remove_ad_libs("one(two)three"), "one three");
}

#[test]
fn test_ad_lib_filter_leaves_unbalanced_parentheses() {
    assert_eq!(remove_ad_libs("open ( paren"), "open ( paren");
    assert_eq!(remove_ad_libs("close ) paren"), "close ) paren");
}

#[test]
fn test_ad_lib_filter_is_idempotent() {
    let inputs = [
        "Now this looks like a job for me (yeah)",
        "So everybody (oh (oh)) , just follow me",
        "  spaced   out (x)  ,  , text ;  ",
        "((a)",
        "a (b",
        ", . x",
        "(Hey!)",
        "plain line",
        "",
    ];

    for input in inputs {
        let once = remove_ad_libs(input);
        let twice = remove_ad_libs(&once);
        assert_eq!(once, twice, "input {:?}", input);
    }
}

#[test]
fn test_format_timestamp_rounds_to_hundredths() {
    assert_eq!(format_timestamp(5.004), "00:05.00");
    assert_eq!(format_timestamp(5.006), "00:05.01");
    assert_eq!(format_timestamp(600.0), "10:00.00");
    assert_eq!(format_timestamp(-3.0), "00:00.00");
}
