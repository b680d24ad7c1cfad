use allowlist_builder::pipeline::{Pipeline, RunOutcome};
use allowlist_builder::types::{RawRow, RawTable, RecordKind, ViolationReason};
use allowlist_builder::{ValidationConfig, ValidationReport};

fn rejected(outcome: RunOutcome) -> ValidationReport {
    match outcome {
        RunOutcome::Rejected(report) => report,
        RunOutcome::Accepted(doc) => panic!("expected failure, got document:\n{}", doc.text),
    }
}

fn accepted_text(outcome: RunOutcome) -> String {
    match outcome {
        RunOutcome::Accepted(doc) => doc.text,
        RunOutcome::Rejected(report) => panic!("unexpected failure:\n{report}"),
    }
}

/// Read one quoted scalar off the front of `text`, returning its value and the remainder.
fn take_scalar(text: &str) -> (String, &str) {
    let mut chars = text.char_indices();
    let (_, open) = chars.next().unwrap();
    let mut value = String::new();
    while let Some((i, c)) = chars.next() {
        match (open, c) {
            ('\'', '\'') if text[i + 1..].starts_with('\'') => {
                value.push('\'');
                chars.next();
            }
            ('"', '\\') => {
                let (_, esc) = chars.next().unwrap();
                match esc {
                    'n' => value.push('\n'),
                    'r' => value.push('\r'),
                    't' => value.push('\t'),
                    'u' => {
                        let hex: String = (0..4).map(|_| chars.next().unwrap().1).collect();
                        value.push(char::from_u32(u32::from_str_radix(&hex, 16).unwrap()).unwrap());
                    }
                    other => value.push(other),
                }
            }
            (q, c) if q == c => return (value, &text[i + 1..]),
            (_, c) => value.push(c),
        }
    }
    panic!("unterminated scalar: {text:?}");
}

/// Parse the emitted document back into `(section, key, limit, comment)` tuples.
fn parse_document(text: &str) -> Vec<(String, String, String, String)> {
    let mut entries = Vec::new();
    let mut section = String::new();
    let mut key = String::new();
    for line in text.lines() {
        if let Some(name) = line.strip_suffix(':') {
            section = name.to_string();
        } else if let Some(rest) = line.strip_prefix("  - ") {
            let (_, value) = rest.split_once(": ").unwrap();
            let (parsed, tail) = take_scalar(value);
            assert!(tail.is_empty(), "trailing text after key: {line:?}");
            key = parsed;
        } else if let Some(rest) = line.strip_prefix("    paymentLimit: ") {
            let (limit, tail) = take_scalar(rest);
            let comment = tail.strip_prefix(" # ").unwrap_or(tail).to_string();
            entries.push((section.clone(), key.clone(), limit, comment));
        } else {
            panic!("unexpected line: {line:?}");
        }
    }
    entries
}

#[test]
fn invalid_type_and_non_numeric_limit_fail_the_whole_run() {
    let table = RawTable::new(vec![
        RawRow::new(1, "creditorAccount", "100", "500", ""),
        RawRow::new(2, "fourthParty", "1234567890123", "abc", ""),
        RawRow::new(3, "bogus", "x", "1", ""),
    ]);
    let config = ValidationConfig::default().with_require_numeric_limit(true);

    let report = rejected(Pipeline::new(config).run(&table));
    let got: Vec<_> = report
        .violations()
        .iter()
        .map(|v| (v.position, v.reason))
        .collect();
    assert_eq!(
        got,
        vec![
            (2, ViolationReason::NonNumericLimit),
            (3, ViolationReason::InvalidType),
        ]
    );
    assert_eq!(report.violations()[1].kind_label, "bogus");
}

#[test]
fn every_duplicate_nzbn_is_reported() {
    let table = RawTable::new(vec![
        RawRow::new(2, "fourthParty", "9999999999999", "", ""),
        RawRow::new(3, "fourthParty", "9999999999999", "", ""),
    ]);

    let report = rejected(Pipeline::new(ValidationConfig::default()).run(&table));
    assert_eq!(report.violations().len(), 2);
    assert!(
        report
            .violations()
            .iter()
            .all(|v| v.reason == ViolationReason::DuplicateNzbn && v.kind == RecordKind::FourthParty)
    );
    assert_eq!(report.summary().len(), 1);
    assert_eq!(
        report.summary()[0].to_string(),
        "2 fourthParty rows have duplicate NZBNs."
    );
}

#[test]
fn dedupe_flag_does_not_rescue_duplicates() {
    let table = RawTable::new(vec![
        RawRow::new(2, "fourthParty", "9999999999999", "", ""),
        RawRow::new(3, "fourthParty", "9999999999999", "", ""),
    ]);
    let config = ValidationConfig::default()
        .with_dedupe_nzbn(true)
        .with_dedupe_accounts(true);

    let report = rejected(Pipeline::new(config).run(&table));
    assert_eq!(report.violations().len(), 2);
}

#[test]
fn single_valid_account_renders_document() {
    let table = RawTable::new(vec![RawRow::new(2, "creditorAccount", "42", "10", "note")]);

    let text = accepted_text(Pipeline::new(ValidationConfig::default()).run(&table));
    assert_eq!(
        text,
        "creditorAccounts:\n\
         \x20 - accountNumber: '42'\n\
         \x20   paymentLimit: '10' # note\n\
         fourthParties:\n"
    );
}

#[test]
fn n_occurrences_of_one_account_yield_n_violations() {
    let rows = (0..5)
        .map(|i| RawRow::new(i + 2, "creditorAccount", "555", "1", ""))
        .chain(std::iter::once(RawRow::new(7, "creditorAccount", "556", "1", "")))
        .collect();

    let report = rejected(Pipeline::new(ValidationConfig::default()).run(&RawTable::new(rows)));
    let positions: Vec<_> = report.violations().iter().map(|v| v.position).collect();
    assert_eq!(positions, vec![2, 3, 4, 5, 6]);
}

#[test]
fn account_numbers_and_nzbns_are_separate_key_spaces() {
    let table = RawTable::new(vec![
        RawRow::new(2, "creditorAccount", "1234567890123", "", ""),
        RawRow::new(3, "fourthParty", "1234567890123", "", ""),
    ]);
    assert!(Pipeline::new(ValidationConfig::default()).run(&table).is_accepted());
}

#[test]
fn blank_rows_never_appear_in_report_or_document() {
    let table = RawTable::new(vec![
        RawRow::new(2, "  ", "", " ", ""),
        RawRow::new(3, "creditorAccount", "42", "10", ""),
        RawRow::new(4, "", "", "", ""),
        RawRow::new(5, "bogus", " ", "", ""),
    ]);
    let config = ValidationConfig::default().with_require_numeric_limit(true);
    let text = accepted_text(Pipeline::new(config).run(&table));
    assert_eq!(parse_document(&text).len(), 1);
}

#[test]
fn report_is_identical_regardless_of_input_order() {
    let rows = vec![
        RawRow::new(4, "fourthParty", "12", "", ""),
        RawRow::new(2, "creditorAccount", "7", "", ""),
        RawRow::new(3, "other", "z", "", ""),
        RawRow::new(5, "creditorAccount", "7", "", ""),
    ];
    let mut reversed = rows.clone();
    reversed.reverse();
    let pipeline = Pipeline::new(ValidationConfig::default());

    let a = rejected(pipeline.run(&RawTable::new(rows)));
    let b = rejected(pipeline.run(&RawTable::new(reversed)));
    assert_eq!(a.violations(), b.violations());
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn emitted_document_parses_back_to_the_accepted_rows() {
    let table = RawTable::new(vec![
        RawRow::new(2, "creditorAccount", " 0012-34 ", "1e3", "O'Brien's account"),
        RawRow::new(3, "FourthParty", "9429 0412 34567", "500", ""),
        RawRow::new(4, "creditoraccount", "99", "", "line one\nline two"),
    ]);
    let config = ValidationConfig::default().with_max_fourth_party_limit(Some(500.0));

    let text = accepted_text(Pipeline::new(config).run(&table));
    assert_eq!(
        parse_document(&text),
        vec![
            (
                "creditorAccounts".to_string(),
                "0012-34".to_string(),
                "1e3".to_string(),
                "O'Brien's account".to_string()
            ),
            (
                "creditorAccounts".to_string(),
                "99".to_string(),
                String::new(),
                "line one line two".to_string()
            ),
            (
                "fourthParties".to_string(),
                "9429041234567".to_string(),
                "500".to_string(),
                String::new()
            ),
        ]
    );
}

#[test]
fn multi_line_cells_survive_the_round_trip() {
    let table = RawTable::new(vec![
        RawRow::new(2, "creditorAccount", "12\n34", "10\n20", "two\nlines"),
        RawRow::new(3, "creditorAccount", "say \"hi\"\\", "5", ""),
    ]);

    let text = accepted_text(Pipeline::new(ValidationConfig::default()).run(&table));
    assert_eq!(text.lines().count(), 6);
    assert_eq!(
        parse_document(&text),
        vec![
            (
                "creditorAccounts".to_string(),
                "12\n34".to_string(),
                "10\n20".to_string(),
                "two lines".to_string()
            ),
            (
                "creditorAccounts".to_string(),
                "say \"hi\"\\".to_string(),
                "5".to_string(),
                String::new()
            ),
        ]
    );
}

#[test]
fn limit_ceiling_is_inclusive_per_kind() {
    let table = RawTable::new(vec![
        RawRow::new(2, "creditorAccount", "1", "100", ""),
        RawRow::new(3, "creditorAccount", "2", "100.01", ""),
        RawRow::new(4, "fourthParty", "1234567890123", "100.01", ""),
    ]);
    let config = ValidationConfig::default().with_max_creditor_limit(Some(100.0));

    let report = rejected(Pipeline::new(config).run(&table));
    assert_eq!(report.violations().len(), 1);
    assert_eq!(report.violations()[0].position, 3);
    assert_eq!(report.violations()[0].reason.to_string(), "paymentLimit > 100.0");
}
