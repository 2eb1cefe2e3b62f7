//! Expected PEP statuses per index status code

/// Status code (the letter after the PEP type in the index) to the statuses
/// a PEP page may show for it. An empty code is a draft or active PEP.
pub const EXPECTED_STATUS: &[(&str, &[&str])] = &[
    ("A", &["Active", "Accepted"]),
    ("D", &["Deferred"]),
    ("F", &["Final"]),
    ("P", &["Provisional"]),
    ("R", &["Rejected"]),
    ("S", &["Superseded"]),
    ("W", &["Withdrawn"]),
    ("", &["Draft", "Active"]),
];

/// Statuses accepted for `code`; unknown codes accept nothing
pub fn expected_statuses(code: &str) -> &'static [&'static str] {
    EXPECTED_STATUS
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, statuses)| *statuses)
        .unwrap_or(&[])
}

/// Whether `status` is one of the statuses accepted for `code`
pub fn is_expected(code: &str, status: &str) -> bool {
    expected_statuses(code).contains(&status)
}
