//! Section decoder: builds a [`SectionTable`] from RSM text.
//!
//! The decoder is a two-state machine repeated across the whole file. Between
//! sections it awaits a `name count` header; inside a section it collects
//! exactly `count` integer records. The state is an explicit enum passed and
//! returned by value each step, so every transition is directly testable.

use crate::error::RsmError;
use crate::lexer::{Lexer, TokenLine};
use rsm_model::{Record, Section, SectionTable};

/// What to do when a file declares the same section name twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The later occurrence replaces the earlier one's records, keeping its
    /// original position. Existing RSM files rely on this.
    Overwrite,
    /// Fail with [`RsmError::DuplicateSection`].
    Error,
}

/// Decoding policy knobs and defensive limits.
///
/// Record counts are author-controlled integers read directly from the file,
/// so the limits here bound memory use against adversarial input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Policy for repeated section names.
    pub duplicate_policy: DuplicatePolicy,
    /// Require every record in a section to match the arity of the section's
    /// first record, failing with [`RsmError::ArityMismatch`] at the exact
    /// line instead of later in the mesh builder. Off by default: sections
    /// with ragged arities are legal at the decoding layer.
    pub require_uniform_arity: bool,
    /// Maximum record count a single header may declare.
    pub max_declared_records: usize,
    /// Maximum record count summed across all sections.
    pub max_total_records: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Overwrite,
            require_uniform_arity: false,
            max_declared_records: 1_000_000,
            max_total_records: 4_000_000,
        }
    }
}

/// Decoder state between two consecutive token-lines.
#[derive(Debug)]
enum DecodeState {
    /// The next line is a section header.
    AwaitingHeader,
    /// Inside a section, collecting records.
    Collecting {
        name: String,
        expected: usize,
        remaining: usize,
        records: Vec<Record>,
    },
}

/// Decode RSM text into a [`SectionTable`] with default options.
pub fn decode(input: &str) -> Result<SectionTable, RsmError> {
    decode_with(input, &DecodeOptions::default())
}

/// Decode RSM text into a [`SectionTable`].
///
/// Pure and deterministic: the same text always yields the same table, and
/// no partial table escapes on failure. An empty input is a well-formed file
/// with no sections.
pub fn decode_with(input: &str, options: &DecodeOptions) -> Result<SectionTable, RsmError> {
    let mut table = SectionTable::new();
    let mut total_records = 0usize;
    let mut state = DecodeState::AwaitingHeader;

    for line in Lexer::new(input) {
        state = step(state, &line, &mut table, options, &mut total_records)?;
    }

    match state {
        DecodeState::AwaitingHeader => Ok(table),
        DecodeState::Collecting {
            name,
            expected,
            remaining,
            ..
        } => Err(RsmError::TruncatedSection {
            section: name,
            expected,
            missing: remaining,
        }),
    }
}

/// Advance the state machine by one token-line.
fn step(
    state: DecodeState,
    line: &TokenLine<'_>,
    table: &mut SectionTable,
    options: &DecodeOptions,
    total_records: &mut usize,
) -> Result<DecodeState, RsmError> {
    match state {
        DecodeState::AwaitingHeader => read_header(line, table, options, total_records),
        DecodeState::Collecting {
            name,
            expected,
            mut remaining,
            mut records,
        } => {
            let record = read_record(&name, line, &records, options)?;
            records.push(record);
            remaining -= 1;
            if remaining == 0 {
                table.insert(Section::new(name, records));
                Ok(DecodeState::AwaitingHeader)
            } else {
                Ok(DecodeState::Collecting {
                    name,
                    expected,
                    remaining,
                    records,
                })
            }
        }
    }
}

/// Interpret a token-line as a section header.
///
/// Token 0 is the section name, token 1 the declared record count; extra
/// tokens are tolerated (only the first two are read). A count of
/// zero commits an empty section immediately.
fn read_header(
    line: &TokenLine<'_>,
    table: &mut SectionTable,
    options: &DecodeOptions,
    total_records: &mut usize,
) -> Result<DecodeState, RsmError> {
    if line.tokens.is_empty() {
        return Err(RsmError::malformed_header(
            line.number,
            "blank line where a section header was expected",
        ));
    }
    if line.tokens.len() < 2 {
        return Err(RsmError::malformed_header(
            line.number,
            format!(
                "expected 'name count', got only '{}'",
                line.tokens[0]
            ),
        ));
    }

    let name = line.tokens[0];
    let count: usize = line.tokens[1].parse().map_err(|_| {
        RsmError::malformed_header(
            line.number,
            format!(
                "record count '{}' is not a non-negative integer",
                line.tokens[1]
            ),
        )
    })?;

    if options.duplicate_policy == DuplicatePolicy::Error && table.contains(name) {
        return Err(RsmError::DuplicateSection {
            section: name.to_string(),
            line: line.number,
        });
    }
    if count > options.max_declared_records {
        return Err(RsmError::limit_exceeded(
            format!("declared record count of section '{name}'"),
            count,
            options.max_declared_records,
        ));
    }
    *total_records += count;
    if *total_records > options.max_total_records {
        return Err(RsmError::limit_exceeded(
            "total record count",
            *total_records,
            options.max_total_records,
        ));
    }

    if count == 0 {
        table.insert(Section::new(name, Vec::new()));
        return Ok(DecodeState::AwaitingHeader);
    }

    Ok(DecodeState::Collecting {
        name: name.to_string(),
        expected: count,
        remaining: count,
        records: Vec::with_capacity(count),
    })
}

/// Interpret a token-line as a record of the section being collected.
fn read_record(
    section: &str,
    line: &TokenLine<'_>,
    collected: &[Record],
    options: &DecodeOptions,
) -> Result<Record, RsmError> {
    if line.tokens.is_empty() {
        return Err(RsmError::malformed_record(
            section,
            line.number,
            "blank line inside a section",
        ));
    }

    let mut record = Record::with_capacity(line.tokens.len());
    for token in &line.tokens {
        let value: i64 = token.parse().map_err(|_| {
            RsmError::malformed_record(
                section,
                line.number,
                format!("'{token}' is not an integer"),
            )
        })?;
        record.push(value);
    }

    if options.require_uniform_arity {
        if let Some(first) = collected.first() {
            if record.len() != first.len() {
                return Err(RsmError::ArityMismatch {
                    section: section.to_string(),
                    line: line.number,
                    expected: first.len(),
                    actual: record.len(),
                });
            }
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
vertices 3
1 0 0 0
2 1 0 0
3 0 1 0
faces 1
1 2 0 1 2
";

    #[test]
    fn test_decode_well_formed() {
        let table = decode(WELL_FORMED).unwrap();
        assert_eq!(table.len(), 2);

        let vertices = table.get("vertices").unwrap();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices.records[0], vec![1, 0, 0, 0]);
        assert_eq!(vertices.records[2], vec![3, 0, 1, 0]);

        let faces = table.get("faces").unwrap();
        assert_eq!(faces.records, vec![vec![1, 2, 0, 1, 2]]);
    }

    #[test]
    fn test_decode_is_pure() {
        assert_eq!(decode(WELL_FORMED).unwrap(), decode(WELL_FORMED).unwrap());
    }

    #[test]
    fn test_declared_count_always_matches() {
        let table = decode(WELL_FORMED).unwrap();
        for section in table.iter() {
            match section.name.as_str() {
                "vertices" => assert_eq!(section.len(), 3),
                "faces" => assert_eq!(section.len(), 1),
                other => panic!("unexpected section {other}"),
            }
        }
    }

    #[test]
    fn test_empty_input_is_empty_table() {
        let table = decode("").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_zero_count_section() {
        let table = decode("bones 0\nvertices 1\n1 0 0 0\n").unwrap();
        assert!(table.get("bones").unwrap().is_empty());
        assert_eq!(table.get("vertices").unwrap().len(), 1);
    }

    #[test]
    fn test_truncated_section() {
        let input = "vertices 3\n1 0 0 0\n2 1 0 0\n";
        let err = decode(input).unwrap_err();
        match err {
            RsmError::TruncatedSection {
                section,
                expected,
                missing,
            } => {
                assert_eq!(section, "vertices");
                assert_eq!(expected, 3);
                assert_eq!(missing, 1);
            }
            other => panic!("expected TruncatedSection, got {other:?}"),
        }
    }

    #[test]
    fn test_header_count_not_an_integer() {
        let err = decode("vertices abc\n").unwrap_err();
        assert!(matches!(err, RsmError::MalformedHeader { line: 1, .. }));
    }

    #[test]
    fn test_header_count_negative() {
        let err = decode("vertices -2\n").unwrap_err();
        assert!(matches!(err, RsmError::MalformedHeader { .. }));
    }

    #[test]
    fn test_header_too_few_tokens() {
        let err = decode("vertices\n").unwrap_err();
        assert!(matches!(err, RsmError::MalformedHeader { .. }));
    }

    #[test]
    fn test_header_extra_tokens_tolerated() {
        let table = decode("vertices 1 trailing junk\n1 0 0 0\n").unwrap();
        assert_eq!(table.get("vertices").unwrap().len(), 1);
    }

    #[test]
    fn test_blank_line_between_sections_is_fatal() {
        let err = decode("vertices 1\n1 0 0 0\n\nfaces 0\n").unwrap_err();
        assert!(matches!(err, RsmError::MalformedHeader { line: 3, .. }));
    }

    #[test]
    fn test_blank_line_inside_section_is_fatal() {
        let err = decode("vertices 2\n1 0 0 0\n\n").unwrap_err();
        assert!(matches!(err, RsmError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn test_non_integer_record_token() {
        let err = decode("vertices 1\n1 0 x 0\n").unwrap_err();
        match err {
            RsmError::MalformedRecord { section, line, message } => {
                assert_eq!(section, "vertices");
                assert_eq!(line, 2);
                assert!(message.contains("'x'"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_record_values_parse() {
        let table = decode("vertices 1\n7 -12 0 34\n").unwrap();
        assert_eq!(table.get("vertices").unwrap().records[0], vec![7, -12, 0, 34]);
    }

    #[test]
    fn test_duplicate_section_overwrites_by_default() {
        let input = "vertices 1\n1 0 0 0\nfaces 0\nvertices 2\n2 1 1 1\n3 2 2 2\n";
        let table = decode(input).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("vertices").unwrap().len(), 2);

        // The replaced section keeps its original position.
        let order: Vec<_> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(order, vec!["vertices", "faces"]);
    }

    #[test]
    fn test_duplicate_section_error_policy() {
        let options = DecodeOptions {
            duplicate_policy: DuplicatePolicy::Error,
            ..Default::default()
        };
        let input = "vertices 1\n1 0 0 0\nvertices 1\n2 1 1 1\n";
        let err = decode_with(input, &options).unwrap_err();
        match err {
            RsmError::DuplicateSection { section, line } => {
                assert_eq!(section, "vertices");
                assert_eq!(line, 3);
            }
            other => panic!("expected DuplicateSection, got {other:?}"),
        }
    }

    #[test]
    fn test_ragged_records_accepted_by_default() {
        let table = decode("vertices 2\n1 0 0 0\n2 1\n").unwrap();
        assert_eq!(table.get("vertices").unwrap().records[1], vec![2, 1]);
    }

    #[test]
    fn test_uniform_arity_check() {
        let options = DecodeOptions {
            require_uniform_arity: true,
            ..Default::default()
        };
        let err = decode_with("vertices 2\n1 0 0 0\n2 1\n", &options).unwrap_err();
        match err {
            RsmError::ArityMismatch {
                section,
                line,
                expected,
                actual,
            } => {
                assert_eq!(section, "vertices");
                assert_eq!(line, 3);
                assert_eq!(expected, 4);
                assert_eq!(actual, 2);
            }
            other => panic!("expected ArityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_declared_count_limit() {
        let options = DecodeOptions {
            max_declared_records: 10,
            ..Default::default()
        };
        let err = decode_with("vertices 4000000000\n", &options).unwrap_err();
        assert!(matches!(err, RsmError::LimitExceeded { .. }));
    }

    #[test]
    fn test_total_record_limit() {
        let options = DecodeOptions {
            max_declared_records: 3,
            max_total_records: 4,
            ..Default::default()
        };
        let input = "a 3\n1\n2\n3\nb 2\n4\n5\n";
        let err = decode_with(input, &options).unwrap_err();
        assert!(matches!(err, RsmError::LimitExceeded { .. }));
    }
}
