use std::sync::LazyLock;

use itertools::Itertools;
use log::{debug, warn};
use regex::Regex;

use crate::entities::{ModuleSize, SizeCatalog};
use crate::error::ParseError;

/// Matches the `MODULE_SIZE <n>` declaration at the start of a line.
static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*MODULE_SIZE\s+([0-9]+)").expect("valid header regex"));

/// Number of lines between the header and the first data line (one structural gap line).
const DATA_OFFSET: usize = 2;

/// Parses the text of a size catalog.
///
/// The catalog starts with a `MODULE_SIZE <n>` declaration. Data begins [`DATA_OFFSET`] lines later,
/// after which the first `n` lines of the form `ID WIDTH HEIGHT [...]` are read.
/// Lines that do not parse are skipped and do not count towards `n`.
pub fn parse_size_catalog(content: &str) -> Result<SizeCatalog, ParseError> {
    let (header_idx, count) = content
        .lines()
        .enumerate()
        .find_map(|(idx, line)| HEADER.captures(line).map(|caps| (idx, caps[1].to_string())))
        .ok_or(ParseError::SizeDeclarationMissing)?;

    let expected: usize = count.parse().map_err(|_| ParseError::ModuleCountOutOfRange {
        line: header_idx + 1,
        value: count,
    })?;

    debug!("[PARSE] size declaration on line {}: {expected} modules", header_idx + 1);

    let mut catalog = SizeCatalog::default();
    let mut found = 0;

    let sizes = content
        .lines()
        .skip(header_idx + DATA_OFFSET)
        .filter_map(parse_size_line)
        .take(expected);

    for size in sizes {
        if let Some(replaced) = catalog.insert(size) {
            warn!(
                "[PARSE] module {} declared more than once, {}x{} replaced by {}x{}",
                size.id, replaced.width, replaced.height, size.width, size.height
            );
        }
        found += 1;
    }

    match found == expected {
        true => Ok(catalog),
        false => Err(ParseError::ModuleCountMismatch { found, expected }),
    }
}

/// Strict parser for a single data line, `None` for anything that is not `ID WIDTH HEIGHT [...]`.
fn parse_size_line(line: &str) -> Option<ModuleSize> {
    let (id, width, height) = line
        .trim()
        .split([' ', '\t'])
        .filter(|token| !token.is_empty())
        .next_tuple()?;

    Some(ModuleSize::new(
        id.parse().ok()?,
        width.parse().ok()?,
        height.parse().ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn parses_declared_modules() {
        let content = "MODULE_SIZE 2\n\n0 10 20\n1 5 5\n";
        let catalog = parse_size_catalog(content).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0), Some(&ModuleSize::new(0, 10, 20)));
        assert_eq!(catalog.get(1), Some(&ModuleSize::new(1, 5, 5)));
    }

    #[test]
    fn header_may_follow_other_lines() {
        let content = "# generated\nOUTLINE 100 100\n  MODULE_SIZE 1 extra\n-----\n7 3 4 ignored tokens\n";
        let catalog = parse_size_catalog(content).unwrap();
        assert_eq!(catalog.iter().collect_vec(), vec![&ModuleSize::new(7, 3, 4)]);
    }

    #[test]
    fn gap_line_is_never_read_as_data() {
        let content = "MODULE_SIZE 1\n9 9 9\n2 6 8\n";
        let catalog = parse_size_catalog(content).unwrap();
        assert!(!catalog.contains(9));
        assert_eq!(catalog.get(2), Some(&ModuleSize::new(2, 6, 8)));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let content = "MODULE_SIZE 2\n\n\n0 10\nfoo bar baz\n0 10 20\n\t\n1\t5\t5\n3 1 1\n";
        let catalog = parse_size_catalog(content).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(0));
        assert!(catalog.contains(1));
        assert!(!catalog.contains(3), "reading stops once the declared count is reached");
    }

    #[test]
    fn missing_header_fails() {
        let content = "0 10 20\n1 5 5\n";
        assert_eq!(
            parse_size_catalog(content),
            Err(ParseError::SizeDeclarationMissing)
        );
    }

    #[test_case("MODULE_SIZE 3\n\n0 1 1\n1 2 2\n", 2, 3; "file ends early")]
    #[test_case("MODULE_SIZE 2\n\n0 1 1\nx y z\n", 1, 2; "trailing garbage")]
    #[test_case("MODULE_SIZE 1\n", 0, 1; "no data at all")]
    fn short_catalog_fails(content: &str, found: usize, expected: usize) {
        assert_eq!(
            parse_size_catalog(content),
            Err(ParseError::ModuleCountMismatch { found, expected })
        );
    }

    #[test]
    fn oversized_count_is_reported_not_skipped() {
        let content = "MODULE_SIZE 99999999999999999999\n\nMODULE_SIZE 1\n\n0 1 1\n";
        assert_eq!(
            parse_size_catalog(content),
            Err(ParseError::ModuleCountOutOfRange {
                line: 1,
                value: "99999999999999999999".to_string()
            })
        );
    }

    #[test]
    fn negative_ids_count_towards_declared_total() {
        let content = "MODULE_SIZE 2\n\n-1 10 20\n1 5 5\n";
        let catalog = parse_size_catalog(content).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(-1), Some(&ModuleSize::new(-1, 10, 20)));
    }

    #[test]
    fn zero_declared_modules_is_empty_catalog() {
        let catalog = parse_size_catalog("MODULE_SIZE 0\n").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn duplicate_id_counts_but_replaces() {
        let content = "MODULE_SIZE 2\n\n4 1 1\n4 2 3\n";
        let catalog = parse_size_catalog(content).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(4), Some(&ModuleSize::new(4, 2, 3)));
    }
}
