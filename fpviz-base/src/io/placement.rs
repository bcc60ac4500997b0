use std::sync::LazyLock;

use log::debug;
use regex::{Captures, Regex};

use crate::entities::{PlacementRecord, PlacementSet};
use crate::error::ParseError;

static WHITESPACE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]+)\s+([+-]?[0-9]+(?:\.[0-9]+)?)\s+([+-]?[0-9]+(?:\.[0-9]+)?)\s+([0-9]+)\s*$")
        .expect("valid placement regex")
});

static SEPARATOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]+)\s+([+-]?[0-9]+(?:\.[0-9]+)?)[ ,]\s*([+-]?[0-9]+(?:\.[0-9]+)?)\s+([0-9]+)")
        .expect("valid placement regex")
});

/// The line shapes recognized in a placement file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementGrammar {
    /// Exactly `ID X Y ROT`, nothing else on the line
    Whitespace,
    /// `ID X,Y ROT` or `ID X Y ROT` followed by anything
    Separator,
}

impl PlacementGrammar {
    /// All grammars, in the order they are tried. The first match wins.
    pub const ALL: [PlacementGrammar; 2] = [PlacementGrammar::Whitespace, PlacementGrammar::Separator];

    fn regex(&self) -> &'static Regex {
        match self {
            PlacementGrammar::Whitespace => &WHITESPACE_LINE,
            PlacementGrammar::Separator => &SEPARATOR_LINE,
        }
    }

    /// Parses `line` according to this grammar alone.
    pub fn parse_line(&self, line: &str) -> Option<PlacementRecord> {
        self.regex().captures(line).and_then(|caps| record_from_captures(&caps))
    }
}

/// Tries every [`PlacementGrammar`] in order on a single line.
pub fn parse_placement_line(line: &str) -> Option<(PlacementGrammar, PlacementRecord)> {
    PlacementGrammar::ALL
        .iter()
        .find_map(|grammar| grammar.parse_line(line).map(|record| (*grammar, record)))
}

/// Parses the text of a placement file. Blank and unrecognized lines are skipped,
/// the remaining records keep their order of appearance.
pub fn parse_placements(content: &str) -> Result<PlacementSet, ParseError> {
    let mut n_skipped = 0;
    let records = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .filter_map(|(idx, line)| match parse_placement_line(line) {
            Some((_, record)) => Some(record),
            None => {
                debug!("[PARSE] skipping unrecognized placement line {}: {line:?}", idx + 1);
                n_skipped += 1;
                None
            }
        })
        .collect();

    let placements = PlacementSet::try_new(records)?;
    debug!(
        "[PARSE] {} placements parsed, {n_skipped} lines skipped",
        placements.len()
    );
    Ok(placements)
}

fn record_from_captures(caps: &Captures) -> Option<PlacementRecord> {
    Some(PlacementRecord::new(
        caps[1].parse().ok()?,
        truncate_coordinate(&caps[2])?,
        truncate_coordinate(&caps[3])?,
        caps[4].parse().ok()?,
    ))
}

/// Keeps the integer part of a (possibly signed, possibly decimal) coordinate, `"-3.7"` becomes `-3`.
fn truncate_coordinate(text: &str) -> Option<i64> {
    let integral = text.split('.').next()?;
    integral.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("0 0 0 0", PlacementGrammar::Whitespace, PlacementRecord::new(0, 0, 0, 0); "plain")]
    #[test_case("  12\t-4\t+8\t1  ", PlacementGrammar::Whitespace, PlacementRecord::new(12, -4, 8, 1); "signed and tabbed")]
    #[test_case("3 10.9 -0.5 0", PlacementGrammar::Whitespace, PlacementRecord::new(3, 10, 0, 0); "decimals truncate")]
    #[test_case("5 10,20 1", PlacementGrammar::Separator, PlacementRecord::new(5, 10, 20, 1); "comma")]
    #[test_case("5 10, 20 1", PlacementGrammar::Separator, PlacementRecord::new(5, 10, 20, 1); "comma and space")]
    #[test_case("6 1 2 0 # moved", PlacementGrammar::Separator, PlacementRecord::new(6, 1, 2, 0); "trailing comment")]
    fn recognized_lines(line: &str, grammar: PlacementGrammar, record: PlacementRecord) {
        assert_eq!(parse_placement_line(line), Some((grammar, record)));
    }

    #[test_case("# id x y rot"; "comment")]
    #[test_case("1 2 3"; "missing field")]
    #[test_case("-1 2 3 0"; "negative id")]
    #[test_case("1 2 3 -1"; "negative rotation")]
    #[test_case("a 2 3 0"; "non numeric id")]
    #[test_case("1 2 , 3 0"; "detached comma")]
    fn unrecognized_lines(line: &str) {
        assert_eq!(parse_placement_line(line), None);
    }

    #[test]
    fn order_is_preserved() {
        let content = "2 0 0 0\n\n# comment\n0 5,5 1\nbogus\n1 9 9 0\n";
        let placements = parse_placements(content).unwrap();
        let ids: Vec<_> = placements.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 0, 1]);
    }

    #[test]
    fn only_comments_fails() {
        let content = "# placement\n// nothing here\n\n   \n";
        assert_eq!(parse_placements(content), Err(ParseError::NoPlacements));
    }

    #[test]
    fn empty_file_fails() {
        assert_eq!(parse_placements(""), Err(ParseError::NoPlacements));
    }
}
