use crate::entities::ModuleId;
use crate::error::ParseError;

/// Position and orientation assigned to one module in design space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementRecord {
    /// May reference a module that is missing from the size catalog
    pub id: ModuleId,
    /// Lower-left corner, truncated to whole design units
    pub x: i64,
    pub y: i64,
    /// Raw rotation flag as written in the file, only zero vs. nonzero is meaningful
    pub rotation: u32,
}

impl PlacementRecord {
    pub fn new(id: ModuleId, x: i64, y: i64, rotation: u32) -> Self {
        Self { id, x, y, rotation }
    }

    pub fn is_rotated(&self) -> bool {
        self.rotation != 0
    }
}

/// Non-empty sequence of placements, in file order.
/// The order doubles as the draw order: later records end up on top.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementSet {
    records: Vec<PlacementRecord>,
}

impl PlacementSet {
    pub fn try_new(records: Vec<PlacementRecord>) -> Result<Self, ParseError> {
        match records.is_empty() {
            true => Err(ParseError::NoPlacements),
            false => Ok(Self { records }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacementRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl<'a> IntoIterator for &'a PlacementSet {
    type Item = &'a PlacementRecord;
    type IntoIter = std::slice::Iter<'a, PlacementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(PlacementSet::try_new(vec![]), Err(ParseError::NoPlacements));
    }

    #[test]
    fn any_nonzero_flag_rotates() {
        assert!(!PlacementRecord::new(0, 0, 0, 0).is_rotated());
        assert!(PlacementRecord::new(0, 0, 0, 1).is_rotated());
        assert!(PlacementRecord::new(0, 0, 0, 3).is_rotated());
    }
}
