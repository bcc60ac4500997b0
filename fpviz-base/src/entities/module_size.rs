use std::collections::BTreeMap;

/// Identifier of a module, shared between the size catalog and the placement file.
/// Signed, since the size catalog accepts any integer id.
pub type ModuleId = i64;

/// Dimensions of a single module in design-space units, independent of where it is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModuleSize {
    pub id: ModuleId,
    pub width: i64,
    pub height: i64,
}

impl ModuleSize {
    pub fn new(id: ModuleId, width: i64, height: i64) -> Self {
        Self { id, width, height }
    }

    /// Returns `(width, height)` after applying the rotation flag.
    /// Any nonzero flag is a single 90° turn, which swaps the two dimensions.
    pub fn oriented(&self, rotated: bool) -> (i64, i64) {
        match rotated {
            false => (self.width, self.height),
            true => (self.height, self.width),
        }
    }
}

/// All module sizes declared in a size catalog, keyed by [`ModuleId`].
/// Never modified once parsing finishes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SizeCatalog {
    sizes: BTreeMap<ModuleId, ModuleSize>,
}

impl SizeCatalog {
    /// Registers a module size. Returns the entry it replaced, if the id was already present.
    pub(crate) fn insert(&mut self, size: ModuleSize) -> Option<ModuleSize> {
        self.sizes.insert(size.id, size)
    }

    pub fn get(&self, id: ModuleId) -> Option<&ModuleSize> {
        self.sizes.get(&id)
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.sizes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Iterates over the sizes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleSize> {
        self.sizes.values()
    }
}

impl FromIterator<ModuleSize> for SizeCatalog {
    fn from_iter<I: IntoIterator<Item = ModuleSize>>(iter: I) -> Self {
        let mut catalog = SizeCatalog::default();
        iter.into_iter().for_each(|size| {
            catalog.insert(size);
        });
        catalog
    }
}
