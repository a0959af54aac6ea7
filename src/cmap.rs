//! A minimal CMap handle.
//!
//! CMap parsing itself (bfchar/bfrange/codespacerange) is a `FontRegistry`
//! concern out of scope here (`spec.md` §1's Non-goals); this module only
//! carries the name → mapping lookup the interpreter needs to resolve `/Encoding`
//! on `Tf` and to report `CMapNotFound` in strict mode. Grounded on the
//! teacher's `core::cmap::CMap`, trimmed to a name handle plus an
//! "is this the identity/empty fallback" flag.

use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct CMap {
    pub name: String,
    mappings: FxHashMap<u16, char>,
}

impl CMap {
    pub fn new(name: impl Into<String>) -> Self {
        CMap {
            name: name.into(),
            mappings: FxHashMap::default(),
        }
    }

    /// The lenient-mode fallback used when a named CMap can't be found.
    pub fn empty() -> Self {
        CMap::new("Identity")
    }

    pub fn insert(&mut self, cid: u16, unicode: char) {
        self.mappings.insert(cid, unicode);
    }

    pub fn lookup(&self, cid: u16) -> Option<char> {
        self.mappings.get(&cid).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cmap_has_no_mappings() {
        let cmap = CMap::empty();
        assert!(cmap.is_empty());
        assert_eq!(cmap.lookup(0x41), None);
    }

    #[test]
    fn insert_and_lookup() {
        let mut cmap = CMap::new("Custom");
        cmap.insert(0x41, 'A');
        assert_eq!(cmap.lookup(0x41), Some('A'));
    }
}
