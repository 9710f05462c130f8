/// Depth configuration: one depth level per segment.
///
/// This is the search-state key. Equality, hashing and ordering are all
/// structural, so a `Depths` can be used directly as a map key and two
/// configurations built along different paths collapse to one entry.

use std::fmt;
use std::ops::Index;

use smallvec::SmallVec;

/// Maximum depth a segment can be pulled out to under the standard rules.
pub const DEFAULT_MAX_DEPTH: u8 = 3;

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct Depths(SmallVec<[u8; 16]>);

impl Depths {
    /// Every segment flush with the wall.
    pub fn zeros(segments: usize) -> Self {
        Depths(SmallVec::from_elem(0, segments))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// Copy of `self` with one segment moved to `depth`.
    pub fn with(&self, segment: usize, depth: u8) -> Depths {
        let mut next = self.clone();
        next.0[segment] = depth;
        next
    }

    /// Deepest segment, 0 for an empty configuration.
    pub fn deepest(&self) -> u8 {
        self.iter().max().unwrap_or(0)
    }
}

impl Index<usize> for Depths {
    type Output = u8;

    fn index(&self, segment: usize) -> &u8 {
        &self.0[segment]
    }
}

impl From<Vec<u8>> for Depths {
    fn from(v: Vec<u8>) -> Self {
        Depths(SmallVec::from_vec(v))
    }
}

impl From<&[u8]> for Depths {
    fn from(v: &[u8]) -> Self {
        Depths(SmallVec::from_slice(v))
    }
}

impl FromIterator<u8> for Depths {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Depths(iter.into_iter().collect())
    }
}

impl fmt::Display for Depths {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn zeros_has_one_entry_per_segment() {
        let d = Depths::zeros(5);
        assert_eq!(d.len(), 5);
        assert!(d.iter().all(|z| z == 0));
        assert!(Depths::zeros(0).is_empty());
    }

    #[test]
    fn with_replaces_exactly_one_segment() {
        let d = Depths::from(vec![0, 1, 2]);
        let e = d.with(1, 3);
        assert_eq!(e.as_slice(), &[0, 3, 2]);
        assert_eq!(d.as_slice(), &[0, 1, 2]); // source untouched
    }

    #[test]
    fn structural_equality_and_hash() {
        let a = Depths::from(vec![1, 0, 2]);
        let b = Depths::zeros(3).with(0, 1).with(2, 2);
        assert_eq!(a, b);

        let mut set = FxHashSet::default();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(!set.contains(&Depths::zeros(3)));
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = Depths::from(vec![0, 3]);
        let b = Depths::from(vec![1, 0]);
        assert!(a < b);
    }

    #[test]
    fn display() {
        assert_eq!(Depths::from(vec![0, 2, 3]).to_string(), "[0 2 3]");
        assert_eq!(Depths::zeros(0).to_string(), "[]");
    }

    #[test]
    fn deepest() {
        assert_eq!(Depths::from(vec![0, 2, 1]).deepest(), 2);
        assert_eq!(Depths::zeros(0).deepest(), 0);
    }
}
