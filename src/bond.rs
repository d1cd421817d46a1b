use std::ops::Index;

use crate::error::Error;
use crate::property::Properties;

/// Tolerance used when matching a bond order against the conventional
/// 1.5/2.0/3.0 values.
pub(crate) const ORDER_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    /// Indices of the two bonded atoms, stored with the smaller index first
    pub atoms: [usize; 2],
    /// Bond order: 1.0 single, 2.0 double, 3.0 triple, 1.5 aromatic
    pub order: f64,
    /// Aromatic flag, carried independently of the order value
    pub aromatic: bool,
    /// Optional stereochemistry descriptor
    pub stereochemistry: Option<String>,
    /// Foreign metadata preserved during IO round-trips
    pub properties: Properties,
}

impl Bond {
    /// Create a single bond between `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i == j`.
    pub fn new(i: usize, j: usize) -> Self {
        if i == j {
            panic!("can not have a bond between an atom and itself");
        }
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        Bond {
            atoms: [a, b],
            order: 1.0,
            aromatic: false,
            stereochemistry: None,
            properties: Properties::new(),
        }
    }

    /// Create a bond between `i` and `j` with the given order.
    ///
    /// # Panics
    ///
    /// Panics if `i == j`.
    pub fn with_order(i: usize, j: usize, order: f64) -> Self {
        Bond {
            order,
            ..Bond::new(i, j)
        }
    }

    pub fn contains(&self, atom_index: usize) -> bool {
        self.atoms[0] == atom_index || self.atoms[1] == atom_index
    }

    pub(crate) fn partner(&self, atom_index: usize) -> Option<usize> {
        if self.atoms[0] == atom_index {
            Some(self.atoms[1])
        } else if self.atoms[1] == atom_index {
            Some(self.atoms[0])
        } else {
            None
        }
    }

    /// Index of the atom on the opposite end of the bond.
    ///
    /// # Errors
    ///
    /// Returns an error if `atom_index` is not one of the bond's endpoints.
    pub fn other(&self, atom_index: usize) -> Result<usize, Error> {
        self.partner(atom_index).ok_or(Error::AtomNotInBond {
            atom_index,
            atoms: self.atoms,
        })
    }
}

impl Index<usize> for Bond {
    type Output = usize;

    /// Access one of the two atom indices in the bond.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 2`.
    fn index(&self, index: usize) -> &Self::Output {
        if index >= 2 {
            panic!("can not access atom n° {} in bond", index);
        }
        &self.atoms[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_endpoint() {
        let bond = Bond::new(2, 5);
        assert_eq!(bond.other(2).unwrap(), 5);
        assert_eq!(bond.other(5).unwrap(), 2);

        let err = bond.other(3).unwrap_err();
        match err {
            Error::AtomNotInBond { atom_index, atoms } => {
                assert_eq!(atom_index, 3);
                assert_eq!(atoms, [2, 5]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn endpoints_are_sorted() {
        let bond = Bond::new(7, 1);
        assert_eq!(bond.atoms, [1, 7]);
        assert_eq!(bond[0], 1);
        assert_eq!(bond[1], 7);
    }

    #[test]
    #[should_panic(expected = "between an atom and itself")]
    fn self_bond_panics() {
        let _ = Bond::new(3, 3);
    }

    #[test]
    #[should_panic(expected = "can not access atom")]
    fn out_of_range_index_panics() {
        let bond = Bond::new(0, 1);
        let _ = bond[2];
    }
}
