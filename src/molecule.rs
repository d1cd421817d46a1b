use std::ops::Index;

use crate::atom::Atom;
use crate::bond::Bond;
use crate::error::Error;
use crate::property::Properties;

/// A molecular graph: an append-only list of atoms and an append-only list
/// of bonds referencing atoms by their position in the atom list.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Molecule {
    /// Atoms in the molecule, in insertion order
    pub atoms: Vec<Atom>,
    /// Bonds in the molecule, in insertion order
    pub bonds: Vec<Bond>,
    /// Molecule-level metadata
    pub properties: Properties,
}

impl Molecule {
    pub fn new() -> Self {
        Molecule::default()
    }

    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    /// Append `atom` and return its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Append `bond` and return its index.
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is not a valid atom index.
    pub fn add_bond(&mut self, bond: Bond) -> Result<usize, Error> {
        let amount_atoms = self.size();
        let [i, j] = bond.atoms;
        if i >= amount_atoms || j >= amount_atoms {
            return Err(Error::GenericError(format!(
                "out of bounds atomic index. We have {amount_atoms} atoms, but the bond indices are {i} and {j}"
            )));
        }

        self.bonds.push(bond);
        Ok(self.bonds.len() - 1)
    }

    /// Indices of the atoms bonded to `atom_index`, by linear scan over the
    /// bond list.
    pub fn neighbors(&self, atom_index: usize) -> Vec<usize> {
        self.bonds
            .iter()
            .filter_map(|bond| bond.partner(atom_index))
            .collect()
    }

    /// Bonds touching `atom_index`.
    pub fn bonds_for_atom(&self, atom_index: usize) -> impl Iterator<Item = &Bond> + '_ {
        self.bonds.iter().filter(move |bond| bond.contains(atom_index))
    }

    /// The bond connecting `a` and `b`, if any.
    pub fn bond_between(&self, a: usize, b: usize) -> Option<&Bond> {
        if a == b {
            return None;
        }
        self.bonds
            .iter()
            .find(|bond| bond.contains(a) && bond.contains(b))
    }

    /// Adjacency list pairing every neighbor with the index of the
    /// connecting bond, rebuilt on every call.
    pub fn adjacency(&self) -> Vec<Vec<(usize, usize)>> {
        let mut adjacency = vec![Vec::new(); self.size()];
        for (bond_index, bond) in self.bonds.iter().enumerate() {
            let [a, b] = bond.atoms;
            adjacency[a].push((b, bond_index));
            adjacency[b].push((a, bond_index));
        }
        adjacency
    }
}

impl Index<usize> for Molecule {
    type Output = Atom;

    fn index(&self, index: usize) -> &Self::Output {
        &self.atoms[index]
    }
}
