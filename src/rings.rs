use std::collections::BTreeSet;

use crate::bond::ORDER_TOLERANCE;
use crate::molecule::Molecule;

/// Largest cycle, in atoms, the search will close. Larger aromatic systems
/// are not detected.
const MAX_CYCLE_ATOMS: usize = 10;

/// Find every elementary cycle made entirely of aromatic bonds and flag the
/// atoms on them.
///
/// A bond counts as aromatic here when it carries the aromatic flag, when
/// its order is within tolerance of 1.5, or when its order is exactly 2.0.
/// Qualifying cycles set the aromatic flag on each member atom; flags that
/// are already set are left alone, so reruns return the same cycles and
/// leave the same flags.
pub fn detect_aromatic_rings(molecule: &mut Molecule) -> Vec<Vec<usize>> {
    let mut aromatic_cycles = Vec::new();
    for cycle in find_cycles(molecule, MAX_CYCLE_ATOMS) {
        if !is_aromatic_cycle(molecule, &cycle) {
            continue;
        }
        for &atom_index in &cycle {
            let atom = &mut molecule.atoms[atom_index];
            if !atom.aromatic {
                atom.aromatic = true;
            }
        }
        aromatic_cycles.push(cycle);
    }
    aromatic_cycles
}

fn is_aromatic_cycle(molecule: &Molecule, cycle: &[usize]) -> bool {
    for i in 0..cycle.len() {
        let a = cycle[i];
        let b = cycle[(i + 1) % cycle.len()];
        let Some(bond) = molecule.bond_between(a, b) else {
            return false;
        };
        if !(bond.aromatic || (bond.order - 1.5).abs() < ORDER_TOLERANCE || bond.order == 2.0) {
            return false;
        }
    }
    true
}

/// Enumerate elementary cycles of at least 3 and at most `max_atoms` atoms.
///
/// Cycles are deduplicated by their member set; each returned cycle keeps
/// the atom order of its first discovery.
fn find_cycles(molecule: &Molecule, max_atoms: usize) -> Vec<Vec<usize>> {
    let adjacency = molecule.adjacency();
    let mut seen: BTreeSet<Vec<usize>> = BTreeSet::new();
    let mut cycles: Vec<Vec<usize>> = Vec::new();
    let mut used_bonds = vec![false; molecule.bonds.len()];

    for start in 0..molecule.size() {
        let mut path = vec![start];
        extend_path(
            &adjacency,
            start,
            start,
            &mut path,
            &mut used_bonds,
            max_atoms,
            &mut seen,
            &mut cycles,
        );
    }
    cycles
}

#[allow(clippy::too_many_arguments)]
fn extend_path(
    adjacency: &[Vec<(usize, usize)>],
    start: usize,
    current: usize,
    path: &mut Vec<usize>,
    used_bonds: &mut [bool],
    max_atoms: usize,
    seen: &mut BTreeSet<Vec<usize>>,
    cycles: &mut Vec<Vec<usize>>,
) {
    for &(neighbor, bond_index) in &adjacency[current] {
        if used_bonds[bond_index] {
            continue;
        }
        if neighbor == start && path.len() >= 3 {
            let mut members = path.clone();
            members.sort_unstable();
            if seen.insert(members) {
                cycles.push(path.clone());
            }
            continue;
        }
        if path.contains(&neighbor) {
            continue;
        }
        if path.len() >= max_atoms {
            continue;
        }
        used_bonds[bond_index] = true;
        path.push(neighbor);
        extend_path(
            adjacency, start, neighbor, path, used_bonds, max_atoms, seen, cycles,
        );
        path.pop();
        used_bonds[bond_index] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::Bond;
    use crate::formats::smiles;

    fn carbon_ring(size: usize, order: f64, aromatic: bool) -> Molecule {
        let mut molecule = Molecule::new();
        let atoms: Vec<usize> = (0..size)
            .map(|_| molecule.add_atom(Atom::new("C".to_string())))
            .collect();
        for i in 0..size {
            let bond = Bond {
                order,
                aromatic,
                ..Bond::new(atoms[i], atoms[(i + 1) % size])
            };
            molecule.add_bond(bond).unwrap();
        }
        molecule
    }

    #[test]
    fn benzene_from_flags() {
        let mut molecule = carbon_ring(6, 1.5, true);
        let rings = detect_aromatic_rings(&mut molecule);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 6);
        assert!(molecule.atoms.iter().all(|atom| atom.aromatic));
    }

    #[test]
    fn order_alone_is_enough_for_a_macrocycle() {
        // 10-membered ring of order-1.5 bonds with the aromatic flag left
        // false: the order test alone classifies it.
        let mut molecule = carbon_ring(10, 1.5, false);
        let rings = detect_aromatic_rings(&mut molecule);
        assert_eq!(rings, vec![(0..10).collect::<Vec<usize>>()]);
        assert!(molecule.atoms.iter().all(|atom| atom.aromatic));
    }

    #[test]
    fn plain_single_bond_ring_is_not_aromatic() {
        let mut molecule = carbon_ring(6, 1.0, false);
        let rings = detect_aromatic_rings(&mut molecule);
        assert!(rings.is_empty());
        assert!(molecule.atoms.iter().all(|atom| !atom.aromatic));
    }

    #[test]
    fn kekulized_ring_is_not_aromatic() {
        // Alternating double/single bonds: the single bonds fail the test.
        let mut molecule = smiles::parse("C1=CC=CC=C1").unwrap();
        let rings = detect_aromatic_rings(&mut molecule);
        assert!(rings.is_empty());
    }

    #[test]
    fn acyclic_molecule_has_no_cycles() {
        let mut molecule = smiles::parse("CCO").unwrap();
        assert!(find_cycles(&molecule, MAX_CYCLE_ATOMS).is_empty());
        assert!(detect_aromatic_rings(&mut molecule).is_empty());
    }

    #[test]
    fn empty_molecule() {
        let mut molecule = Molecule::new();
        assert!(detect_aromatic_rings(&mut molecule).is_empty());
    }

    #[test]
    fn cycles_deduplicate_by_member_set() {
        let molecule = carbon_ring(6, 1.0, false);
        let cycles = find_cycles(&molecule, MAX_CYCLE_ATOMS);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 6);
    }

    #[test]
    fn oversized_cycles_are_skipped() {
        let molecule = carbon_ring(11, 1.5, true);
        assert!(find_cycles(&molecule, MAX_CYCLE_ATOMS).is_empty());
    }

    #[test]
    fn fused_rings_are_both_found() {
        let molecule = smiles::parse("C1CC2CCC1CC2").unwrap();
        let cycles = find_cycles(&molecule, MAX_CYCLE_ATOMS);
        // Bridged bicyclooctane: three distinct six-membered elementary
        // cycles, each pair sharing a bridge.
        assert_eq!(cycles.len(), 3);
        assert!(cycles.iter().all(|cycle| cycle.len() == 6));
    }

    #[test]
    fn classifier_is_idempotent() {
        let mut molecule = smiles::parse("c1ccccc1").unwrap();
        let first = detect_aromatic_rings(&mut molecule);
        let flags: Vec<bool> = molecule.atoms.iter().map(|atom| atom.aromatic).collect();

        let second = detect_aromatic_rings(&mut molecule);
        assert_eq!(first, second);
        let flags_after: Vec<bool> = molecule.atoms.iter().map(|atom| atom.aromatic).collect();
        assert_eq!(flags, flags_after);
    }
}
