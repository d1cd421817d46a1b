use phf::phf_map;

use crate::error::Error;
use crate::molecule::Molecule;

/// Default valence of the elements the checker knows about. Atoms of other
/// elements are skipped.
static DEFAULT_VALENCE: phf::Map<&'static str, u32> = phf_map! {
    "H" => 1,
    "B" => 3,
    "C" => 4,
    "N" => 3,
    "O" => 2,
    "F" => 1,
    "P" => 5,
    "S" => 6,
    "Cl" => 1,
    "Br" => 1,
    "I" => 1,
};

/// Check that no atom's summed bond order exceeds its default valence plus
/// the magnitude of its formal charge.
///
/// # Errors
///
/// Returns [`Error::ValenceExceeded`] for the first offending atom.
pub fn check_valence(molecule: &Molecule) -> Result<(), Error> {
    for (atom_index, atom) in molecule.atoms.iter().enumerate() {
        let Some(&allowed) = DEFAULT_VALENCE.get(atom.symbol.as_str()) else {
            continue;
        };
        let total_order: f64 = molecule
            .bonds_for_atom(atom_index)
            .map(|bond| bond.order)
            .sum();
        let total = total_order.round() as u32;
        if total > allowed + atom.charge.unsigned_abs() {
            return Err(Error::ValenceExceeded {
                atom_index,
                symbol: atom.symbol.clone(),
                total,
                allowed,
            });
        }
    }
    Ok(())
}

/// Check that the formal charges sum to zero.
///
/// # Errors
///
/// Returns [`Error::ChargeImbalance`] with the net total otherwise.
pub fn check_charge_balance(molecule: &Molecule) -> Result<(), Error> {
    let total: i32 = molecule.atoms.iter().map(|atom| atom.charge).sum();
    if total != 0 {
        return Err(Error::ChargeImbalance { total });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Atom;
    use crate::bond::Bond;

    fn carbon_with_hydrogens(count: usize) -> Molecule {
        let mut molecule = Molecule::new();
        let carbon = molecule.add_atom(Atom::new("C".to_string()));
        for _ in 0..count {
            let hydrogen = molecule.add_atom(Atom::new("H".to_string()));
            molecule.add_bond(Bond::new(carbon, hydrogen)).unwrap();
        }
        molecule
    }

    #[test]
    fn methane_passes() {
        let molecule = carbon_with_hydrogens(4);
        assert!(check_valence(&molecule).is_ok());
    }

    #[test]
    fn five_bonds_exceed_carbon_valence() {
        let molecule = carbon_with_hydrogens(5);
        match check_valence(&molecule).unwrap_err() {
            Error::ValenceExceeded {
                atom_index,
                symbol,
                total,
                allowed,
            } => {
                assert_eq!(atom_index, 0);
                assert_eq!(symbol, "C");
                assert_eq!(total, 5);
                assert_eq!(allowed, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn charge_raises_the_allowance() {
        let mut molecule = carbon_with_hydrogens(5);
        molecule.atoms[0].charge = 1;
        assert!(check_valence(&molecule).is_ok());
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let mut molecule = Molecule::new();
        let xenon = molecule.add_atom(Atom::new("Xe".to_string()));
        for _ in 0..8 {
            let fluorine = molecule.add_atom(Atom::new("F".to_string()));
            molecule.add_bond(Bond::new(xenon, fluorine)).unwrap();
        }
        assert!(check_valence(&molecule).is_ok());
    }

    #[test]
    fn aromatic_orders_round_to_integers() {
        let mut molecule = Molecule::new();
        for _ in 0..6 {
            molecule.add_atom(Atom::new("C".to_string()));
        }
        for i in 0..6 {
            let bond = Bond {
                aromatic: true,
                ..Bond::with_order(i, (i + 1) % 6, 1.5)
            };
            molecule.add_bond(bond).unwrap();
        }
        // 1.5 + 1.5 rounds to 3, inside carbon's allowance.
        assert!(check_valence(&molecule).is_ok());
    }

    #[test]
    fn charge_balance() {
        let mut water = Molecule::new();
        let o = water.add_atom(Atom {
            charge: -2,
            ..Atom::new("O".to_string())
        });
        let h1 = water.add_atom(Atom {
            charge: 1,
            ..Atom::new("H".to_string())
        });
        let h2 = water.add_atom(Atom {
            charge: 1,
            ..Atom::new("H".to_string())
        });
        water.add_bond(Bond::new(o, h1)).unwrap();
        water.add_bond(Bond::new(o, h2)).unwrap();
        assert!(check_charge_balance(&water).is_ok());

        water.atoms[0].charge = -1;
        match check_charge_balance(&water).unwrap_err() {
            Error::ChargeImbalance { total } => assert_eq!(total, 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
