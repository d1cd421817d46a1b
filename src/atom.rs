// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use nalgebra::Vector3;

use crate::property::Properties;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Chemical symbol of the element (e.g. `"C"`)
    pub symbol: String,
    /// Position in Angstroms
    pub position: Vector3<f64>,
    /// Formal charge
    pub charge: i32,
    /// Optional isotope mass number
    pub isotope: Option<u32>,
    /// Optional stereochemistry descriptor (e.g. `"R"`, `"S"`)
    pub stereochemistry: Option<String>,
    /// Whether the atom takes part in an aromatic system
    pub aromatic: bool,
    /// Foreign metadata preserved during IO round-trips
    pub properties: Properties,
}

impl Default for Atom {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            position: Vector3::zeros(),
            charge: 0,
            isotope: None,
            stereochemistry: None,
            aromatic: false,
            properties: Properties::new(),
        }
    }
}

impl Atom {
    pub fn new(symbol: String) -> Self {
        Self {
            symbol,
            ..Self::default()
        }
    }

    pub fn with_position(symbol: String, position: Vector3<f64>) -> Self {
        Self {
            symbol,
            position,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn new_atom_sits_at_origin() {
        let atom = Atom::new("C".to_string());
        assert_eq!(atom.symbol, "C");
        assert_approx_eq!(atom.position.norm(), 0.0);
        assert_eq!(atom.charge, 0);
        assert_eq!(atom.isotope, None);
        assert!(!atom.aromatic);
    }

    #[test]
    fn with_position() {
        let atom = Atom::with_position("O".to_string(), Vector3::new(1.0, 2.0, 3.0));
        assert_approx_eq!(atom.position.x, 1.0);
        assert_approx_eq!(atom.position.y, 2.0);
        assert_approx_eq!(atom.position.z, 3.0);
    }
}
