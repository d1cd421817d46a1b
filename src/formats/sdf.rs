// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::fs;
use std::path::Path;

use log::warn;
use nalgebra::Vector3;

use crate::atom::Atom;
use crate::bond::{Bond, ORDER_TOLERANCE};
use crate::error::Error;
use crate::molecule::Molecule;
use crate::property::Property;

/// Parse one or more molecules from SDF text (V2000 subset).
///
/// Blocks are separated by `$$$$`. Each block starts with a 4-line header
/// (name, generator tag, comment, counts line) followed by fixed-width atom
/// and bond lines. A non-empty name is kept as the molecule's `name`
/// property.
///
/// # Errors
///
/// Fails on a truncated block or on malformed counts, coordinates, indices
/// or codes.
pub fn parse(text: &str) -> Result<Vec<Molecule>, Error> {
    let mut molecules = Vec::new();
    for block in text.trim().split("$$$$") {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }
        molecules.push(parse_block(block)?);
    }
    Ok(molecules)
}

/// Read molecules from an SDF file on disk.
///
/// # Errors
///
/// Fails if the file cannot be read or if [`parse`] fails.
pub fn parse_file(path: &Path) -> Result<Vec<Molecule>, Error> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Export a molecule as a single SDF block, terminated by `M  END` and the
/// `$$$$` separator.
pub fn write(molecule: &Molecule, name: &str) -> String {
    let mut lines: Vec<String> = vec![
        name.to_string(),
        "molgraph".to_string(),
        String::new(),
        format!(
            "{:>3}{:>3}  0  0  0  0  0  0  0  0  0  0",
            molecule.atoms.len(),
            molecule.bonds.len()
        ),
    ];
    for atom in &molecule.atoms {
        lines.push(format!(
            "{:>10.4}{:>10.4}{:>10.4} {:<3} 0{:>3}  0  0  0  0",
            atom.position.x,
            atom.position.y,
            atom.position.z,
            atom.symbol,
            charge_to_code(atom.charge),
        ));
    }
    for bond in &molecule.bonds {
        lines.push(format!(
            "{:>3}{:>3}{:>3}  0  0  0  0",
            bond.atoms[0] + 1,
            bond.atoms[1] + 1,
            order_to_code(bond.order),
        ));
    }
    lines.push("M  END".to_string());
    lines.push("$$$$".to_string());
    lines.join("\n") + "\n"
}

fn parse_block(block: &str) -> Result<Molecule, Error> {
    let lines: Vec<&str> = block.lines().collect();
    if lines.len() < 4 {
        return Err(Error::GenericError("SDF block too short".to_string()));
    }
    let counts = lines[3];
    let atom_count = parse_count(counts, 0, 3, "atom")?;
    let bond_count = parse_count(counts, 3, 6, "bond")?;
    if lines.len() < 4 + atom_count + bond_count {
        return Err(Error::GenericError(format!(
            "SDF block truncated: expected {atom_count} atom and {bond_count} bond lines, found {} lines after the header",
            lines.len() - 4
        )));
    }

    let mut molecule = Molecule::new();
    let name = lines[0].trim();
    if !name.is_empty() {
        molecule
            .properties
            .insert("name".to_string(), Property::String(name.to_string()));
    }

    for line in &lines[4..4 + atom_count] {
        let atom = parse_atom_line(line)?;
        molecule.add_atom(atom);
    }
    for line in &lines[4 + atom_count..4 + atom_count + bond_count] {
        let bond = parse_bond_line(line)?;
        molecule.add_bond(bond)?;
    }
    Ok(molecule)
}

/// Trimmed slice of a fixed-width field, empty when the line is too short.
fn field(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("").trim()
}

fn parse_count(counts: &str, start: usize, end: usize, what: &str) -> Result<usize, Error> {
    let raw = field(counts, start, end);
    raw.parse::<usize>().map_err(|_| {
        Error::GenericError(format!(
            "could not parse {what} count in SDF counts line: '{raw}'"
        ))
    })
}

fn parse_atom_line(line: &str) -> Result<Atom, Error> {
    let x: f64 = field(line, 0, 10).parse()?;
    let y: f64 = field(line, 10, 20).parse()?;
    let z: f64 = field(line, 20, 30).parse()?;
    let symbol = field(line, 31, 34);
    if symbol.is_empty() {
        return Err(Error::GenericError(format!(
            "missing element symbol in SDF atom line: '{line}'"
        )));
    }

    let charge_field = field(line, 36, 39);
    let charge_code = if charge_field.is_empty() {
        0
    } else {
        charge_field.parse::<u32>().map_err(|_| {
            Error::GenericError(format!(
                "could not parse charge code in SDF atom line: '{charge_field}'"
            ))
        })?
    };

    let mut atom = Atom::with_position(symbol.to_string(), Vector3::new(x, y, z));
    atom.charge = charge_from_code(charge_code);
    Ok(atom)
}

fn parse_bond_line(line: &str) -> Result<Bond, Error> {
    let a = parse_index(line, 0, 3)?;
    let b = parse_index(line, 3, 6)?;
    if a == b {
        return Err(Error::GenericError(format!(
            "SDF bond line connects atom {} to itself",
            a + 1
        )));
    }
    let raw = field(line, 6, 9);
    let code = raw.parse::<u32>().map_err(|_| {
        Error::GenericError(format!(
            "could not parse bond type code in SDF bond line: '{raw}'"
        ))
    })?;
    let (order, aromatic) = match code {
        1 => (1.0, false),
        2 => (2.0, false),
        3 => (3.0, false),
        4 => (1.5, true),
        unknown => {
            warn!("unknown SDF bond type code {unknown}, treating as a single bond");
            (1.0, false)
        }
    };
    Ok(Bond {
        order,
        aromatic,
        ..Bond::new(a, b)
    })
}

/// 1-based atom index field.
fn parse_index(line: &str, start: usize, end: usize) -> Result<usize, Error> {
    let raw = field(line, start, end);
    let value = raw.parse::<usize>().map_err(|_| {
        Error::GenericError(format!(
            "could not parse atom index in SDF bond line: '{raw}'"
        ))
    })?;
    if value == 0 {
        return Err(Error::GenericError(
            "SDF bond line uses 0 as a 1-based atom index".to_string(),
        ));
    }
    Ok(value - 1)
}

fn charge_from_code(code: u32) -> i32 {
    match code {
        0 | 4 => 0,
        1 => 3,
        2 => 2,
        3 => 1,
        5 => -1,
        6 => -2,
        7 => -3,
        unknown => {
            warn!("unknown SDF charge code {unknown}, treating as neutral");
            0
        }
    }
}

fn charge_to_code(charge: i32) -> u32 {
    match charge {
        0 => 0,
        1 => 3,
        2 => 2,
        3 => 1,
        -1 => 5,
        -2 => 6,
        -3 => 7,
        out_of_range => {
            warn!("charge {out_of_range} does not fit an SDF charge code, writing as neutral");
            0
        }
    }
}

fn order_to_code(order: f64) -> u32 {
    if (order - 2.0).abs() < ORDER_TOLERANCE {
        2
    } else if (order - 3.0).abs() < ORDER_TOLERANCE {
        3
    } else if (order - 1.5).abs() < ORDER_TOLERANCE {
        4
    } else {
        1
    }
}
