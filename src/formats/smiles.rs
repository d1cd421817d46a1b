// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::collections::HashMap;

use log::warn;

use crate::atom::Atom;
use crate::bond::{Bond, ORDER_TOLERANCE};
use crate::error::Error;
use crate::molecule::Molecule;

/// Order and aromaticity requested by an explicit bond symbol, `None` while
/// no symbol has been seen since the last atom or ring digit.
type PendingBond = Option<(f64, bool)>;

struct RingOpening {
    atom_index: usize,
    pending: PendingBond,
    aromatic_endpoint: bool,
}

/// Parse a linear notation string into a [`Molecule`].
///
/// The supported grammar covers element tokens (one upper-case letter,
/// optionally followed by one lower-case letter, or a single lower-case
/// letter for an aromatic atom), bond symbols `-`, `=`, `#` and `:`,
/// parenthesized branches and single-digit ring closures. Bracket atoms,
/// charges and isotopes are not part of the notation.
///
/// # Errors
///
/// Fails on an unrecognized token, on `(` with no preceding atom, on `)`
/// with no open branch, on a ring digit with no preceding atom, and on ring
/// labels left open at the end of the input.
pub fn parse(input: &str) -> Result<Molecule, Error> {
    let mut molecule = Molecule::new();
    let mut branch_stack: Vec<usize> = Vec::new();
    let mut ring_closures: HashMap<char, RingOpening> = HashMap::new();
    let mut prev_atom: Option<usize> = None;
    let mut pending: PendingBond = None;

    let chars: Vec<char> = input.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        let c = chars[index];
        match c {
            '-' | '=' | '#' | ':' => {
                let order = match c {
                    '-' => 1.0,
                    '=' => 2.0,
                    '#' => 3.0,
                    _ => 1.5,
                };
                pending = Some((order, c == ':'));
                index += 1;
            }
            '(' => {
                let prev = prev_atom.ok_or(Error::BranchWithoutAtom { position: index })?;
                branch_stack.push(prev);
                index += 1;
            }
            ')' => {
                prev_atom = Some(
                    branch_stack
                        .pop()
                        .ok_or(Error::UnbalancedBranch { position: index })?,
                );
                index += 1;
            }
            '0'..='9' => {
                let prev = prev_atom.ok_or(Error::RingWithoutAtom {
                    label: c,
                    position: index,
                })?;
                match ring_closures.remove(&c) {
                    None => {
                        ring_closures.insert(
                            c,
                            RingOpening {
                                atom_index: prev,
                                pending,
                                aromatic_endpoint: molecule.atoms[prev].aromatic,
                            },
                        );
                    }
                    Some(opening) => {
                        // Order comes from whichever side carried an explicit
                        // bond symbol, opening side first.
                        let order = opening.pending.or(pending).map_or(1.0, |(order, _)| order);
                        let aromatic = opening.pending.is_some_and(|(_, aromatic)| aromatic)
                            || pending.is_some_and(|(_, aromatic)| aromatic)
                            || opening.aromatic_endpoint
                            || molecule.atoms[prev].aromatic;
                        molecule.add_bond(Bond {
                            order,
                            aromatic,
                            ..Bond::new(opening.atom_index, prev)
                        })?;
                    }
                }
                pending = None;
                index += 1;
            }
            c if c.is_ascii_alphabetic() => {
                let aromatic_atom = c.is_ascii_lowercase();
                let mut symbol = String::from(if aromatic_atom {
                    c.to_ascii_uppercase()
                } else {
                    c
                });
                index += 1;
                if !aromatic_atom {
                    if let Some(&next) = chars.get(index) {
                        if next.is_ascii_lowercase() {
                            symbol.push(next);
                            index += 1;
                        }
                    }
                }

                let mut atom = Atom::new(symbol);
                atom.aromatic = aromatic_atom;
                let atom_index = molecule.add_atom(atom);

                if let Some(prev) = prev_atom {
                    let (order, aromatic) = match pending {
                        Some((order, aromatic)) => (order, aromatic || aromatic_atom),
                        None if aromatic_atom => (1.5, true),
                        None => (1.0, false),
                    };
                    molecule.add_bond(Bond {
                        order,
                        aromatic,
                        ..Bond::new(prev, atom_index)
                    })?;
                }
                prev_atom = Some(atom_index);
                pending = None;
            }
            _ => {
                return Err(Error::UnexpectedToken {
                    token: c,
                    position: index,
                    input: input.to_string(),
                });
            }
        }
    }

    if !ring_closures.is_empty() {
        let mut labels: Vec<char> = ring_closures.keys().copied().collect();
        labels.sort_unstable();
        return Err(Error::UnclosedRings { labels });
    }

    Ok(molecule)
}

/// Serialize a [`Molecule`] back to linear notation.
///
/// The output re-parses to a graph isomorphic to the component of the input
/// reachable from atom 0. An atom-less molecule serializes to the empty
/// string.
pub fn write(molecule: &Molecule) -> String {
    if molecule.atoms.is_empty() {
        return String::new();
    }
    let adjacency = molecule.adjacency();
    let mut visited = vec![false; molecule.size()];
    let mut consumed = vec![false; molecule.bonds.len()];
    let mut ring_ids: HashMap<(usize, usize), usize> = HashMap::new();
    write_subtree(
        molecule,
        &adjacency,
        0,
        None,
        &mut visited,
        &mut consumed,
        &mut ring_ids,
    )
}

fn write_subtree(
    molecule: &Molecule,
    adjacency: &[Vec<(usize, usize)>],
    atom_index: usize,
    parent: Option<usize>,
    visited: &mut [bool],
    consumed: &mut [bool],
    ring_ids: &mut HashMap<(usize, usize), usize>,
) -> String {
    visited[atom_index] = true;
    let atom = &molecule.atoms[atom_index];
    let mut out = if atom.aromatic {
        atom.symbol.to_lowercase()
    } else {
        atom.symbol.clone()
    };

    let mut branches: Vec<String> = Vec::new();
    for &(neighbor, bond_index) in &adjacency[atom_index] {
        // The tree bond back to the parent was consumed on the way down.
        if consumed[bond_index] && parent == Some(neighbor) {
            continue;
        }
        let token = bond_token(&molecule.bonds[bond_index]);
        if visited[neighbor] {
            // Ring-closing edge. Both endpoints emit the same label: the
            // first encounter allocates it, the traversal back at the other
            // endpoint reuses it.
            let key = ordered_pair(atom_index, neighbor);
            let ring_id = match ring_ids.get(&key) {
                Some(&ring_id) => ring_id,
                None => {
                    let ring_id = ring_ids.len() + 1;
                    if ring_id > 9 {
                        warn!("ring label {ring_id} does not fit the single-digit grammar");
                    }
                    ring_ids.insert(key, ring_id);
                    ring_id
                }
            };
            consumed[bond_index] = true;
            out.push_str(token);
            out.push_str(&ring_id.to_string());
            continue;
        }
        consumed[bond_index] = true;
        let branch = write_subtree(
            molecule,
            adjacency,
            neighbor,
            Some(atom_index),
            visited,
            consumed,
            ring_ids,
        );
        branches.push(format!("{token}{branch}"));
    }

    // All but the last branch are parenthesized: an inlined branch moves the
    // implicit attachment point to its own tail, so only the final one may
    // continue the main chain.
    if let Some((last, init)) = branches.split_last() {
        for branch in init {
            out.push('(');
            out.push_str(branch);
            out.push(')');
        }
        out.push_str(last);
    }
    out
}

/// Bond symbol preceding an atom or ring label. Single and aromatic bonds
/// are implicit.
fn bond_token(bond: &Bond) -> &'static str {
    if (bond.order - 2.0).abs() < ORDER_TOLERANCE {
        "="
    } else if (bond.order - 3.0).abs() < ORDER_TOLERANCE {
        "#"
    } else {
        ""
    }
}

fn ordered_pair(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
