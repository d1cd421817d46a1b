use crate::molecule::Molecule;
use crate::property::Properties;

/// Reactant and product molecules of a chemical transformation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Reaction {
    pub reactants: Vec<Molecule>,
    pub products: Vec<Molecule>,
    pub properties: Properties,
}

impl Reaction {
    pub fn new() -> Self {
        Reaction::default()
    }

    pub fn add_reactant(&mut self, molecule: Molecule) {
        self.reactants.push(molecule);
    }

    pub fn add_product(&mut self, molecule: Molecule) {
        self.products.push(molecule);
    }
}
