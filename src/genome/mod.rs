pub mod boat;
pub use boat::BoatGenome;

use crate::{
    crossover::{crossover, loci},
    mutate::{mutate_genes, Perturbation},
};
use core::{fmt::Debug, ops::Range};
use rand::RngCore;
use serde::{de::DeserializeOwned, Serialize};
use std::{error::Error, fs, path::Path};

/// A fixed-shape set of heritable scalar genes. Every value of a given genome type has the
/// same gene count and order for the whole run.
pub trait Genome: Serialize + DeserializeOwned + Clone + Debug + PartialEq + Default {
    /// Named, contiguous groups of gene indices that together cover every gene exactly once.
    /// Grouped crossover inherits each group as a whole.
    fn groups() -> &'static [(&'static str, Range<usize>)];

    fn genes(&self) -> &[f64];

    fn genes_mut(&mut self) -> &mut [f64];

    /// Constrain a gene right after a mutation changed it
    #[inline]
    fn bound(_idx: usize, value: f64) -> f64 {
        value
    }

    fn group_ranges() -> Vec<Range<usize>> {
        Self::groups().iter().map(|(_, r)| r.clone()).collect()
    }

    /// A perturbed copy of this genome; see [mutate_genes]
    fn mutated(
        &self,
        factor: f64,
        chance: f64,
        perturbation: Perturbation,
        rng: &mut impl RngCore,
    ) -> Self {
        let mut child = self.clone();
        mutate_genes(child.genes_mut(), factor, chance, perturbation, Self::bound, rng);
        child
    }

    /// N-point crossover with `other`, producing two siblings
    fn crossover_with(
        &self,
        other: &Self,
        grouped: bool,
        points: usize,
        rng: &mut impl RngCore,
    ) -> (Self, Self) {
        let loci = loci(self.genes().len(), &Self::group_ranges(), grouped);
        let (x_genes, y_genes) = crossover(self.genes(), other.genes(), &loci, points, rng);

        let mut x = self.clone();
        let mut y = other.clone();
        x.genes_mut().copy_from_slice(&x_genes);
        y.genes_mut().copy_from_slice(&y_genes);
        (x, y)
    }

    fn to_string(&self) -> Result<String, Box<dyn Error>> {
        Ok(serde_json::to_string(self)?)
    }

    #[allow(clippy::should_implement_trait)]
    fn from_str(s: &str) -> Result<Self, Box<dyn Error>> {
        serde_json::from_str(s).map_err(|op| op.into())
    }

    fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        fs::write(path, self.to_string()?)?;
        Ok(())
    }

    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        Self::from_str(&fs::read_to_string(path)?)
    }
}
