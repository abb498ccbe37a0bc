//! Population replacement between generations.

use std::cmp::Ordering;

use log::trace;
use rayon::prelude::*;

use crate::schema::Individual;

/// Replaces the worst individuals of a population with the best individuals
/// from a freshly evaluated pool.
///
/// The comparison callback returns true iff its first argument should rank
/// ahead of (better than) its second, and must be a strict weak ordering;
/// violations degrade ranking quality but are not detected.
pub struct ReplaceWorstReinserter<F> {
    comparison: F,
}

impl<F> ReplaceWorstReinserter<F>
where
    F: Fn(&Individual, &Individual) -> bool + Sync,
{
    /// Create a reinserter with the given comparison callback.
    pub fn new(comparison: F) -> Self {
        Self { comparison }
    }

    /// Merge `pool` into `population` in place.
    ///
    /// Equal sizes degrade to a wholesale generational swap with no
    /// comparisons; otherwise the larger of the two collections is sorted
    /// best-first and the best `min(|population|, |pool|)` pool individuals
    /// replace the worst population individuals. The pool is scratch space
    /// afterwards: displaced individuals are left resident in it. An empty
    /// pool leaves the population untouched.
    pub fn reinsert(&self, population: &mut Vec<Individual>, pool: &mut Vec<Individual>) {
        // typically the pool and the population have the same size
        if population.len() == pool.len() {
            trace!("wholesale generational swap");
            std::mem::swap(population, pool);
            return;
        }
        if pool.is_empty() {
            return;
        }

        let order = |a: &Individual, b: &Individual| {
            if (self.comparison)(a, b) {
                Ordering::Less
            } else if (self.comparison)(b, a) {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        };
        if population.len() > pool.len() {
            population.par_sort_unstable_by(order);
        } else {
            pool.par_sort_unstable_by(order);
        }

        let offset = population.len().min(pool.len());
        let keep = population.len() - offset;
        trace!("replacing {offset} of {} individuals", population.len());
        pool[..offset].swap_with_slice(&mut population[keep..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Node, Tree};

    fn individual(fitness: f64) -> Individual {
        Individual::new(Tree::new(vec![Node::constant(fitness)]), fitness)
    }

    fn group(fitness: &[f64]) -> Vec<Individual> {
        fitness.iter().copied().map(individual).collect()
    }

    fn fitness_of(individuals: &[Individual]) -> Vec<f64> {
        individuals.iter().map(|i| i.fitness).collect()
    }

    /// Higher fitness ranks ahead.
    fn better(a: &Individual, b: &Individual) -> bool {
        a.fitness > b.fitness
    }

    #[test]
    fn equal_sizes_swap_wholesale() {
        let reinserter = ReplaceWorstReinserter::new(better);
        let mut population = group(&[1.0, 2.0]);
        let mut pool = group(&[7.0, 9.0]);
        reinserter.reinsert(&mut population, &mut pool);
        assert_eq!(fitness_of(&population), vec![7.0, 9.0]);
        assert_eq!(fitness_of(&pool), vec![1.0, 2.0]);
    }

    #[test]
    fn best_pool_individual_replaces_worst() {
        // population [A(1), B(5), C(3)], pool [D(10)]: D lands in place of
        // the worst individual A, with B and C keeping their relative order
        let reinserter = ReplaceWorstReinserter::new(better);
        let mut population = group(&[1.0, 5.0, 3.0]);
        let mut pool = group(&[10.0]);
        reinserter.reinsert(&mut population, &mut pool);
        assert_eq!(fitness_of(&population), vec![5.0, 3.0, 10.0]);
        assert_eq!(fitness_of(&pool), vec![1.0]);
    }

    #[test]
    fn larger_pool_contributes_only_its_best() {
        let reinserter = ReplaceWorstReinserter::new(better);
        let mut population = group(&[1.0]);
        let mut pool = group(&[3.0, 9.0, 2.0]);
        reinserter.reinsert(&mut population, &mut pool);
        assert_eq!(fitness_of(&population), vec![9.0]);
        assert_eq!(pool.len(), 3);
        assert!(pool.iter().any(|i| i.fitness == 1.0));
    }

    #[test]
    fn empty_pool_is_a_no_op() {
        let reinserter = ReplaceWorstReinserter::new(better);
        let mut population = group(&[2.0, 1.0, 4.0]);
        let mut pool = Vec::new();
        reinserter.reinsert(&mut population, &mut pool);
        assert_eq!(fitness_of(&population), vec![2.0, 1.0, 4.0]);
        assert!(pool.is_empty());
    }

    #[test]
    fn empty_population_stays_empty() {
        let reinserter = ReplaceWorstReinserter::new(better);
        let mut population = Vec::new();
        let mut pool = group(&[3.0, 1.0]);
        reinserter.reinsert(&mut population, &mut pool);
        assert!(population.is_empty());
    }

    #[test]
    fn minimizing_comparator_keeps_low_fitness() {
        let reinserter = ReplaceWorstReinserter::new(|a: &Individual, b: &Individual| {
            a.fitness < b.fitness
        });
        let mut population = group(&[1.0, 5.0, 3.0]);
        let mut pool = group(&[0.5]);
        reinserter.reinsert(&mut population, &mut pool);
        assert_eq!(fitness_of(&population), vec![1.0, 3.0, 0.5]);
        assert_eq!(fitness_of(&pool), vec![5.0]);
    }
}
