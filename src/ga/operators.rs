//! Slot-aligned genetic operators.
//!
//! Chromosomes here are fixed-length vectors of candidate indices, one
//! per roster slot. These helpers are problem-agnostic; feasibility
//! repair lives with the lineup problem.

use rand::Rng;

/// Positional uniform crossover.
///
/// Each slot is inherited independently from one parent; the second child
/// takes the other parent's gene. Both children may contain duplicates.
///
/// # Panics
/// Panics if the parents differ in length.
pub fn uniform_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    let mut c1 = Vec::with_capacity(parent1.len());
    let mut c2 = Vec::with_capacity(parent1.len());
    for (&a, &b) in parent1.iter().zip(parent2) {
        if rng.random_bool(0.5) {
            c1.push(a);
            c2.push(b);
        } else {
            c1.push(b);
            c2.push(a);
        }
    }
    (c1, c2)
}

/// Draws one of `options` with probability proportional to `weight`.
///
/// Non-finite and non-positive weights are raised to `min_weight` so every
/// option stays reachable. Returns `None` when `options` is empty.
pub fn weighted_pick<R, F>(options: &[usize], weight: F, min_weight: f64, rng: &mut R) -> Option<usize>
where
    R: Rng,
    F: Fn(usize) -> f64,
{
    match options.len() {
        0 => return None,
        1 => return Some(options[0]),
        _ => {}
    }
    let weights: Vec<f64> = options
        .iter()
        .map(|&i| {
            let w = weight(i);
            if w.is_finite() {
                w.max(min_weight)
            } else {
                min_weight
            }
        })
        .collect();
    let total: f64 = weights.iter().sum();
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (&i, &w) in options.iter().zip(&weights) {
        cumulative += w;
        if cumulative > threshold {
            return Some(i);
        }
    }
    options.last().copied() // floating-point fallback
}

/// Uniform draw from `options`.
pub fn uniform_pick<R: Rng>(options: &[usize], rng: &mut R) -> Option<usize> {
    if options.is_empty() {
        None
    } else {
        Some(options[rng.random_range(0..options.len())])
    }
}

/// Positions of the second and later occurrences of any repeated gene.
pub fn duplicate_slots(genes: &[usize]) -> Vec<usize> {
    let mut out = Vec::new();
    for (s, g) in genes.iter().enumerate() {
        if genes[..s].contains(g) {
            out.push(s);
        }
    }
    out
}
