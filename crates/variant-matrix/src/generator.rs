//! Combination generator
//!
//! Cartesian product of option value lists, enumerated depth-first: the
//! first option is the outermost loop and each option's values are walked
//! in list order. Rendering and pagination rely on this order being stable.

use variant_model::{Combination, ProductOption};

/// Upper bound on the up-front allocation for the result vector
const MAX_PREALLOCATED: usize = 1 << 16;

/// Size of the full set, `None` on overflow
///
/// Zero options yield an empty set, not the single empty tuple.
#[must_use]
pub fn full_set_size(options: &[ProductOption]) -> Option<usize> {
    if options.is_empty() {
        return Some(0);
    }
    options
        .iter()
        .try_fold(1usize, |acc, option| acc.checked_mul(option.len()))
}

/// Generate every combination of the options' values
///
/// An option with no values contributes a zero factor, so the result is
/// empty. That is not an error.
#[must_use]
pub fn generate(options: &[ProductOption]) -> Vec<Combination> {
    match options {
        [] => Vec::new(),
        [only] => only
            .values()
            .iter()
            .map(|v| Combination::new(vec![v.clone()]))
            .collect(),
        _ => {
            let size = full_set_size(options).unwrap_or(usize::MAX);
            let mut out = Vec::with_capacity(size.min(MAX_PREALLOCATED));
            if size == 0 {
                return out;
            }
            // Index buffer reused across the whole walk; tuples are only
            // materialized at the leaves.
            let mut cursor = vec![0usize; options.len()];
            walk(options, 0, &mut cursor, &mut out);
            out
        }
    }
}

fn walk(
    options: &[ProductOption],
    depth: usize,
    cursor: &mut [usize],
    out: &mut Vec<Combination>,
) {
    if depth == options.len() {
        out.push(
            cursor
                .iter()
                .zip(options)
                .map(|(&i, option)| option.values()[i].clone())
                .collect(),
        );
        return;
    }

    for i in 0..options[depth].len() {
        cursor[depth] = i;
        walk(options, depth + 1, cursor, out);
    }
}
