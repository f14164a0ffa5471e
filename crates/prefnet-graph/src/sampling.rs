use std::collections::BTreeSet;

use rand::Rng;

use prefnet_core::errors::{ErrorInfo, PrefnetError};
use prefnet_core::rng::RngHandle;

/// Weighted sample without replacement over node degrees.
///
/// Draws `count` distinct indices from `degrees`, where each draw picks index
/// `i` with probability `degrees[i] / remaining_total`. A draw is resolved by
/// taking a uniform integer in `[1, remaining_total]` and scanning the
/// eligible indices in ascending order until the cumulative degree reaches
/// the drawn value; the winner leaves the eligible pool and its degree leaves
/// the remaining total. The returned indices are sorted ascending.
///
/// `total_degree` must equal the sum of `degrees`; the pool and the running
/// total live entirely on this call's stack, so the caller's adjacency state
/// is never touched mid-selection.
pub(crate) fn sample_by_degree(
    degrees: &[usize],
    total_degree: usize,
    count: usize,
    rng: &mut RngHandle,
) -> Result<Vec<usize>, PrefnetError> {
    let mut selected: BTreeSet<usize> = BTreeSet::new();
    let mut remaining = total_degree;

    while selected.len() < count {
        if remaining == 0 {
            return Err(exhausted(selected.len(), count, remaining));
        }
        let draw = rng.gen_range(1..=remaining);
        let mut cumulative = 0usize;
        let mut winner = None;
        for (index, degree) in degrees.iter().enumerate() {
            if selected.contains(&index) {
                continue;
            }
            cumulative += degree;
            if cumulative >= draw {
                winner = Some(index);
                break;
            }
        }
        // The scan can only fall through when `remaining` overstates the
        // eligible degree mass, i.e. the caller's bookkeeping drifted.
        let Some(index) = winner else {
            return Err(exhausted(selected.len(), count, remaining));
        };
        selected.insert(index);
        remaining -= degrees[index];
    }

    Ok(selected.into_iter().collect())
}

fn exhausted(selected: usize, needed: usize, remaining: usize) -> PrefnetError {
    PrefnetError::Generation(
        ErrorInfo::new(
            "selection-exhausted",
            "degree weight pool drained before enough targets were selected",
        )
        .with_context("selected", selected)
        .with_context("needed", needed)
        .with_context("remaining_total", remaining),
    )
}
