//! Maximal Marginal Relevance selection.

/// Greedily pick up to `k` items maximizing
/// `lambda * score - (1 - lambda) * max_sim(item, selected)`.
///
/// Redundancy is the maximum similarity to anything already chosen, zero
/// for the first pick. Ties keep the earlier item, so when `scores` is
/// sorted descending the higher-scored candidate wins. Items whose value
/// is not finite are never chosen; the loop stops early once none remain.
///
/// Returns indices into `scores` in selection order.
pub fn select_mmr<F>(scores: &[f64], k: usize, lambda: f64, similarity: F) -> Vec<usize>
where
    F: Fn(usize, usize) -> f64,
{
    let k = k.min(scores.len());
    let mut selected: Vec<usize> = Vec::with_capacity(k);
    let mut taken = vec![false; scores.len()];

    while selected.len() < k {
        let mut best: Option<(usize, f64)> = None;

        for (i, &score) in scores.iter().enumerate() {
            if taken[i] {
                continue;
            }
            let redundancy = selected
                .iter()
                .map(|&j| similarity(i, j))
                .fold(0.0f64, f64::max);
            let value = lambda * score - (1.0 - lambda) * redundancy;
            if !value.is_finite() {
                continue;
            }
            if best.map_or(true, |(_, v)| value > v) {
                best = Some((i, value));
            }
        }

        let Some((idx, _)) = best else {
            break;
        };
        taken[idx] = true;
        selected.push(idx);
    }

    selected
}
