//! Fair-share allocation of a row budget across subsets.

/// Splits a budget of `limit` rows across subsets of the given `sizes` using
/// max-min fairness, returning one quota per subset in input order.
///
/// Subsets are visited from the smallest to the largest (ties broken by input
/// order). Each receives an equal share of the budget still unassigned,
/// capped at its size; whatever a small subset cannot use flows on to the
/// larger ones.
///
/// The result satisfies:
/// - `quotas[i] <= sizes[i]` and `sum(quotas) <= limit`;
/// - `quotas == sizes` when `limit >= sum(sizes)`;
/// - all quotas are zero when `limit == 0`.
///
/// ```
/// use tupleset::quota::fair_share_quotas;
///
/// assert_eq!(fair_share_quotas(&[10, 2, 5], 12), [5, 2, 5]);
/// ```
pub fn fair_share_quotas(sizes: &[usize], limit: usize) -> Vec<usize> {
    let mut order = (0..sizes.len()).collect::<Vec<_>>();
    // stable: equal sizes keep input order
    order.sort_by_key(|&i| sizes[i]);

    let mut quotas = vec![0; sizes.len()];
    let mut remaining = limit;
    for (k, &i) in order.iter().enumerate() {
        let share = remaining / (sizes.len() - k);
        let quota = share.min(sizes[i]);
        quotas[i] = quota;
        remaining -= quota;
    }
    quotas
}
