//! Display ordering shared by categories and accounts.
//!
//! A reorder rewrites `sort_order` to the dense sequence `0..n` following the
//! submitted id list. Reads order by `(sort_order, id)`, so rows that were left
//! out of a reorder (or freshly created at rank 0) still sort deterministically.

/// Which collection a reorder applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    Categories,
    Accounts,
}

impl OrderScope {
    pub fn table(self) -> &'static str {
        match self {
            OrderScope::Categories => "categories",
            OrderScope::Accounts => "accounts",
        }
    }
}

/// Pair each id with its new rank. A duplicated id ends up with the rank of its
/// last occurrence, since the writes are applied in order.
pub fn rank_assignments(ids: &[i64]) -> Vec<(i64, i64)> {
    ids.iter()
        .enumerate()
        .map(|(rank, &id)| (id, rank as i64))
        .collect()
}

/// Order produced by dragging `dragged_id` onto the slot at `drop_index` of
/// `current_order`.
///
/// The dragged id is removed first; when the drop slot lies after the source
/// position the target shifts left by one to account for the removal.
/// Unknown ids leave the order untouched.
pub fn compute_final_order(current_order: &[i64], dragged_id: i64, drop_index: usize) -> Vec<i64> {
    let Some(from) = current_order.iter().position(|&id| id == dragged_id) else {
        return current_order.to_vec();
    };
    let to = if drop_index > from {
        drop_index - 1
    } else {
        drop_index
    };

    let mut next = current_order.to_vec();
    let item = next.remove(from);
    let to = to.min(next.len());
    next.insert(to, item);
    next
}
