/// An item paired with its standard competition rank (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    pub rank: u64,
    pub item: T,
}

/// Sort `items` ascending by `key` and assign competition ranks.
///
/// Items with equal keys share a rank, and the next distinct key is ranked
/// one past the number of items before it, so keys `[1, 1, 2, 3]` rank as
/// `[1, 1, 3, 4]`. The sort is stable: equal keys keep their input order.
pub fn rank_ascending<T, K, F>(mut items: Vec<T>, key: F) -> Vec<Ranked<T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.sort_by_key(|item| key(item));

    let mut ranked = Vec::with_capacity(items.len());
    let mut previous: Option<K> = None;
    let mut rank = 0;

    for (position, item) in items.into_iter().enumerate() {
        let current = key(&item);
        if previous.as_ref() != Some(&current) {
            rank = position as u64 + 1;
            previous = Some(current);
        }
        ranked.push(Ranked { rank, item });
    }

    ranked
}
