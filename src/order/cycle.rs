//! Cycle reporting helpers for the orderer.

/// Rotate a closed cycle path so it starts at its smallest member.
///
/// The input is a path like `[c, a, b, c]` whose last element repeats the
/// first. The output keeps the traversal direction: `[a, b, c, a]`.
pub(super) fn canonicalize_cycle(mut cycle: Vec<String>) -> Vec<String> {
    if cycle.len() < 2 {
        return cycle;
    }
    let len = cycle.len() - 1;
    let start = cycle
        .iter()
        .take(len)
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map_or(0, |(idx, _)| idx);
    let (prefix, suffix) = cycle.split_at_mut(len);
    prefix.rotate_left(start);
    if let (Some(first), Some(slot)) = (prefix.first().cloned(), suffix.first_mut()) {
        *slot = first;
    }
    cycle
}

/// Extract the closed cycle ending at `node` from the DFS `stack`.
pub(super) fn cycle_from_stack(stack: &[&str], node: &str) -> Vec<String> {
    let idx = stack.iter().position(|n| *n == node).unwrap_or(0);
    let mut cycle: Vec<String> = stack.iter().skip(idx).map(|n| (*n).to_owned()).collect();
    cycle.push(node.to_owned());
    canonicalize_cycle(cycle)
}
