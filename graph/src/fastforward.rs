/// Find the commit every other commit in `nodes` can be fast-forwarded to.
///
/// `is_parent(a, b)` must report whether `a` is an ancestor of (or equal to)
/// `b`. All pairs are compared, so the nodes only qualify when they lie on a
/// single line of history; the newest of them is returned. A single node is
/// its own target and an empty slice has none.
pub fn can_fastforward<T, F>(nodes: &[T], is_parent: F) -> Option<T>
where
    T: Copy + Eq,
    F: Fn(T, T) -> bool,
{
    if let [only] = nodes {
        return Some(*only);
    }

    let mut newest: Option<T> = None;

    for (i, &a) in nodes.iter().enumerate() {
        for &b in &nodes[i + 1..] {
            let (older, newer) = if is_parent(a, b) {
                (a, b)
            } else if is_parent(b, a) {
                (b, a)
            } else {
                return None;
            };

            match newest {
                Some(current) if current != older => {}
                _ => newest = Some(newer),
            }
        }
    }

    newest
}
