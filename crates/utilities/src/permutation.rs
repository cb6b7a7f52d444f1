/// Returns true iff the given function is a permutation of `0..len`, i.e.
/// every index is mapped to a unique index within bounds.
pub fn is_valid_permutation<P>(permutation: P, len: usize) -> bool
where
    P: Fn(usize) -> usize,
{
    let mut seen = vec![false; len];

    for i in 0..len {
        let target = permutation(i);
        if target >= len || seen[target] {
            return false;
        }

        seen[target] = true;
    }

    true
}
