//! Iteration helpers
//!
//! Visitors receive `(value, index)`. A lone value iterates as a
//! one-element sequence through `Some(value)` or [`std::iter::once`].

/// Visit every element once, in order
pub fn for_each<I, F>(iterable: I, mut visit: F)
where
    I: IntoIterator,
    F: FnMut(I::Item, usize),
{
    for (index, value) in iterable.into_iter().enumerate() {
        visit(value, index);
    }
}

/// Visit in order until `visit` fails, returning that error
pub fn try_for_each<I, F, E>(iterable: I, mut visit: F) -> Result<(), E>
where
    I: IntoIterator,
    F: FnMut(I::Item, usize) -> Result<(), E>,
{
    for (index, value) in iterable.into_iter().enumerate() {
        visit(value, index)?;
    }
    Ok(())
}

/// True at the first element the predicate accepts; later elements are not visited
pub fn any<I, F>(iterable: I, mut predicate: F) -> bool
where
    I: IntoIterator,
    F: FnMut(I::Item, usize) -> bool,
{
    for (index, value) in iterable.into_iter().enumerate() {
        if predicate(value, index) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRIES: i64 = 20_000;

    fn entries() -> Vec<i64> {
        (0..ENTRIES).collect()
    }

    #[test]
    fn test_for_each_visits_all_in_order() {
        let entries = entries();
        let mut calls = 0usize;
        let mut sum = 0i64;
        let mut indices = Vec::new();
        for_each(&entries, |&entry, index| {
            calls += 1;
            sum += entry;
            indices.push(index);
        });

        assert_eq!(calls, entries.len());
        assert_eq!(sum, entries.iter().sum::<i64>());
        assert!(indices.iter().copied().eq(0..entries.len()));
    }

    #[test]
    fn test_for_each_single_value() {
        let mut seen = Vec::new();
        for_each(Some("only"), |value, index| seen.push((value, index)));
        assert_eq!(seen, vec![("only", 0)]);
    }

    #[test]
    fn test_any_stops_at_first_match() {
        let entries = entries();
        let limit = ENTRIES - 100;
        let mut calls = 0i64;
        let mut sum = 0i64;
        let found = any(&entries, |&entry, _| {
            calls += 1;
            sum += entry;
            entry == limit
        });

        assert!(found);
        assert_eq!(calls, limit + 1);
        assert_eq!(sum, (0..=limit).sum::<i64>());
    }

    #[test]
    fn test_any_exhausts_when_never_true() {
        let entries = entries();
        let mut calls = 0usize;
        let found = any(&entries, |_, _| {
            calls += 1;
            false
        });

        assert!(!found);
        assert_eq!(calls, entries.len());
    }

    #[test]
    fn test_any_passes_index() {
        assert!(any(["a", "b", "c"], |value, index| index == 2 && value == "c"));
        assert!(!any(Vec::<u8>::new(), |_, _| true));
    }

    #[test]
    fn test_try_for_each_stops_on_error() {
        let mut visited = Vec::new();
        let result = try_for_each(1..=5, |n, _| {
            visited.push(n);
            if n == 3 { Err(n) } else { Ok(()) }
        });
        assert_eq!(result, Err(3));
        assert_eq!(visited, vec![1, 2, 3]);
    }
}
