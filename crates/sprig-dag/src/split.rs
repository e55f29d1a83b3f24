//! Split point (lowest common ancestor) resolution.

use sprig_types::ObjectId;
use tracing::debug;

use crate::error::{DagError, DagResult};
use crate::walker::AncestorWalker;

/// The commit two histories diverged from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitPoint {
    pub commit: ObjectId,
    /// Position of the candidate found from the current side, in that
    /// side's discovery order.
    pub steps_from_current: usize,
    /// Position of the candidate found from the given side.
    pub steps_from_given: usize,
}

/// Find where `current` and `given` diverged.
///
/// Each side's ancestor set is scanned in discovery order for the first
/// commit also reachable from the other side. The candidate reached in fewer
/// steps wins; on a tie the current side's candidate is used. With
/// [`TraversalOrder::Lexicographic`](crate::TraversalOrder::Lexicographic)
/// this is the first common commit under that order, not necessarily the
/// nearest one.
pub fn find_split_point(
    walker: &AncestorWalker<'_>,
    current: &ObjectId,
    given: &ObjectId,
) -> DagResult<SplitPoint> {
    let from_current = walker.ancestors(current)?;
    let from_given = walker.ancestors(given)?;

    let no_common = || DagError::NoCommonAncestor {
        current: *current,
        given: *given,
    };
    let (curr_candidate, steps_from_current) =
        from_current.first_shared_with(&from_given).ok_or_else(no_common)?;
    let (given_candidate, steps_from_given) =
        from_given.first_shared_with(&from_current).ok_or_else(no_common)?;

    let commit = if steps_from_given < steps_from_current {
        given_candidate
    } else {
        curr_candidate
    };

    debug!(
        current = %current.short_hex(),
        given = %given.short_hex(),
        split = %commit.short_hex(),
        steps_from_current,
        steps_from_given,
        "found split point"
    );
    Ok(SplitPoint {
        commit,
        steps_from_current,
        steps_from_given,
    })
}

/// Returns `true` if `ancestor` is reachable from `descendant` (a commit is
/// its own ancestor).
pub fn is_ancestor(
    walker: &AncestorWalker<'_>,
    ancestor: &ObjectId,
    descendant: &ObjectId,
) -> DagResult<bool> {
    Ok(walker.ancestors(descendant)?.contains(ancestor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walker::tests::{arb_graph, build, Graph};
    use crate::TraversalOrder;
    use proptest::prelude::*;
    use sprig_store::{Commit, InMemoryObjectStore, ObjectStore};

    #[test]
    fn commit_is_its_own_split_point() {
        let mut g = Graph::new();
        let a = g.commit(g.root, None);
        let split = find_split_point(&AncestorWalker::new(&g.store), &a, &a).unwrap();
        assert_eq!(split.commit, a);
        assert_eq!((split.steps_from_current, split.steps_from_given), (0, 0));
    }

    #[test]
    fn ancestor_tip_is_split_point() {
        let mut g = Graph::new();
        let a = g.commit(g.root, None);
        let b = g.commit(a, None);
        let c = g.commit(b, None);
        let walker = AncestorWalker::new(&g.store);

        assert_eq!(find_split_point(&walker, &c, &a).unwrap().commit, a);
        assert_eq!(find_split_point(&walker, &a, &c).unwrap().commit, a);
    }

    #[test]
    fn divergent_branches_meet_at_fork() {
        let mut g = Graph::new();
        let fork = g.commit(g.root, None);
        let left = g.commit(fork, None);
        let left2 = g.commit(left, None);
        let right = g.commit(fork, None);

        let split = find_split_point(&AncestorWalker::new(&g.store), &left2, &right).unwrap();
        assert_eq!(split.commit, fork);
        assert_eq!(split.steps_from_current, 2);
        assert_eq!(split.steps_from_given, 1);
    }

    #[test]
    fn tie_goes_to_current_side() {
        // Criss-cross: each tip merges both a and b, in opposite order.
        let mut g = Graph::new();
        let a = g.commit(g.root, None);
        let b = g.commit(g.root, None);
        let current = g.commit(a, Some(b));
        let given = g.commit(b, Some(a));

        let walker = AncestorWalker::new(&g.store);
        let split = find_split_point(&walker, &current, &given).unwrap();
        assert_eq!(split.steps_from_current, split.steps_from_given);
        assert_eq!(split.commit, a);

        let reversed = find_split_point(&walker, &given, &current).unwrap();
        assert_eq!(reversed.commit, b);
    }

    #[test]
    fn merged_branch_is_ancestor_after_merge() {
        let mut g = Graph::new();
        let side = g.commit(g.root, None);
        let main = g.commit(g.root, None);
        let merge = g.commit(main, Some(side));
        let walker = AncestorWalker::new(&g.store);

        assert_eq!(find_split_point(&walker, &merge, &side).unwrap().commit, side);
        assert!(is_ancestor(&walker, &side, &merge).unwrap());
        assert!(!is_ancestor(&walker, &merge, &side).unwrap());
    }

    #[test]
    fn unrelated_histories_have_no_common_ancestor() {
        let store = InMemoryObjectStore::new();
        let one = store.put_commit(&Commit::root()).unwrap();
        let mut other = Commit::root();
        other.message = "another root".to_string();
        let two = store.put_commit(&other).unwrap();

        let err = find_split_point(&AncestorWalker::new(&store), &one, &two).unwrap_err();
        assert!(matches!(err, DagError::NoCommonAncestor { .. }));
    }

    proptest! {
        #[test]
        fn split_point_is_common_ancestor(edges in arb_graph(), i in any::<usize>(), j in any::<usize>()) {
            let (g, ids) = build(&edges);
            let (a, b) = (ids[i % ids.len()], ids[j % ids.len()]);
            for order in [TraversalOrder::BreadthFirst, TraversalOrder::Lexicographic] {
                let walker = AncestorWalker::new(&g.store).with_order(order);
                let split = find_split_point(&walker, &a, &b).unwrap();
                prop_assert!(is_ancestor(&walker, &split.commit, &a).unwrap());
                prop_assert!(is_ancestor(&walker, &split.commit, &b).unwrap());
                if is_ancestor(&walker, &a, &b).unwrap() {
                    prop_assert_eq!(split.commit, a);
                }
            }
        }
    }
}
