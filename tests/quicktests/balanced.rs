use rebuild_bst::balanced::Tree;
use rebuild_bst::TreeError;

use std::collections::{BTreeSet, HashSet};

/// Every node sits between its subtrees iff the in-order values are strictly ascending.
fn is_search_tree(tree: &Tree<i8>) -> bool {
    tree.iter().zip(tree.iter().skip(1)).all(|(a, b)| a < b)
}

fn in_order(tree: &Tree<i8>) -> Vec<i8> {
    let mut values = Vec::new();
    tree.in_order(|n| values.push(*n.value()));
    values
}

fn level_order(tree: &Tree<i8>) -> Vec<i8> {
    let mut values = Vec::new();
    tree.level_order(|n| values.push(*n.value()));
    values
}

quickcheck::quickcheck! {
    fn round_trip(xs: Vec<i8>) -> bool {
        let tree = Tree::from_values(xs.clone());
        let expected: Vec<i8> = xs.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

        in_order(&tree) == expected
    }
}

quickcheck::quickcheck! {
    fn built_trees_are_balanced(xs: Vec<i8>) -> bool {
        let tree = Tree::from_values(xs);
        tree.is_balanced() && is_search_tree(&tree)
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree = Tree::from_values(xs.clone());
        xs.iter().all(|x| tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree = Tree::from_values(xs.clone());
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn insert_twice_keeps_one(xs: Vec<i8>, x: i8) -> bool {
        let mut tree = Tree::from_values(xs);
        let _ = tree.insert(x);
        let before = level_order(&tree);

        tree.insert(x) == Err(TreeError::Duplicate)
            && level_order(&tree) == before
            && tree.iter().filter(|&&v| v == x).count() == 1
    }
}

quickcheck::quickcheck! {
    fn inserts_keep_search_order(xs: Vec<i8>, inserts: Vec<i8>) -> bool {
        let mut tree = Tree::from_values(xs);
        for x in inserts {
            let _ = tree.insert(x);
        }
        let sorted = is_search_tree(&tree);

        tree.rebalance();
        sorted && tree.is_balanced() && is_search_tree(&tree)
    }
}

quickcheck::quickcheck! {
    fn delete_then_absent(xs: Vec<i8>, inserts: Vec<i8>) -> bool {
        let mut tree = Tree::from_values(xs);
        for x in inserts {
            let _ = tree.insert(x);
        }

        let present: Vec<i8> = tree.iter().copied().collect();
        for x in present {
            let len = tree.len();
            if tree.delete(&x) != Ok(x)
                || tree.contains(&x)
                || tree.len() != len - 1
                || !tree.is_balanced()
                || !is_search_tree(&tree)
            {
                return false;
            }
        }

        tree.is_empty()
    }
}

quickcheck::quickcheck! {
    fn delete_missing_is_refused(xs: Vec<i8>, x: i8) -> bool {
        let mut tree = Tree::from_values(xs);
        if tree.contains(&x) {
            return true;
        }
        let before = level_order(&tree);

        tree.delete(&x) == Err(TreeError::NotFound) && level_order(&tree) == before
    }
}

#[test]
fn height_of_one_to_seven() {
    let tree = Tree::from_values((1..=7).collect::<Vec<i8>>());

    assert_eq!(tree.root().map(|n| *n.value()), Some(4));
    assert_eq!(tree.height(), 3);
}

#[test]
fn depth_sentinels() {
    let empty = Tree::<i8>::new();
    assert_eq!(empty.depth(&1), None);

    let tree = Tree::from_values(vec![3, 1, 2]);
    assert_eq!(tree.depth(&2), Some(0));
}
