use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rebuild_bst::balanced::Tree;

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: usize) -> usize {
    2usize.pow(num_levels as u32) - 1
}

/// Builds a tree by inserting values in ascending order. Inserts never rebalance so this is a
/// single chain of right children.
fn get_unbalanced_tree(num_levels: usize) -> Tree<i32> {
    let mut tree = Tree::new();
    for x in (0..).take(num_nodes_in_full_tree(num_levels)) {
        let _ = tree.insert(x);
    }

    tree
}

/// Builds a full, balanced tree with `num_levels` levels.
fn get_balanced_tree(num_levels: usize) -> Tree<i32> {
    Tree::from_values((0..).take(num_nodes_in_full_tree(num_levels)).collect())
}

/// Helper to bench a function on a BST.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// shapes of BSTs before finishing the group. Every iteration gets a fresh clone so mutations
/// don't leak between iterations.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    // The unbalanced trees are chains so keep them short enough for the recursive walks.
    for num_levels in [3, 7, 11] {
        let largest_element_in_tree = num_nodes_in_full_tree(num_levels) - 1;
        let tree_tests = [
            ("unbalanced", get_unbalanced_tree(num_levels)),
            ("balanced", get_balanced_tree(num_levels)),
        ];
        for (name, tree) in tree_tests {
            let id = BenchmarkId::new(name, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree as i32));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |tree, i| {
        let _found = black_box(tree.contains(&i));
    });
    bench_helper(c, "delete", |tree, i| {
        let _ = tree.delete(&i);
    });
    bench_helper(c, "insert", |tree, i| {
        let _ = tree.insert(i + 1);
    });
    bench_helper(c, "rebalance", |tree, _| {
        tree.rebalance();
    });

    bench_helper(c, "find-miss", |tree, i| {
        let _found = black_box(tree.contains(&(i + 1)));
    });
    bench_helper(c, "delete-miss", |tree, i| {
        let _ = tree.delete(&(i + 1));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
