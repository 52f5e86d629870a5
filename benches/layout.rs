use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use compound_layout::layout::ClusterTree;
use compound_layout::{
    Graph, Node, NodeMetadata, PackConfig, TemplateDimensions, TreeNode, pack_forest,
};

fn tree_node(id: String, children: Vec<TreeNode>) -> TreeNode {
    TreeNode {
        label: id.clone(),
        id,
        kind: "container".to_string(),
        sort_key: None,
        children,
    }
}

fn wide_forest(depth: usize, fanout: usize) -> Vec<TreeNode> {
    fn grow(prefix: &str, depth: usize, fanout: usize) -> Vec<TreeNode> {
        if depth == 0 {
            return Vec::new();
        }
        (0..fanout)
            .map(|i| {
                let id = format!("{prefix}-{i}");
                let children = grow(&id, depth - 1, fanout);
                tree_node(id, children)
            })
            .collect()
    }
    grow("n", depth, fanout)
}

fn clustered_graph(clusters: usize, members: usize) -> Graph {
    let mut graph = Graph::new();
    for c in 0..clusters {
        graph.add_node(Node {
            id: format!("g{c}"),
            label: format!("Group {c}"),
            kind: "default".to_string(),
            metadata: NodeMetadata {
                is_subgraph: true,
                ..NodeMetadata::default()
            },
        });
        for m in 0..members {
            graph.add_node(Node {
                id: format!("g{c}n{m}"),
                label: format!("{c}/{m}"),
                kind: "default".to_string(),
                metadata: NodeMetadata {
                    parent: Some(format!("g{c}")),
                    ..NodeMetadata::default()
                },
            });
        }
    }
    graph
}

fn bench_pack_forest(c: &mut Criterion) {
    let forest = wide_forest(3, 5);
    let config = PackConfig::default();
    let dims = TemplateDimensions::builtin();
    c.bench_function("pack_forest_depth3_fanout5", |b| {
        b.iter(|| pack_forest(black_box(&forest), &config, &dims))
    });
}

fn bench_cluster_tree(c: &mut Criterion) {
    let graph = clustered_graph(16, 24);
    c.bench_function("cluster_tree_build_16x24", |b| {
        b.iter(|| ClusterTree::build(black_box(&graph)).unwrap())
    });
}

criterion_group!(benches, bench_pack_forest, bench_cluster_tree);
criterion_main!(benches);
