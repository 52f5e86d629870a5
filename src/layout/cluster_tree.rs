use std::collections::{BTreeMap, HashMap, HashSet};

use crate::graph::Graph;

use super::error::LayoutError;

/// One container derived from `is_subgraph` / `parent` metadata. Built once
/// per layout call, never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    pub id: String,
    pub parent: Option<String>,
    /// Direct leaf members, declaration order.
    pub nodes: Vec<String>,
    /// Direct child clusters, declaration order.
    pub children: Vec<String>,
}

/// Explicit tree over the graph's flat parent-pointer metadata.
#[derive(Debug, Clone, Default)]
pub struct ClusterTree {
    pub clusters: BTreeMap<String, Cluster>,
    /// Clusters with no parent, declaration order.
    pub roots: Vec<String>,
    /// Top-level nodes owned by no cluster, declaration order.
    pub loose: Vec<String>,
    membership: HashMap<String, String>,
}

impl ClusterTree {
    pub fn build(graph: &Graph) -> Result<Self, LayoutError> {
        let mut tree = Self::default();

        // Pass 1: every subgraph node becomes a cluster; parents are created
        // on demand so a child can be declared before its container.
        for node in graph.ordered_nodes() {
            if !node.metadata.is_subgraph {
                continue;
            }
            tree.ensure(&node.id);
            if let Some(parent) = node.metadata.parent.clone() {
                tree.ensure(&parent);
                if let Some(cluster) = tree.clusters.get_mut(&node.id) {
                    cluster.parent = Some(parent.clone());
                }
                if let Some(parent_cluster) = tree.clusters.get_mut(&parent) {
                    parent_cluster.children.push(node.id.clone());
                }
            }
        }

        // Pass 2: plain nodes attach to their container's leaf list.
        for node in graph.ordered_nodes() {
            if node.metadata.is_subgraph {
                continue;
            }
            match node.metadata.parent.clone() {
                Some(parent) => {
                    tree.ensure(&parent);
                    if let Some(cluster) = tree.clusters.get_mut(&parent) {
                        cluster.nodes.push(node.id.clone());
                    }
                    tree.membership.insert(node.id.clone(), parent);
                }
                None => tree.loose.push(node.id.clone()),
            }
        }

        tree.roots = tree
            .clusters
            .values()
            .filter(|cluster| cluster.parent.is_none())
            .map(|cluster| cluster.id.clone())
            .collect();
        tree.roots.sort_by_key(|id| graph.order_of(id));

        tree.check_cycles()?;
        Ok(tree)
    }

    fn ensure(&mut self, id: &str) {
        self.clusters.entry(id.to_string()).or_insert_with(|| Cluster {
            id: id.to_string(),
            ..Cluster::default()
        });
    }

    fn check_cycles(&self) -> Result<(), LayoutError> {
        for start in self.clusters.keys() {
            let mut seen: HashSet<&str> = HashSet::new();
            let mut current = start.as_str();
            seen.insert(current);
            while let Some(parent) = self
                .clusters
                .get(current)
                .and_then(|cluster| cluster.parent.as_deref())
            {
                if !seen.insert(parent) {
                    return Err(LayoutError::CyclicContainment {
                        cluster: parent.to_string(),
                    });
                }
                current = parent;
            }
        }
        Ok(())
    }

    /// Immediate cluster owning a leaf node, if any.
    pub fn cluster_of(&self, node_id: &str) -> Option<&str> {
        self.membership.get(node_id).map(String::as_str)
    }

    /// True when `node_id` (leaf or cluster) lies inside `cluster_id`,
    /// transitively.
    pub fn is_descendant_of(&self, node_id: &str, cluster_id: &str) -> bool {
        let mut current: Option<&str> = match self.clusters.get(node_id) {
            Some(cluster) => cluster.parent.as_deref(),
            None => self.cluster_of(node_id),
        };
        while let Some(id) = current {
            if id == cluster_id {
                return true;
            }
            current = self
                .clusters
                .get(id)
                .and_then(|cluster| cluster.parent.as_deref());
        }
        false
    }

    /// Endpoint as seen from inside `cluster_id`: the node itself when it is
    /// a direct leaf, otherwise the direct child cluster transitively holding
    /// it. `None` when the node lives outside `cluster_id` entirely.
    pub fn representative_in(&self, cluster_id: &str, node_id: &str) -> Option<String> {
        let mut current = match self.clusters.contains_key(node_id) {
            true => node_id.to_string(),
            false => match self.cluster_of(node_id) {
                Some(owner) if owner == cluster_id => return Some(node_id.to_string()),
                Some(owner) => owner.to_string(),
                None => return None,
            },
        };
        loop {
            let parent = self.clusters.get(&current)?.parent.clone();
            match parent {
                Some(parent) if parent == cluster_id => return Some(current),
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    /// Nearest root-level item for an endpoint: the owning root cluster, or
    /// the node itself when loose.
    pub fn root_item_of(&self, node_id: &str) -> String {
        let mut current = match self.clusters.contains_key(node_id) {
            true => node_id.to_string(),
            false => match self.cluster_of(node_id) {
                Some(owner) => owner.to_string(),
                None => return node_id.to_string(),
            },
        };
        while let Some(parent) = self
            .clusters
            .get(&current)
            .and_then(|cluster| cluster.parent.clone())
        {
            current = parent;
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, NodeMetadata};

    fn node(id: &str, parent: Option<&str>, is_subgraph: bool) -> Node {
        Node {
            id: id.to_string(),
            label: id.to_string(),
            kind: "default".to_string(),
            metadata: NodeMetadata {
                parent: parent.map(str::to_string),
                is_subgraph,
                ..NodeMetadata::default()
            },
        }
    }

    fn nested_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(node("outer", None, true));
        graph.add_node(node("inner", Some("outer"), true));
        graph.add_node(node("a", Some("inner"), false));
        graph.add_node(node("b", Some("outer"), false));
        graph.add_node(node("loose", None, false));
        graph
    }

    #[test]
    fn builds_roots_leaves_and_children() {
        let tree = ClusterTree::build(&nested_graph()).unwrap();
        assert_eq!(tree.roots, vec!["outer"]);
        assert_eq!(tree.loose, vec!["loose"]);
        assert_eq!(tree.clusters["outer"].children, vec!["inner"]);
        assert_eq!(tree.clusters["outer"].nodes, vec!["b"]);
        assert_eq!(tree.clusters["inner"].nodes, vec!["a"]);
    }

    #[test]
    fn phantom_parent_still_gets_a_cluster() {
        let mut graph = Graph::new();
        graph.add_node(node("a", Some("ghost"), false));
        let tree = ClusterTree::build(&graph).unwrap();
        assert_eq!(tree.roots, vec!["ghost"]);
        assert_eq!(tree.clusters["ghost"].nodes, vec!["a"]);
    }

    #[test]
    fn representative_walks_to_direct_child() {
        let tree = ClusterTree::build(&nested_graph()).unwrap();
        assert_eq!(
            tree.representative_in("outer", "a").as_deref(),
            Some("inner")
        );
        assert_eq!(tree.representative_in("outer", "b").as_deref(), Some("b"));
        assert_eq!(tree.representative_in("inner", "a").as_deref(), Some("a"));
        assert_eq!(tree.representative_in("outer", "loose"), None);
    }

    #[test]
    fn root_item_resolution() {
        let tree = ClusterTree::build(&nested_graph()).unwrap();
        assert_eq!(tree.root_item_of("a"), "outer");
        assert_eq!(tree.root_item_of("b"), "outer");
        assert_eq!(tree.root_item_of("inner"), "outer");
        assert_eq!(tree.root_item_of("loose"), "loose");
    }

    #[test]
    fn cyclic_parent_chain_is_rejected() {
        let mut graph = Graph::new();
        graph.add_node(node("g1", Some("g2"), true));
        graph.add_node(node("g2", Some("g1"), true));
        let err = ClusterTree::build(&graph).unwrap_err();
        assert!(matches!(err, LayoutError::CyclicContainment { .. }));
    }
}
