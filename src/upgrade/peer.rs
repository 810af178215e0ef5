//! Peer requirement checks across the installed tree

use crate::domain::PeerConflict;
use crate::tree::DependencyNode;
use crate::version;
use std::collections::HashSet;

/// Nodes whose peer requirement on `package` rejects `new_version`
///
/// Each node identity is visited once, so shared subtrees and cycles are safe.
pub fn find_peer_conflicts(
    tree: &DependencyNode,
    package: &str,
    new_version: &str,
) -> Vec<PeerConflict> {
    let mut conflicts = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![tree];

    while let Some(node) = stack.pop() {
        if !visited.insert(node.identity()) {
            continue;
        }

        if let Some(required) = node.peer_dependencies.get(package) {
            if !version::satisfies(new_version, required) {
                conflicts.push(PeerConflict {
                    package: node.display_name().to_string(),
                    required: required.clone(),
                    actual: new_version.to_string(),
                });
            }
        }

        // Reverse so children are visited in map order
        stack.extend(node.dependencies.values().rev());
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> DependencyNode {
        DependencyNode::new("app", "1.0.0")
            .with_child(DependencyNode::new("plugin-a", "1.0.0").with_peer("x", "^3.0.0"))
            .with_child(
                DependencyNode::new("plugin-b", "2.0.0")
                    .with_peer("x", ">=3.0.0")
                    .with_child(DependencyNode::new("plugin-c", "1.0.0").with_peer("x", "~3.1.0")),
            )
    }

    #[test]
    fn test_conflict_detected() {
        let conflicts = find_peer_conflicts(&tree(), "x", "4.0.0");
        assert_eq!(
            conflicts,
            vec![
                PeerConflict {
                    package: "plugin-a".to_string(),
                    required: "^3.0.0".to_string(),
                    actual: "4.0.0".to_string(),
                },
                PeerConflict {
                    package: "plugin-c".to_string(),
                    required: "~3.1.0".to_string(),
                    actual: "4.0.0".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_satisfied_requirements() {
        assert!(find_peer_conflicts(&tree(), "x", "3.1.5").is_empty());
    }

    #[test]
    fn test_unrelated_package() {
        assert!(find_peer_conflicts(&tree(), "y", "9.0.0").is_empty());
    }

    #[test]
    fn test_duplicate_identity_visited_once() {
        let shared = DependencyNode::new("plugin", "1.0.0")
            .with_path("/app/node_modules/plugin")
            .with_peer("x", "^3.0.0");
        let mut root = DependencyNode::new("app", "1.0.0");
        root.dependencies.insert("plugin".to_string(), shared.clone());
        let mut wrapper = DependencyNode::new("wrapper", "1.0.0");
        wrapper.dependencies.insert("plugin".to_string(), shared);
        root = root.with_child(wrapper);

        let conflicts = find_peer_conflicts(&root, "x", "4.0.0");
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn test_root_peer_requirements_checked() {
        let root = DependencyNode::new("lib", "1.0.0").with_peer("react", "^17.0.0");
        let conflicts = find_peer_conflicts(&root, "react", "18.2.0");
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].package, "lib");
    }
}
