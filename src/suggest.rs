//! Package name suggestions for unknown names

use crate::registry::RegistryClient;
use tracing::debug;

/// Most likely intended name for an unknown package
///
/// The first search result that differs from `name` itself.
pub async fn suggest_name(registry: &dyn RegistryClient, name: &str) -> Option<String> {
    let candidates = registry.find_similar_packages(name).await;
    let suggestion = candidates.into_iter().find(|candidate| candidate != name);
    debug!(package = name, suggestion = ?suggestion, "name suggestion");
    suggestion
}
