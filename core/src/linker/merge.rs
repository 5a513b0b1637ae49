//! Context merging for ad-hoc expression input.

use tracing::debug;

use crate::syntax::{Import, ModuleId, Workspace};

/// Append a synthetic import from `target` to every other loaded module, in
/// load order, so an ad-hoc expression can call definitions declared
/// anywhere in the workspace without writing import clauses.
///
/// Only the target module's import list is touched. The merge is
/// intentionally blind to duplicates: name lookup takes the first match in
/// import order, so re-merging cannot change what a name resolves to.
///
/// Must complete before the target module's bodies are lowered or evaluated.
pub fn merge_context(workspace: &mut Workspace, target: ModuleId) {
    let siblings: Vec<ModuleId> = workspace.modules().filter(|&m| m != target).collect();
    debug!(
        module = %workspace.module(target).name,
        count = siblings.len(),
        "merging context modules into target"
    );
    for module in siblings {
        workspace.add_import(target, Import { module });
    }
}
