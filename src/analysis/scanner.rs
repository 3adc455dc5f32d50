//! Import scanning over candidate test files

use crate::analysis::python::{self, node_kinds};
use crate::core::error::TriageResult;
use std::collections::HashSet;
use std::path::Path;

/// True iff the module imports any target name via `from module import name`.
///
/// Matching is on the original imported symbol, never a local alias
/// (`from m import X as Y` matches on `X`), the same bare-name limitation
/// the inspector applies to base classes. Plain `import module` statements
/// and wildcard imports never match. The scan completes the full traversal
/// and is idempotent.
pub fn scan_imports(path: &Path, source: &str, targets: &HashSet<String>) -> TriageResult<bool> {
  let tree = python::parse_module(source, path)?;
  let mut contains_target = false;

  for statement in python::descendants_by_kind(tree.root_node(), node_kinds::IMPORT_FROM) {
    let mut cursor = statement.walk();
    for name in statement.children_by_field_name("name", &mut cursor) {
      let imported = match name.kind() {
        // `from m import X as Y`: the original name sits in the `name`
        // field of the aliased_import node.
        node_kinds::ALIASED_IMPORT => name.child_by_field_name("name"),
        _ => Some(name),
      };
      if let Some(imported) = imported
        && targets.contains(python::node_text(imported, source))
      {
        contains_target = true;
      }
    }
  }

  Ok(contains_target)
}
