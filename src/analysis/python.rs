//! Tree-sitter plumbing for Python source
//!
//! The inspector and scanner only need a handful of traversal primitives
//! over the parsed tree. The grammar is error-tolerant, so a tree
//! containing error nodes is rejected here rather than analyzed
//! optimistically.

use crate::core::error::{ParseFailure, TriageError, TriageResult};
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Python node kinds the analysis dispatches on
pub mod node_kinds {
  pub const CLASS_DEF: &str = "class_definition";
  pub const IMPORT_FROM: &str = "import_from_statement";
  pub const ALIASED_IMPORT: &str = "aliased_import";
  pub const IDENTIFIER: &str = "identifier";
}

/// Parse a module, rejecting trees that contain syntax errors.
///
/// `path` is only used for error reporting; the source text is read by the
/// caller.
pub fn parse_module(source: &str, path: &Path) -> TriageResult<Tree> {
  let mut parser = Parser::new();
  parser
    .set_language(&tree_sitter_python::language())
    .map_err(|e| TriageError::message(format!("Failed to load Python grammar: {}", e)))?;

  let tree = parser.parse(source, None).ok_or_else(|| {
    TriageError::Parse(ParseFailure {
      path: path.to_path_buf(),
      detail: "parser produced no tree".to_string(),
    })
  })?;

  if tree.root_node().has_error() {
    return Err(TriageError::Parse(ParseFailure {
      path: path.to_path_buf(),
      detail: "source contains syntax errors".to_string(),
    }));
  }

  Ok(tree)
}

/// Collect every descendant of `node` with the given kind (depth-first).
///
/// Recurses through nested bodies, so a class defined inside another class
/// or function is still visited.
pub fn descendants_by_kind<'a>(node: Node<'a>, kind: &str) -> Vec<Node<'a>> {
  let mut result = Vec::new();
  let mut stack = vec![node];
  while let Some(current) = stack.pop() {
    if current.kind() == kind {
      result.push(current);
    }
    for i in (0..current.child_count()).rev() {
      if let Some(child) = current.child(i) {
        stack.push(child);
      }
    }
  }
  result
}

/// Text content of a node within its source.
pub fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
  &source[node.start_byte()..node.end_byte()]
}
