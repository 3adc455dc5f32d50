//! Direct-subclass inspection of changed source files
//!
//! Looks at one file and reports the classes that list the configured
//! workflow base class among their immediate bases.

use crate::analysis::python::{self, node_kinds};
use crate::core::error::{TriageError, TriageResult};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tree_sitter::Node;

/// Two-phase inspector: `inspect()` parses and records, `report()` reads.
///
/// `report()` returns an error until `inspect()` has run, so a caller can
/// never observe a stale or empty result by calling out of order.
pub struct InheritanceInspector {
  path: PathBuf,
  base_class: String,
  classes: Option<HashSet<String>>,
}

impl InheritanceInspector {
  pub fn new(path: impl Into<PathBuf>, base_class: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      base_class: base_class.into(),
      classes: None,
    }
  }

  /// Parse the file and record every class that directly subclasses the
  /// configured base.
  ///
  /// Re-running replaces the recorded set with an identical one; the file
  /// itself is never mutated.
  pub fn inspect(&mut self) -> TriageResult<()> {
    let source = fs::read_to_string(&self.path)
      .map_err(|e| TriageError::message(format!("Failed to read changed file {}: {}", self.path.display(), e)))?;
    let tree = python::parse_module(&source, &self.path)?;
    self.classes = Some(direct_subclasses(tree.root_node(), &source, &self.base_class));
    Ok(())
  }

  /// The class names recorded by `inspect()`.
  pub fn report(&self) -> TriageResult<&HashSet<String>> {
    self
      .classes
      .as_ref()
      .ok_or_else(|| TriageError::Usage("InheritanceInspector::report() called before inspect()".to_string()))
  }
}

/// Every class definition whose immediate superclass list names
/// `base_class` as a bare identifier.
///
/// Only the `class X(Base):` shape counts, with `Base` in scope as a plain
/// name. Attribute references (`module.Base`), call expressions
/// (`make_base()`), and keyword arguments (`metaclass=...`) in the class
/// head never match.
fn direct_subclasses(root: Node<'_>, source: &str, base_class: &str) -> HashSet<String> {
  let mut classes = HashSet::new();

  for class_def in python::descendants_by_kind(root, node_kinds::CLASS_DEF) {
    let Some(name) = class_def.child_by_field_name("name") else {
      continue;
    };
    let Some(superclasses) = class_def.child_by_field_name("superclasses") else {
      continue;
    };

    let mut cursor = superclasses.walk();
    for base in superclasses.named_children(&mut cursor) {
      if base.kind() == node_kinds::IDENTIFIER && python::node_text(base, source) == base_class {
        classes.insert(python::node_text(name, source).to_string());
      }
    }
  }

  classes
}
