//! Static analysis over Python source
//!
//! Two deliberately narrow visitors (subclass inspection and import
//! scanning) plus the selection pass that drives them over a changed-file
//! set and a test corpus. Analysis is purely lexical/syntactic: no name
//! resolution, no type checking.

pub mod inspector;
pub mod python;
pub mod scanner;
pub mod selection;

pub use inspector::InheritanceInspector;
pub use scanner::scan_imports;
pub use selection::{ImpactSet, Locator, SelectionAnalysis, analyze};
