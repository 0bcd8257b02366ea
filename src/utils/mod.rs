// Utilities Module
//
// Source discovery helpers used by the batch entry points and the Python bindings.

/// Path discovery and conversion (directories + explicit files → Python sources)
pub mod paths;

/// File ignore pattern utilities (.pymodelignore support)
pub mod ignore;

pub use paths::{collect_python_files, to_relative_unix_style};
