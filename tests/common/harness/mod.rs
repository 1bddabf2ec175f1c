//! Test harness for CLI integration tests.
//!
//! Provides isolated test environments, tagged document fixtures,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod document;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::ExporteerCommand;
#[allow(unused_imports)]
pub use document::TestDocument;
#[allow(unused_imports)]
pub use env::TestEnv;
