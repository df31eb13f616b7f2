//! Contracts with the external tools the driver sequences.

use std::path::Path;

use semdiff_ir::NodeRef;
use semdiff_types::TypeModel;

use crate::DiffOptions;

/// Error type of the external tools.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One version of a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    /// File name, used in reports and to name emitted files.
    pub name: String,
    pub text: String,
}

impl Source {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Source {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A parsed file.
#[derive(Clone, Debug)]
pub struct Parsed {
    /// Program root. Every node reachable from it has a distinct identity.
    pub root: NodeRef,
}

/// Source text to tree.
///
/// Operator-assignment desugaring (`a += 1` to `a = a + 1`) is the
/// parser's job; the passes only see the desugared form.
pub trait SourceParser {
    fn parse(&self, source: &Source) -> Result<Parsed, BoxError>;
}

/// Tree back to source text.
pub trait Emitter {
    /// `comments` is false when the diff ignores comments, so the emitter
    /// can skip carrying them over.
    fn emit(&self, root: &NodeRef, source: &Source, comments: bool) -> Result<String, BoxError>;
}

/// Where the type model comes from: doc-comment annotations or signature
/// files.
pub trait TypeModelSource {
    /// Build the model for `sources`. `None` means no type information is
    /// available, and the typed passes are skipped.
    fn load(&self, sources: &[&Source]) -> Result<Option<TypeModel>, BoxError>;
}

/// No type information.
#[derive(Copy, Clone, Debug, Default)]
pub struct Untyped;

impl TypeModelSource for Untyped {
    fn load(&self, _sources: &[&Source]) -> Result<Option<TypeModel>, BoxError> {
        Ok(None)
    }
}

/// A model built ahead of time.
impl TypeModelSource for TypeModel {
    fn load(&self, _sources: &[&Source]) -> Result<Option<TypeModel>, BoxError> {
        Ok(Some(self.clone()))
    }
}

/// One side of a diff.
#[derive(Copy, Clone, Debug)]
pub struct DiffInput<'a> {
    pub name: &'a str,
    pub text: &'a str,
    /// Set when the text was also written to disk.
    pub path: Option<&'a Path>,
}

/// What the diff tool found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffOutcome {
    pub changed: bool,
    /// The tool's rendering of the changes. Empty in check-only mode.
    pub output: String,
}

/// A textual or structural diff tool.
pub trait DiffTool {
    fn diff(
        &self,
        before: DiffInput<'_>,
        after: DiffInput<'_>,
        options: &DiffOptions,
    ) -> Result<DiffOutcome, BoxError>;
}
