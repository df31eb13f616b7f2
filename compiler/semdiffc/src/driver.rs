//! Sequencing of one before/after comparison.

use std::path::{Path, PathBuf};

use semdiff_canon::canonicalize;
use semdiff_ir::{validate_unique_ids, NodeRef};
use semdiff_types::TypeModel;

use crate::{
    Config, DiffInput, DiffOutcome, DiffTool, DriverError, Emitter, Source, SourceParser,
    TypeModelSource, Untyped,
};

/// Prefix of emitted files kept in [`Config::output_directory`].
pub const EMITTED_PREFIX: &str = "unparsed_";

/// Result of one comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Diff of the original texts, when [`Config::diff_original`] is set.
    pub original: Option<DiffOutcome>,
    /// Diff of the canonical texts.
    pub canonical: DiffOutcome,
    /// Emitted canonical texts, before then after.
    pub emitted: (String, String),
}

/// Canonicalizes two versions of a file and diffs them.
pub struct Driver<'t> {
    parser: &'t dyn SourceParser,
    emitter: &'t dyn Emitter,
    diff_tool: &'t dyn DiffTool,
    types: &'t dyn TypeModelSource,
    config: Config,
}

impl<'t> Driver<'t> {
    /// A driver without type information and the default configuration.
    pub fn new(
        parser: &'t dyn SourceParser,
        emitter: &'t dyn Emitter,
        diff_tool: &'t dyn DiffTool,
    ) -> Self {
        Driver {
            parser,
            emitter,
            diff_tool,
            types: &Untyped,
            config: Config::default(),
        }
    }

    #[must_use]
    pub fn with_types(mut self, types: &'t dyn TypeModelSource) -> Self {
        self.types = types;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compare `before` with `after`.
    ///
    /// Both files are parsed up front, the type model is built once for
    /// both, then each file is canonicalized and emitted in turn. Nothing
    /// is diffed until both files made it through.
    #[tracing::instrument(level = "debug", skip_all, fields(before = %before.name, after = %after.name))]
    pub fn run(&self, before: &Source, after: &Source) -> Result<Report, DriverError> {
        let options = self.config.diff_options();

        let parsed_before = self.parse(before)?;
        let parsed_after = self.parse(after)?;

        let model = self
            .types
            .load(&[before, after])
            .map_err(DriverError::TypeModel)?;
        tracing::debug!(typed = model.is_some(), "type model loaded");

        let emitted_before = self.canonical_text(before, &parsed_before, model.as_ref())?;
        let emitted_after = self.canonical_text(after, &parsed_after, model.as_ref())?;

        let paths = match &self.config.output_directory {
            Some(dir) => Some((
                write_emitted(dir, before, &emitted_before)?,
                write_emitted(dir, after, &emitted_after)?,
            )),
            None => None,
        };
        let (path_before, path_after) = match &paths {
            Some((b, a)) => (Some(b.as_path()), Some(a.as_path())),
            None => (None, None),
        };

        let original = if self.config.diff_original {
            let outcome = self
                .diff_tool
                .diff(input(before, &before.text, None), input(after, &after.text, None), &options)
                .map_err(DriverError::Diff)?;
            Some(outcome)
        } else {
            None
        };

        let canonical = self
            .diff_tool
            .diff(
                input(before, &emitted_before, path_before),
                input(after, &emitted_after, path_after),
                &options,
            )
            .map_err(DriverError::Diff)?;
        tracing::debug!(changed = canonical.changed, "diff complete");

        Ok(Report {
            original,
            canonical,
            emitted: (emitted_before, emitted_after),
        })
    }

    fn parse(&self, source: &Source) -> Result<NodeRef, DriverError> {
        let parsed = self.parser.parse(source).map_err(|source_err| DriverError::Parse {
            file: source.name.clone(),
            source: source_err,
        })?;
        validate_unique_ids(&parsed.root).map_err(|dup| DriverError::DuplicateId {
            file: source.name.clone(),
            source: dup,
        })?;
        Ok(parsed.root)
    }

    fn canonical_text(
        &self,
        source: &Source,
        root: &NodeRef,
        model: Option<&TypeModel>,
    ) -> Result<String, DriverError> {
        let canonical = canonicalize(root, model, &self.config.canon_options()).map_err(|err| {
            DriverError::Canon {
                file: source.name.clone(),
                source: err,
            }
        })?;
        tracing::trace!(file = %source.name, tree = %canonical.root, "canonical");
        self.emitter
            .emit(&canonical.root, source, !self.config.ignore_comments)
            .map_err(|err| DriverError::Emit {
                file: source.name.clone(),
                source: err,
            })
    }
}

fn input<'a>(source: &'a Source, text: &'a str, path: Option<&'a Path>) -> DiffInput<'a> {
    DiffInput {
        name: &source.name,
        text,
        path,
    }
}

/// Write `text` to `dir/unparsed_<name>`, creating `dir` if needed.
fn write_emitted(dir: &Path, source: &Source, text: &str) -> Result<PathBuf, DriverError> {
    let file_name = Path::new(&source.name)
        .file_name()
        .map_or_else(|| source.name.clone(), |n| n.to_string_lossy().into_owned());
    let path = dir.join(format!("{EMITTED_PREFIX}{file_name}"));
    std::fs::create_dir_all(dir)
        .and_then(|()| std::fs::write(&path, text))
        .map_err(|source| DriverError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}
