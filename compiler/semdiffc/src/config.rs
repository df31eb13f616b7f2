//! Driver configuration.

use std::path::PathBuf;

use semdiff_canon::{CanonOptions, PassSet};

/// Driver configuration. Built by the command line front end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Passes to run. Defaults to all of them.
    pub passes: PassSet,
    /// Only report whether the files differ.
    pub check_only: bool,
    /// Drop comments when emitting and tell the diff tool to ignore them.
    pub ignore_comments: bool,
    /// Diff the original texts before the canonical ones.
    pub diff_original: bool,
    /// Keep the emitted files here instead of only passing them along.
    pub output_directory: Option<PathBuf>,
}

impl Config {
    pub fn canon_options(&self) -> CanonOptions {
        CanonOptions::with_passes(self.passes)
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            check_only: self.check_only,
            ignore_comments: self.ignore_comments,
        }
    }
}

/// The part of [`Config`] a diff tool sees.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DiffOptions {
    pub check_only: bool,
    pub ignore_comments: bool,
}
