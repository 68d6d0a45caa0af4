//! Record emitter writing before/after documents to disk.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::value::RawValue;
use tracing::{debug, info};

use crate::error::{FsOperation, PlanSplitError, Result};
use crate::plan::{ChangeKind, Plan, ResourceChange};

use super::address::AddressMode;
use super::dirs::OutputLayout;
use super::indent::reindent;

/// Writes every resource change of a plan into an [`OutputLayout`].
#[derive(Debug)]
pub struct RecordEmitter<'a> {
    /// Target layout, already prepared.
    layout: &'a OutputLayout,
    /// Address resolution policy.
    address_mode: AddressMode,
}

/// One resource change written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedRecord {
    /// Position in `resource_changes`.
    pub index: usize,
    /// Address as found in the plan.
    pub address: String,
    /// File path relative to the `before`/`after` directories.
    pub file: PathBuf,
    /// Change kind derived from the before/after pair.
    pub kind: ChangeKind,
}

/// Summary of an emit run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmitReport {
    /// Base output directory.
    pub output_dir: PathBuf,
    /// Records in the order they were written.
    pub records: Vec<EmittedRecord>,
    /// Number of distinct files on disk, both sides counted. Entries sharing
    /// an address overwrite each other and count once.
    pub files_written: usize,
}

impl EmitReport {
    /// Returns the number of records of the given kind.
    #[must_use]
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.records.iter().filter(|r| r.kind == kind).count()
    }

    /// Returns true if no record was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> RecordEmitter<'a> {
    /// Creates an emitter writing into `layout`.
    #[must_use]
    pub const fn new(layout: &'a OutputLayout) -> Self {
        Self {
            layout,
            address_mode: AddressMode::Sanitize,
        }
    }

    /// Sets the address resolution policy.
    #[must_use]
    pub const fn with_address_mode(mut self, address_mode: AddressMode) -> Self {
        self.address_mode = address_mode;
        self
    }

    /// Emits every entry of `plan` in input order.
    ///
    /// Stops at the first failure. Files written for earlier entries are
    /// left in place.
    ///
    /// # Errors
    ///
    /// Returns a decode error for a malformed entry or unusable address, and
    /// a filesystem error if a file cannot be written.
    pub fn emit(&self, plan: &Plan) -> Result<EmitReport> {
        let mut report = EmitReport {
            output_dir: self.layout.base_dir().to_path_buf(),
            ..EmitReport::default()
        };

        let mut files = BTreeSet::new();
        for (index, raw) in plan.entries() {
            let change = ResourceChange::decode(index, raw)?;
            let record = self.emit_one(index, &change)?;
            files.insert(record.file.clone());
            report.records.push(record);
        }
        report.files_written = files.len() * 2;

        info!(
            "Wrote {} files for {} resource changes",
            report.files_written,
            report.records.len()
        );
        Ok(report)
    }

    /// Writes the before and after documents of one entry.
    ///
    /// # Errors
    ///
    /// Returns a decode error if the address is unusable, or a filesystem
    /// error if either file cannot be written.
    pub fn emit_one(&self, index: usize, change: &ResourceChange) -> Result<EmittedRecord> {
        let file = self.address_mode.resolve(index, &change.address)?;
        debug!("Emitting {} as {}", change.address, file.display());

        write_document(&self.layout.before_dir().join(&file), change.change.before.as_deref())?;
        write_document(&self.layout.after_dir().join(&file), change.change.after.as_deref())?;

        Ok(EmittedRecord {
            index,
            address: change.address.clone(),
            file,
            kind: change.kind(),
        })
    }
}

/// Writes `document` to `path` as two-space indented JSON with a trailing
/// newline; `None` is written as `null`. The document text is re-indented
/// only, never re-encoded. Missing parent directories are created.
///
/// # Errors
///
/// Returns a filesystem error if the file or its parent cannot be created
/// or written.
pub fn write_document(path: &Path, document: Option<&RawValue>) -> Result<()> {
    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && !p.is_dir())
    {
        fs::create_dir_all(parent)
            .map_err(|e| PlanSplitError::fs(FsOperation::CreateDir, parent, e))?;
    }

    let content = reindent(document.map_or("null", RawValue::get));

    let file = File::create(path).map_err(|e| PlanSplitError::fs(FsOperation::CreateFile, path, e))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(content.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .and_then(|()| writer.flush())
        .map_err(|e| PlanSplitError::fs(FsOperation::WriteFile, path, e))
}
