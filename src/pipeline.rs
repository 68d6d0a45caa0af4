//! Split pipeline.
//!
//! Runs the three stages in order: read the plan, prepare the output
//! directories, emit every resource change. The plan is fully read before
//! anything on disk is touched, so a bad input leaves the output directory
//! as it was.

use std::io::Read;
use std::path::PathBuf;
use tracing::info;

use crate::error::Result;
use crate::layout::{AddressMode, EmitReport, OutputLayout, RecordEmitter};
use crate::plan::PlanReader;

/// Default base output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "diff";

/// Settings for one split run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    /// Base output directory; `before` and `after` are created under it.
    pub output_dir: PathBuf,
    /// How addresses become file names.
    pub address_mode: AddressMode,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            address_mode: AddressMode::default(),
        }
    }
}

/// The read, prepare, emit pipeline.
#[derive(Debug)]
pub struct Pipeline {
    /// Plan reader.
    reader: PlanReader,
    /// Output layout.
    layout: OutputLayout,
    /// Address resolution policy.
    address_mode: AddressMode,
}

impl Pipeline {
    /// Creates a pipeline from a configuration.
    #[must_use]
    pub fn new(config: &SplitConfig) -> Self {
        Self {
            reader: PlanReader::new(),
            layout: OutputLayout::new(&config.output_dir),
            address_mode: config.address_mode,
        }
    }

    /// Returns the output layout.
    #[must_use]
    pub const fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Runs the pipeline over `input`.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage. Input errors leave the output
    /// directory untouched; later errors may leave it partially written.
    pub fn run(&self, input: impl Read) -> Result<EmitReport> {
        let plan = self.reader.read(input)?;

        self.layout.prepare()?;

        let report = RecordEmitter::new(&self.layout)
            .with_address_mode(self.address_mode)
            .emit(&plan)?;

        info!(
            "Split {} resource changes into {}",
            report.records.len(),
            self.layout.base_dir().display()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanSplitError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const PLAN: &str = r#"{
  "format_version": "1.2",
  "resource_changes": [
    {"address": "aws_instance.web", "change": {"actions": ["create"], "before": null, "after": {"id": "i-123", "tags": {"b": "2", "a": "1"}}}},
    {"address": "aws_s3_bucket.logs", "change": {"actions": ["delete"], "before": {"bucket": "logs"}, "after": null}},
    {"address": "aws_iam_role.app", "change": {"actions": ["update"], "before": {"name": "app", "max_session_duration": 3600}, "after": {"name": "app", "max_session_duration": 7200}}}
  ]
}"#;

    fn create_test_pipeline(mode: AddressMode) -> (Pipeline, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = SplitConfig {
            output_dir: temp_dir.path().join("diff"),
            address_mode: mode,
        };
        (Pipeline::new(&config), temp_dir)
    }

    fn snapshot(dir: &Path) -> Vec<(String, String)> {
        let mut files: Vec<(String, String)> = fs::read_dir(dir)
            .expect("read dir")
            .map(|entry| {
                let path = entry.expect("dir entry").path();
                let name = path
                    .file_name()
                    .expect("file name")
                    .to_string_lossy()
                    .into_owned();
                (name, fs::read_to_string(&path).expect("read file"))
            })
            .collect();
        files.sort();
        files
    }

    #[test]
    fn test_default_config() {
        let config = SplitConfig::default();
        assert_eq!(config.output_dir, Path::new("diff"));
        assert_eq!(config.address_mode, AddressMode::Sanitize);
    }

    #[test]
    fn test_one_file_per_entry_and_side() {
        let (pipeline, _temp) = create_test_pipeline(AddressMode::Sanitize);

        let report = pipeline.run(PLAN.as_bytes()).expect("run failed");

        assert_eq!(report.records.len(), 3);
        assert_eq!(snapshot(pipeline.layout().before_dir()).len(), 3);
        assert_eq!(snapshot(pipeline.layout().after_dir()).len(), 3);

        let before = fs::read_to_string(pipeline.layout().before_dir().join("aws_iam_role.app.json"))
            .expect("read before");
        let value: serde_json::Value = serde_json::from_str(&before).expect("valid json");
        assert_eq!(value["max_session_duration"], 3600);
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let (pipeline, _temp) = create_test_pipeline(AddressMode::Sanitize);

        pipeline.run(PLAN.as_bytes()).expect("first run failed");
        let first = (
            snapshot(pipeline.layout().before_dir()),
            snapshot(pipeline.layout().after_dir()),
        );
        pipeline.run(PLAN.as_bytes()).expect("second run failed");
        let second = (
            snapshot(pipeline.layout().before_dir()),
            snapshot(pipeline.layout().after_dir()),
        );

        assert_eq!(first, second);
    }

    #[test]
    fn test_stale_files_are_removed() {
        let (pipeline, _temp) = create_test_pipeline(AddressMode::Sanitize);
        pipeline.run(PLAN.as_bytes()).expect("first run failed");
        let stale = pipeline.layout().before_dir().join("old.json");
        fs::write(&stale, "{}").expect("write stale");

        pipeline.run(PLAN.as_bytes()).expect("second run failed");

        assert!(!stale.exists());
    }

    #[test]
    fn test_bad_input_leaves_directory_untouched() {
        let (pipeline, _temp) = create_test_pipeline(AddressMode::Sanitize);

        let err = pipeline.run(r#"{"no_changes": []}"#.as_bytes()).expect_err("must fail");
        assert!(matches!(err, PlanSplitError::Input(_)));
        assert!(!pipeline.layout().base_dir().exists());

        pipeline.run(PLAN.as_bytes()).expect("run failed");
        let err = pipeline.run("not json".as_bytes()).expect_err("must fail");
        assert!(matches!(err, PlanSplitError::Input(_)));
        assert_eq!(snapshot(pipeline.layout().after_dir()).len(), 3);
    }

    #[test]
    fn test_reject_mode_fails_on_nested_address() {
        let (pipeline, _temp) = create_test_pipeline(AddressMode::Reject);
        let input = r#"{"resource_changes":[
            {"address":"ok","change":{"before":null,"after":1}},
            {"address":"aws_s3_object.o[\"a/b\"]","change":{"before":null,"after":2}}
        ]}"#;

        let err = pipeline.run(input.as_bytes()).expect_err("must fail");

        assert_eq!(err.entry_index(), Some(1));
        assert!(pipeline.layout().after_dir().join("ok.json").exists());
    }
}
