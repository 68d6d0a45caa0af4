//! Plan reader for loading the change plan from a byte stream.

use std::io::Read;
use tracing::{debug, info};

use crate::error::{InputError, Result};

use super::types::Plan;

/// Reads and decodes a plan document.
#[derive(Debug, Default)]
pub struct PlanReader;

impl PlanReader {
    /// Creates a new plan reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reads the whole stream and parses it as a plan.
    ///
    /// # Errors
    ///
    /// Returns an input error if the stream cannot be read, is not valid
    /// JSON, or has no `resource_changes` array.
    pub fn read(&self, mut input: impl Read) -> Result<Plan> {
        let mut content = String::new();
        input
            .read_to_string(&mut content)
            .map_err(|source| InputError::Read { source })?;

        debug!("Read {} bytes of plan input", content.len());
        self.parse_str(&content)
    }

    /// Parses a plan from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an input error if the JSON is invalid or has the wrong shape.
    pub fn parse_str(&self, content: &str) -> Result<Plan> {
        let plan: Plan =
            serde_json::from_str(content).map_err(|source| InputError::Parse { source })?;

        info!("Loaded plan with {} resource changes", plan.len());
        Ok(plan)
    }
}
