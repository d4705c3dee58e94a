use crate::foundation::error::{ReelError, ReelResult};
use crate::record::grid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::Path;

/// A complete, immutable sequence of text frames for one subject.
///
/// Records are created in one pass by [`crate::capture::pipeline::generate`] or loaded whole from
/// storage. Nothing mutates a record after construction; derived records (such as
/// [`AnimationRecord::trimmed`]) are new values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationRecord {
    subject_id: String,
    frames: Vec<String>,
    generated_at: Option<DateTime<Utc>>,
}

/// JSON boundary shape. `num_frames` is authoritative on input.
///
/// Older generators keyed the subject as `ship_name`; both keys are accepted.
#[derive(Debug, Deserialize)]
struct RecordDef {
    #[serde(alias = "ship_name")]
    subject_name: String,
    num_frames: usize,
    frames: Vec<String>,
    #[serde(default)]
    generated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct RecordDefRef<'a> {
    subject_name: &'a str,
    num_frames: usize,
    frames: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<&'a DateTime<Utc>>,
}

impl AnimationRecord {
    /// Create a record from at least one frame.
    pub fn new(subject_id: impl Into<String>, frames: Vec<String>) -> ReelResult<Self> {
        if frames.is_empty() {
            return Err(ReelError::validation(
                "animation record must contain at least one frame",
            ));
        }
        Ok(Self {
            subject_id: subject_id.into(),
            frames,
            generated_at: None,
        })
    }

    /// Attach a provenance timestamp.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Number of frames; always `>= 1`.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn frame(&self, idx: usize) -> Option<&str> {
        self.frames.get(idx).map(String::as_str)
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    /// `(rows, columns)` of the largest non-empty frame, or `None` if every frame is empty.
    pub fn grid_size(&self) -> Option<(usize, usize)> {
        grid::max_dims(&self.frames)
    }

    /// Return `true` when every non-empty frame has the same row count and every row the same width.
    pub fn is_rectangular(&self) -> bool {
        grid::is_rectangular(&self.frames)
    }

    /// Indices of frames stored as explicit empty strings.
    pub fn empty_frames(&self) -> Vec<usize> {
        self.frames
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Remove `top` rows and `bottom` rows from every frame.
    ///
    /// Frames with `top + bottom` rows or fewer become empty.
    pub fn trimmed(&self, top: usize, bottom: usize) -> Self {
        Self {
            subject_id: self.subject_id.clone(),
            frames: self
                .frames
                .iter()
                .map(|f| grid::trim_frame(f, top, bottom))
                .collect(),
            generated_at: self.generated_at,
        }
    }

    /// Parse a record from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let def: RecordDef = serde_json::from_reader(r)
            .map_err(|e| ReelError::serde(format!("parse animation record JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse a record from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> ReelResult<Self> {
        let def: RecordDef = serde_json::from_slice(bytes)
            .map_err(|e| ReelError::serde(format!("parse animation record JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse a record from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::record_load(path.display().to_string(), format!("open: {e}"))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_writer_pretty<W: std::io::Write>(&self, w: W) -> ReelResult<()> {
        serde_json::to_writer_pretty(w, &self.as_def())
            .map_err(|e| ReelError::serde(format!("write animation record JSON: {e}")))
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> ReelResult<String> {
        serde_json::to_string_pretty(&self.as_def())
            .map_err(|e| ReelError::serde(format!("write animation record JSON: {e}")))
    }

    /// Write the record to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> ReelResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("create output dir '{}': {e}", parent.display())
            })?;
        }
        let f = File::create(path)
            .map_err(|e| anyhow::anyhow!("create record file '{}': {e}", path.display()))?;
        let mut w = BufWriter::new(f);
        self.to_writer_pretty(&mut w)?;
        w.flush()
            .map_err(|e| anyhow::anyhow!("flush record file '{}': {e}", path.display()))?;
        Ok(())
    }

    fn as_def(&self) -> RecordDefRef<'_> {
        RecordDefRef {
            subject_name: &self.subject_id,
            num_frames: self.frames.len(),
            frames: &self.frames,
            generated_at: self.generated_at.as_ref(),
        }
    }

    fn from_def(def: RecordDef) -> ReelResult<Self> {
        if def.num_frames == 0 {
            return Err(ReelError::corrupt(format!(
                "record '{}' declares zero frames",
                def.subject_name
            )));
        }
        if def.num_frames != def.frames.len() {
            return Err(ReelError::corrupt(format!(
                "record '{}' declares {} frames but contains {}",
                def.subject_name,
                def.num_frames,
                def.frames.len()
            )));
        }
        Ok(Self {
            subject_id: def.subject_name,
            frames: def.frames,
            generated_at: def.generated_at,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/model.rs"]
mod tests;
