//! # Tesseract CLI Engine
//!
//! Each worker owns a private temporary directory. The image is written there,
//! `tesseract <image> stdout -l <lang> tsv` is run with that directory as its
//! working directory, and the TSV report is folded back into line text and a
//! mean word confidence. Terminating the worker removes the directory.

use crate::{
    engine::{OcrEngine, OcrWorker, Recognition},
    errors::OcrError,
};
use async_trait::async_trait;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Stdio,
};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, warn};

/// TSV row level for a single word.
const WORD_LEVEL: u32 = 5;

#[derive(Debug, Clone)]
pub struct TesseractEngine {
    binary: PathBuf,
}

impl TesseractEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Creates a concrete worker with its own working directory.
    pub fn spawn_worker(&self, language: &str) -> Result<TesseractWorker, OcrError> {
        let workdir = tempfile::Builder::new()
            .prefix("repostly-ocr-")
            .tempdir()?;
        debug!(path = %workdir.path().display(), "Created OCR worker directory");
        Ok(TesseractWorker {
            binary: self.binary.clone(),
            language: language.to_string(),
            workdir,
            runs: 0,
        })
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

#[async_trait]
impl OcrEngine for TesseractEngine {
    async fn create_worker(&self, language: &str) -> Result<Box<dyn OcrWorker>, OcrError> {
        Ok(Box::new(self.spawn_worker(language)?))
    }
}

#[derive(Debug)]
pub struct TesseractWorker {
    binary: PathBuf,
    language: String,
    workdir: TempDir,
    runs: u32,
}

impl TesseractWorker {
    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }
}

#[async_trait]
impl OcrWorker for TesseractWorker {
    async fn recognize(&mut self, image: &[u8]) -> Result<Recognition, OcrError> {
        self.runs += 1;
        let input = self.workdir.path().join(format!("input-{}.img", self.runs));
        tokio::fs::write(&input, image).await?;

        let output = Command::new(&self.binary)
            .arg(&input)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("tsv")
            .current_dir(self.workdir.path())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => OcrError::EngineUnavailable {
                    path: self.binary.clone(),
                    source: e,
                },
                _ => OcrError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("tesseract failed for {}: {}", input.display(), stderr.trim());
            return Err(OcrError::Recognition(format!(
                "tesseract exited with {}",
                output.status
            )));
        }

        Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
    }

    fn terminate(self: Box<Self>) -> Result<(), OcrError> {
        let path = self.workdir.path().to_path_buf();
        self.workdir.close()?;
        debug!(path = %path.display(), "Removed OCR worker directory");
        Ok(())
    }
}

/// Folds a Tesseract TSV report into text and a mean word confidence.
///
/// Words are joined with spaces within a line and lines with newlines, in
/// report order. Rows that are not words, have a negative confidence or
/// carry no text are skipped. Unparseable rows are ignored.
pub fn parse_tsv(tsv: &str) -> Recognition {
    let mut lines: Vec<String> = Vec::new();
    let mut current_key: Option<(u32, u32, u32, u32)> = None;
    let mut confidence_sum = 0f32;
    let mut words = 0u32;

    for row in tsv.lines().skip_while(|l| l.starts_with("level")) {
        let cols: Vec<&str> = row.splitn(12, '\t').collect();
        if cols.len() < 12 {
            continue;
        }
        let Some(nums) = cols[..6]
            .iter()
            .map(|c| c.trim().parse::<u32>().ok())
            .collect::<Option<Vec<u32>>>()
        else {
            continue;
        };
        if nums[0] != WORD_LEVEL {
            continue;
        }
        let Ok(conf) = cols[10].trim().parse::<f32>() else {
            continue;
        };
        let word = cols[11].trim();
        if conf < 0.0 || word.is_empty() {
            continue;
        }

        let key = (nums[1], nums[2], nums[3], nums[4]);
        match lines.last_mut() {
            Some(line) if current_key == Some(key) => {
                line.push(' ');
                line.push_str(word);
            }
            _ => {
                lines.push(word.to_string());
                current_key = Some(key);
            }
        }
        confidence_sum += conf;
        words += 1;
    }

    Recognition {
        text: lines.join("\n"),
        confidence: if words == 0 {
            0.0
        } else {
            confidence_sum / words as f32
        },
    }
}
