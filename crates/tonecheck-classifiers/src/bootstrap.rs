//! One-time acquisition of model and tokenizer files
//!
//! A [`ModelResources`] resolves its source to a local directory the first
//! time [`ModelResources::ensure_available`] runs and hands back the cached
//! directory on every later call. Hub sources are fetched through `hf-hub`,
//! which reuses its own on-disk cache across processes.

use crate::model_config::ModelSource;
use hf_hub::{api::sync::Api, Repo, RepoType};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::sync::OnceCell;
use tonecheck_core::{Error, Result};

/// Tokenizer files, in order of preference
pub const TOKENIZER_FILES: [&str; 2] = ["tokenizer.json", "vocab.txt"];

/// Weight files, in order of preference
pub const WEIGHT_FILES: [&str; 2] = ["model.safetensors", "pytorch_model.bin"];

/// Model architecture description
pub const CONFIG_FILE: &str = "config.json";

/// Lazily resolved model directory
pub struct ModelResources {
    source: ModelSource,
    dir: OnceCell<PathBuf>,
}

impl ModelResources {
    pub fn new(source: ModelSource) -> Self {
        Self {
            source,
            dir: OnceCell::new(),
        }
    }

    /// Process-wide resources for the default FinBERT tone model
    pub fn finbert() -> &'static ModelResources {
        static FINBERT: OnceLock<ModelResources> = OnceLock::new();
        FINBERT.get_or_init(|| ModelResources::new(ModelSource::default()))
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    /// Whether a previous call already resolved the directory
    pub fn is_ready(&self) -> bool {
        self.dir.initialized()
    }

    /// Make sure model files are present locally and return their directory.
    ///
    /// Safe to call any number of times; only the first successful call does
    /// work. A failed attempt leaves the cell empty so a later call retries.
    pub async fn ensure_available(&self) -> Result<&Path> {
        let dir = self
            .dir
            .get_or_try_init(|| self.resolve())
            .await?;
        Ok(dir.as_path())
    }

    async fn resolve(&self) -> Result<PathBuf> {
        match &self.source {
            ModelSource::Local { path } => {
                if !path.is_dir() {
                    return Err(Error::missing_dependency(format!(
                        "Model directory does not exist: {}",
                        path.display()
                    )));
                }
                verify_layout(path)?;
                tracing::info!("Using local model files at {}", path.display());
                Ok(path.clone())
            }
            ModelSource::HuggingFace { repo, revision } => {
                let repo = repo.clone();
                let revision = revision.clone();
                tokio::task::spawn_blocking(move || download_from_huggingface(&repo, &revision))
                    .await
                    .map_err(|e| Error::classifier(format!("Download task failed: {}", e)))?
            }
        }
    }
}

/// Check that a directory holds a tokenizer, weights, and a model config
pub fn verify_layout(dir: &Path) -> Result<()> {
    find_first(dir, &TOKENIZER_FILES).ok_or_else(|| {
        Error::missing_dependency(format!(
            "No tokenizer found in {} (tried {})",
            dir.display(),
            TOKENIZER_FILES.join(", ")
        ))
    })?;

    find_first(dir, &WEIGHT_FILES).ok_or_else(|| {
        Error::missing_dependency(format!(
            "No model weights found in {} (tried {})",
            dir.display(),
            WEIGHT_FILES.join(", ")
        ))
    })?;

    if !dir.join(CONFIG_FILE).exists() {
        return Err(Error::missing_dependency(format!(
            "{} not found in {}",
            CONFIG_FILE,
            dir.display()
        )));
    }

    Ok(())
}

/// First of `candidates` that exists in `dir`
pub fn find_first(dir: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

fn download_from_huggingface(repo: &str, revision: &str) -> Result<PathBuf> {
    tracing::info!("Fetching model from HuggingFace: {}@{}", repo, revision);

    let api = Api::new()
        .map_err(|e| Error::missing_dependency(format!("Failed to initialize HuggingFace API: {}", e)))?;

    let repo_obj = api.repo(Repo::with_revision(
        repo.to_string(),
        RepoType::Model,
        revision.to_string(),
    ));

    let config_path = repo_obj.get(CONFIG_FILE).map_err(|e| {
        Error::missing_dependency(format!("Failed to download {}: {}", CONFIG_FILE, e))
    })?;

    let tokenizer = TOKENIZER_FILES.iter().find(|file| match repo_obj.get(file) {
        Ok(_) => {
            tracing::debug!("Found tokenizer file: {}", file);
            true
        }
        Err(e) => {
            tracing::debug!("Tokenizer file {} unavailable: {}", file, e);
            false
        }
    });
    if tokenizer.is_none() {
        return Err(Error::missing_dependency(format!(
            "No tokenizer found in {} (tried {})",
            repo,
            TOKENIZER_FILES.join(", ")
        )));
    }

    let weights = WEIGHT_FILES.iter().find(|file| match repo_obj.get(file) {
        Ok(_) => {
            tracing::debug!("Found weight file: {}", file);
            true
        }
        Err(e) => {
            tracing::debug!("Weight file {} unavailable: {}", file, e);
            false
        }
    });
    if weights.is_none() {
        return Err(Error::missing_dependency(format!(
            "No model weights found in {} (tried {})",
            repo,
            WEIGHT_FILES.join(", ")
        )));
    }

    let model_dir = config_path
        .parent()
        .ok_or_else(|| Error::classifier("Invalid cache path"))?
        .to_path_buf();

    tracing::info!("Model available at: {}", model_dir.display());
    Ok(model_dir)
}
