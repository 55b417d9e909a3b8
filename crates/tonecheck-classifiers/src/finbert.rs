//! Candle-backed FinBERT tone classifier
//!
//! Runs `BertForSequenceClassification` checkpoints: BERT encoder, pooler
//! (dense + tanh over `[CLS]`), then a linear head with one logit per label.

use crate::bootstrap::{find_first, ModelResources, CONFIG_FILE};
use crate::classifier::{ranked_predictions, ClassificationResult, Classifier};
use crate::model_config::ModelConfig;
use candle_core::{DType, Device, IndexOp, Tensor, D};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use std::fmt::Display;
use std::path::Path;
use std::time::Instant;
use tokenizers::{Tokenizer, TruncationParams};
use tonecheck_core::{Error, Result};

pub struct FinbertClassifier {
    name: String,
    tokenizer: Tokenizer,
    model: BertModel,
    pooler: Linear,
    classifier: Linear,
    device: Device,
    labels: Vec<String>,
}

impl FinbertClassifier {
    /// Resolve model files through `resources`, then load them
    pub async fn load(config: &ModelConfig, resources: &ModelResources) -> Result<Self> {
        let model_dir = resources.ensure_available().await?;
        Self::load_from_dir(config, model_dir)
    }

    /// Load from a directory holding `config.json`, tokenizer, and weights
    pub fn load_from_dir(config: &ModelConfig, model_dir: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(model_dir.join(CONFIG_FILE))?;
        let bert_config: BertConfig = serde_json::from_str(&config_str)
            .map_err(model_error("Failed to parse BERT config"))?;
        let config_json: serde_json::Value = serde_json::from_str(&config_str)?;
        let labels = resolve_labels(&config_json, &config.labels);

        let device = get_device(&config.device)?;
        let tokenizer = load_tokenizer(model_dir, config.max_length)?;
        let vb = load_var_builder(model_dir, &device)?;

        let (model, prefix) = load_bert_backbone(&vb, &bert_config)?;
        let pooler_vb = if prefix.is_empty() {
            vb.pp("pooler")
        } else {
            vb.pp(prefix).pp("pooler")
        };
        let pooler = candle_nn::linear(
            bert_config.hidden_size,
            bert_config.hidden_size,
            pooler_vb.pp("dense"),
        )
        .map_err(model_error("Failed to load pooler"))?;
        let classifier = candle_nn::linear(
            bert_config.hidden_size,
            labels.len(),
            vb.pp("classifier"),
        )
        .map_err(model_error("Failed to load classification head"))?;

        tracing::info!(
            "Loaded {} from {} with labels {:?}",
            config.name,
            model_dir.display(),
            labels
        );

        Ok(Self {
            name: config.name.clone(),
            tokenizer,
            model,
            pooler,
            classifier,
            device,
            labels,
        })
    }

    /// Labels by class index
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn probabilities(&self, text: &str) -> Result<Vec<f64>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(model_error("Tokenization failed"))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(model_error("Failed to create input tensor"))?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(model_error("Failed to create token type tensor"))?;

        let hidden_states = self
            .model
            .forward(&input_ids, &token_type_ids, None)
            .map_err(model_error("Model forward pass failed"))?;

        let cls = hidden_states
            .i((.., 0))
            .map_err(model_error("Failed to get CLS token"))?;
        let pooled = self
            .pooler
            .forward(&cls)
            .and_then(|t| t.tanh())
            .map_err(model_error("Pooler failed"))?;
        let logits = self
            .classifier
            .forward(&pooled)
            .map_err(model_error("Classification head failed"))?;

        candle_nn::ops::softmax(&logits, D::Minus1)
            .and_then(|p| p.squeeze(0))
            .and_then(|p| p.to_vec1::<f32>())
            .map(|p| p.into_iter().map(f64::from).collect())
            .map_err(model_error("Softmax failed"))
    }
}

#[async_trait::async_trait]
impl Classifier for FinbertClassifier {
    async fn classify(&self, text: &str) -> Result<Vec<ClassificationResult>> {
        let start = Instant::now();
        let probs = self.probabilities(text)?;

        Ok(ranked_predictions(
            &self.labels,
            &probs,
            &self.name,
            start.elapsed().as_micros() as u64,
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn model_error<E: Display>(context: &'static str) -> impl FnOnce(E) -> Error {
    move |e| Error::classifier(format!("{}: {}", context, e))
}

fn get_device(device_str: &str) -> Result<Device> {
    match device_str.to_lowercase().as_str() {
        "cuda" | "cuda:0" => {
            Device::new_cuda(0).map_err(model_error("Failed to initialize CUDA"))
        }
        "mps" | "metal" => {
            Device::new_metal(0).map_err(model_error("Failed to initialize Metal"))
        }
        _ => Ok(Device::Cpu),
    }
}

/// Labels from `id2label`, ordered by class index; `fallback` otherwise
fn resolve_labels(config_json: &serde_json::Value, fallback: &[String]) -> Vec<String> {
    let Some(id2label) = config_json.get("id2label").and_then(|v| v.as_object()) else {
        return fallback.to_vec();
    };

    let mut indexed: Vec<(usize, String)> = id2label
        .iter()
        .filter_map(|(idx, label)| Some((idx.parse().ok()?, label.as_str()?.to_string())))
        .collect();
    indexed.sort_by_key(|(idx, _)| *idx);

    let contiguous = indexed.iter().enumerate().all(|(pos, (idx, _))| pos == *idx);
    if indexed.is_empty() || !contiguous {
        return fallback.to_vec();
    }
    indexed.into_iter().map(|(_, label)| label).collect()
}

fn load_var_builder(model_dir: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[safetensors], DType::F32, device)
                .map_err(model_error("Failed to load SafeTensors"))?
        };
        return Ok(vb);
    }

    let pth = model_dir.join("pytorch_model.bin");
    if pth.exists() {
        return VarBuilder::from_pth(&pth, DType::F32, device)
            .map_err(model_error("Failed to load PyTorch weights"));
    }

    Err(Error::missing_dependency(format!(
        "No model weights found in {}",
        model_dir.display()
    )))
}

fn load_bert_backbone(vb: &VarBuilder, config: &BertConfig) -> Result<(BertModel, &'static str)> {
    let mut errors = Vec::new();

    for prefix in ["bert", ""] {
        let vb_prefix = if prefix.is_empty() {
            vb.clone()
        } else {
            vb.pp(prefix)
        };

        match BertModel::load(vb_prefix, config) {
            Ok(model) => {
                tracing::debug!(
                    "Loaded BERT backbone from '{}'",
                    if prefix.is_empty() { "<root>" } else { prefix }
                );
                return Ok((model, prefix));
            }
            Err(e) => errors.push(format!(
                "{}: {}",
                if prefix.is_empty() { "<root>" } else { prefix },
                e
            )),
        }
    }

    Err(Error::classifier(format!(
        "Failed to load BERT backbone with tried prefixes [{}]",
        errors.join(" | ")
    )))
}

fn load_tokenizer(model_dir: &Path, max_length: usize) -> Result<Tokenizer> {
    let path = find_first(model_dir, &crate::bootstrap::TOKENIZER_FILES).ok_or_else(|| {
        Error::missing_dependency(format!("No tokenizer found in {}", model_dir.display()))
    })?;

    let mut tokenizer = if path.ends_with("tokenizer.json") {
        tracing::debug!("Loading tokenizer from tokenizer.json");
        Tokenizer::from_file(&path).map_err(model_error("Failed to load tokenizer.json"))?
    } else {
        tracing::debug!("Building tokenizer from vocab.txt");
        wordpiece_tokenizer(&path)?
    };

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(model_error("Failed to configure truncation"))?;

    Ok(tokenizer)
}

fn wordpiece_tokenizer(vocab_path: &Path) -> Result<Tokenizer> {
    use tokenizers::models::wordpiece::WordPiece;
    use tokenizers::normalizers::BertNormalizer;
    use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
    use tokenizers::processors::bert::BertProcessing;

    let wordpiece = WordPiece::from_file(vocab_path.to_string_lossy().as_ref())
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(model_error("Failed to build WordPiece model"))?;

    let mut tokenizer = Tokenizer::new(wordpiece);
    tokenizer.with_normalizer(Some(BertNormalizer::default()));
    tokenizer.with_pre_tokenizer(Some(BertPreTokenizer));

    let special = |token: &str| -> Result<(String, u32)> {
        tokenizer
            .token_to_id(token)
            .map(|id| (token.to_string(), id))
            .ok_or_else(|| {
                Error::missing_dependency(format!(
                    "{} missing from {}",
                    token,
                    vocab_path.display()
                ))
            })
    };
    let sep = special("[SEP]")?;
    let cls = special("[CLS]")?;
    tokenizer.with_post_processor(Some(BertProcessing::new(sep, cls)));

    Ok(tokenizer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fallback() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn test_resolve_labels_from_id2label() {
        let config = serde_json::json!({
            "id2label": { "2": "Negative", "0": "Neutral", "1": "Positive" }
        });
        assert_eq!(
            resolve_labels(&config, &fallback()),
            vec!["Neutral", "Positive", "Negative"]
        );
    }

    #[test]
    fn test_resolve_labels_falls_back() {
        let missing = serde_json::json!({ "hidden_size": 768 });
        assert_eq!(resolve_labels(&missing, &fallback()), fallback());

        let gappy = serde_json::json!({ "id2label": { "0": "Neutral", "2": "Negative" } });
        assert_eq!(resolve_labels(&gappy, &fallback()), fallback());
    }

    #[test]
    fn test_wordpiece_tokenizer_from_vocab() {
        let dir = tempfile::tempdir().unwrap();
        let vocab = dir.path().join("vocab.txt");
        std::fs::write(&vocab, "[PAD]\n[UNK]\n[CLS]\n[SEP]\nprofit\nrose\n").unwrap();

        let tokenizer = load_tokenizer(dir.path(), 512).unwrap();
        let encoding = tokenizer.encode("Profit rose", true).unwrap();
        assert_eq!(encoding.get_ids(), &[2, 4, 5, 3]);
    }

    #[test]
    fn test_wordpiece_tokenizer_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let vocab = dir.path().join("vocab.txt");
        std::fs::write(&vocab, "[PAD]\n[UNK]\n[CLS]\n[SEP]\nprofit\nrose\n").unwrap();

        let tokenizer = load_tokenizer(dir.path(), 4).unwrap();
        let encoding = tokenizer.encode("profit rose profit rose", true).unwrap();
        assert_eq!(encoding.get_ids().len(), 4);
        assert_eq!(encoding.get_ids()[0], 2);
        assert_eq!(encoding.get_ids()[3], 3);
    }

    #[test]
    fn test_wordpiece_requires_special_tokens() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vocab.txt"), "[UNK]\nprofit\n").unwrap();

        let err = load_tokenizer(dir.path(), 512).err().unwrap();
        assert!(matches!(err, Error::MissingDependency(_)));
    }
}
