#![allow(dead_code)]

use candle_core::{Device, Tensor};
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tempfile::TempDir;

pub const LABELS: [&str; 3] = ["boda", "cumpleanos", "graduacion"];

/// Terms per label; each term gets its own column in label order.
pub const TERMS: [&[&str]; 3] = [
    &["boda", "elegante", "novia"],
    &["cumpleanos", "pastel", "velas"],
    &["graduacion", "toga", "diploma"],
];

pub fn num_features() -> usize {
    TERMS.iter().map(|terms| terms.len()).sum()
}

fn vocabulary() -> HashMap<String, usize> {
    TERMS
        .iter()
        .flat_map(|terms| terms.iter())
        .enumerate()
        .map(|(column, term)| (term.to_string(), column))
        .collect()
}

pub fn write_config(dir: &Path) {
    let id2label: HashMap<String, &str> = LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| (i.to_string(), *label))
        .collect();
    let config = json!({
        "num_features": num_features(),
        "id2label": id2label,
        "classifier_head": "multiclass",
    });
    std::fs::write(dir.join("config.json"), config.to_string()).unwrap();
}

pub fn write_weights(dir: &Path) {
    let mut weight = vec![0f32; LABELS.len() * num_features()];
    let mut column = 0;
    for (row, terms) in TERMS.iter().enumerate() {
        for _ in terms.iter() {
            weight[row * num_features() + column] = 1.0;
            column += 1;
        }
    }
    let mut tensors = HashMap::new();
    tensors.insert(
        "classifier.weight",
        Tensor::from_vec(weight, (LABELS.len(), num_features()), &Device::Cpu).unwrap(),
    );
    // Ties and empty rows fall back to the first label.
    tensors.insert(
        "classifier.bias",
        Tensor::from_vec(vec![0.01f32, 0.0, 0.0], LABELS.len(), &Device::Cpu).unwrap(),
    );
    candle_core::safetensors::save(&tensors, dir.join("model.safetensors")).unwrap();
}

pub fn write_vectorizer(dir: &Path, vocabulary: HashMap<String, usize>) {
    let idf = vec![1.5f32; vocabulary.len()];
    let vectorizer = json!({
        "vocabulary": vocabulary,
        "idf": idf,
        "strip_accents": "unicode",
        "stop_words": ["de", "con", "para"],
        "norm": "l2",
    });
    std::fs::write(dir.join("vectorizer.json"), vectorizer.to_string()).unwrap();
}

/// A complete artifact directory for the three toy occasions.
pub fn artifact_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path());
    write_weights(dir.path());
    write_vectorizer(dir.path(), vocabulary());
    dir
}

/// Artifacts whose vectorizer emits one column more than the model accepts.
pub fn mismatched_artifact_dir() -> TempDir {
    let dir = artifact_dir();
    let mut vocabulary = vocabulary();
    vocabulary.insert("fiesta".to_string(), num_features());
    write_vectorizer(dir.path(), vocabulary);
    dir
}
