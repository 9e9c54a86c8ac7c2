use serde::{Deserialize, Serialize};

/// Wrapper for the stored JSON form of a label set
#[derive(Serialize, Deserialize)]
struct LabelsWrapper {
    labels: Vec<String>,
}

/// Normalize a raw label sequence into its canonical form: trim each entry,
/// drop empties, de-duplicate case-insensitively keeping the first-seen
/// casing, and sort by case-insensitive key.
///
/// An empty result is `None`, never `Some(vec![])` — the persisted
/// representation of "no labels" is absence.
pub fn normalize_labels<I, S>(raw: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: Vec<String> = Vec::new();
    let mut cleaned: Vec<String> = Vec::new();

    for entry in raw {
        let trimmed = entry.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        cleaned.push(trimmed.to_string());
    }

    if cleaned.is_empty() {
        return None;
    }
    cleaned.sort_by_key(|label| label.to_lowercase());
    Some(cleaned)
}

/// Encode a label set into its stored byte form (a JSON wrapper object)
pub fn encode_labels(labels: &[String]) -> Vec<u8> {
    let wrapper = LabelsWrapper {
        labels: labels.to_vec(),
    };
    // A vec of strings always serializes
    serde_json::to_vec(&wrapper).unwrap_or_default()
}

/// Decode a stored label set. Malformed data recovers to an empty vec rather
/// than surfacing an error.
pub fn decode_labels(data: &[u8]) -> Vec<String> {
    match serde_json::from_slice::<LabelsWrapper>(data) {
        Ok(wrapper) => wrapper.labels,
        Err(e) => {
            log::warn!("discarding malformed label data: {}", e);
            Vec::new()
        }
    }
}
