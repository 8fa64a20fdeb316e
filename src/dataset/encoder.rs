use serde::{Serialize, Deserialize};

use crate::dataset::record::{Record, Target};

/// Maps raw textual labels to class indices in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Builds the encoder from a label sequence. The first distinct label
    /// gets code 0, the next new one code 1, and so on.
    pub fn fit<'a, I>(labels: I) -> LabelEncoder
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut classes: Vec<String> = Vec::new();
        for label in labels {
            if !classes.iter().any(|c| c == label) {
                log::debug!("new class '{}' -> {}", label, classes.len());
                classes.push(label.to_string());
            }
        }
        log::info!("label encoding complete: {} distinct classes", classes.len());
        LabelEncoder { classes }
    }

    /// Fits on the records' raw labels and rewrites each record's target to
    /// the encoded class. Records without a raw label are left untouched.
    pub fn fit_records(records: &mut [Record]) -> LabelEncoder {
        let encoder = LabelEncoder::fit(records.iter().filter_map(|r| r.raw_label.as_deref()));
        encoder.apply(records);
        encoder
    }

    pub fn apply(&self, records: &mut [Record]) {
        for record in records.iter_mut() {
            if let Some(class) = record.raw_label.as_deref().and_then(|l| self.encode(l)) {
                record.target = Target::Class(class);
            }
        }
    }

    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    pub fn decode(&self, class: usize) -> Option<&str> {
        self.classes.get(class).map(String::as_str)
    }

    /// Distinct raw labels, indexed by class code.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
