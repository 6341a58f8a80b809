// Request bodies sent to the results server

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /results`: a flat JSON object mapping each field name to its string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsSubmission {
    pub fields: BTreeMap<String, String>,
}

impl ResultsSubmission {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_flat_object() {
        let mut fields = BTreeMap::new();
        fields.insert("age".to_string(), "34".to_string());
        fields.insert("diet_type".to_string(), "vegan".to_string());
        let body = serde_json::to_value(ResultsSubmission::new(fields)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "age": "34", "diet_type": "vegan" })
        );
    }
}
