//! Holiday programs.

use serde::{Deserialize, Serialize};

use jungle_park_core::{LocalizedText, ProgramId, Tenge};

/// A bookable holiday program, as stored in `programs.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    pub price: Tenge,
    #[serde(default = "default_available")]
    pub available: bool,
    /// Costume names offered with the program.
    #[serde(default)]
    pub costumes: Vec<String>,
}

const fn default_available() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_costumes_default_to_empty() {
        let json = format!(
            r#"{{"id": "{}", "title": {{"ru": "Пираты"}}, "price": 15000}}"#,
            ProgramId::generate()
        );
        let program: Program = serde_json::from_str(&json).unwrap();
        assert!(program.costumes.is_empty());
        assert!(program.available);
    }
}
