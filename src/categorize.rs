use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const CATCH_ALL_LABEL: &str = "기타";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Ordered category rules. First matching category wins; the last entry is
/// the catch-all with no keywords. Loaded once per session, never mutated.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

impl CategoryRules {
    pub fn new(mut rules: Vec<CategoryRule>) -> Self {
        let has_catch_all = rules.last().map(|r| r.keywords.is_empty()).unwrap_or(false);
        if !has_catch_all {
            rules.push(CategoryRule {
                label: CATCH_ALL_LABEL.to_string(),
                keywords: Vec::new(),
            });
        }
        Self { rules }
    }

    /// Load rules from a JSON file, falling back to the built-in defaults
    /// when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::defaults());
        }
        let content = std::fs::read_to_string(path)?;
        let rules: Vec<CategoryRule> = serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
        Ok(Self::new(rules))
    }

    pub fn defaults() -> Self {
        let rule = |label: &str, keywords: &[&str]| CategoryRule {
            label: label.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        };
        Self::new(vec![
            rule("식비", &["식당", "김밥", "치킨", "피자", "버거", "분식"]),
            rule("카페/간식", &["카페", "커피", "베이커리", "디저트", "스타벅스"]),
            rule("교통", &["버스", "지하철", "택시", "철도", "주유", "하이패스"]),
            rule("마트/편의점", &["마트", "편의점", "슈퍼", "GS25", "CU", "세븐일레븐"]),
            rule("문화/여가", &["영화", "노래방", "CGV", "서점", "공연"]),
            rule("온라인", &["쿠팡", "네이버", "11번가", "지마켓", "배달"]),
            rule(CATCH_ALL_LABEL, &[]),
        ])
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn catch_all(&self) -> &str {
        // new() guarantees a tail entry
        self.rules
            .last()
            .map(|r| r.label.as_str())
            .unwrap_or(CATCH_ALL_LABEL)
    }

    /// First category whose keyword set contains a case-insensitive
    /// substring of the merchant. Substring, not word-boundary: a keyword
    /// may match inside a longer word.
    pub fn classify(&self, merchant: &str) -> &str {
        let hay = merchant.to_lowercase();
        for rule in &self.rules {
            if rule
                .keywords
                .iter()
                .any(|k| hay.contains(&k.to_lowercase()))
            {
                return &rule.label;
            }
        }
        self.catch_all()
    }
}
