//! Core data types for product comparisons.
//!
//! The sanitizer consumes an untyped `serde_json::Value` payload and emits
//! these types; every `ComparisonResult` handed to a consumer is fully
//! populated (no absent, null, or out-of-range field). The `Default` impls
//! are the canonical fallback values the sanitizer overlays a payload onto.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lower bound of the recommendation confidence range.
pub const CONFIDENCE_MIN: u8 = 50;

/// Upper bound of the recommendation confidence range.
pub const CONFIDENCE_MAX: u8 = 95;

/// Maximum number of pros or cons retained per product.
pub const MAX_PROS_CONS: usize = 5;

/// A validated pair of product URLs.
///
/// Constructed only through [`ComparisonRequest::new`], which rejects
/// empty input and anything that is not an absolute http/https URL.
/// Invalid input therefore never reaches the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub url1: String,
    pub url2: String,
}

impl ComparisonRequest {
    /// Validate both URLs and build a request.
    pub fn new(url1: &str, url2: &str) -> Result<Self, ValidationError> {
        let url1 = url1.trim();
        let url2 = url2.trim();
        if url1.is_empty() {
            return Err(ValidationError::EmptyUrl { field: "url1" });
        }
        if url2.is_empty() {
            return Err(ValidationError::EmptyUrl { field: "url2" });
        }
        Self::check_url(url1)?;
        Self::check_url(url2)?;
        Ok(Self {
            url1: url1.to_string(),
            url2: url2.to_string(),
        })
    }

    fn check_url(raw: &str) -> Result<(), ValidationError> {
        match url::Url::parse(raw) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
            _ => Err(ValidationError::InvalidUrl {
                url: raw.to_string(),
            }),
        }
    }
}

/// High-level overview of a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOverview {
    pub name: String,
    pub key_features: Vec<String>,
    pub price_range: String,
}

/// Advantages and disadvantages of a single product.
///
/// At most [`MAX_PROS_CONS`] entries per list after sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProsCons {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

/// Which product the AI recommends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Product1,
    Product2,
    #[default]
    Tie,
}

impl Winner {
    /// Parse the exact wire values `"product1"`, `"product2"`, `"tie"`.
    /// Anything else is rejected.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "product1" => Some(Winner::Product1),
            "product2" => Some(Winner::Product2),
            "tie" => Some(Winner::Tie),
            _ => None,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::Product1 => write!(f, "product1"),
            Winner::Product2 => write!(f, "product2"),
            Winner::Tie => write!(f, "tie"),
        }
    }
}

/// The AI's verdict, with confidence clamped into `[50, 95]`.
///
/// The range is a deliberate design constraint: the system never claims
/// near-certainty or near-randomness regardless of what the model emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub winner: Winner,
    pub reason: String,
    pub confidence: u8,
}

impl Default for Recommendation {
    fn default() -> Self {
        Self {
            winner: Winner::Tie,
            reason: "Insufficient data for comparison".to_string(),
            confidence: CONFIDENCE_MIN,
        }
    }
}

/// A per-product pair of values within a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPair<T> {
    pub product1: T,
    pub product2: T,
}

/// The complete structured comparison handed to consumers.
///
/// Constructed once per successful pipeline run, owned by the session for
/// the duration of the `Result` state, and discarded on the next reset or
/// submit. Always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub overview: ProductPair<ProductOverview>,
    pub pros_cons: ProductPair<ProsCons>,
    pub analysis: String,
    pub recommendation: Recommendation,
    pub customer_sentiment: ProductPair<String>,
}

impl Default for ComparisonResult {
    fn default() -> Self {
        Self {
            overview: ProductPair {
                product1: ProductOverview {
                    name: "Product 1".to_string(),
                    key_features: Vec::new(),
                    price_range: "Unknown".to_string(),
                },
                product2: ProductOverview {
                    name: "Product 2".to_string(),
                    key_features: Vec::new(),
                    price_range: "Unknown".to_string(),
                },
            },
            pros_cons: ProductPair::default(),
            analysis: "AI analysis not available. Please check product URLs and try again."
                .to_string(),
            recommendation: Recommendation::default(),
            customer_sentiment: ProductPair {
                product1: "No review data available".to_string(),
                product2: "No review data available".to_string(),
            },
        }
    }
}
