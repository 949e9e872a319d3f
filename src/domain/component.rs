use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Product families that carry their own fix-version prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    /// "TIB 1.7.0"
    IdentityBroker,
    /// "Pump 1.9.0" or "Tyk Pump 1.9.0"
    Pump,
    /// "MDCB 2.0.0"
    Sink,
    /// "Tyk 5.8.1" or "Tyk Gateway 5.8.1"
    Platform,
}

// Checked top to bottom, first match wins. "Tyk Pump" must be tried before "Tyk".
static PRODUCT_PREFIXES: LazyLock<Vec<(Product, Regex)>> = LazyLock::new(|| {
    [
        (Product::IdentityBroker, r"(?i)^TIB\s+"),
        (Product::Pump, r"(?i)^(Tyk\s+)?Pump\s+"),
        (Product::Sink, r"(?i)^MDCB\s+"),
        (Product::Platform, r"(?i)^Tyk(\s+Gateway)?\s+"),
    ]
    .into_iter()
    .map(|(product, pattern)| {
        let re = Regex::new(pattern).expect("product prefix patterns are valid");
        (product, re)
    })
    .collect()
});

impl Product {
    /// Repositories released together under this product's fix-versions
    pub fn repositories(&self) -> &'static [&'static str] {
        match self {
            Product::IdentityBroker => &["tyk-identity-broker"],
            Product::Pump => &["tyk-pump"],
            Product::Sink => &["tyk-sink"],
            Product::Platform => &["tyk", "tyk-analytics", "tyk-analytics-ui"],
        }
    }

    /// Find the product named at the start of a label
    pub fn detect(label: &str) -> Option<Product> {
        PRODUCT_PREFIXES
            .iter()
            .find(|(_, re)| re.is_match(label))
            .map(|(product, _)| *product)
    }
}

/// Infer which repositories a fix-version label applies to.
///
/// An empty set means the label carries no product prefix and applies to every
/// repository.
///
/// # Example
/// ```
/// use branch_suggest::domain::detect_components;
///
/// assert!(detect_components("TIB 1.7.0").contains("tyk-identity-broker"));
/// assert!(detect_components("5.8.1").is_empty());
/// ```
pub fn detect_components(label: &str) -> BTreeSet<String> {
    match Product::detect(label.trim()) {
        Some(product) => product
            .repositories()
            .iter()
            .map(|repo| repo.to_string())
            .collect(),
        None => BTreeSet::new(),
    }
}
