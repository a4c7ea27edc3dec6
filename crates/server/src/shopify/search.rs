//! Builder for Shopify search-syntax query strings.
//!
//! Values are always quoted and escaped, so user input such as a scanned
//! barcode can never add terms or operators to the query.

/// A conjunction of `field:"value"` terms.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    /// Start an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`.
    #[must_use]
    pub fn field_equals(mut self, field: &str, value: &str) -> Self {
        self.terms.push(format!("{field}:{}", quote(value)));
        self
    }

    /// Render the query string.
    #[must_use]
    pub fn build(self) -> String {
        self.terms.join(" AND ")
    }
}

/// Wrap `value` in double quotes, escaping backslashes and quotes.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_barcode() {
        let q = SearchQuery::new()
            .field_equals("barcode", "0123456789012")
            .build();
        assert_eq!(q, r#"barcode:"0123456789012""#);
    }

    #[test]
    fn test_operators_stay_inside_quotes() {
        let q = SearchQuery::new()
            .field_equals("barcode", "123 OR title:*")
            .build();
        assert_eq!(q, r#"barcode:"123 OR title:*""#);
    }

    #[test]
    fn test_quotes_and_backslashes_are_escaped() {
        let q = SearchQuery::new()
            .field_equals("barcode", r#"12"3\4"#)
            .build();
        assert_eq!(q, r#"barcode:"12\"3\\4""#);
    }

    #[test]
    fn test_multiple_terms_are_anded() {
        let q = SearchQuery::new()
            .field_equals("barcode", "1")
            .field_equals("sku", "A")
            .build();
        assert_eq!(q, r#"barcode:"1" AND sku:"A""#);
    }

    #[test]
    fn test_empty_query() {
        assert_eq!(SearchQuery::new().build(), "");
    }
}
