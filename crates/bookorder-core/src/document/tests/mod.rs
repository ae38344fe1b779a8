
#[cfg(test)]
mod tests {
    use crate::document::QName;

    #[test]
    fn test_qname_display_uses_clark_notation() {
        let qname = QName::new(Some("urn:x"), "order");
        assert_eq!(qname.to_string(), "{urn:x}order");
        assert_eq!(QName::new(None, "order").to_string(), "order");
    }

    #[test]
    fn test_qname_matching_ignores_prefix() {
        let mut qname = QName::new(Some("urn:x"), "order");
        qname.prefix = Some("o".to_string());
        assert!(qname.matches(Some("urn:x"), "order"));
        assert!(!qname.matches(None, "order"));
        assert!(!qname.matches(Some("urn:x"), "orderItem"));
    }
}
