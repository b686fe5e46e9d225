//! Page category constants.
//!
//! Every page declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a001_miner--list"`)
//!   - `data-page-category` with one of the constants below

/// List of records: table with filters/pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Detail / decision dialog for a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Build a page id in the `{entity}--{category}` format.
pub fn page_id(entity: &str, category: &str) -> String {
    format!("{}--{}", entity, category)
}

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        let id = page_id("a007_incident", PAGE_CAT_LIST);
        assert_eq!(id, "a007_incident--list");
        assert!(is_valid_page_id(&id));
        assert!(!is_valid_page_id("a007_incident"));
    }
}
