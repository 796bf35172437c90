#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Accepts `asc` / `desc` in any case; anything else is rejected
    pub fn parse(s: &str) -> Option<SortOrder> {
        match s.to_lowercase().as_str() {
            "asc" => Some(SortOrder::Ascending),
            "desc" => Some(SortOrder::Descending),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub attribute: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(attribute: String, order: SortOrder) -> Self {
        SortSpec { attribute, order }
    }

    /// Parse one `sort_by` entry of the form `field:direction`
    pub fn parse(entry: &str) -> Option<SortSpec> {
        let parts: Vec<&str> = entry.split(':').collect();
        if parts.len() != 2 {
            return None;
        }
        let order = SortOrder::parse(parts[1])?;
        Some(SortSpec::new(parts[0].to_string(), order))
    }

    /// Parse every `sort_by` value, dropping malformed entries
    pub fn from_params<'a>(values: impl IntoIterator<Item = &'a String>) -> Vec<SortSpec> {
        values
            .into_iter()
            .filter_map(|entry| SortSpec::parse(entry))
            .collect()
    }
}
