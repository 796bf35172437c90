/// Multi-valued query string, keys kept in first-appearance order.
///
/// `axum::extract::Query<HashMap<_, _>>` collapses repeated keys, which loses
/// `id=1&id=2` and repeated `sort_by` entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    /// Parse a raw (still percent-encoded) query string
    pub fn parse(raw: &str) -> Self {
        let mut params = QueryParams::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            params.push(key.into_owned(), value.into_owned());
        }
        params
    }

    pub fn from_raw(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    /// Linear in the number of distinct keys, so parsing is quadratic in
    /// them; request query strings carry only a handful.
    pub fn push(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_first(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::default();
        for (key, value) in iter {
            params.push(key.into(), value.into());
        }
        params
    }
}
