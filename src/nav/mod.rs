//! Navigation state: the query parameters that say which record is active.

use std::fmt;

use tracing::debug;
use url::form_urlencoded;

pub const FORM_ID_PARAM: &str = "formId";

pub trait Navigation {
    /// First non-empty value of `name`.
    fn get(&self, name: &str) -> Option<String>;
    /// Replaces `name`; `None` or an empty value removes it.
    fn set(&mut self, name: &str, value: Option<&str>);
    fn remove(&mut self, name: &str);
    /// The current location as text.
    fn render(&self) -> String;
}

/// A location of the form `[base]?key=value&...`, kept in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryLocation {
    base: String,
    params: Vec<(String, String)>,
}

impl QueryLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = raw.split_once('#').map_or(raw, |(before, _)| before);
        let (base, query) = match raw.split_once('?') {
            Some((base, query)) => (base, query),
            None if raw.contains('=') => ("", raw),
            None => (raw, ""),
        };
        let params = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self {
            base: base.to_string(),
            params,
        }
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

impl Navigation for QueryLocation {
    fn get(&self, name: &str) -> Option<String> {
        self.params
            .iter()
            .find(|(key, value)| key == name && !value.is_empty())
            .map(|(_, value)| value.clone())
    }

    fn set(&mut self, name: &str, value: Option<&str>) {
        let Some(value) = value.filter(|value| !value.is_empty()) else {
            self.remove(name);
            return;
        };
        match self.params.iter().position(|(key, _)| key == name) {
            Some(index) => {
                self.params[index].1 = value.to_string();
                let mut seen = false;
                self.params.retain(|(key, _)| {
                    if key != name {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.params.push((name.to_string(), value.to_string())),
        }
        debug!(location = %self, "navigation updated");
    }

    fn remove(&mut self, name: &str) {
        self.params.retain(|(key, _)| key != name);
        debug!(location = %self, "navigation updated");
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QueryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        if self.params.is_empty() {
            return Ok(());
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.params)
            .finish();
        write!(f, "?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_renders_form_id() {
        let location = QueryLocation::parse("/builder?formId=a%20b&tab=1#top");
        assert_eq!(location.get(FORM_ID_PARAM).as_deref(), Some("a b"));
        assert_eq!(location.render(), "/builder?formId=a+b&tab=1");
    }

    #[test]
    fn setting_empty_value_removes_parameter() {
        let mut location = QueryLocation::parse("?formId=1");
        location.set(FORM_ID_PARAM, Some(""));
        assert_eq!(location.get(FORM_ID_PARAM), None);
        assert_eq!(location.render(), "");
    }

    #[test]
    fn set_collapses_duplicates() {
        let mut location = QueryLocation::parse("formId=1&formId=2");
        location.set(FORM_ID_PARAM, Some("9"));
        assert_eq!(location.params().len(), 1);
        assert_eq!(location.render(), "?formId=9");
    }

    #[test]
    fn reserved_characters_survive_a_round_trip() {
        let mut location = QueryLocation::new();
        location.set(FORM_ID_PARAM, Some("a&b=c+d"));
        assert_eq!(location.render(), "?formId=a%26b%3Dc%2Bd");
        let reparsed = QueryLocation::parse(&location.render());
        assert_eq!(reparsed.get(FORM_ID_PARAM).as_deref(), Some("a&b=c+d"));
    }

    #[test]
    fn empty_values_are_ignored_on_read() {
        let location = QueryLocation::parse("?formId=&formId=4");
        assert_eq!(location.get(FORM_ID_PARAM).as_deref(), Some("4"));
    }
}
