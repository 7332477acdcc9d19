use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Whether a capability (or a language pair) can be used right now.
///
/// Providers answer with loose strings. Only an explicit `"no"` blocks an
/// action; anything else is treated as usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Readily,
    AfterDownload,
    No,
    Other(String),
}

impl Availability {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "readily" | "yes" | "available" => Availability::Readily,
            "after-download" | "downloadable" | "downloading" => Availability::AfterDownload,
            "no" | "unavailable" => Availability::No,
            other => Availability::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Availability::Readily => "readily",
            Availability::AfterDownload => "after-download",
            Availability::No => "no",
            Availability::Other(s) => s,
        }
    }

    pub fn is_usable(&self) -> bool {
        !matches!(self, Availability::No)
    }
}

impl Serialize for Availability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Availability::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_no_blocks() {
        assert!(Availability::parse("readily").is_usable());
        assert!(Availability::parse("yes").is_usable());
        assert!(Availability::parse("after-download").is_usable());
        assert!(Availability::parse("maybe-later").is_usable());
        assert!(!Availability::parse("no").is_usable());
        assert!(!Availability::parse(" NO ").is_usable());
    }

    #[test]
    fn unknown_values_are_kept() {
        assert_eq!(
            Availability::parse("pending"),
            Availability::Other("pending".into())
        );
        assert_eq!(Availability::parse("pending").as_str(), "pending");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let a: Availability = serde_json::from_str("\"after-download\"").unwrap();
        assert_eq!(a, Availability::AfterDownload);
        assert_eq!(serde_json::to_string(&Availability::No).unwrap(), "\"no\"");
    }
}
