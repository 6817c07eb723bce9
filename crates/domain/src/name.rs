use derive_more::{AsRef, Display};

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub const MAX_CHARS: usize = 64;

    pub fn new(name: &str) -> Result<Self, NameError> {
        let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");

        if collapsed.is_empty() {
            return Err(NameError::Empty);
        }

        // Exercise names are frequently non-ASCII, so the limit counts characters.
        let len = collapsed.chars().count();

        if len > Self::MAX_CHARS {
            return Err(NameError::TooLong(len));
        }

        Ok(Name(collapsed))
    }

    pub(crate) fn from_static(name: &'static str) -> Self {
        Name(name.to_string())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Bench Press", Ok(Name("Bench Press".to_string())))]
    #[case("  Lat   Pulldown ", Ok(Name("Lat Pulldown".to_string())))]
    #[case("ベンチプレス", Ok(Name("ベンチプレス".to_string())))]
    #[case("   ", Err(NameError::Empty))]
    #[case(&"A".repeat(65), Err(NameError::TooLong(65)))]
    #[case(&"ス".repeat(64), Ok(Name("ス".repeat(64))))]
    fn test_name_new(#[case] name: &str, #[case] expected: Result<Name, NameError>) {
        assert_eq!(Name::new(name), expected);
    }
}
