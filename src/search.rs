//! Search phrase collected from the command line.

/// Free-text phrase matched against file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    phrase: String,
}

impl SearchCriteria {
    /// Join all arguments with single spaces.
    ///
    /// Returns `None` when there are no arguments at all. Arguments are not
    /// validated, so `[""]` yields an empty phrase.
    ///
    /// # Examples
    ///
    /// ```
    /// use gdrive_find::SearchCriteria;
    ///
    /// let criteria = SearchCriteria::from_args(["Queen", "Elizabeth", "II"]).unwrap();
    /// assert_eq!(criteria.phrase(), "Queen Elizabeth II");
    ///
    /// assert!(SearchCriteria::from_args(Vec::<String>::new()).is_none());
    /// ```
    pub fn from_args<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        if args.is_empty() {
            return None;
        }

        let phrase = args
            .iter()
            .map(|a| a.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        Some(Self { phrase })
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Drive query matching names that contain the phrase.
    ///
    /// The phrase is embedded as-is: a `'` inside it is not escaped.
    pub fn to_query(&self) -> String {
        format!("name contains '{}'", self.phrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_term() {
        let criteria = SearchCriteria::from_args(["report"]).unwrap();
        assert_eq!(criteria.phrase(), "report");
        assert_eq!(criteria.to_query(), "name contains 'report'");
    }

    #[test]
    fn test_terms_joined_with_single_spaces() {
        let args = vec!["Queen".to_string(), "Elizabeth".to_string(), "II".to_string()];
        let criteria = SearchCriteria::from_args(&args).unwrap();
        assert_eq!(criteria.phrase(), "Queen Elizabeth II");
        assert_eq!(criteria.to_query(), "name contains 'Queen Elizabeth II'");
    }

    #[test]
    fn test_no_terms() {
        assert!(SearchCriteria::from_args(Vec::<&str>::new()).is_none());
    }

    #[test]
    fn test_empty_term_passes_through() {
        let criteria = SearchCriteria::from_args([""]).unwrap();
        assert_eq!(criteria.phrase(), "");
        assert_eq!(criteria.to_query(), "name contains ''");
    }

    #[test]
    fn test_quote_not_escaped() {
        let criteria = SearchCriteria::from_args(["it's"]).unwrap();
        assert_eq!(criteria.to_query(), "name contains 'it's'");
    }
}
