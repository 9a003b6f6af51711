//! Title classification.
//!
//! Title-type labels arrive as `"<Kind> as <Qualifier>"` (occasionally
//! `"<Kind> on <Qualifier>"`), e.g. `"Short Titles as Passed House"`, or as
//! a bare kind like `"Display Title"`.

use crate::error::{Error, Result};
use crate::types::{Title, TitleType};

const PORTION_SUFFIX: &str = " for portions of this bill";

fn kind_for(label: &str) -> Option<TitleType> {
    if label.contains("Popular Title") {
        Some(TitleType::Popular)
    } else if label.contains("Short Title") {
        Some(TitleType::Short)
    } else if label.contains("Official Title") {
        Some(TitleType::Official)
    } else if label.contains("Display Title") {
        Some(TitleType::Display)
    } else if label == "Non-bill-report" {
        Some(TitleType::NonBillReport)
    } else {
        None
    }
}

/// Classify one raw title from its type label
pub fn classify_title(label: &str, text: &str) -> Result<Title> {
    let (kind_part, qualifier) = match label.split_once(" as ") {
        Some((kind, qualifier)) => (kind, Some(qualifier)),
        None => match label.split_once(" on ") {
            Some((kind, qualifier)) => (kind, Some(qualifier)),
            None => (label, None),
        },
    };

    let title_type =
        kind_for(kind_part).ok_or_else(|| Error::UnknownTitleType(label.to_string()))?;

    let (title_as, is_for_portion) = match qualifier {
        Some(qualifier) => {
            let (qualifier, is_for_portion) = match qualifier.strip_suffix(PORTION_SUFFIX) {
                Some(stripped) => (stripped, true),
                None => (qualifier, false),
            };
            let qualifier = qualifier.strip_suffix(':').unwrap_or(qualifier);
            (qualifier.to_lowercase(), is_for_portion)
        }
        None => (String::new(), false),
    };

    Ok(Title {
        text: text.to_string(),
        title_type,
        title_as,
        is_for_portion,
    })
}

/// The current title of a given type: the first title of the latest
/// qualifier group, in document order, skipping portion titles
pub fn current_title(titles: &[Title], title_type: TitleType) -> Option<String> {
    let mut current: Option<&Title> = None;
    for title in titles {
        if title.title_type != title_type || title.is_for_portion {
            continue;
        }
        match current {
            // Same qualifier group as the one already picked: keep the first
            Some(picked) if picked.title_as == title.title_as => continue,
            _ => current = Some(title),
        }
    }
    current.map(|t| t.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_title_as_introduced() {
        let title = classify_title("Short Titles as Introduced", "GAO Act").unwrap();
        assert_eq!(title.title_type, TitleType::Short);
        assert_eq!(title.title_as, "introduced");
        assert!(!title.is_for_portion);
    }

    #[test]
    fn test_portion_suffix() {
        let title =
            classify_title("Official Title as Introduced for portions of this bill", "A bill.")
                .unwrap();
        assert_eq!(title.title_type, TitleType::Official);
        assert_eq!(title.title_as, "introduced");
        assert!(title.is_for_portion);
    }

    #[test]
    fn test_bare_kind_has_empty_qualifier() {
        let title = classify_title("Display Title", "Budget Act of 2019").unwrap();
        assert_eq!(title.title_type, TitleType::Display);
        assert_eq!(title.title_as, "");
        assert!(!title.is_for_portion);
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        let err = classify_title("Working Title as Introduced", "x").unwrap_err();
        assert!(matches!(err, Error::UnknownTitleType(_)));
    }

    #[test]
    fn test_current_title_prefers_latest_qualifier_group() {
        let titles = vec![
            classify_title("Short Titles as Introduced", "First Act").unwrap(),
            classify_title("Short Titles as Introduced", "First Act (alternate)").unwrap(),
            classify_title("Short Titles as Passed House", "Second Act").unwrap(),
            classify_title("Short Titles as Passed House", "Second Act (alternate)").unwrap(),
        ];
        assert_eq!(
            current_title(&titles, TitleType::Short),
            Some("Second Act".to_string())
        );
        assert_eq!(current_title(&titles, TitleType::Popular), None);
    }

    #[test]
    fn test_current_title_skips_portion_titles() {
        let titles = vec![
            classify_title("Short Titles as Introduced for portions of this bill", "Part A")
                .unwrap(),
            classify_title("Short Titles as Introduced", "Whole Act").unwrap(),
        ];
        assert_eq!(
            current_title(&titles, TitleType::Short),
            Some("Whole Act".to_string())
        );
    }
}
