//! Usage auditing: advisory warnings about how a pipeline was driven.
//!
//! Warnings never stop a run. They point at configuration that had no
//! effect, such as a blacklist that was set up but never run.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::filter::FilterFamily;

/// Which stages have run on a pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Visits {
    pub accumulated: bool,
    /// Tokens produced by every accumulation so far, before any filtering
    pub accumulated_tokens: usize,
    pub black_list: bool,
    pub white_list: bool,
    pub substitution: bool,
}

impl Visits {
    pub fn filter(&self, family: FilterFamily) -> bool {
        match family {
            FilterFamily::BlackList => self.black_list,
            FilterFamily::WhiteList => self.white_list,
            FilterFamily::Substitution => self.substitution,
        }
    }

    pub fn mark_filter(&mut self, family: FilterFamily) {
        match family {
            FilterFamily::BlackList => self.black_list = true,
            FilterFamily::WhiteList => self.white_list = true,
            FilterFamily::Substitution => self.substitution = true,
        }
    }
}

/// An advisory condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// `generate` ran without accumulating sources first
    NotAccumulated,
    /// Neither sources nor file sources were configured
    NoSources,
    /// Accumulation ran but produced no tokens
    EmptyResult,
    /// A filter family was configured but never run
    UnusedFilter(FilterFamily),
    /// A malformed argument to `add_source`/`add_record_source` was ignored
    InvalidSourceArgument(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NotAccumulated => f.write_str("Sources have not been accumulated"),
            Warning::NoSources => f.write_str("No sources defined"),
            Warning::EmptyResult => f.write_str("Sources have produced no results"),
            Warning::UnusedFilter(family) => write!(f, "{} defined but not used", family),
            Warning::InvalidSourceArgument(detail) => {
                write!(f, "String or array of strings expected: {}", detail)
            }
        }
    }
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// State the auditor inspects.
pub trait Auditable {
    fn visits(&self) -> Visits;
    fn has_sources(&self) -> bool;
    fn is_configured(&self, family: FilterFamily) -> bool;
}

/// Check `subject` and list every advisory condition, in a fixed order.
pub fn audit(subject: &impl Auditable) -> Vec<Warning> {
    let visits = subject.visits();
    let mut warnings = Vec::new();

    if !visits.accumulated {
        warnings.push(Warning::NotAccumulated);
    }
    if !subject.has_sources() {
        warnings.push(Warning::NoSources);
    }
    if visits.accumulated && visits.accumulated_tokens == 0 {
        warnings.push(Warning::EmptyResult);
    }
    for family in FilterFamily::ALL {
        if subject.is_configured(family) && !visits.filter(family) {
            warnings.push(Warning::UnusedFilter(family));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Stub {
        visits: Visits,
        sources: bool,
        configured: Vec<FilterFamily>,
    }

    impl Auditable for Stub {
        fn visits(&self) -> Visits {
            self.visits
        }
        fn has_sources(&self) -> bool {
            self.sources
        }
        fn is_configured(&self, family: FilterFamily) -> bool {
            self.configured.contains(&family)
        }
    }

    #[test]
    fn test_fresh_pipeline() {
        let warnings = audit(&Stub::default());
        assert_eq!(warnings, vec![Warning::NotAccumulated, Warning::NoSources]);
    }

    #[test]
    fn test_empty_result_only_after_accumulation() {
        let stub = Stub {
            visits: Visits {
                accumulated: true,
                ..Visits::default()
            },
            sources: true,
            ..Stub::default()
        };
        assert_eq!(audit(&stub), vec![Warning::EmptyResult]);
    }

    #[test]
    fn test_filtered_to_nothing_is_not_empty_result() {
        let mut visits = Visits {
            accumulated: true,
            accumulated_tokens: 2,
            ..Visits::default()
        };
        visits.mark_filter(FilterFamily::BlackList);
        let stub = Stub {
            visits,
            sources: true,
            configured: vec![FilterFamily::BlackList],
        };
        assert!(audit(&stub).is_empty());
    }

    #[test]
    fn test_unused_filters() {
        let mut visits = Visits {
            accumulated: true,
            accumulated_tokens: 3,
            ..Visits::default()
        };
        visits.mark_filter(FilterFamily::WhiteList);
        let stub = Stub {
            visits,
            sources: true,
            configured: vec![
                FilterFamily::BlackList,
                FilterFamily::WhiteList,
                FilterFamily::Substitution,
            ],
        };
        assert_eq!(
            audit(&stub),
            vec![
                Warning::UnusedFilter(FilterFamily::BlackList),
                Warning::UnusedFilter(FilterFamily::Substitution),
            ]
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Warning::NotAccumulated.to_string(),
            "Sources have not been accumulated"
        );
        assert_eq!(Warning::NoSources.to_string(), "No sources defined");
        assert_eq!(
            Warning::EmptyResult.to_string(),
            "Sources have produced no results"
        );
        assert_eq!(
            Warning::UnusedFilter(FilterFamily::BlackList).to_string(),
            "Blacklist defined but not used"
        );
        assert_eq!(
            Warning::UnusedFilter(FilterFamily::Substitution).to_string(),
            "Substitution list defined but not used"
        );
        assert!(Warning::InvalidSourceArgument("42".into())
            .to_string()
            .starts_with("String or array of strings expected"));
    }
}
