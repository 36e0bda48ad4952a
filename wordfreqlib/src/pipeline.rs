//! The word frequency pipeline.
//!
//! A [`WordFrequency`] is configured by value, then driven through its
//! stages:
//!
//! ```text
//! configure → accumulate_sources → run_*_filter (any order, repeatable) → generate
//! ```
//!
//! Every stage either completes and updates the pipeline or returns an error
//! and leaves tokens and visit flags untouched.
//!
//! ## Example
//!
//! ```rust
//! use wordfreqlib::{ListFilter, SortSpec, WordFrequency};
//!
//! let mut wf = WordFrequency::new()
//!     .source("This is a test string. This is a second test string")
//!     .black_list(ListFilter::new().terms(["this", "is"]))
//!     .sort(SortSpec::most_frequent());
//!
//! wf.accumulate_sources()?.run_black_list_filter()?;
//! let table = wf.generate(None);
//! assert_eq!(table.tokens()[..2], ["a", "test"]);
//! # Ok::<(), wordfreqlib::WordFreqError>(())
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use crate::audit::{audit, Auditable, Visits, Warning};
use crate::config::WordFrequencyConfig;
use crate::data::{accumulate, Tokenizer};
use crate::filter::{
    blacklist, strip_numeric, substitution, whitelist, FilterFamily, ListFilter,
    SubstitutionFilter,
};
use crate::query::{CaseMode, Collator, FrequencyTable, Locale, SortDirection, SortSpec};
use crate::source::{
    kind_name, AssetResolver, ProviderRegistry, RecordProvider, RecordQuery, Source,
};
use crate::Result;

/// Builds a frequency table from configured sources and filters.
///
/// One instance is one run; it is not meant to be shared between threads.
#[derive(Debug, Default)]
pub struct WordFrequency {
    tokenizer: Tokenizer,
    remove_numeric: bool,
    sort: SortSpec,
    locale: Option<Locale>,
    assets: AssetResolver,
    black_list: ListFilter,
    white_list: ListFilter,
    substitution: SubstitutionFilter,
    sources: Vec<Source>,
    file_sources: Vec<PathBuf>,
    registry: ProviderRegistry,
    tokens: Vec<String>,
    table: FrequencyTable,
    visits: Visits,
    warnings: Vec<Warning>,
}

impl WordFrequency {
    /// A pipeline with default settings and no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pipeline from a configuration document.
    ///
    /// Untyped sources are resolved here, against `registry`.
    pub fn from_config(config: WordFrequencyConfig, registry: &ProviderRegistry) -> Result<Self> {
        let locale = config.parsed_locale()?;
        let sort = config.sort();

        let mut wf = Self::new()
            .delimiter(config.delimiter)
            .force_case(config.force_case)
            .remove_numeric(config.remove_numeric)
            .sort(sort)
            .black_list(config.black_list.into_filter()?)
            .white_list(config.white_list.into_filter()?)
            .substitution(config.substitution.into_filter()?)
            .file_sources(config.file_sources);
        wf.registry = registry.clone();
        wf.locale = locale;
        if let Some(dir) = config.assets_dir {
            wf = wf.assets_dir(dir);
        }

        for (index, value) in config.sources.iter().enumerate() {
            wf.sources.push(Source::from_value(index, value, registry)?);
        }
        Ok(wf)
    }

    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.tokenizer.delimiter = delimiter.into();
        self
    }

    pub fn force_case(mut self, case: CaseMode) -> Self {
        self.tokenizer.case = case;
        self
    }

    /// Drop purely numeric tokens when generating.
    pub fn remove_numeric(mut self, remove: bool) -> Self {
        self.remove_numeric = remove;
        self
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    pub fn sort_by_token(mut self, direction: SortDirection) -> Self {
        self.sort.by_token = direction;
        self
    }

    pub fn sort_by_frequency(mut self, direction: SortDirection) -> Self {
        self.sort.by_frequency = direction;
        self
    }

    /// Default locale for `generate(None)`.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Directory relative list, pattern and substitution files resolve against.
    pub fn assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets = AssetResolver::with_base(dir);
        self
    }

    pub fn black_list(mut self, filter: ListFilter) -> Self {
        self.black_list = filter;
        self
    }

    pub fn white_list(mut self, filter: ListFilter) -> Self {
        self.white_list = filter;
        self
    }

    pub fn substitution(mut self, filter: SubstitutionFilter) -> Self {
        self.substitution = filter;
        self
    }

    pub fn source(mut self, source: impl Into<Source>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Source>,
    {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    /// A newline-delimited file (or glob) read before the other sources.
    pub fn file_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_sources.push(path.into());
        self
    }

    pub fn file_sources<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.file_sources.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Register a record provider that untyped sources can name.
    pub fn provider(mut self, provider: Arc<dyn RecordProvider>) -> Self {
        self.registry.register(provider);
        self
    }

    /// Add an untyped source.
    ///
    /// Anything but a string or an array is ignored with an
    /// [`Warning::InvalidSourceArgument`]. Arrays that resolve to no valid
    /// source shape are an error.
    pub fn add_source(&mut self, value: &Value) -> Result<&mut Self> {
        if !matches!(value, Value::String(_) | Value::Array(_)) {
            self.raise(Warning::InvalidSourceArgument(format!(
                "add_source got {}",
                kind_name(value)
            )));
            return Ok(self);
        }
        let source = Source::from_value(self.sources.len(), value, &self.registry)?;
        self.sources.push(source);
        Ok(self)
    }

    /// Add a record source by provider name. An unknown name is ignored with
    /// an [`Warning::InvalidSourceArgument`].
    pub fn add_record_source(&mut self, provider: &str, query: RecordQuery) -> &mut Self {
        match self.registry.get(provider) {
            Some(provider) => self.sources.push(Source::records(provider, query)),
            None => self.raise(Warning::InvalidSourceArgument(format!(
                "unknown record provider '{}'",
                provider
            ))),
        }
        self
    }

    /// Tokenize every source and append the tokens.
    pub fn accumulate_sources(&mut self) -> Result<&mut Self> {
        let tokens = accumulate(&self.sources, &self.file_sources, &self.tokenizer)?;
        debug!("accumulated {} tokens", tokens.len());
        self.visits.accumulated_tokens += tokens.len();
        self.tokens.extend(tokens);
        self.visits.accumulated = true;
        Ok(self)
    }

    pub fn run_black_list_filter(&mut self) -> Result<&mut Self> {
        let kept = blacklist::apply(&self.tokens, &self.black_list, &self.assets)?;
        self.finish_filter(FilterFamily::BlackList, kept);
        Ok(self)
    }

    pub fn run_white_list_filter(&mut self) -> Result<&mut Self> {
        let kept = whitelist::apply(&self.tokens, &self.white_list, &self.assets)?;
        self.finish_filter(FilterFamily::WhiteList, kept);
        Ok(self)
    }

    pub fn run_substitution_list_filter(&mut self) -> Result<&mut Self> {
        let rewritten = substitution::apply(&self.tokens, &self.substitution, &self.assets)?;
        self.finish_filter(FilterFamily::Substitution, rewritten);
        Ok(self)
    }

    /// Run one filter family.
    pub fn run_filter(&mut self, family: FilterFamily) -> Result<&mut Self> {
        match family {
            FilterFamily::BlackList => self.run_black_list_filter(),
            FilterFamily::WhiteList => self.run_white_list_filter(),
            FilterFamily::Substitution => self.run_substitution_list_filter(),
        }
    }

    fn finish_filter(&mut self, family: FilterFamily, tokens: Vec<String>) {
        debug!("{} left {} tokens", family, tokens.len());
        self.tokens = tokens;
        self.visits.mark_filter(family);
    }

    /// Audit, strip numbers if enabled, count and sort.
    ///
    /// `locale` overrides the configured locale for this call. The table is
    /// rebuilt from the current tokens every time, and the audit warnings of
    /// an earlier call are replaced by the current ones.
    pub fn generate(&mut self, locale: Option<&Locale>) -> &FrequencyTable {
        self.warnings
            .retain(|w| matches!(w, Warning::InvalidSourceArgument(_)));
        for warning in audit(&*self) {
            self.raise(warning);
        }

        if self.remove_numeric {
            let removed = strip_numeric(&mut self.tokens);
            debug!("removed {} numeric tokens", removed);
        }

        let collator = Collator::new(locale.or(self.locale.as_ref()));
        let mut table = FrequencyTable::count_tokens(&self.tokens);
        table.sort(&self.sort, &collator);
        self.table = table;
        &self.table
    }

    fn raise(&mut self, warning: Warning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Current token multiset.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Table from the last `generate` call.
    pub fn frequency_table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn visits(&self) -> Visits {
        self.visits
    }

    /// Warnings raised so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }
}

impl Auditable for WordFrequency {
    fn visits(&self) -> Visits {
        self.visits
    }

    fn has_sources(&self) -> bool {
        !(self.sources.is_empty() && self.file_sources.is_empty())
    }

    fn is_configured(&self, family: FilterFamily) -> bool {
        match family {
            FilterFamily::BlackList => self.black_list.is_configured(),
            FilterFamily::WhiteList => self.white_list.is_configured(),
            FilterFamily::Substitution => self.substitution.is_configured(),
        }
    }
}
