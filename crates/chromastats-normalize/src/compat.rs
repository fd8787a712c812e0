use crate::contract::StatsNormalizer;
use serde_json::{Map, Value};

/// Flags forced on every wrapped `toJson` call unless the caller overrides them
pub const DEFAULT_STATS_OPTIONS: [(&str, bool); 3] =
    [("all", true), ("modules", true), ("reasons", true)];

/// Anything that can serialize build stats, like Rspack's `Stats::toJson`.
///
/// Only the options argument is modelled. The bundler's second `forToString`
/// argument has no counterpart here, so a source that needs it must capture
/// it itself.
pub trait StatsSource {
    /// Produce a stats document. `options` is normally an object of stats flags.
    ///
    /// When wrapped, object or missing options get the default flags merged
    /// in. Arrays, strings and booleans reach the source as given, without
    /// any defaults.
    fn to_json(&self, options: Option<Value>) -> Value;

    /// Whether documents returned by this source already satisfy the minimal contract
    fn is_contract_normalized(&self) -> bool {
        false
    }
}

impl<S: StatsSource + ?Sized> StatsSource for Box<S> {
    fn to_json(&self, options: Option<Value>) -> Value {
        (**self).to_json(options)
    }

    fn is_contract_normalized(&self) -> bool {
        (**self).is_contract_normalized()
    }
}

/// Adapter turning a closure into a [`StatsSource`]
pub struct StatsFn<F>(pub F);

impl<F> StatsSource for StatsFn<F>
where
    F: Fn(Option<Value>) -> Value,
{
    fn to_json(&self, options: Option<Value>) -> Value {
        (self.0)(options)
    }
}

/// Layer the default flags underneath caller options.
///
/// Missing or null options become the defaults; object options are
/// shallow-merged with caller keys winning. Anything else is not a
/// configuration object and is passed through untouched.
pub fn merge_stats_options(options: Option<Value>) -> Option<Value> {
    match options {
        None | Some(Value::Null) => Some(Value::Object(default_options())),
        Some(Value::Object(caller)) => {
            let mut merged = default_options();
            merged.extend(caller);
            Some(Value::Object(merged))
        }
        other => other,
    }
}

fn default_options() -> Map<String, Value> {
    DEFAULT_STATS_OPTIONS
        .iter()
        .map(|(key, value)| (key.to_string(), Value::Bool(*value)))
        .collect()
}

/// Stats source whose output always satisfies the minimal contract.
///
/// Wrapping an already wrapped source is a no-op at call time: the outer
/// layer delegates directly, so options are merged and documents normalized
/// exactly once.
pub struct CompatStats<S> {
    inner: S,
    normalizer: StatsNormalizer,
}

impl<S: StatsSource> CompatStats<S> {
    pub fn new(inner: S, normalizer: StatsNormalizer) -> Self {
        Self { inner, normalizer }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: StatsSource> StatsSource for CompatStats<S> {
    fn to_json(&self, options: Option<Value>) -> Value {
        if self.inner.is_contract_normalized() {
            tracing::trace!("stats source already wrapped, delegating");
            return self.inner.to_json(options);
        }

        let document = self.inner.to_json(merge_stats_options(options));
        self.normalizer.normalize(document)
    }

    fn is_contract_normalized(&self) -> bool {
        true
    }
}

pub fn with_stats_json_compat<S: StatsSource>(
    stats: S,
    normalizer: StatsNormalizer,
) -> CompatStats<S> {
    CompatStats::new(stats, normalizer)
}
