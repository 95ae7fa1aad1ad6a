//! Workspace umbrella crate for recipe fingerprinting.
//!
//! This crate stitches the recipe data model and the sketch pipeline together
//! so callers can build, hash and compare recipes through a single API, with
//! structured logging and an optional metrics observer around every stage.

pub mod config;

pub use crate::config::{ConfigLoadError, RecipeFpConfig, SketchYamlConfig};
pub use recipe::{
    Action, Adjustment, Appliance, Container, CookDuration, Cue, Ingredient, Recipe,
    RecipeBuilder, RecipeError, RecipeMetadata, SensoryCheck, Step, StepBuilder, Temperature,
    TemperatureScale, TimeUnit, Tool, Unit, convert, to_markdown, to_text,
};
pub use sketch::{
    DecodeError, FeatureToken, HashFormat, Histogram, Operand, RecipeSketch, SketchConfig,
    SketchError, SketchMeta, bucket_index, compare_histograms, decode, encode, extract_features,
};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{Level, info, warn};

/// Errors that can occur while running a recipe through the pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("recipe failure: {0}")]
    Recipe(#[from] RecipeError),
    #[error("sketch failure: {0}")]
    Sketch(#[from] SketchError),
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_parse(&self, latency: Duration, result: Result<(), RecipeError>);
    fn record_hash(&self, latency: Duration, result: Result<(), SketchError>);
    fn record_compare(&self, latency: Duration, result: Result<(), SketchError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_parse(self, result: Result<(), RecipeError>) {
        self.recorder.record_parse(self.start.elapsed(), result);
    }

    fn record_hash(self, result: Result<(), SketchError>) {
        self.recorder.record_hash(self.start.elapsed(), result);
    }

    fn record_compare(self, result: Result<(), SketchError>) {
        self.recorder.record_compare(self.start.elapsed(), result);
    }
}

/// Sketch a recipe: feature extraction, bucket hashing and encoding.
pub fn sketch_recipe(recipe: &Recipe, cfg: &SketchConfig) -> Result<RecipeSketch, PipelineError> {
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "recipefp.sketch", recipe = %recipe.name());
    let _guard = span.enter();

    let metrics = MetricsSpan::start();
    match sketch::sketch(recipe, cfg) {
        Ok(result) => {
            if let Some(span) = metrics {
                span.record_hash(Ok(()));
            }
            info!(
                tokens = result.token_count,
                buckets = result.meta.buckets,
                elapsed_micros = start.elapsed().as_micros(),
                "sketch_success"
            );
            Ok(result)
        }
        Err(err) => {
            if let Some(span) = metrics {
                span.record_hash(Err(err.clone()));
            }
            warn!(error = %err, elapsed_micros = start.elapsed().as_micros(), "sketch_failure");
            Err(PipelineError::Sketch(err))
        }
    }
}

/// Encoded hash of a recipe. Memoized on the recipe instance until it is
/// next mutated.
pub fn hash_recipe(recipe: &Recipe, cfg: &SketchConfig) -> Result<String, PipelineError> {
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "recipefp.hash", recipe = %recipe.name());
    let _guard = span.enter();

    let metrics = MetricsSpan::start();
    match sketch::hash(recipe, cfg) {
        Ok(encoded) => {
            if let Some(span) = metrics {
                span.record_hash(Ok(()));
            }
            info!(
                hash_len = encoded.len(),
                elapsed_micros = start.elapsed().as_micros(),
                "hash_success"
            );
            Ok(encoded)
        }
        Err(err) => {
            if let Some(span) = metrics {
                span.record_hash(Err(err.clone()));
            }
            warn!(error = %err, elapsed_micros = start.elapsed().as_micros(), "hash_failure");
            Err(PipelineError::Sketch(err))
        }
    }
}

/// Similarity in `[0, 1]` between two recipes or encoded hashes.
pub fn compare<'a, 'b>(
    a: impl Into<Operand<'a>>,
    b: impl Into<Operand<'b>>,
    cfg: &SketchConfig,
) -> Result<f64, PipelineError> {
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "recipefp.compare", buckets = cfg.buckets);
    let _guard = span.enter();

    let metrics = MetricsSpan::start();
    match sketch::similarity(a, b, cfg) {
        Ok(score) => {
            if let Some(span) = metrics {
                span.record_compare(Ok(()));
            }
            info!(
                score,
                elapsed_micros = start.elapsed().as_micros(),
                "compare_success"
            );
            Ok(score)
        }
        Err(err) => {
            if let Some(span) = metrics {
                span.record_compare(Err(err.clone()));
            }
            warn!(error = %err, elapsed_micros = start.elapsed().as_micros(), "compare_failure");
            Err(PipelineError::Sketch(err))
        }
    }
}

/// Parse a JSON recipe and hash it in one go.
pub fn process_recipe_json(
    json: &str,
    cfg: &SketchConfig,
) -> Result<(Recipe, String), PipelineError> {
    let metrics = MetricsSpan::start();
    let recipe = match Recipe::from_json(json) {
        Ok(recipe) => {
            if let Some(span) = metrics {
                span.record_parse(Ok(()));
            }
            recipe
        }
        Err(err) => {
            if let Some(span) = metrics {
                span.record_parse(Err(err.clone()));
            }
            warn!(error = %err, "parse_failure");
            return Err(PipelineError::Recipe(err));
        }
    };
    let encoded = hash_recipe(&recipe, cfg)?;
    Ok((recipe, encoded))
}

/// Small two-step latte recipe used by the demo binary and smoke tests.
pub fn latte_demo() -> Result<Recipe, RecipeError> {
    RecipeBuilder::new("Latte")
        .describe("Espresso with steamed milk")
        .serves(1)
        .tag("coffee")
        .ingredient(Ingredient::new("Latte"))
        .ingredient(Ingredient::new("Espresso").amount(30.0, Unit::Milliliter))
        .ingredient(Ingredient::new("Sugar").amount(1.0, Unit::Teaspoon).optional())
        .step(|s| {
            s.add(Ingredient::new("Espresso"), Container::new("Mug"))
                .mix(None)
        })
        .step(|s| {
            s.heat(Temperature::celsius(65.0), Appliance::new("Steam wand"))
                .lasting(CookDuration::minutes(2.0))
                .cue("visual", "milk doubles in volume")
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex, RwLock};

    // Serializes tests that touch the global metrics recorder.
    static METRICS_GUARD: Mutex<()> = Mutex::new(());

    #[derive(Default)]
    struct CountingMetrics {
        events: Arc<RwLock<Vec<&'static str>>>,
    }

    impl CountingMetrics {
        fn snapshot(&self) -> Vec<&'static str> {
            self.events.read().unwrap().clone()
        }

        fn push(&self, label: &'static str) {
            self.events.write().unwrap().push(label);
        }
    }

    impl PipelineMetrics for CountingMetrics {
        fn record_parse(&self, _latency: Duration, result: Result<(), RecipeError>) {
            self.push(if result.is_ok() { "parse_ok" } else { "parse_err" });
        }

        fn record_hash(&self, _latency: Duration, result: Result<(), SketchError>) {
            self.push(if result.is_ok() { "hash_ok" } else { "hash_err" });
        }

        fn record_compare(&self, _latency: Duration, result: Result<(), SketchError>) {
            self.push(if result.is_ok() {
                "compare_ok"
            } else {
                "compare_err"
            });
        }
    }

    #[test]
    fn latte_demo_builds() {
        let recipe = latte_demo().unwrap();
        assert_eq!(recipe.name(), "Latte");
        assert_eq!(recipe.steps().len(), 2);
    }

    #[test]
    fn hash_and_compare_demo() {
        let recipe = latte_demo().unwrap();
        let cfg = SketchConfig::default();
        let encoded = hash_recipe(&recipe, &cfg).unwrap();
        assert_eq!(compare(&recipe, &encoded, &cfg).unwrap(), 1.0);
    }

    #[test]
    fn sketch_recipe_reports_tokens() {
        let recipe = latte_demo().unwrap();
        let sketch = sketch_recipe(&recipe, &SketchConfig::default()).unwrap();
        // 3 ingredients | add espresso mug, mix | heat 65 2, visual + description
        assert_eq!(sketch.token_count, 12);
    }

    #[test]
    fn process_recipe_json_round_trips() {
        let recipe = latte_demo().unwrap();
        let cfg = SketchConfig::default();
        let json = recipe.to_json().unwrap();
        let (parsed, encoded) = process_recipe_json(&json, &cfg).unwrap();
        assert_eq!(parsed, recipe);
        assert_eq!(encoded, hash_recipe(&recipe, &cfg).unwrap());
    }

    #[test]
    fn process_recipe_json_rejects_bad_input() {
        let err = process_recipe_json("{", &SketchConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Recipe(RecipeError::Json(_))));
    }

    #[test]
    fn metrics_recorder_tracks_pipeline_outcome() {
        let _lock = METRICS_GUARD.lock().unwrap_or_else(|p| p.into_inner());
        let metrics = Arc::new(CountingMetrics::default());
        set_pipeline_metrics(Some(metrics.clone()));

        let cfg = SketchConfig::default();
        let recipe = latte_demo().unwrap();
        let encoded = hash_recipe(&recipe, &cfg).unwrap();
        assert!(compare(&recipe, encoded.as_str(), &cfg).is_ok());
        assert!(compare(&recipe, "not-base64!!", &cfg).is_err());
        assert!(process_recipe_json("[]", &cfg).is_err());

        let events = metrics.snapshot();
        assert!(events.contains(&"hash_ok"));
        assert!(events.contains(&"compare_ok"));
        assert!(events.contains(&"compare_err"));
        assert!(events.contains(&"parse_err"));

        set_pipeline_metrics(None);
    }
}
