//! Policy document generation.
//!
//! Assembles complete configuration documents that the policy resolver can
//! consume: every category enabled, parameters drawn from the value pools,
//! plus the `fingerprint_mode` / `fingerprint_id` / `creation_time` envelope.
//! Documents can be fully random, derived deterministically from a seed
//! string, or based on an existing template with selected categories
//! overridden.
//!
//! # Usage
//!
//! ```rust
//! use fingerprint_policy::generator::{GeneratorOptions, PolicyGenerator};
//!
//! let generator = PolicyGenerator::with_options(
//!     GeneratorOptions::new().with_timezone("Europe/Berlin"),
//! );
//!
//! // Same seed, same document (apart from the creation timestamp).
//! let document = generator.consistent("session-42");
//! assert_eq!(
//!     document["settings"]["timezone"]["params"]["timezone"],
//!     "Europe/Berlin"
//! );
//! ```

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use chrono::Local;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::generator::pools;

/// Errors produced while loading or deriving from template documents.
///
/// Generation itself never fails; only template handling touches the
/// filesystem and foreign JSON.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// Failed to read or write a document file.
    #[error("Failed to read template file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse a template as JSON.
    #[error("Failed to parse template JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Template JSON is not shaped like a policy document.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),
}

/// Values pinned by the caller instead of drawn from the pools.
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    language: Option<String>,
    timezone: Option<String>,
    resolution: Option<(u32, u32)>,
    coordinates: Option<(f64, f64)>,
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the primary language; the language list is expanded from it.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Pin the IANA timezone.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Pin the screen resolution; available area is derived from it.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = Some((width, height));
        self
    }

    /// Pin the geolocation; accuracy is fixed at 100 meters.
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some((latitude, longitude));
        self
    }

    /// Pinned values as per-category parameter maps, for template merging.
    fn category_params(&self) -> Vec<(&'static str, Map<String, Value>)> {
        let mut overrides = Vec::new();

        if let Some(language) = &self.language {
            let mut params = Map::new();
            params.insert("language".to_string(), Value::String(language.clone()));
            params.insert(
                "languages".to_string(),
                Value::Array(
                    expand_language(language)
                        .into_iter()
                        .map(Value::String)
                        .collect(),
                ),
            );
            overrides.push(("language", params));
        }

        if let Some(timezone) = &self.timezone {
            let mut params = Map::new();
            params.insert("timezone".to_string(), Value::String(timezone.clone()));
            overrides.push(("timezone", params));
        }

        if let Some((width, height)) = self.resolution {
            let mut params = Map::new();
            params.insert("width".to_string(), json!(width));
            params.insert("height".to_string(), json!(height));
            overrides.push(("screen_resolution", params));
        }

        if let Some((latitude, longitude)) = self.coordinates {
            let mut params = Map::new();
            params.insert("latitude".to_string(), json!(latitude));
            params.insert("longitude".to_string(), json!(longitude));
            params.insert("accuracy".to_string(), json!(100));
            overrides.push(("geolocation", params));
        }

        overrides
    }
}

/// Generator for complete policy documents.
#[derive(Debug, Clone, Default)]
pub struct PolicyGenerator {
    options: GeneratorOptions,
}

impl PolicyGenerator {
    /// Create a generator with no pinned values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator that honors the given pinned values.
    pub fn with_options(options: GeneratorOptions) -> Self {
        Self { options }
    }

    /// Generate a fresh random document.
    pub fn random(&self) -> Value {
        let mut rng = StdRng::from_entropy();
        self.generate(&mut rng, "random")
    }

    /// Generate a document reproducible from a seed string.
    ///
    /// The same seed always yields the same identity and settings; only
    /// `creation_time` reflects the wall clock.
    pub fn consistent(&self, seed: &str) -> Value {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        let mut rng = StdRng::seed_from_u64(hasher.finish());
        self.generate(&mut rng, "consistent")
    }

    /// Derive a document from an existing template.
    ///
    /// The template keeps its own settings; categories pinned through
    /// [`GeneratorOptions`] are forced to `enabled = true, mode = "custom"`
    /// and their parameters merged in, but only where the template already
    /// carries that category. The identity fields (`fingerprint_id`,
    /// `creation_time`) are always refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidTemplate`] when the template is not
    /// a JSON object or lacks a `settings` object.
    pub fn from_template(&self, mut template: Value) -> Result<Value, GeneratorError> {
        let root = template.as_object_mut().ok_or_else(|| {
            GeneratorError::InvalidTemplate("root is not a JSON object".to_string())
        })?;
        if !root.get("settings").map_or(false, Value::is_object) {
            return Err(GeneratorError::InvalidTemplate(
                "missing settings object".to_string(),
            ));
        }

        // A derived document is a new identity.
        root.insert(
            "fingerprint_id".to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
        root.insert("creation_time".to_string(), Value::String(timestamp()));

        let overrides = self.options.category_params();
        if let Some(settings) = root.get_mut("settings").and_then(Value::as_object_mut) {
            for (name, params) in overrides {
                let Some(category) = settings.get_mut(name).and_then(Value::as_object_mut) else {
                    continue;
                };
                category.insert("enabled".to_string(), Value::Bool(true));
                category.insert("mode".to_string(), Value::String("custom".to_string()));

                let slot = category
                    .entry("params")
                    .or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Some(existing) = slot.as_object_mut() {
                    for (key, value) in params {
                        existing.insert(key, value);
                    }
                }
            }
        }

        Ok(template)
    }

    /// Assemble the full 22-category document from one RNG stream.
    fn generate(&self, rng: &mut StdRng, mode: &str) -> Value {
        let language = match &self.options.language {
            Some(pinned) => pinned.clone(),
            None => pick(rng, pools::LANGUAGES).to_owned(),
        };
        let languages = expand_language(&language);

        let timezone = match &self.options.timezone {
            Some(pinned) => pinned.clone(),
            None => pick(rng, pools::TIMEZONES).to_owned(),
        };

        let (width, height) = match self.options.resolution {
            Some(pinned) => pinned,
            None => pools::SCREEN_RESOLUTIONS
                .choose(rng)
                .copied()
                .unwrap_or((1920, 1080)),
        };
        let (available_width, available_height) = pools::available_area(width, height);

        let geolocation = match self.options.coordinates {
            Some((latitude, longitude)) => json!({
                "latitude": latitude,
                "longitude": longitude,
                "accuracy": 100,
            }),
            None => json!({
                "latitude": round6(rng.gen_range(-85.0..85.0)),
                "longitude": round6(rng.gen_range(-180.0..180.0)),
                "accuracy": round2(rng.gen_range(50.0..1000.0)),
            }),
        };

        let scale_factor = pools::SCALE_FACTORS.choose(rng).copied().unwrap_or(1.0);
        let color_depth = pools::COLOR_DEPTHS.choose(rng).copied().unwrap_or(24);
        let max_touch_points = pools::TOUCH_POINTS.choose(rng).copied().unwrap_or(0);
        let cores = pools::HARDWARE_CONCURRENCY
            .choose(rng)
            .copied()
            .unwrap_or(8);
        let memory_gb = pools::DEVICE_MEMORY.choose(rng).copied().unwrap_or(8);
        let user_agent = pick(rng, pools::USER_AGENTS);
        let do_not_track = pick(rng, pools::DO_NOT_TRACK_VALUES);

        let canvas_noise_seed = random_uuid(rng);
        let webgl_noise_seed = random_uuid(rng);

        json!({
            "fingerprint_mode": mode,
            "fingerprint_id": random_uuid(rng),
            "creation_time": timestamp(),
            "settings": {
                "language": {
                    "enabled": true,
                    "mode": "custom",
                    "params": {
                        "language": language,
                        "languages": languages,
                    }
                },
                "timezone": {
                    "enabled": true,
                    "mode": "custom",
                    "params": {
                        "timezone": timezone,
                    }
                },
                "geolocation": {
                    "enabled": true,
                    "mode": "custom",
                    "params": geolocation,
                },
                "screen_resolution": {
                    "enabled": true,
                    "mode": "custom",
                    "params": {
                        "width": width,
                        "height": height,
                    }
                },
                "display_zoom": {
                    "enabled": true,
                    "mode": "custom",
                    "params": {
                        "scale_factor": scale_factor,
                    }
                },
                "screen_size": {
                    "enabled": true,
                    "mode": "custom",
                    "params": {
                        "available_width": available_width,
                        "available_height": available_height,
                    }
                },
                "color_depth": {
                    "enabled": true,
                    "mode": "custom",
                    "params": {
                        "depth": color_depth,
                    }
                },
                "touch_points": {
                    "enabled": true,
                    "mode": "custom",
                    "params": {
                        "max_touch_points": max_touch_points,
                    }
                },
                "canvas": {
                    "enabled": true,
                    "mode": "noise",
                    "params": {
                        "noise_seed": canvas_noise_seed,
                        "noise_level": round2(rng.gen_range(0.1..0.5)),
                    }
                },
                "canvas_font": {
                    "enabled": true,
                    "mode": "custom",
                    "params": {
                        "protected_fonts": pools::PROTECTED_FONTS,
                    }
                },
                "css_font": {
                    "enabled": true,
                    "mode": "noise",
                    "params": {
                        "noise_level": round2(rng.gen_range(0.1..0.4)),
                    }
                },
                "webrtc": {
                    "enabled": true,
                    "mode": "auto_replace",
                    "params": {}
                },
                "webgl": {
                    "enabled": true,
                    "mode": "noise",
                    "params": {
                        "noise_seed": webgl_noise_seed,
                        "noise_level": round2(rng.gen_range(0.1..0.3)),
                    }
                },
                "hardware_concurrency": {
                    "enabled": true,
                    "mode": "custom",
                    "params": {
                        "cores": cores,
                    }
                },
                "device_memory": {
                    "enabled": true,
                    "mode": "custom",
                    "params": {
                        "memory_gb": memory_gb,
                    }
                },
                "battery": {
                    "enabled": true,
                    "mode": "noise",
                    "params": {
                        "charging": rng.gen_bool(0.5),
                        "level": round2(rng.gen_range(0.1..1.0)),
                    }
                },
                "user_agent": {
                    "enabled": true,
                    "mode": "custom",
                    "params": {
                        "user_agent": user_agent,
                    }
                },
                "port_scan_protection": {
                    "enabled": true,
                    "mode": "enable",
                    "params": {}
                },
                "console_output": {
                    "enabled": true,
                    "mode": "disable",
                    "params": {}
                },
                "do_not_track": {
                    "enabled": true,
                    "mode": "enable",
                    "params": {
                        "value": do_not_track,
                    }
                },
                "webdriver_detection": {
                    "enabled": true,
                    "mode": "disable",
                    "params": {}
                },
                "cdp_protection": {
                    "enabled": true,
                    "mode": "enable",
                    "params": {}
                },
            }
        })
    }
}

/// Load a template document from a JSON file.
pub fn load_template<P: AsRef<Path>>(path: P) -> Result<Value, GeneratorError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a document as pretty-printed JSON, creating parent directories.
pub fn save_document<P: AsRef<Path>>(document: &Value, path: P) -> Result<(), GeneratorError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut content = serde_json::to_string_pretty(document)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

/// Expand a primary language tag into the reported language list.
///
/// Region-qualified tags also report their base language, e.g. `"zh-CN"`
/// expands to `["zh-CN", "zh"]` while `"ja"` stays `["ja"]`.
pub fn expand_language(language: &str) -> Vec<String> {
    let mut languages = vec![language.to_owned()];
    if let Some((base, _)) = language.split_once('-') {
        if !languages.iter().any(|existing| existing == base) {
            languages.push(base.to_owned());
        }
    }
    languages
}

fn pick(rng: &mut StdRng, pool: &[&'static str]) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}

fn random_uuid(rng: &mut StdRng) -> String {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string()
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_document_envelope() {
        let document = PolicyGenerator::new().random();
        assert_eq!(document["fingerprint_mode"], "random");
        assert!(Uuid::parse_str(document["fingerprint_id"].as_str().unwrap()).is_ok());
        assert!(!document["creation_time"].as_str().unwrap().is_empty());
        assert_eq!(document["settings"].as_object().unwrap().len(), 22);
    }

    #[test]
    fn test_every_category_enabled_in_generated_document() {
        let document = PolicyGenerator::new().random();
        for (name, category) in document["settings"].as_object().unwrap() {
            assert_eq!(category["enabled"], true, "category {name}");
            assert!(category["mode"].is_string(), "category {name}");
        }
    }

    #[test]
    fn test_consistent_documents_match_for_same_seed() {
        let generator = PolicyGenerator::new();
        let first = generator.consistent("session-1234");
        let second = generator.consistent("session-1234");

        assert_eq!(first["fingerprint_mode"], "consistent");
        assert_eq!(first["fingerprint_id"], second["fingerprint_id"]);
        assert_eq!(first["settings"], second["settings"]);
    }

    #[test]
    fn test_consistent_documents_differ_across_seeds() {
        let generator = PolicyGenerator::new();
        let first = generator.consistent("seed-a");
        let second = generator.consistent("seed-b");
        assert_ne!(first["fingerprint_id"], second["fingerprint_id"]);
    }

    #[test]
    fn test_expand_language() {
        assert_eq!(expand_language("zh-CN"), vec!["zh-CN", "zh"]);
        assert_eq!(expand_language("pt-BR"), vec!["pt-BR", "pt"]);
        assert_eq!(expand_language("ja"), vec!["ja"]);
    }

    #[test]
    fn test_pinned_options_flow_into_document() {
        let generator = PolicyGenerator::with_options(
            GeneratorOptions::new()
                .with_language("zh-CN")
                .with_timezone("Asia/Shanghai")
                .with_resolution(2560, 1440)
                .with_coordinates(31.2304, 121.4737),
        );
        let document = generator.random();
        let settings = &document["settings"];

        assert_eq!(settings["language"]["params"]["language"], "zh-CN");
        assert_eq!(
            settings["language"]["params"]["languages"],
            json!(["zh-CN", "zh"])
        );
        assert_eq!(settings["timezone"]["params"]["timezone"], "Asia/Shanghai");
        assert_eq!(settings["screen_resolution"]["params"]["width"], 2560);
        assert_eq!(settings["screen_resolution"]["params"]["height"], 1440);
        // Available area is derived from the pinned resolution.
        assert_eq!(settings["screen_size"]["params"]["available_width"], 2508);
        assert_eq!(settings["screen_size"]["params"]["available_height"], 1368);
        assert_eq!(settings["geolocation"]["params"]["latitude"], 31.2304);
        assert_eq!(settings["geolocation"]["params"]["accuracy"], 100);
    }

    #[test]
    fn test_extreme_pinned_resolution() {
        // Pinned resolutions are not pool-checked, so the largest u32 must
        // still produce a coherent document.
        let generator = PolicyGenerator::with_options(
            GeneratorOptions::new().with_resolution(u32::MAX, 1_000),
        );
        let document = generator.consistent("wall-of-screens");
        let settings = &document["settings"];

        assert_eq!(settings["screen_resolution"]["params"]["width"], u32::MAX);
        assert_eq!(settings["screen_resolution"]["params"]["height"], 1_000);
        assert_eq!(
            settings["screen_size"]["params"]["available_width"],
            4_209_067_949u32
        );
        assert_eq!(settings["screen_size"]["params"]["available_height"], 950);
    }

    #[test]
    fn test_noise_levels_within_ranges() {
        let document = PolicyGenerator::new().consistent("noise-check");
        let settings = &document["settings"];

        let canvas = settings["canvas"]["params"]["noise_level"].as_f64().unwrap();
        assert!((0.1..=0.5).contains(&canvas));
        let css = settings["css_font"]["params"]["noise_level"].as_f64().unwrap();
        assert!((0.1..=0.4).contains(&css));
        let webgl = settings["webgl"]["params"]["noise_level"].as_f64().unwrap();
        assert!((0.1..=0.3).contains(&webgl));
        let battery = settings["battery"]["params"]["level"].as_f64().unwrap();
        assert!((0.1..=1.0).contains(&battery));
    }

    #[test]
    fn test_template_merge_overrides_pinned_categories() {
        let template = json!({
            "fingerprint_mode": "custom",
            "fingerprint_id": "00000000-0000-0000-0000-000000000000",
            "settings": {
                "timezone": {"enabled": false, "mode": "custom", "params": {"timezone": "UTC"}},
                "battery": {"enabled": true, "mode": "noise", "params": {"level": 0.5}}
            }
        });

        let generator = PolicyGenerator::with_options(
            GeneratorOptions::new()
                .with_timezone("Asia/Tokyo")
                .with_language("de"),
        );
        let document = generator.from_template(template).unwrap();

        // Pinned category present in the template: forced on and overridden.
        let timezone = &document["settings"]["timezone"];
        assert_eq!(timezone["enabled"], true);
        assert_eq!(timezone["mode"], "custom");
        assert_eq!(timezone["params"]["timezone"], "Asia/Tokyo");

        // Pinned category absent from the template: skipped.
        assert!(document["settings"].get("language").is_none());

        // Untouched category keeps the template's values.
        assert_eq!(document["settings"]["battery"]["params"]["level"], 0.5);

        // Identity is refreshed.
        assert_ne!(
            document["fingerprint_id"],
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(document["fingerprint_mode"], "custom");
        assert!(document["creation_time"].is_string());
    }

    #[test]
    fn test_template_merge_creates_missing_params() {
        let template = json!({
            "settings": {
                "timezone": {"enabled": false}
            }
        });
        let generator =
            PolicyGenerator::with_options(GeneratorOptions::new().with_timezone("Europe/Paris"));
        let document = generator.from_template(template).unwrap();
        assert_eq!(
            document["settings"]["timezone"]["params"]["timezone"],
            "Europe/Paris"
        );
    }

    #[test]
    fn test_template_must_be_policy_shaped() {
        let generator = PolicyGenerator::new();
        assert!(matches!(
            generator.from_template(json!([1, 2, 3])),
            Err(GeneratorError::InvalidTemplate(_))
        ));
        assert!(matches!(
            generator.from_template(json!({"settings": "nope"})),
            Err(GeneratorError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_generated_document_resolves_fully() {
        use crate::policy::resolver::resolve_document;

        let document = PolicyGenerator::new().consistent("resolve-me");
        let text = serde_json::to_string(&document).unwrap();
        let policy = resolve_document(&text).unwrap();

        assert_eq!(policy.active_categories().len(), 22);
        assert!(policy.console_output_disabled);
        assert!(policy.webdriver_detection_disabled);
        assert_eq!(
            policy.canvas.noise_seed.as_deref(),
            document["settings"]["canvas"]["params"]["noise_seed"].as_str()
        );
    }
}
