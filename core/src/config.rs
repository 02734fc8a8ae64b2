//! Builder configuration and route derivation.
//!
//! # Design
//! The original dynamic deep-merge of a partial config over defaults maps to
//! an explicit struct with a `Default` impl: callers write
//! `Config { model_name: "user".into(), ..Config::default() }` and get the
//! documented defaults for everything else. The shape is fixed, so no
//! reflection-style merging is needed.
//!
//! Route derivation turns `model_name` into the model and collection path
//! segments. Kebab-casing comes from `heck`, pluralization from
//! `pluralizer`; both are pure functions, so re-deriving with unchanged
//! inputs is idempotent. The two routes are always regenerated together so
//! neither can go stale on its own.

use heck::ToKebabCase;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::Method;

/// Which base path the next URL build uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteContext {
    Model,
    Collection,
    Any,
}

/// Derived path segments, one per route context.
///
/// `any` stays empty by default so `any`-context URLs start at the base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routes {
    pub model: String,
    pub collection: String,
    pub any: String,
}

impl Routes {
    pub fn for_context(&self, context: RouteContext) -> &str {
        match context {
            RouteContext::Model => &self.model,
            RouteContext::Collection => &self.collection,
            RouteContext::Any => &self.any,
        }
    }
}

/// Path segments appended to distinguish semantic actions sharing a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suffixes {
    pub create: String,
    pub update: String,
    pub destroy: String,
}

impl Default for Suffixes {
    fn default() -> Self {
        Suffixes {
            create: "create".to_string(),
            update: "update".to_string(),
            destroy: "destroy".to_string(),
        }
    }
}

/// HTTP verbs used by the CRUD terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Methods {
    pub create: Method,
    pub update: Method,
    pub destroy: Method,
}

impl Default for Methods {
    fn default() -> Self {
        Methods {
            create: Method::Post,
            update: Method::Post,
            destroy: Method::Post,
        }
    }
}

/// Full builder configuration.
///
/// Immutable after construction except through the explicit `Rapid` setters,
/// which re-derive dependent route fields. `debug` cannot be changed after
/// construction at all.
#[derive(Debug, Clone)]
pub struct Config {
    /// Singular name of the resource this builder addresses.
    pub model_name: String,
    /// Path segment inserted before ids in `update`/`destroy` URLs.
    /// Empty disables the segment.
    pub primary_key: String,
    /// Prefix joined in front of every built URL.
    pub base_url: String,
    /// Keep (and emit) a trailing `/` on built URLs.
    pub trailing_slash: bool,
    /// Skip case conversion when deriving routes.
    pub case_sensitive: bool,
    /// Word separator used inside derived route segments.
    pub route_delimiter: String,
    /// Parameters merged into every outgoing request, losing to staged
    /// parameters on key collision.
    pub global_parameters: Map<String, Value>,
    pub suffixes: Suffixes,
    pub methods: Methods,
    /// Derived route segments; left empty to have construction derive them.
    pub routes: Routes,
    /// Route context the builder starts in.
    pub default_route: RouteContext,
    /// Route terminal calls through the fake-request path instead of the
    /// transport. Constructor-only.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            model_name: "model".to_string(),
            primary_key: String::new(),
            base_url: "api".to_string(),
            trailing_slash: false,
            case_sensitive: false,
            route_delimiter: "-".to_string(),
            global_parameters: Map::new(),
            suffixes: Suffixes::default(),
            methods: Methods::default(),
            routes: Routes::default(),
            default_route: RouteContext::Model,
            debug: false,
        }
    }
}

impl Config {
    /// Re-derive the model route from `model_name`.
    ///
    /// Always called in tandem with `set_collection_route` so the two never
    /// disagree about naming rules.
    pub fn set_model_route(&mut self) {
        self.routes.model = self.derive_route(&self.model_name);
    }

    /// Re-derive the collection route from the pluralized `model_name`.
    pub fn set_collection_route(&mut self) {
        let plural = pluralizer::pluralize(&self.model_name, 2, false);
        self.routes.collection = self.derive_route(&plural);
    }

    fn derive_route(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        if self.case_sensitive {
            return name.to_string();
        }
        name.to_kebab_case().replace('-', &self.route_delimiter)
    }
}

/// Recursive first-wins merge: keys already present in `target` are kept,
/// missing keys are filled from `defaults`, and nested objects on both
/// sides are merged the same way.
pub fn defaults_deep(target: &mut Map<String, Value>, defaults: &Map<String, Value>) {
    for (key, default) in defaults {
        match target.get_mut(key) {
            None => {
                target.insert(key.clone(), default.clone());
            }
            Some(Value::Object(existing)) => {
                if let Value::Object(nested) = default {
                    defaults_deep(existing, nested);
                }
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn derive(mut config: Config) -> Config {
        config.set_model_route();
        config.set_collection_route();
        config
    }

    #[test]
    fn derives_kebab_model_and_collection_routes() {
        let config = derive(Config {
            model_name: "UserProfile".to_string(),
            ..Config::default()
        });
        assert_eq!(config.routes.model, "user-profile");
        assert_eq!(config.routes.collection, "user-profiles");
    }

    #[test]
    fn custom_delimiter_replaces_hyphens() {
        let config = derive(Config {
            model_name: "UserProfile".to_string(),
            route_delimiter: "_".to_string(),
            ..Config::default()
        });
        assert_eq!(config.routes.model, "user_profile");
        assert_eq!(config.routes.collection, "user_profiles");
    }

    #[test]
    fn case_sensitive_keeps_raw_name_but_still_pluralizes() {
        let config = derive(Config {
            model_name: "UserProfile".to_string(),
            case_sensitive: true,
            ..Config::default()
        });
        assert_eq!(config.routes.model, "UserProfile");
        assert_eq!(config.routes.collection, "UserProfiles");
    }

    #[test]
    fn derivation_is_idempotent() {
        let mut config = derive(Config {
            model_name: "photo".to_string(),
            ..Config::default()
        });
        let first = config.routes.clone();
        config.set_model_route();
        config.set_collection_route();
        assert_eq!(config.routes, first);
    }

    #[test]
    fn empty_model_name_leaves_routes_empty() {
        let config = derive(Config {
            model_name: String::new(),
            ..Config::default()
        });
        assert_eq!(config.routes.model, "");
        assert_eq!(config.routes.collection, "");
    }

    #[test]
    fn defaults_deep_keeps_existing_keys() {
        let mut target = json!({"a": 1, "nested": {"x": 1}})
            .as_object()
            .unwrap()
            .clone();
        let defaults = json!({"a": 2, "b": 3, "nested": {"x": 2, "y": 4}})
            .as_object()
            .unwrap()
            .clone();
        defaults_deep(&mut target, &defaults);
        assert_eq!(Value::Object(target), json!({"a": 1, "b": 3, "nested": {"x": 1, "y": 4}}));
    }

    #[test]
    fn defaults_deep_does_not_merge_into_non_objects() {
        let mut target = json!({"a": [1, 2]}).as_object().unwrap().clone();
        let defaults = json!({"a": {"x": 1}}).as_object().unwrap().clone();
        defaults_deep(&mut target, &defaults);
        assert_eq!(Value::Object(target), json!({"a": [1, 2]}));
    }
}
