//! Template Expansion
//!
//! Turns definition/module references into concrete subtrees: builds a
//! per-instance state context from declared props and state vars, deep
//! clones the template JSON substituting `{{name}}` placeholders, then
//! hands the clone back to the deserializer. Id remapping and
//! owner-instance tagging happen on the expanded subtree so multiple
//! instances of one definition stay independent.

use serde_json::Value;
use std::collections::{HashMap, HashSet};

use crate::document::{ComponentDefinition, KirDocument};
use crate::error::Warning;

/// Caller-supplied loader for cross-document module references. The core
/// does no I/O; the front end decides where module KIR text lives.
pub trait ModuleResolver {
    /// Return the raw KIR text of the given module, or `None` when the
    /// module cannot be found.
    fn load(&self, module_id: &str) -> Option<String>;
}

/// Memoizing store of definitions pulled in from other documents.
/// Append-only: a module is loaded at most once per deserializer.
#[derive(Default)]
pub struct ModuleCache {
    definitions: HashMap<String, ComponentDefinition>,
    loaded: HashSet<String>,
}

impl ModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `module_id/export`; loads the module through the resolver
    /// on first touch.
    pub fn lookup(
        &mut self,
        module_id: &str,
        export: Option<&str>,
        resolver: Option<&dyn ModuleResolver>,
    ) -> Option<ComponentDefinition> {
        if !self.loaded.contains(module_id) {
            self.loaded.insert(module_id.to_string());
            if let Some(resolver) = resolver {
                if let Some(text) = resolver.load(module_id) {
                    self.ingest(module_id, &text);
                }
            }
        }

        match export {
            Some(export) => self.definitions.get(&format!("{module_id}/{export}")).cloned(),
            // No export named: any definition from the module will do.
            None => self
                .definitions
                .iter()
                .find(|(key, _)| key.starts_with(&format!("{module_id}/")))
                .map(|(_, def)| def.clone()),
        }
    }

    fn ingest(&mut self, module_id: &str, text: &str) {
        let Ok(value) = serde_json::from_str::<Value>(text) else {
            tracing::warn!(module = module_id, "module KIR is not valid JSON");
            return;
        };
        let defs = value
            .get("component_definitions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        for def in defs {
            match serde_json::from_value::<ComponentDefinition>(def) {
                Ok(def) => {
                    self.definitions.insert(format!("{}/{}", module_id, def.name), def);
                }
                Err(err) => {
                    tracing::warn!(module = module_id, %err, "skipping malformed definition");
                }
            }
        }
    }
}

/// Flat name -> value table for one instance expansion
#[derive(Debug, Default, Clone)]
pub struct StateContext {
    entries: Vec<(String, Value)>,
}

impl StateContext {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.push((name.into(), value));
    }

    fn render(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Seed the state context: declared props first (instance-supplied values
/// override declared defaults), then state vars, whose initial value may
/// reference a prop by `{"var": name}` or by bare name.
pub fn build_state(def: &ComponentDefinition, instance: Option<&Value>) -> StateContext {
    let mut sc = StateContext::default();

    for prop in &def.props {
        let supplied = instance.and_then(|i| i.get(&prop.name)).cloned();
        if let Some(value) = supplied.or_else(|| prop.default.clone()) {
            sc.insert(prop.name.clone(), value);
        }
    }

    for var in &def.state {
        let resolved = match &var.initial {
            Some(Value::Object(obj)) => obj
                .get("var")
                .and_then(Value::as_str)
                .and_then(|name| sc.get(name).cloned()),
            Some(Value::String(s)) => {
                // A string initial may itself be the JSON `{"var": ...}`
                // form, or just a prop name.
                let via_json = serde_json::from_str::<Value>(s).ok().and_then(|v| {
                    v.get("var")
                        .and_then(Value::as_str)
                        .and_then(|name| sc.get(name).cloned())
                });
                via_json.or_else(|| {
                    if s.starts_with('{') {
                        None
                    } else {
                        sc.get(s).cloned()
                    }
                })
            }
            Some(other) => Some(other.clone()),
            None => None,
        };
        if let Some(value) = resolved {
            sc.insert(var.name.clone(), value);
        }
    }

    sc
}

/// Substitute every `{{name}}` occurrence in `text`. A placeholder whose
/// name is not in the context is left verbatim.
pub fn substitute(text: &str, sc: &StateContext) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("{{") {
        let Some(close) = rest[open..].find("}}") else { break };
        let close = open + close;

        out.push_str(&rest[..open]);
        let name = &rest[open + 2..close];
        match sc.render(name.trim()) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[open..close + 2]),
        }
        rest = &rest[close + 2..];
    }
    out.push_str(rest);
    out
}

/// Deep clone template JSON, substituting placeholders in string values.
///
/// `text_expression` values are exempt: they must keep their `{{…}}` form
/// for later reactive re-evaluation. A `text` field co-located with a
/// `text_expression` is recomputed from the expression instead of copied.
pub fn clone_and_substitute(json: &Value, sc: &StateContext) -> Value {
    clone_impl(json, sc, false)
}

fn clone_impl(json: &Value, sc: &StateContext, skip_substitution: bool) -> Value {
    match json {
        Value::String(s) => {
            if skip_substitution {
                Value::String(s.clone())
            } else {
                Value::String(substitute(s, sc))
            }
        }
        Value::Array(items) => {
            Value::Array(items.iter().map(|i| clone_impl(i, sc, false)).collect())
        }
        Value::Object(obj) => {
            let expression = obj.get("text_expression").and_then(Value::as_str);
            let mut out = serde_json::Map::with_capacity(obj.len());
            for (key, value) in obj {
                if key == "text" {
                    if let Some(expr) = expression {
                        out.insert(key.clone(), Value::String(substitute(expr, sc)));
                        continue;
                    }
                }
                let skip = key == "text_expression";
                out.insert(key.clone(), clone_impl(value, sc, skip));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// Parse a `$module:<id>[#<export>]` reference.
pub fn parse_module_ref(type_name: &str) -> Option<(String, Option<String>)> {
    let rest = type_name.strip_prefix("$module:")?;
    match rest.split_once('#') {
        Some((module, export)) => Some((module.to_string(), Some(export.to_string()))),
        None => Some((rest.to_string(), None)),
    }
}

/// Shared mutable context for one deserialization run
pub(crate) struct ExpandContext<'a> {
    pub definitions: HashMap<String, ComponentDefinition>,
    pub modules: ModuleCache,
    pub resolver: Option<&'a dyn ModuleResolver>,
    pub warnings: Vec<Warning>,
    pub depth: usize,
}

impl<'a> ExpandContext<'a> {
    pub fn new(document: &KirDocument, resolver: Option<&'a dyn ModuleResolver>) -> Self {
        let definitions = document
            .definitions
            .iter()
            .map(|d| (d.name.clone(), d.clone()))
            .collect();
        Self { definitions, modules: ModuleCache::new(), resolver, warnings: Vec::new(), depth: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{PropDef, StateVarDef};
    use serde_json::json;

    fn counter_def() -> ComponentDefinition {
        ComponentDefinition {
            name: "Counter".into(),
            props: vec![PropDef { name: "start".into(), ty: Some("int".into()), default: Some(json!(0)) }],
            state: vec![StateVarDef {
                name: "count".into(),
                ty: Some("int".into()),
                initial: Some(json!({"var": "start"})),
            }],
            template: json!({"type": "Text", "text_expression": "{{count}}"}),
        }
    }

    #[test]
    fn test_state_prop_override() {
        let def = counter_def();
        let sc = build_state(&def, Some(&json!({"start": 5})));
        assert_eq!(sc.get("start"), Some(&json!(5)));
        assert_eq!(sc.get("count"), Some(&json!(5)));
    }

    #[test]
    fn test_state_default_applies() {
        let def = counter_def();
        let sc = build_state(&def, None);
        assert_eq!(sc.get("count"), Some(&json!(0)));
    }

    #[test]
    fn test_state_initial_as_json_string() {
        let mut def = counter_def();
        def.state[0].initial = Some(json!("{\"var\":\"start\"}"));
        let sc = build_state(&def, Some(&json!({"start": 9})));
        assert_eq!(sc.get("count"), Some(&json!(9)));
    }

    #[test]
    fn test_substitute_all_occurrences() {
        let mut sc = StateContext::default();
        sc.insert("name", json!("kir"));
        assert_eq!(substitute("{{name}} and {{name}}", &sc), "kir and kir");
    }

    #[test]
    fn test_substitute_unresolved_left_verbatim() {
        let sc = StateContext::default();
        assert_eq!(substitute("hello {{missing}}", &sc), "hello {{missing}}");
    }

    #[test]
    fn test_clone_preserves_text_expression() {
        let mut sc = StateContext::default();
        sc.insert("count", json!(5));
        let template = json!({"type": "Text", "text": "stale", "text_expression": "{{count}}"});
        let out = clone_and_substitute(&template, &sc);
        // text recomputed from the expression, expression kept verbatim
        assert_eq!(out["text"], json!("5"));
        assert_eq!(out["text_expression"], json!("{{count}}"));
    }

    #[test]
    fn test_parse_module_ref() {
        assert_eq!(
            parse_module_ref("$module:components/tabs#buildTabs"),
            Some(("components/tabs".into(), Some("buildTabs".into())))
        );
        assert_eq!(parse_module_ref("$module:widgets"), Some(("widgets".into(), None)));
        assert_eq!(parse_module_ref("Counter"), None);
    }
}
