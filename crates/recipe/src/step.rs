//! Steps, actions and the checks a cook performs along the way.
//!
//! A [`Step`] is a node in a rooted tree: its `threads` are sub-steps that
//! happen at the same time as the step itself (steaming milk while the
//! espresso pulls). The tree carries no execution semantics.

use serde::{Deserialize, Serialize};

use crate::entity::{Appliance, Container, Ingredient, Tool};
use crate::units::{CookDuration, Temperature};

/// A single typed operation, e.g. `add`, `mix`, `heat`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<Ingredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<Tool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appliance: Option<Appliance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<CookDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ingredient: None,
            container: None,
            tool: None,
            appliance: None,
            temperature: None,
            duration: None,
            note: None,
        }
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredient = Some(ingredient);
        self
    }

    pub fn with_container(mut self, container: Container) -> Self {
        self.container = Some(container);
        self
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tool = Some(tool);
        self
    }

    pub fn with_appliance(mut self, appliance: Appliance) -> Self {
        self.appliance = Some(appliance);
        self
    }

    pub fn with_temperature(mut self, temperature: Temperature) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_duration(mut self, duration: CookDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Something to watch for ("visual": "foam doubles in volume").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cue {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// A taste/smell/touch check with the correction to apply if it fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SensoryCheck {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub adjustment: String,
}

/// Conditional instruction: if `condition`, then `action`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Adjustment {
    pub condition: String,
    pub action: String,
}

/// One node of the step tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Step {
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub cues: Vec<Cue>,
    #[serde(default, rename = "sensoryChecks")]
    pub sensory_checks: Vec<SensoryCheck>,
    #[serde(default)]
    pub adjustments: Vec<Adjustment>,
    /// Sub-steps running concurrently with this one.
    #[serde(default)]
    pub threads: Vec<Step>,
}

impl Step {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth-first walk over this step and all nested threads.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Step)) {
        visit(self);
        for thread in &self.threads {
            thread.walk(visit);
        }
    }

    pub(crate) fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Step)) {
        visit(self);
        for thread in &mut self.threads {
            thread.walk_mut(visit);
        }
    }

    /// Number of nodes in the subtree rooted here, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.threads.iter().map(Step::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> Step {
        Step {
            actions: vec![Action::new("brew")],
            threads: vec![
                Step {
                    actions: vec![Action::new("steam")],
                    threads: vec![Step {
                        actions: vec![Action::new("froth")],
                        ..Step::default()
                    }],
                    ..Step::default()
                },
                Step {
                    actions: vec![Action::new("warm")],
                    ..Step::default()
                },
            ],
            ..Step::default()
        }
    }

    #[test]
    fn walk_is_depth_first() {
        let step = nested();
        let mut seen = Vec::new();
        step.walk(&mut |s| seen.push(s.actions[0].kind.as_str()));
        assert_eq!(seen, vec!["brew", "steam", "froth", "warm"]);
        assert_eq!(step.node_count(), 4);
    }

    #[test]
    fn action_serializes_kind_as_type() {
        let json = serde_json::to_value(Action::new("mix")).unwrap();
        assert_eq!(json["type"], "mix");
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn step_json_uses_camel_case_checks() {
        let step = Step {
            sensory_checks: vec![SensoryCheck {
                kind: "taste".into(),
                description: "sweet enough".into(),
                adjustment: "add sugar".into(),
            }],
            ..Step::default()
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["sensoryChecks"][0]["type"], "taste");
        let back: Step = serde_json::from_value(json).unwrap();
        assert_eq!(back, step);
    }
}
