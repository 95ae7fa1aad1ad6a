//! Fluent builder DSL.
//!
//! ```
//! use recipe::{Container, CookDuration, Ingredient, RecipeBuilder, Temperature, Unit};
//!
//! let latte = RecipeBuilder::new("Latte")
//!     .serves(1)
//!     .tag("coffee")
//!     .ingredient(Ingredient::new("Espresso").amount(30.0, Unit::Milliliter))
//!     .ingredient(Ingredient::new("Milk").amount(200.0, Unit::Milliliter))
//!     .step(|s| {
//!         s.add(Ingredient::new("Espresso"), Container::new("Mug"))
//!             .mix(None)
//!     })
//!     .step(|s| {
//!         s.heat(Temperature::celsius(65.0), None)
//!             .lasting(CookDuration::minutes(2.0))
//!             .cue("visual", "milk starts to steam")
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(latte.steps().len(), 2);
//! ```

use crate::entity::{Appliance, Container, Ingredient, Tool};
use crate::error::RecipeError;
use crate::recipe::{Recipe, RecipeMetadata, RecipeParts};
use crate::step::{Action, Adjustment, Cue, SensoryCheck, Step};
use crate::units::{CookDuration, Temperature};

/// Entry point of the DSL. Validation happens once, in [`RecipeBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct RecipeBuilder {
    name: String,
    description: Option<String>,
    servings: Option<u32>,
    tags: Vec<String>,
    metadata: RecipeMetadata,
    ingredients: Vec<Ingredient>,
    containers: Vec<Container>,
    tools: Vec<Tool>,
    appliances: Vec<Appliance>,
    steps: Vec<Step>,
}

impl RecipeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn serves(mut self, servings: u32) -> Self {
        self.servings = Some(servings);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.metadata.author = Some(author.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.metadata.source = Some(source.into());
        self
    }

    pub fn prep_time(mut self, duration: CookDuration) -> Self {
        self.metadata.prep_time = Some(duration);
        self
    }

    pub fn cook_time(mut self, duration: CookDuration) -> Self {
        self.metadata.cook_time = Some(duration);
        self
    }

    pub fn ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    pub fn container(mut self, container: Container) -> Self {
        self.containers.push(container);
        self
    }

    pub fn tool(mut self, tool: Tool) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn appliance(mut self, appliance: Appliance) -> Self {
        self.appliances.push(appliance);
        self
    }

    /// Append a top-level step described by `describe`.
    pub fn step(mut self, describe: impl FnOnce(StepBuilder) -> StepBuilder) -> Self {
        self.steps.push(describe(StepBuilder::new()).finish());
        self
    }

    /// Append an already constructed step.
    pub fn push_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> Result<Recipe, RecipeError> {
        Recipe::from_parts(RecipeParts {
            name: self.name,
            description: self.description,
            servings: self.servings,
            tags: self.tags,
            metadata: self.metadata,
            ingredients: self.ingredients,
            containers: self.containers,
            tools: self.tools,
            appliances: self.appliances,
            steps: self.steps,
        })
    }
}

/// Builds one [`Step`], including nested parallel threads.
#[derive(Debug, Clone, Default)]
pub struct StepBuilder {
    step: Step,
}

impl StepBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(mut self, action: Action) -> Self {
        self.step.actions.push(action);
        self
    }

    pub fn add(self, ingredient: Ingredient, container: impl Into<Option<Container>>) -> Self {
        let mut action = Action::new("add").with_ingredient(ingredient);
        action.container = container.into();
        self.action(action)
    }

    pub fn mix(self, container: impl Into<Option<Container>>) -> Self {
        let mut action = Action::new("mix");
        action.container = container.into();
        self.action(action)
    }

    pub fn heat(self, temperature: Temperature, appliance: impl Into<Option<Appliance>>) -> Self {
        let mut action = Action::new("heat").with_temperature(temperature);
        action.appliance = appliance.into();
        self.action(action)
    }

    pub fn wait(self, duration: CookDuration) -> Self {
        self.action(Action::new("wait").with_duration(duration))
    }

    /// Attach a duration to the most recent action, or add a `wait` action
    /// when the step has none yet.
    pub fn lasting(mut self, duration: CookDuration) -> Self {
        match self.step.actions.last_mut() {
            Some(action) => {
                action.duration = Some(duration);
                self
            }
            None => self.wait(duration),
        }
    }

    pub fn cue(mut self, kind: impl Into<String>, description: impl Into<String>) -> Self {
        self.step.cues.push(Cue {
            kind: kind.into(),
            description: description.into(),
        });
        self
    }

    pub fn sensory_check(
        mut self,
        kind: impl Into<String>,
        description: impl Into<String>,
        adjustment: impl Into<String>,
    ) -> Self {
        self.step.sensory_checks.push(SensoryCheck {
            kind: kind.into(),
            description: description.into(),
            adjustment: adjustment.into(),
        });
        self
    }

    pub fn adjust(mut self, condition: impl Into<String>, action: impl Into<String>) -> Self {
        self.step.adjustments.push(Adjustment {
            condition: condition.into(),
            action: action.into(),
        });
        self
    }

    /// Add a sub-step that runs alongside this one.
    pub fn parallel(mut self, describe: impl FnOnce(StepBuilder) -> StepBuilder) -> Self {
        self.step.threads.push(describe(StepBuilder::new()).finish());
        self
    }

    pub fn finish(self) -> Step {
        self.step
    }
}
