//! Declarative task descriptors.

use nalgebra::{UnitQuaternion, Vector2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sim_eval::{EvaluationConfig, OutcomeEvaluator};
use tracing::trace;

use crate::{EpisodeSelection, LayoutConfig, OrientationConfig, Result, TaskError};

/// Step limit used when a task does not set one.
pub const DEFAULT_MAX_EPISODE_STEPS: u32 = 60;

fn default_max_episode_steps() -> u32 {
    DEFAULT_MAX_EPISODE_STEPS
}

/// One put-on/put-in task: objects, candidate initial states, instruction
/// and success criterion.
///
/// Objects are ordered source, target, then distractors; every layout and
/// orientation row follows that order.
///
/// # Example
///
/// ```
/// use sim_tasks::{ordered_pairs, orientation, square_corners, OrientationConfig, TaskDescriptor};
/// use nalgebra::Vector2;
///
/// let corners = square_corners(Vector2::new(-0.16, 0.0), 0.075, 0.075);
/// let task = TaskDescriptor::new("PutCarrotOnPlate", "carrot", "plate", "put carrot on plate")
///     .with_layouts(ordered_pairs(&corners))
///     .with_orientations(vec![
///         OrientationConfig::new(vec![orientation::yaw(std::f64::consts::PI), orientation::identity()]),
///         OrientationConfig::new(vec![orientation::yaw(-std::f64::consts::FRAC_PI_2), orientation::identity()]),
///     ]);
///
/// assert!(task.validate().is_ok());
/// assert_eq!(task.num_episodes(), 24);
///
/// let episode = task.episode(5)?;
/// assert_eq!(episode.selection.position_index, 2);
/// assert_eq!(episode.selection.orientation_index, 1);
/// # Ok::<(), sim_tasks::TaskError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    /// Registry key.
    pub name: String,
    /// Asset id of the object to move.
    pub source_model: String,
    /// Asset id of the object to place it on or in.
    pub target_model: String,
    /// Asset ids of additional objects on the table.
    #[serde(default)]
    pub distractor_models: Vec<String>,
    /// Candidate object positions.
    pub layouts: Vec<LayoutConfig>,
    /// Candidate object rotations.
    pub orientations: Vec<OrientationConfig>,
    /// Natural-language goal given to the policy.
    pub instruction: String,
    /// Success criterion.
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    /// Episode step limit.
    #[serde(default = "default_max_episode_steps")]
    pub max_episode_steps: u32,
}

/// Initial object state for one episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeLayout {
    /// Episode id after wrapping.
    pub episode_id: u64,
    /// Table rows used.
    pub selection: EpisodeSelection,
    /// Object positions, in object order.
    pub positions: Vec<Vector2<f64>>,
    /// Object rotations, in object order.
    pub rotations: Vec<UnitQuaternion<f64>>,
}

impl EpisodeLayout {
    /// Source object position.
    #[must_use]
    pub fn source_position(&self) -> Option<Vector2<f64>> {
        self.positions.first().copied()
    }

    /// Target object position.
    #[must_use]
    pub fn target_position(&self) -> Option<Vector2<f64>> {
        self.positions.get(1).copied()
    }

    /// Distractor positions.
    #[must_use]
    pub fn distractor_positions(&self) -> &[Vector2<f64>] {
        self.positions.get(2..).unwrap_or(&[])
    }
}

impl TaskDescriptor {
    /// Create a two-object task with no layouts yet.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source_model: impl Into<String>,
        target_model: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_model: source_model.into(),
            target_model: target_model.into(),
            distractor_models: Vec::new(),
            layouts: Vec::new(),
            orientations: Vec::new(),
            instruction: instruction.into(),
            evaluation: EvaluationConfig::default(),
            max_episode_steps: DEFAULT_MAX_EPISODE_STEPS,
        }
    }

    /// Set the distractor objects.
    #[must_use]
    pub fn with_distractors<S: Into<String>>(mut self, models: impl IntoIterator<Item = S>) -> Self {
        self.distractor_models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Set the candidate layouts.
    #[must_use]
    pub fn with_layouts(mut self, layouts: Vec<LayoutConfig>) -> Self {
        self.layouts = layouts;
        self
    }

    /// Set the candidate orientations.
    #[must_use]
    pub fn with_orientations(mut self, orientations: Vec<OrientationConfig>) -> Self {
        self.orientations = orientations;
        self
    }

    /// Set the success criterion.
    #[must_use]
    pub fn with_evaluation(mut self, evaluation: EvaluationConfig) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Set the step limit.
    #[must_use]
    pub fn with_max_episode_steps(mut self, steps: u32) -> Self {
        self.max_episode_steps = steps;
        self
    }

    /// Same scene under a different name and instruction.
    #[must_use]
    pub fn rephrased(&self, name: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instruction: instruction.into(),
            ..self.clone()
        }
    }

    /// Number of objects in the scene.
    #[must_use]
    pub fn object_count(&self) -> usize {
        2 + self.distractor_models.len()
    }

    /// Asset ids in object order.
    #[must_use]
    pub fn model_ids(&self) -> Vec<&str> {
        [self.source_model.as_str(), self.target_model.as_str()]
            .into_iter()
            .chain(self.distractor_models.iter().map(String::as_str))
            .collect()
    }

    /// Number of distinct initial states.
    #[must_use]
    pub fn num_episodes(&self) -> u64 {
        self.layouts.len() as u64 * self.orientations.len() as u64
    }

    /// Build an evaluator for this task.
    pub fn evaluator(&self) -> Result<OutcomeEvaluator> {
        Ok(OutcomeEvaluator::new(self.evaluation)?)
    }

    /// Initial object state for an episode id. Ids wrap around.
    pub fn episode(&self, episode_id: u64) -> Result<EpisodeLayout> {
        let selection =
            EpisodeSelection::from_index(episode_id, self.layouts.len(), self.orientations.len())
                .ok_or_else(|| self.invalid("no layouts or no orientations"))?;

        let positions = self.layouts[selection.position_index].positions.clone();
        let rotations = self.orientations[selection.orientation_index]
            .rotations
            .clone();
        let episode_id = selection.episode_index(self.orientations.len());

        trace!(
            task = %self.name,
            episode_id,
            position_index = selection.position_index,
            orientation_index = selection.orientation_index,
            "Selected episode layout"
        );

        Ok(EpisodeLayout {
            episode_id,
            selection,
            positions,
            rotations,
        })
    }

    /// Initial object state for a uniformly drawn episode id.
    pub fn sample_episode<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<EpisodeLayout> {
        let total = self.num_episodes();
        if total == 0 {
            return Err(self.invalid("no layouts or no orientations"));
        }
        self.episode(rng.gen_range(0..total))
    }

    /// Validate the descriptor.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("source_model", &self.source_model),
            ("target_model", &self.target_model),
            ("instruction", &self.instruction),
        ] {
            if value.trim().is_empty() {
                return Err(self.invalid(format!("{field} is empty")));
            }
        }

        if self.source_model == self.target_model {
            return Err(self.invalid("source and target are the same model"));
        }
        if self.max_episode_steps == 0 {
            return Err(self.invalid("max_episode_steps must be at least 1"));
        }
        if self.layouts.is_empty() {
            return Err(self.invalid("no layouts"));
        }
        if self.orientations.is_empty() {
            return Err(self.invalid("no orientations"));
        }

        let objects = self.object_count();
        for (i, layout) in self.layouts.iter().enumerate() {
            if layout.len() != objects {
                return Err(self.invalid(format!(
                    "layout {i} places {} objects, expected {objects}",
                    layout.len()
                )));
            }
            if !layout.is_finite() {
                return Err(self.invalid(format!("layout {i} has non-finite positions")));
            }
        }
        for (i, row) in self.orientations.iter().enumerate() {
            if row.len() != objects {
                return Err(self.invalid(format!(
                    "orientation {i} rotates {} objects, expected {objects}",
                    row.len()
                )));
            }
            if !row.is_finite() {
                return Err(self.invalid(format!("orientation {i} has non-finite rotations")));
            }
        }

        self.evaluation
            .validate()
            .map_err(|err| self.invalid(err.to_string()))
    }

    fn invalid(&self, reason: impl Into<String>) -> TaskError {
        TaskError::invalid_descriptor(&self.name, reason)
    }
}
