pub mod exercise;
pub mod health;
pub mod profile;
pub mod session;
pub mod template;

pub use exercise::{Exercise, NewExercise};
pub use health::{HealthMetric, MetricType, NewHealthMetric};
pub use profile::UserProfile;
pub use session::{ExerciseLog, NewExerciseLog, SessionStatus, WorkoutSession};
pub use template::{ProgramTemplate, ProgramTemplateExercise, TemplateWithExercises};
