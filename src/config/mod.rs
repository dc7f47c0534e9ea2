pub mod applicator;
pub mod loader;
pub mod schema;
pub mod settings;

pub use applicator::{apply_script, ScriptError, ScriptOutput, StepResult};
pub use loader::{load_from_json_str, load_from_str, ConfigError};
pub use schema::{EditScript, EditStep, Metadata, ValidationError, ValidationIssue};
pub use settings::{EditorSettings, LineSeparator, LINE_SEPARATOR};
