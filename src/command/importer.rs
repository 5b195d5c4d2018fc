use super::Command;
use crate::error::PipelineResult;

/// External collaborator turning a textual or structured source into a
/// fully formed command tree.
///
/// Import failures should be reported as
/// [`PipelineError::Import`](crate::error::PipelineError::Import).
pub trait CommandImporter {
    /// Short format label, e.g. the file extension it handles
    fn format(&self) -> &str;

    fn import(&self, name: &str, source: &str) -> PipelineResult<Command>;
}
