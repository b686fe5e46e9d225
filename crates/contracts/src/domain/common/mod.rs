//! Common types and traits for all workflow records

pub mod record;
pub mod status;
pub mod transition;
pub mod workflow_base;

// Re-exports
pub use record::{CsvExportable, HasWorkflowBase, WorkflowRecord};
pub use status::{
    ApprovalStatus, IncidentStatus, RecordStatus, StatusVocabulary, WorkflowStatus,
};
pub use transition::{TransitionAction, TransitionRequest, TransitionResult};
pub use workflow_base::WorkflowBase;
