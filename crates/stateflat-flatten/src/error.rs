//! Failure modes of a flattening run.
//!
//! Every variant aborts the run: no partial block list is ever returned.

use stateflat_ir::StatementKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlattenError {
    /// A block name was scheduled twice. Two resume points would share one address.
    #[error("internal error: label `{label}` was scheduled twice")]
    DuplicateLabel { label: String },

    /// A statement kind that has no flattening strategy contains a label.
    #[error("internal error: a `{}` statement cannot contain labels", .kind.name())]
    UnhandledLabeledStatement { kind: StatementKind },

    #[error("labels inside a switch statement are not supported (found `{label}`)")]
    LabelInSwitch { label: String },

    #[error("`{} {label}` is not supported; only unlabeled break and continue can be flattened", .keyword.name())]
    NamedJump { keyword: StatementKind, label: String },

    /// The same label is declared twice in one body. Both would need the same block name.
    #[error("label `{label}` is declared more than once")]
    RepeatedLabel { label: String },

    #[error("label `{label}` collides with a reserved state machine name")]
    ReservedLabel { label: String },

    #[error("invalid flatten options: {0}")]
    InvalidOptions(String),
}

impl FlattenError {
    /// Whether this failure points at a bug in an earlier phase or in the
    /// flattener itself, as opposed to a construct the flattener rejects.
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::DuplicateLabel { .. } | Self::UnhandledLabeledStatement { .. }
        )
    }
}
