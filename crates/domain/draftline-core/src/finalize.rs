//! The last step shared by every caller that turns fragments into final outputs.

use crate::combine::{combine_markup, combine_styles, SpliceOutcome};
use crate::error::StageError;
use crate::state::DocumentMeta;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalOutputs {
    pub markup: String,
    pub style: String,
    pub splice: SpliceOutcome,
}

/// Finalizing needs at least one custom fragment to merge in.
pub fn require_custom_input(user_markup: &str, user_style: &str) -> Result<(), StageError> {
    if user_markup.trim().is_empty() && user_style.trim().is_empty() {
        return Err(StageError::validation(
            "Add custom markup or additional styles before finalizing",
        ));
    }
    Ok(())
}

pub fn assemble_outputs(
    generated: &str,
    user_markup: &str,
    base_style: &str,
    extra_style: &str,
    meta: Option<&DocumentMeta>,
) -> FinalOutputs {
    let outcome = combine_markup(generated, user_markup, meta);
    FinalOutputs {
        markup: outcome.markup,
        style: combine_styles(base_style, extra_style, meta),
        splice: outcome.splice,
    }
}
