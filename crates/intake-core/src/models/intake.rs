use crate::validation::ValidationErrors;

/// Outcome of a create attempt: either the persisted record, or the untouched
/// candidate together with the rules it failed.
#[derive(Debug)]
pub enum Intake<R, F> {
    Created(R),
    Rejected { form: F, errors: ValidationErrors },
}

impl<R, F> Intake<R, F> {
    pub fn is_created(&self) -> bool {
        matches!(self, Intake::Created(_))
    }

    pub fn created(self) -> Option<R> {
        match self {
            Intake::Created(record) => Some(record),
            Intake::Rejected { .. } => None,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Intake::Created(_) => None,
            Intake::Rejected { errors, .. } => Some(errors),
        }
    }
}
