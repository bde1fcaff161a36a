use thiserror::Error;

use crate::fingerprint::FingerprintError;
use crate::form::FormError;
use crate::wire::WireError;
use crate::{StructureError, ToggleError};

/// Unified error type covering every fallible operation in the crate.
///
/// Returned by the stateful [`TreeView`](crate::TreeView); the individual
/// errors convert into it with `?`.
#[derive(Debug, Error)]
pub enum RuletreeError {
    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Toggle(#[from] ToggleError),

    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Form(#[from] FormError),
}
