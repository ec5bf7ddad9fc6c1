pub use tspl_sim_diagnostics::{ErrorKind, LineIndex, Span, ValidationError, codes, explain};
