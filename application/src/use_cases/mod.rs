pub mod convergence;
pub mod persona_turn;
pub mod run_debate;
pub mod synthesis;

#[cfg(test)]
pub(crate) mod support;

pub use persona_turn::PersonaTurnRunner;
pub use run_debate::{RunDebateError, RunDebateInput, RunDebateUseCase};
