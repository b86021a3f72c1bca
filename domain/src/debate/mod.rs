//! Debate domain: roundtable definitions, transcript, session state
//!
//! A debate runs one roundtable against one question. The roundtable
//! definition is immutable for the session; the transcript grows append-only
//! as rounds close; the session is consumed into a [`FinalResult`] once a
//! synthesis exists.

pub mod capability;
pub mod roundtable;
pub mod session;
pub mod transcript;

pub use capability::{BLOCKED_PERSONA_TOOLS, PersonaCapabilities};
pub use roundtable::{
    OrchestratorSettings, PersonaDefinition, RoundSettings, RoundtableDefinition, TriggerMode,
};
pub use session::{DebateSession, FinalResult, Synthesis};
pub use transcript::{
    ContributionStatus, ConvergenceDecision, PersonaContribution, Round, ToolInvocation,
    Transcript,
};
