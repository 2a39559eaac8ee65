//! Client core for the abstract skim form: a pure controller over a headless
//! page model, plus the adapters that carry out its effects.

pub mod client;
pub mod controller;
pub mod dom;
pub mod inputs;
pub mod reveal;
pub mod runtime;
pub mod scheduler;
pub mod typing;

pub use client::{PredictClient, PredictError, PredictionService, TransportFailure};
pub use controller::{Effect, FormUiController, SubmissionPhase, UiEvent, UiState};
pub use inputs::{FileHandle, FormSelection};
pub use runtime::FormRuntime;
pub use typing::RenderTiming;
