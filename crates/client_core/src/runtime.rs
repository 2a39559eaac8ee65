//! Executes controller effects against real collaborators.

use std::{collections::VecDeque, time::Duration};

use anyhow::Result;
use shared::domain::{SubmissionPayload, UploadedFile};
use storage::{load_theme, save_theme, KeyValueStore};
use tracing::{debug, info, warn};

use crate::{
    client::{PredictError, PredictionService, TransportFailure},
    controller::{Effect, FormUiController, UiEvent, UiState},
    dom::{Revealable, Viewport},
    inputs::{FileHandle, FormSelection},
    scheduler::VirtualClock,
    typing::RenderTiming,
};

pub struct FormRuntime<S, P> {
    state: UiState,
    controller: FormUiController,
    clock: VirtualClock,
    store: S,
    service: P,
    alerts: Vec<String>,
}

impl<S: KeyValueStore, P: PredictionService> FormRuntime<S, P> {
    pub fn new(store: S, service: P, timing: RenderTiming, revealables: Vec<Revealable>) -> Self {
        Self {
            state: UiState::new(revealables),
            controller: FormUiController::new(timing),
            clock: VirtualClock::new(),
            store,
            service,
            alerts: Vec::new(),
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Applies the stored theme and runs the initial reveal pass.
    pub async fn load(&mut self) -> Result<()> {
        let theme = load_theme(&self.store).await?;
        self.dispatch(UiEvent::PageLoaded { theme }).await
    }

    /// Feeds an event through the controller, then every event its effects
    /// produce, until the queue is empty.
    pub async fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let effects = self.controller.handle(&mut self.state, event);
            for effect in effects {
                self.execute(effect, &mut queue).await?;
            }
        }
        Ok(())
    }

    /// Fires every timer that falls due within `by`, including timers
    /// scheduled by earlier timers in the same window.
    pub async fn advance(&mut self, by: Duration) -> Result<()> {
        let until = self.clock.now() + by;
        while let Some(task) = self.clock.pop_due(until) {
            self.dispatch(UiEvent::TimerFired(task)).await?;
        }
        self.clock.settle(until);
        Ok(())
    }

    /// Fires every pending timer in virtual time without waiting.
    pub async fn flush(&mut self) -> Result<()> {
        while let Some(due) = self.clock.next_due() {
            let by = due.saturating_sub(self.clock.now());
            self.advance(by).await?;
        }
        Ok(())
    }

    /// Drains all pending timers against wall time, calling `on_frame` after
    /// each batch fires.
    pub async fn play_out<F>(&mut self, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&UiState),
    {
        while let Some(due) = self.clock.next_due() {
            let wait = due.saturating_sub(self.clock.now());
            tokio::time::sleep(wait).await;
            self.advance(wait).await?;
            on_frame(&self.state);
        }
        Ok(())
    }

    async fn execute(&mut self, effect: Effect, queue: &mut VecDeque<UiEvent>) -> Result<()> {
        match effect {
            Effect::PersistTheme(theme) => {
                save_theme(&self.store, theme).await?;
                info!(theme = theme.as_str(), "theme preference saved");
            }
            Effect::SendPrediction(selection) => {
                let outcome = match payload_for(selection).await {
                    Ok(payload) => self.service.predict(payload).await,
                    Err(err) => Err(err),
                };
                queue.push_back(UiEvent::PredictionArrived(
                    outcome.map_err(TransportFailure::from),
                ));
            }
            Effect::ReadFile(file) => match tokio::fs::read_to_string(&file.path).await {
                Ok(contents) => queue.push_back(UiEvent::FileRead { file, contents }),
                Err(err) => warn!(path = %file.path.display(), "failed to read selected file: {err}"),
            },
            Effect::Alert(message) => {
                warn!(alert = %message, "alert raised");
                self.alerts.push(message);
            }
            Effect::Schedule { delay, task } => {
                let id = self.clock.schedule(delay, task);
                debug!(timer = id.0, ?delay, "timer scheduled");
            }
            Effect::ScrollToTop { smooth } => {
                debug!(smooth, "scrolling to top");
                queue.push_back(UiEvent::Scrolled(Viewport {
                    scroll_y: 0.0,
                    height: self.state.viewport.height,
                }));
            }
        }
        Ok(())
    }
}

async fn payload_for(selection: FormSelection) -> Result<Option<SubmissionPayload>, PredictError> {
    Ok(match selection {
        FormSelection::Link(link) => Some(SubmissionPayload::PubMedLink(link)),
        FormSelection::Text(text) => Some(SubmissionPayload::AbstractText(text)),
        FormSelection::File(file) => Some(SubmissionPayload::UploadedFile(upload(file).await?)),
        FormSelection::Empty => None,
    })
}

async fn upload(file: FileHandle) -> Result<UploadedFile, PredictError> {
    let contents = tokio::fs::read(&file.path)
        .await
        .map_err(|source| PredictError::Upload {
            path: file.path.display().to_string(),
            source,
        })?;
    Ok(UploadedFile {
        filename: file.name,
        mime_type: file.mime_type,
        contents,
    })
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
