//! Form controller: pure `(state, event) -> effects` transitions.

use std::time::Duration;

use shared::{
    domain::{InputSurface, ThemePreference},
    protocol::{PredictionResponse, PredictionResult, SectionValue},
};
use tracing::{debug, info, warn};

use crate::{
    client::TransportFailure,
    dom::{
        Card, CardBody, ClassList, OutputSection, Revealable, SlotId, Viewport, DARK_CLASS,
        DROP_HIGHLIGHT_CLASSES, HIDDEN_CLASS,
    },
    inputs::{FileHandle, FormSelection, InputSurfaces},
    reveal::{reveal_pass, scroll_top_visible},
    scheduler::TimerTask,
    typing::{RenderTiming, TextSlot, TypingStep},
};

pub const SERVER_ERROR_NOTICE: &str = "Server error. Please try again.";
pub const INVALID_DROP_ALERT: &str = "Please drop a valid .txt file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Everything the page shows, owned by the caller and threaded through
/// [`FormUiController::handle`].
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub phase: SubmissionPhase,
    pub theme: ThemePreference,
    pub root_classes: ClassList,
    pub loader_classes: ClassList,
    pub drop_area_classes: ClassList,
    pub scroll_top_classes: ClassList,
    pub viewport: Viewport,
    pub revealables: Vec<Revealable>,
    pub inputs: InputSurfaces,
    pub output: OutputSection,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl UiState {
    pub fn new(revealables: Vec<Revealable>) -> Self {
        Self {
            phase: SubmissionPhase::Idle,
            theme: ThemePreference::Light,
            root_classes: ClassList::new(),
            loader_classes: ClassList::from_classes([HIDDEN_CLASS]),
            drop_area_classes: ClassList::new(),
            scroll_top_classes: ClassList::from_classes([HIDDEN_CLASS]),
            viewport: Viewport::default(),
            revealables,
            inputs: InputSurfaces::default(),
            output: OutputSection::default(),
        }
    }

    pub fn loader_visible(&self) -> bool {
        !self.loader_classes.contains(HIDDEN_CLASS)
    }

    pub fn scroll_top_visible(&self) -> bool {
        !self.scroll_top_classes.contains(HIDDEN_CLASS)
    }

    pub fn drop_highlighted(&self) -> bool {
        DROP_HIGHLIGHT_CLASSES
            .iter()
            .all(|class| self.drop_area_classes.contains(class))
    }

    fn set_loader(&mut self, visible: bool) {
        if visible {
            self.loader_classes.remove(HIDDEN_CLASS);
        } else {
            self.loader_classes.add(HIDDEN_CLASS);
        }
    }

    fn set_drop_highlight(&mut self, on: bool) {
        for class in DROP_HIGHLIGHT_CLASSES {
            if on {
                self.drop_area_classes.add(class);
            } else {
                self.drop_area_classes.remove(class);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PageLoaded { theme: ThemePreference },
    ThemeToggled,
    Scrolled(Viewport),
    SubmitRequested,
    PredictionArrived(Result<PredictionResponse, TransportFailure>),
    LinkInput(String),
    TextInput(String),
    FileSelected(Option<FileHandle>),
    FileRead { file: FileHandle, contents: String },
    DragOver,
    DragLeave,
    Dropped(Vec<FileHandle>),
    ClearClicked,
    ScrollTopClicked,
    TimerFired(TimerTask),
}

/// Work the controller asks its host to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    PersistTheme(ThemePreference),
    SendPrediction(FormSelection),
    ReadFile(FileHandle),
    Alert(String),
    Schedule { delay: Duration, task: TimerTask },
    ScrollToTop { smooth: bool },
}

#[derive(Debug, Clone, Default)]
pub struct FormUiController {
    timing: RenderTiming,
}

impl FormUiController {
    pub fn new(timing: RenderTiming) -> Self {
        Self { timing }
    }

    pub fn timing(&self) -> RenderTiming {
        self.timing
    }

    pub fn handle(&self, state: &mut UiState, event: UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::PageLoaded { theme } => {
                state.theme = theme;
                if state.theme == ThemePreference::Dark {
                    state.root_classes.add(DARK_CLASS);
                }
                self.refresh_scroll(state);
                Vec::new()
            }
            UiEvent::ThemeToggled => {
                let dark = state.root_classes.toggle(DARK_CLASS);
                state.theme = if dark {
                    ThemePreference::Dark
                } else {
                    ThemePreference::Light
                };
                debug!(theme = state.theme.as_str(), "theme toggled");
                vec![Effect::PersistTheme(state.theme)]
            }
            UiEvent::Scrolled(viewport) => {
                state.viewport = viewport;
                self.refresh_scroll(state);
                Vec::new()
            }
            UiEvent::SubmitRequested => {
                state.phase = SubmissionPhase::Loading;
                state.set_loader(true);
                state.output.clear();
                let selection = state.inputs.selection();
                info!(selection = selection_kind(&selection), "submitting form");
                vec![Effect::SendPrediction(selection)]
            }
            UiEvent::PredictionArrived(outcome) => self.finish_submission(state, outcome),
            UiEvent::LinkInput(value) => {
                if guard_enabled(state, InputSurface::Link) {
                    state.inputs.set_link(value);
                }
                Vec::new()
            }
            UiEvent::TextInput(value) => {
                if guard_enabled(state, InputSurface::Text) {
                    state.inputs.set_text(value);
                }
                Vec::new()
            }
            UiEvent::FileSelected(file) => {
                if !guard_enabled(state, InputSurface::File) {
                    return Vec::new();
                }
                state.inputs.select_file(file.clone());
                match file {
                    Some(file) if file.is_plain_text() => vec![Effect::ReadFile(file)],
                    _ => Vec::new(),
                }
            }
            UiEvent::FileRead { file, contents } => {
                if state.inputs.file.selected.as_ref() == Some(&file) {
                    state.inputs.adopt_file_contents(contents);
                } else {
                    debug!(path = %file.path.display(), "dropping read for a file no longer selected");
                }
                Vec::new()
            }
            UiEvent::DragOver => {
                state.set_drop_highlight(true);
                Vec::new()
            }
            UiEvent::DragLeave => {
                state.set_drop_highlight(false);
                Vec::new()
            }
            UiEvent::Dropped(files) => {
                state.set_drop_highlight(false);
                match files.into_iter().next() {
                    Some(file) if file.is_plain_text() => {
                        if !guard_enabled(state, InputSurface::File) {
                            return Vec::new();
                        }
                        state.inputs.select_file(Some(file.clone()));
                        vec![Effect::ReadFile(file)]
                    }
                    rejected => {
                        warn!(
                            mime_type = rejected.as_ref().and_then(|f| f.mime_type.as_deref()),
                            "rejected dropped file"
                        );
                        vec![Effect::Alert(INVALID_DROP_ALERT.to_string())]
                    }
                }
            }
            UiEvent::ClearClicked => {
                state.inputs.clear();
                state.output.clear();
                Vec::new()
            }
            UiEvent::ScrollTopClicked => vec![Effect::ScrollToTop { smooth: true }],
            UiEvent::TimerFired(task) => self.on_timer(state, task),
        }
    }

    fn refresh_scroll(&self, state: &mut UiState) {
        reveal_pass(&mut state.revealables, state.viewport);
        if scroll_top_visible(state.viewport.scroll_y) {
            state.scroll_top_classes.remove(HIDDEN_CLASS);
        } else {
            state.scroll_top_classes.add(HIDDEN_CLASS);
        }
    }

    fn finish_submission(
        &self,
        state: &mut UiState,
        outcome: Result<PredictionResponse, TransportFailure>,
    ) -> Vec<Effect> {
        if state.phase != SubmissionPhase::Loading {
            warn!(phase = ?state.phase, "ignoring prediction outside of a submission");
            return Vec::new();
        }
        state.set_loader(false);

        match outcome {
            Ok(PredictionResponse::Sections(result)) => {
                state.phase = SubmissionPhase::Success;
                let effects = self.render_cards(state, &result);
                reveal_pass(&mut state.revealables, state.viewport);
                effects
            }
            Ok(PredictionResponse::Failed { error }) => {
                state.phase = SubmissionPhase::Error;
                state.output.show_notice(error);
                Vec::new()
            }
            Err(failure) => {
                warn!(reason = %failure.reason, "submission failed");
                state.phase = SubmissionPhase::Error;
                state.output.show_notice(SERVER_ERROR_NOTICE);
                Vec::new()
            }
        }
    }

    fn render_cards(&self, state: &mut UiState, result: &PredictionResult) -> Vec<Effect> {
        let pass = state.output.pass();
        let mut effects = Vec::new();
        for section in result.renderable() {
            let (body, items) = match &section.value {
                SectionValue::Text(text) => (CardBody::Paragraph(TextSlot::pending(text)), 1),
                SectionValue::Items(items) => (
                    CardBody::List(items.iter().map(|item| TextSlot::pending(item)).collect()),
                    items.len(),
                ),
            };
            let card = state.output.append_card(Card {
                index: section.index,
                title: section.label.clone(),
                body,
            });
            for item in 0..items {
                effects.push(Effect::Schedule {
                    delay: self.timing.start_delay(section.index, item),
                    task: TimerTask::StartTyping {
                        slot: SlotId { pass, card, item },
                    },
                });
            }
        }
        debug!(cards = state.output.cards().count(), "rendered prediction cards");
        effects
    }

    fn on_timer(&self, state: &mut UiState, task: TimerTask) -> Vec<Effect> {
        let (slot, step) = match task {
            TimerTask::StartTyping { slot } => {
                let Some(text) = state.output.slot_mut(slot) else {
                    return Vec::new();
                };
                (slot, text.begin())
            }
            TimerTask::TypeNext { slot, run } => {
                let Some(text) = state.output.slot_mut(slot) else {
                    return Vec::new();
                };
                (slot, text.advance(run))
            }
        };
        match step {
            TypingStep::Continue { run } => vec![Effect::Schedule {
                delay: self.timing.char_interval,
                task: TimerTask::TypeNext { slot, run },
            }],
            TypingStep::Done | TypingStep::Stale => Vec::new(),
        }
    }
}

fn guard_enabled(state: &UiState, surface: InputSurface) -> bool {
    let enabled = !state.inputs.is_disabled(surface);
    if !enabled {
        debug!(?surface, "ignoring input on disabled surface");
    }
    enabled
}

fn selection_kind(selection: &FormSelection) -> &'static str {
    match selection {
        FormSelection::Link(_) => InputSurface::Link.form_field(),
        FormSelection::Text(_) => InputSurface::Text.form_field(),
        FormSelection::File(_) => InputSurface::File.form_field(),
        FormSelection::Empty => "empty",
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
