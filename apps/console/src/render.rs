//! Plain-text rendering of the form's output section.

use std::fmt::Write as _;

use client_core::{
    dom::{CardBody, OutputNode},
    SubmissionPhase, UiState,
};

pub fn render(state: &UiState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[theme: {}]", state.theme.as_str());

    if state.phase == SubmissionPhase::Loading {
        out.push_str("Loading...\n");
    }

    for node in state.output.nodes() {
        match node {
            OutputNode::Notice(message) => {
                let _ = writeln!(out, "! {message}");
            }
            OutputNode::Card(card) => {
                let _ = writeln!(out, "\n== {} ==", card.title);
                match &card.body {
                    CardBody::Paragraph(slot) => {
                        let _ = writeln!(out, "{}", slot.text());
                    }
                    CardBody::List(items) => {
                        for item in items {
                            let _ = writeln!(out, "  - {}", item.text());
                        }
                    }
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{FormUiController, UiEvent};
    use shared::protocol::PredictionResponse;

    #[test]
    fn renders_cards_and_notices() {
        let controller = FormUiController::default();
        let mut state = UiState::default();
        controller.handle(&mut state, UiEvent::TextInput("text".into()));
        controller.handle(&mut state, UiEvent::SubmitRequested);
        assert!(render(&state).contains("Loading..."));

        let response =
            PredictionResponse::from_json_str(r#"{"1": ["Intro", ["A","B"]], "0": ["Title", "T"]}"#)
                .expect("parse");
        controller.handle(&mut state, UiEvent::PredictionArrived(Ok(response)));

        let text = render(&state);
        let title = text.find("== Title ==").expect("title card");
        let intro = text.find("== Intro ==").expect("intro card");
        assert!(title < intro);
        assert_eq!(text.matches("  - ").count(), 2);

        controller.handle(&mut state, UiEvent::SubmitRequested);
        controller.handle(
            &mut state,
            UiEvent::PredictionArrived(
                PredictionResponse::from_json_str(r#"{"error": "No input provided."}"#)
                    .map_err(|err| client_core::TransportFailure {
                        reason: err.to_string(),
                    }),
            ),
        );
        assert!(render(&state).contains("! No input provided."));
    }
}
