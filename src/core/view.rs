use crate::types::{itinerary::ItineraryDocument, trip::TripRequest};

/// What the client shows after a successful round trip
#[derive(Debug, Clone, PartialEq)]
pub struct TripResult {
    /// The parameters the user submitted
    pub request: TripRequest,
    pub itinerary: ItineraryDocument,
}

/// Client view states
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Form,
    Loading {
        request: TripRequest,
    },
    Results(Box<TripResult>),
    Error(String),
}

/// Things that move the client between views
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Submit(TripRequest),
    Succeeded(Box<ItineraryDocument>),
    Failed(String),
    Reset,
}

impl ViewState {
    /// Apply an event. Pairs with no defined transition leave the state as is.
    ///
    /// A second submit while a request is in flight is absorbed, so at most
    /// one request is outstanding.
    pub fn transition(self, event: ViewEvent) -> ViewState {
        match (self, event) {
            (_, ViewEvent::Reset) => ViewState::Form,
            (ViewState::Form, ViewEvent::Submit(request)) => ViewState::Loading { request },
            (ViewState::Loading { request }, ViewEvent::Succeeded(itinerary)) => {
                ViewState::Results(Box::new(TripResult {
                    request,
                    itinerary: *itinerary,
                }))
            }
            (ViewState::Loading { .. }, ViewEvent::Failed(message)) => ViewState::Error(message),
            (state, _) => state,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Form => "form",
            ViewState::Loading { .. } => "loading",
            ViewState::Results(_) => "results",
            ViewState::Error(_) => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_itinerary_json;

    fn request(destination: &str) -> TripRequest {
        TripRequest {
            destination: Some(destination.to_string()),
            days: Some(3),
            interests: Some(vec!["food".to_string()]),
            budget: Some("low".to_string()),
            ..Default::default()
        }
    }

    fn document() -> Box<ItineraryDocument> {
        Box::new(serde_json::from_value(sample_itinerary_json(3)).unwrap())
    }

    #[test]
    fn test_success_path() {
        let state = ViewState::default()
            .transition(ViewEvent::Submit(request("Goa")))
            .transition(ViewEvent::Succeeded(document()));

        match state {
            ViewState::Results(result) => {
                assert_eq!(result.request.destination.as_deref(), Some("Goa"));
                assert_eq!(result.itinerary.itinerary.len(), 3);
            }
            other => panic!("expected results, got {}", other.name()),
        }
    }

    #[test]
    fn test_failure_path_and_reset() {
        let state = ViewState::Form
            .transition(ViewEvent::Submit(request("Goa")))
            .transition(ViewEvent::Failed("API key not valid".to_string()));
        assert_eq!(state, ViewState::Error("API key not valid".to_string()));

        assert_eq!(state.transition(ViewEvent::Reset), ViewState::Form);
    }

    #[test]
    fn test_results_reset_to_form() {
        let state = ViewState::Form
            .transition(ViewEvent::Submit(request("Goa")))
            .transition(ViewEvent::Succeeded(document()))
            .transition(ViewEvent::Reset);
        assert_eq!(state, ViewState::Form);
    }

    #[test]
    fn test_double_submit_keeps_first_request() {
        let state = ViewState::Form
            .transition(ViewEvent::Submit(request("Goa")))
            .transition(ViewEvent::Submit(request("Manali")));

        assert_eq!(
            state,
            ViewState::Loading {
                request: request("Goa")
            }
        );
    }

    #[test]
    fn test_stray_responses_are_ignored() {
        assert_eq!(
            ViewState::Form.transition(ViewEvent::Succeeded(document())),
            ViewState::Form
        );
        let error = ViewState::Error("boom".to_string());
        assert_eq!(
            error.clone().transition(ViewEvent::Failed("again".to_string())),
            error
        );
        assert_eq!(
            error.clone().transition(ViewEvent::Submit(request("Goa"))),
            error
        );
    }
}
