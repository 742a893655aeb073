//! Conversational orchestrator: owns the message log and the two-state
//! session machine, and routes each incoming message to the safety
//! reply, the location prompt, the facility locator, or the symptom
//! matcher.

pub mod dispatch;
pub mod messages;

pub use dispatch::{classify, Action, ChatState, InputClass};
pub use messages::MessageTemplates;

use serde::{Deserialize, Serialize};

use crate::locator::FacilityLocator;
use crate::matcher::SymptomMatcher;
use crate::models::{ConversationMessage, GeoPoint};
use crate::services::TranslateClient;

/// Identifier for one in-flight request. A response only lands if its
/// token is still the engine's current request, so a superseded lookup
/// is discarded deterministically instead of racing on resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Starter prompt shown on an empty conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickQuestion {
    pub key: String,
    pub text: String,
}

/// Default quick questions, one per common symptom.
pub fn quick_questions() -> Vec<QuickQuestion> {
    [
        ("fever", "I have a fever"),
        ("headache", "I have a headache"),
        ("cough", "I have a cough"),
        ("stomach", "I have stomach pain"),
        ("fatigue", "I feel fatigued all the time"),
    ]
    .into_iter()
    .map(|(key, text)| QuickQuestion {
        key: key.into(),
        text: text.into(),
    })
    .collect()
}

pub struct ChatEngine {
    matcher: SymptomMatcher,
    locator: FacilityLocator,
    translator: Option<TranslateClient>,
    language: String,
    state: ChatState,
    log: Vec<ConversationMessage>,
    next_request_id: u64,
    current_request: Option<u64>,
}

impl ChatEngine {
    pub fn new(matcher: SymptomMatcher, locator: FacilityLocator) -> Self {
        let mut engine = Self {
            matcher,
            locator,
            translator: None,
            language: crate::config::DEFAULT_LANGUAGE.to_string(),
            state: ChatState::Normal,
            log: Vec::new(),
            next_request_id: 0,
            current_request: None,
        };
        engine.push(ConversationMessage::assistant(MessageTemplates::greeting()));
        engine
    }

    /// Attach the best-effort translation side-channel.
    pub fn with_translator(mut self, translator: TranslateClient) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.log
    }

    /// Clear the log wholesale and restart the session. Any in-flight
    /// request token goes stale.
    pub fn reset(&mut self) {
        self.log.clear();
        self.state = ChatState::Normal;
        self.current_request = None;
        self.push(ConversationMessage::assistant(MessageTemplates::greeting()));
    }

    /// Allocate a token for a new network-bound request, superseding
    /// any earlier in-flight request.
    pub fn begin_request(&mut self) -> RequestToken {
        self.next_request_id += 1;
        self.current_request = Some(self.next_request_id);
        RequestToken(self.next_request_id)
    }

    /// Land a response if its token is still current. Stale responses
    /// are dropped and the log is left untouched.
    pub fn complete_request(&mut self, token: RequestToken, message: ConversationMessage) -> bool {
        if self.current_request != Some(token.0) {
            tracing::debug!(request = token.0, "discarding stale response");
            return false;
        }
        self.current_request = None;
        self.push(message);
        true
    }

    /// Handle one user message end to end and return the assistant's
    /// reply (the last log entry).
    pub async fn submit(&mut self, text: &str) -> &ConversationMessage {
        self.push(ConversationMessage::user(text));

        let class = classify(text);
        let (state, action) = self.state.transition(class);
        self.state = state;
        tracing::info!(?class, ?action, "dispatching message");

        match action {
            Action::SafetyMessage => {
                let reply = self.localized(MessageTemplates::emergency()).await;
                self.push(ConversationMessage::assistant_error(reply));
            }
            Action::AskLocation => {
                let reply = self.localized(MessageTemplates::ask_location()).await;
                self.push(ConversationMessage::assistant(reply));
            }
            Action::LookupFacilities => {
                let token = self.begin_request();
                let message = match self.locator.locate_by_name(text.trim(), None).await {
                    Ok(search) => {
                        let is_empty = search.facilities.is_empty();
                        let text = MessageTemplates::facilities(&search);
                        let mut msg = ConversationMessage::assistant(text).with_facilities(search);
                        msg.is_error = is_empty;
                        msg
                    }
                    Err(err) => {
                        tracing::warn!(%err, "facility lookup failed");
                        let reply = self.localized(MessageTemplates::location_failure()).await;
                        ConversationMessage::assistant_error(reply)
                    }
                };
                self.complete_request(token, message);
            }
            Action::Analyze => {
                let token = self.begin_request();
                let result = self.matcher.analyze(text, &self.language).await;
                let reply = self.localized(MessageTemplates::analysis_intro()).await;
                let message = ConversationMessage::assistant(reply).with_result(result);
                self.complete_request(token, message);
            }
        }

        // Every branch above pushes exactly one assistant message.
        self.log.last().unwrap_or_else(|| unreachable!())
    }

    /// Run a facility lookup from an already-known coordinate (e.g.
    /// device geolocation) instead of a typed place name.
    pub async fn submit_location(&mut self, anchor: GeoPoint) -> &ConversationMessage {
        self.state = ChatState::Normal;
        let token = self.begin_request();
        let message = match self.locator.locate_near(anchor, None).await {
            Ok(search) => {
                let is_empty = search.facilities.is_empty();
                let text = MessageTemplates::facilities(&search);
                let mut msg = ConversationMessage::assistant(text).with_facilities(search);
                msg.is_error = is_empty;
                msg
            }
            Err(err) => {
                tracing::warn!(%err, "facility lookup failed");
                ConversationMessage::assistant_error(MessageTemplates::location_failure())
            }
        };
        self.complete_request(token, message);
        self.log.last().unwrap_or_else(|| unreachable!())
    }

    async fn localized(&self, text: String) -> String {
        match &self.translator {
            Some(translator) => translator.translate(&text, &self.language).await,
            None => text,
        }
    }

    fn push(&mut self, message: ConversationMessage) {
        self.log.push(message);
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::knowledge::KnowledgeBase;
    use crate::models::Role;
    use crate::services::{NominatimClient, OpenFdaClient};

    use super::*;

    async fn engine_against(server: &MockServer) -> ChatEngine {
        let matcher =
            SymptomMatcher::new(KnowledgeBase::builtin(), OpenFdaClient::new(&server.uri()));
        let locator = FacilityLocator::new(NominatimClient::new(&server.uri()));
        ChatEngine::new(matcher, locator)
    }

    async fn mount_label_absent(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/drug/label.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn session_opens_with_a_greeting() {
        let server = MockServer::start().await;
        let engine = engine_against(&server).await;
        assert_eq!(engine.messages().len(), 1);
        assert_eq!(engine.messages()[0].role, Role::Assistant);
        assert_eq!(engine.state(), ChatState::Normal);
    }

    #[tokio::test]
    async fn emergency_input_gets_the_safety_message_and_stops() {
        let server = MockServer::start().await;
        let mut engine = engine_against(&server).await;

        let reply = engine.submit("I accidentally took a double dose").await;
        assert!(reply.text.contains("call emergency services"));
        assert!(reply.is_error);
        assert!(reply.result.is_none());
        assert_eq!(engine.state(), ChatState::Normal);
    }

    #[tokio::test]
    async fn plain_symptom_text_is_analyzed() {
        let server = MockServer::start().await;
        mount_label_absent(&server).await;
        let mut engine = engine_against(&server).await;

        let reply = engine.submit("I have a headache").await;
        let result = reply.result.as_ref().expect("analysis attached");
        assert_eq!(result.matched_key, "headache");
        assert_eq!(engine.state(), ChatState::Normal);
    }

    #[tokio::test]
    async fn severe_fever_walks_the_full_location_flow() {
        let server = MockServer::start().await;
        mount_label_absent(&server).await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Springfield"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "lat": "0.0", "lon": "0.0", "display_name": "Springfield, USA" }
            ])))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("amenity", "hospital"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "lat": "0.02", "lon": "0.0", "display_name": "General Hospital, Elm St" },
                { "lat": "0.01", "lon": "0.0", "display_name": "Mercy Clinic, Oak Ave" }
            ])))
            .mount(&server)
            .await;

        let mut engine = engine_against(&server).await;

        // Severity branch, not emergency: no overdose keyword present.
        let reply = engine.submit("I have a severe fever").await;
        assert!(reply.text.contains("name your city and area"));
        assert_eq!(engine.state(), ChatState::AwaitingLocation);

        // The next message is the location.
        let reply = engine.submit("Springfield").await;
        let search = reply.facilities.as_ref().expect("facilities attached");
        assert!(search.facilities.len() <= 5);
        assert_eq!(search.facilities[0].display_name, "Mercy Clinic, Oak Ave");
        assert!(reply.text.contains("Showing hospitals within 10 km"));
        assert_eq!(engine.state(), ChatState::Normal);
    }

    #[tokio::test]
    async fn unresolvable_location_reports_one_failure_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let mut engine = engine_against(&server).await;
        engine.submit("this is urgent").await;
        let reply = engine.submit("Nowhereville").await;

        assert!(reply.is_error);
        assert!(reply.text.contains("error finding your location"));
        // The conversation continues normally afterwards.
        assert_eq!(engine.state(), ChatState::Normal);
    }

    #[tokio::test]
    async fn no_facilities_in_range_is_an_advisory_not_a_crash() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Remoteville"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "lat": "0.0", "lon": "0.0", "display_name": "Remoteville" }
            ])))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let mut engine = engine_against(&server).await;
        engine.submit("I feel very sick").await;
        let reply = engine.submit("Remoteville").await;

        let search = reply.facilities.as_ref().expect("search attached");
        assert!(search.facilities.is_empty());
        assert!(reply.text.contains("couldn't find any hospitals within 10 km"));
    }

    #[tokio::test]
    async fn stale_responses_are_discarded() {
        let server = MockServer::start().await;
        let mut engine = engine_against(&server).await;
        let before = engine.messages().len();

        let stale = engine.begin_request();
        let _current = engine.begin_request();

        let landed =
            engine.complete_request(stale, ConversationMessage::assistant("old lookup"));
        assert!(!landed);
        assert_eq!(engine.messages().len(), before);
    }

    #[tokio::test]
    async fn reset_clears_the_log_and_invalidates_in_flight_requests() {
        let server = MockServer::start().await;
        mount_label_absent(&server).await;
        let mut engine = engine_against(&server).await;

        engine.submit("I have a cough").await;
        let token = engine.begin_request();
        engine.reset();

        assert_eq!(engine.messages().len(), 1); // greeting only
        assert_eq!(engine.state(), ChatState::Normal);
        assert!(!engine.complete_request(token, ConversationMessage::assistant("late")));
    }

    #[tokio::test]
    async fn repeated_severe_input_keeps_awaiting_location() {
        let server = MockServer::start().await;
        let mut engine = engine_against(&server).await;

        engine.submit("severe condition").await;
        engine.submit("this is really severe").await;
        assert_eq!(engine.state(), ChatState::AwaitingLocation);
    }

    #[test]
    fn quick_questions_cover_the_common_symptoms() {
        let questions = quick_questions();
        assert_eq!(questions.len(), 5);
        assert!(questions.iter().any(|q| q.key == "fever"));
        assert!(questions.iter().all(|q| !q.text.is_empty()));
    }
}
