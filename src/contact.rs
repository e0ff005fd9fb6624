//! Contact form submission.
//!
//! The form is intercepted on submit: a filled honeypot short-circuits to a
//! fake success, required fields are checked, then the submit button is
//! disabled and the serialized fields are posted after a short anti-bot
//! delay. The network itself sits behind [`Transport`]; this module only
//! decides what to send and how to read the answer.
//!
//! ## Reading the response
//!
//! | Response | Result |
//! |----------|--------|
//! | opaque (cross-origin, no body) | success |
//! | non-2xx status | failure |
//! | 2xx with `{"ok": true}` | success (acknowledged) |
//! | 2xx with anything else | success (unconfirmed) |

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, error};

use crate::config::ContactConfig;
use crate::document::{FieldMarkup, FormMarkup};
use crate::timer::{Millis, Timeout};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("HTTP {0}")]
    Http(u16),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// What came back from the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// `no-cors` style response: no status, no body.
    Opaque,
    Status {
        code: u16,
        #[serde(default)]
        body: String,
    },
    /// The request never completed.
    NetworkError { message: String },
}

/// How a successful submission was confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Opaque,
    Acknowledged,
    Unconfirmed,
}

/// Sends serialized form fields somewhere.
pub trait Transport {
    fn post(
        &mut self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<Response, TransportError>;
}

/// Transport replaying canned responses, recording every request.
///
/// Used by script replay and tests. Once the queue is empty every request
/// gets an opaque response.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    responses: VecDeque<Response>,
    requests: Vec<(String, Vec<(String, String)>)>,
}

impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    pub fn requests(&self) -> &[(String, Vec<(String, String)>)] {
        &self.requests
    }
}

impl Transport for ScriptedTransport {
    fn post(
        &mut self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<Response, TransportError> {
        self.requests.push((endpoint.to_string(), fields.to_vec()));
        match self.responses.pop_front().unwrap_or(Response::Opaque) {
            Response::NetworkError { message } => Err(TransportError::Network(message)),
            response => Ok(response),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Ack {
    ok: bool,
}

/// Interpret an endpoint response.
pub fn interpret(response: &Response) -> Result<Delivery, SubmitError> {
    match response {
        Response::Opaque => Ok(Delivery::Opaque),
        Response::Status { code, .. } if !(200..300).contains(code) => {
            Err(SubmitError::Http(*code))
        }
        Response::Status { body, .. } => match serde_json::from_str::<Ack>(body) {
            Ok(Ack { ok: true }) => Ok(Delivery::Acknowledged),
            _ => Ok(Delivery::Unconfirmed),
        },
        Response::NetworkError { message } => Err(TransportError::Network(message.clone()).into()),
    }
}

/// Result of pressing submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No endpoint configured: the browser's native submission proceeds.
    Native,
    /// Honeypot was filled; the form was reset without sending anything.
    Honeypot,
    /// A required field is empty.
    Invalid { field: String },
    /// Sending after the anti-bot delay.
    Scheduled { due: Millis },
    /// A submission is already in flight.
    Busy,
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    fields: Vec<FieldMarkup>,
    has_submit_button: bool,
    config: ContactConfig,
    status: Option<String>,
    submit_disabled: bool,
    pending: Option<Timeout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub status: Option<String>,
    pub submit_disabled: bool,
    pub pending: bool,
    pub fields: Vec<(String, String)>,
}

impl ContactForm {
    pub fn new(markup: &FormMarkup, config: ContactConfig) -> Self {
        Self {
            fields: markup.fields.clone(),
            has_submit_button: markup.submit_button,
            config,
            status: None,
            submit_disabled: false,
            pending: None,
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn submit_disabled(&self) -> bool {
        self.submit_disabled
    }

    pub fn pending_due(&self) -> Option<Millis> {
        self.pending.map(|t| t.due())
    }

    /// Type into a field. Unknown names are ignored.
    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.value = value.to_string();
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    /// `name=value` pairs in document order, honeypot included.
    pub fn serialize(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
    }

    pub fn submit(&mut self, now: Millis) -> SubmitOutcome {
        if self.config.endpoint.is_empty() {
            return SubmitOutcome::Native;
        }
        if self.pending.is_some() {
            return SubmitOutcome::Busy;
        }
        let honeypot_filled = self
            .value(&self.config.honeypot_field)
            .is_some_and(|v| !v.trim().is_empty());
        if honeypot_filled {
            self.reset();
            self.status = Some(self.config.honeypot_reply.clone());
            return SubmitOutcome::Honeypot;
        }
        if let Some(missing) = self
            .fields
            .iter()
            .find(|f| f.required && f.value.trim().is_empty())
        {
            return SubmitOutcome::Invalid {
                field: missing.name.clone(),
            };
        }

        if self.has_submit_button {
            self.submit_disabled = true;
        }
        self.status = Some(self.config.sending.clone());
        let timeout = Timeout::after(self.config.submit_delay(), now);
        self.pending = Some(timeout);
        SubmitOutcome::Scheduled { due: timeout.due() }
    }

    /// Send a pending submission once its delay elapsed. Returns `None` when
    /// nothing was sent.
    pub fn poll(
        &mut self,
        now: Millis,
        transport: &mut dyn Transport,
    ) -> Option<Result<Delivery, SubmitError>> {
        if !self.pending.is_some_and(|t| t.is_due(now)) {
            return None;
        }
        self.pending = None;

        let fields = self.serialize();
        let result = transport
            .post(&self.config.endpoint, &fields)
            .map_err(SubmitError::from)
            .and_then(|response| interpret(&response));

        match &result {
            Ok(delivery) => {
                debug!(?delivery, "contact form delivered");
                self.reset();
                self.status = Some(self.config.success.clone());
            }
            Err(err) => {
                error!(%err, "contact form submission failed");
                self.status = Some(self.config.failure.clone());
            }
        }
        self.submit_disabled = false;
        Some(result)
    }

    pub fn state(&self) -> FormState {
        FormState {
            status: self.status.clone(),
            submit_disabled: self.submit_disabled,
            pending: self.pending.is_some(),
            fields: self.serialize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        let markup = FormMarkup {
            fields: vec![
                FieldMarkup {
                    name: "name".into(),
                    label: "Name".into(),
                    value: String::new(),
                    required: true,
                },
                FieldMarkup {
                    name: "message".into(),
                    label: "Message".into(),
                    value: String::new(),
                    required: false,
                },
                FieldMarkup {
                    name: "_gotcha".into(),
                    label: String::new(),
                    value: String::new(),
                    required: false,
                },
            ],
            submit_button: true,
        };
        let config = ContactConfig {
            endpoint: "https://example.com/exec".into(),
            ..ContactConfig::default()
        };
        ContactForm::new(&markup, config)
    }

    #[test]
    fn interpret_responses() {
        assert_eq!(interpret(&Response::Opaque), Ok(Delivery::Opaque));
        assert_eq!(
            interpret(&Response::Status {
                code: 200,
                body: r#"{"ok": true}"#.into()
            }),
            Ok(Delivery::Acknowledged)
        );
        assert_eq!(
            interpret(&Response::Status {
                code: 200,
                body: "<html>done</html>".into()
            }),
            Ok(Delivery::Unconfirmed)
        );
        assert_eq!(
            interpret(&Response::Status {
                code: 200,
                body: r#"{"ok": false}"#.into()
            }),
            Ok(Delivery::Unconfirmed)
        );
        assert_eq!(
            interpret(&Response::Status {
                code: 500,
                body: String::new()
            }),
            Err(SubmitError::Http(500))
        );
    }

    #[test]
    fn empty_endpoint_leaves_native_submission() {
        let mut form = ContactForm::new(&FormMarkup::default(), ContactConfig::default());
        assert_eq!(form.submit(0), SubmitOutcome::Native);
    }

    #[test]
    fn honeypot_fakes_success_without_sending() {
        let mut form = form();
        form.set_value("name", "Bot");
        form.set_value("_gotcha", "spam");
        assert_eq!(form.submit(0), SubmitOutcome::Honeypot);
        assert_eq!(form.status(), Some("Merci !"));
        assert_eq!(form.value("name"), Some(""));
        let mut transport = ScriptedTransport::default();
        assert!(form.poll(10_000, &mut transport).is_none());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn missing_required_field_blocks_submission() {
        let mut form = form();
        form.set_value("name", "   ");
        assert_eq!(
            form.submit(0),
            SubmitOutcome::Invalid {
                field: "name".into()
            }
        );
        assert!(!form.submit_disabled());
        assert_eq!(form.status(), None);
    }

    #[test]
    fn successful_submission_after_delay() {
        let mut form = form();
        form.set_value("name", "Ada");
        form.set_value("message", "Hello");
        assert_eq!(form.submit(1_000), SubmitOutcome::Scheduled { due: 1_600 });
        assert!(form.submit_disabled());
        assert_eq!(form.status(), Some("Envoi en cours…"));
        assert_eq!(form.submit(1_100), SubmitOutcome::Busy);

        let mut transport = ScriptedTransport::default();
        assert!(form.poll(1_599, &mut transport).is_none());
        assert_eq!(form.poll(1_600, &mut transport), Some(Ok(Delivery::Opaque)));

        let (endpoint, fields) = &transport.requests()[0];
        assert_eq!(endpoint, "https://example.com/exec");
        assert_eq!(fields[0], ("name".to_string(), "Ada".to_string()));
        assert_eq!(form.status(), Some("Merci ! Votre message a bien été envoyé."));
        assert!(!form.submit_disabled());
        assert_eq!(form.value("message"), Some(""));
    }

    #[test]
    fn http_error_keeps_fields_and_reenables_button() {
        let mut form = form();
        form.set_value("name", "Ada");
        form.submit(0);
        let mut transport = ScriptedTransport::new([Response::Status {
            code: 503,
            body: String::new(),
        }]);
        assert_eq!(
            form.poll(600, &mut transport),
            Some(Err(SubmitError::Http(503)))
        );
        assert_eq!(
            form.status(),
            Some("Oups, une erreur est survenue. Réessayez dans un instant.")
        );
        assert_eq!(form.value("name"), Some("Ada"));
        assert!(!form.submit_disabled());
    }

    #[test]
    fn network_error_is_a_failure() {
        let mut form = form();
        form.set_value("name", "Ada");
        form.submit(0);
        let mut transport = ScriptedTransport::new([Response::NetworkError {
            message: "offline".into(),
        }]);
        let result = form.poll(600, &mut transport).unwrap();
        assert_eq!(
            result,
            Err(SubmitError::Transport(TransportError::Network("offline".into())))
        );
    }

    #[test]
    fn response_json_shape() {
        let response: Response =
            serde_json::from_str(r#"{"type": "status", "code": 404}"#).unwrap();
        assert_eq!(
            response,
            Response::Status {
                code: 404,
                body: String::new()
            }
        );
    }
}
