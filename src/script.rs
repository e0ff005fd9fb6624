//! Timed event scripts.
//!
//! A script is a JSON file listing host events with the time (ms since page
//! load) at which they arrive, plus optional canned responses for the
//! contact form endpoint:
//!
//! ```json
//! {
//!   "until": 20000,
//!   "responses": [{ "type": "status", "code": 200, "body": "{\"ok\": true}" }],
//!   "steps": [
//!     { "at": 1500, "event": { "type": "carousel", "id": "work", "event": { "type": "pointer_enter" } } },
//!     { "at": 4000, "event": { "type": "visibility_changed", "hidden": true } }
//!   ]
//! }
//! ```
//!
//! Replay advances the page's timers up to each step before dispatching it,
//! then advances to `until` (or the last step) at the end.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::contact::Response;
use crate::page::{Effect, Page, PageEvent};
use crate::timer::Millis;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step {index} at {at}ms comes before the previous step at {previous}ms")]
    OutOfOrder {
        index: usize,
        at: Millis,
        previous: Millis,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Run timers up to this time. Ignored if the last step comes later.
    #[serde(default)]
    pub until: Option<Millis>,
    /// Endpoint responses, consumed in order by form submissions.
    #[serde(default)]
    pub responses: Vec<Response>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub at: Millis,
    pub event: PageEvent,
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub at: Millis,
    /// `None` for timer-driven effects.
    pub event: Option<PageEvent>,
    pub effect: Effect,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = fs::read_to_string(path)?;
        let script: Script = serde_json::from_str(&content)?;
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> Result<(), ScriptError> {
        for (index, pair) in self.steps.windows(2).enumerate() {
            if pair[1].at < pair[0].at {
                return Err(ScriptError::OutOfOrder {
                    index: index + 1,
                    at: pair[1].at,
                    previous: pair[0].at,
                });
            }
        }
        Ok(())
    }

    /// Time the replay ends at.
    pub fn end(&self) -> Millis {
        let last = self.steps.last().map(|s| s.at).unwrap_or(0);
        self.until.map_or(last, |until| until.max(last))
    }
}

/// Replay `steps` against `page`, returning everything that happened.
pub fn replay(page: &mut Page, script: &Script) -> Vec<Frame> {
    fn timer_frames(page: &mut Page, at: Millis, frames: &mut Vec<Frame>) {
        for effect in page.advance(at) {
            frames.push(Frame {
                at,
                event: None,
                effect,
            });
        }
    }

    let mut frames = Vec::new();
    for step in &script.steps {
        timer_frames(page, step.at, &mut frames);
        let effect = page.dispatch(step.event.clone(), step.at);
        frames.push(Frame {
            at: step.at,
            event: Some(step.event.clone()),
            effect,
        });
    }
    timer_frames(page, script.end(), &mut frames);
    frames
}
