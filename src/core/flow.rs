//! The `input -> loading -> result` screen shared by both flows.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{SubmitError, ValidationError};

use super::input::{DiagnosisForm, ParameterForm};
use super::types::{DiagnosisInput, DiagnosisResult, SimulationParams, SimulationResult};

/// Local input state that turns into a request once it validates.
pub trait Form: Default {
    type Request;

    fn validate(&self) -> Result<Self::Request, ValidationError>;
}

impl Form for DiagnosisForm {
    type Request = DiagnosisInput;

    fn validate(&self) -> Result<DiagnosisInput, ValidationError> {
        DiagnosisForm::validate(self)
    }
}

impl Form for ParameterForm {
    type Request = SimulationParams;

    fn validate(&self) -> Result<SimulationParams, ValidationError> {
        ParameterForm::validate(self)
    }
}

/// One logical request per call; implementations must not retry.
#[async_trait]
pub trait SubmitRequest<Req: Sync>: Sync {
    type Output: Send;

    async fn submit_request(&self, request: &Req) -> Result<Self::Output, SubmitError>;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Input,
    Loading,
    Result,
}

#[derive(Debug)]
pub struct Screen<F, R> {
    phase: Phase,
    form: F,
    result: Option<R>,
    notice: Option<&'static str>,
}

pub type DiagnosisScreen = Screen<DiagnosisForm, DiagnosisResult>;
pub type SimulationScreen = Screen<ParameterForm, SimulationResult>;

impl<F: Form, R> Default for Screen<F, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Form, R> Screen<F, R> {
    pub fn new() -> Self {
        Self::with_form(F::default())
    }

    pub fn with_form(form: F) -> Self {
        Self {
            phase: Phase::Input,
            form,
            result: None,
            notice: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Fields are read-only while a request is in flight.
    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self.phase {
            Phase::Loading => None,
            Phase::Input | Phase::Result => Some(&mut self.form),
        }
    }

    /// Only set in the `Result` phase.
    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }

    /// User-facing message left by the last failed submission.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn can_submit(&self) -> bool {
        self.phase != Phase::Loading && self.form.validate().is_ok()
    }

    /// Runs the validation gate and enters `Loading`. `None` leaves the screen untouched.
    pub fn begin_submit(&mut self) -> Option<F::Request> {
        if self.phase == Phase::Loading {
            debug!("submit ignored: request already in flight");
            return None;
        }
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(err) => {
                debug!(%err, "submit blocked by validation");
                return None;
            }
        };
        self.result = None;
        self.notice = None;
        self.phase = Phase::Loading;
        Some(request)
    }

    pub fn finish(&mut self, outcome: Result<R, SubmitError>) {
        if self.phase != Phase::Loading {
            warn!(phase = ?self.phase, "dropping response for a screen that is not loading");
            return;
        }
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.phase = Phase::Result;
            }
            Err(err) => {
                warn!(%err, "submission failed");
                self.notice = Some(err.notice());
                self.phase = Phase::Input;
            }
        }
    }

    /// Back to a blank `Input` screen. Nothing from the previous submission survives.
    pub fn reset(&mut self) {
        self.form = F::default();
        self.result = None;
        self.notice = None;
        self.phase = Phase::Input;
    }

    /// One full round trip. Returns the phase the screen ends in.
    pub async fn submit<C>(&mut self, client: &C) -> Phase
    where
        F::Request: Sync,
        C: SubmitRequest<F::Request, Output = R>,
    {
        let Some(request) = self.begin_submit() else {
            return self.phase;
        };
        let outcome = client.submit_request(&request).await;
        self.finish(outcome);
        self.phase
    }
}
