//! Assessment Session
//!
//! Per-user orchestrator: holds the selected category, the raw text of each
//! parameter field, the live per-field evaluation and the submitted verdict.
//!
//! ## Lifecycle
//! `Idle -> Editing -> Evaluating -> Evaluated`, with `reset()` returning to
//! `Idle` from anywhere. Each edit re-evaluates only its own field; the
//! overall status is produced only by an explicit `submit()`.

use crate::catalog::{CategoryId, ParameterCatalog, WaterCategory};
use crate::engine::{classify_with, validate, AssessmentResult, EvaluatedReading, OverallStatus, TierPolicy};
use crate::error::{AssessmentError, FieldError, ValidationError};
use serde::Serialize;
use std::sync::Arc;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No category, or a category with every field empty
    Idle,
    /// At least one field holds text
    Editing,
    /// Submit in progress
    Evaluating,
    /// Overall status computed from a fully valid reading set
    Evaluated,
}

/// One parameter field as seen by the UI layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldState {
    pub parameter_name: String,

    /// Text exactly as last entered
    pub raw_input: String,

    /// Present while the input is a valid number
    pub evaluated: Option<EvaluatedReading>,

    /// Inline error; `MissingValue` only appears after a rejected submit
    pub error: Option<ValidationError>,
}

impl FieldState {
    fn empty(parameter_name: &str) -> Self {
        Self {
            parameter_name: parameter_name.to_string(),
            raw_input: String::new(),
            evaluated: None,
            error: None,
        }
    }

    fn is_blank(&self) -> bool {
        self.raw_input.trim().is_empty()
    }
}

/// A single user's assessment
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    catalog: Arc<ParameterCatalog>,
    policy: TierPolicy,
    category: Option<CategoryId>,
    fields: Vec<FieldState>,
    overall_status: Option<OverallStatus>,
    state: SessionState,
}

impl AssessmentSession {
    pub fn new(catalog: Arc<ParameterCatalog>) -> Self {
        Self::with_policy(catalog, TierPolicy::default())
    }

    pub fn with_policy(catalog: Arc<ParameterCatalog>, policy: TierPolicy) -> Self {
        Self {
            catalog,
            policy,
            category: None,
            fields: Vec::new(),
            overall_status: None,
            state: SessionState::Idle,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    pub fn overall_status(&self) -> Option<OverallStatus> {
        self.overall_status
    }

    pub fn policy(&self) -> TierPolicy {
        self.policy
    }

    /// Fields in catalog order; empty when no category is selected
    pub fn field_states(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn field(&self, parameter_name: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.parameter_name == parameter_name)
    }

    /// Snapshot of the current evaluation, `None` without a category
    pub fn result(&self) -> Option<AssessmentResult> {
        let category = self.category?;
        let readings = self
            .fields
            .iter()
            .filter_map(|f| f.evaluated.clone())
            .collect();
        Some(AssessmentResult::new(category, readings, self.overall_status))
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Switch to a category, discarding all readings and any verdict
    ///
    /// An unknown id leaves the session with no category.
    pub fn select_category(&mut self, id: &str) -> Result<&WaterCategory, AssessmentError> {
        self.overall_status = None;
        self.state = SessionState::Idle;

        let category = match self.catalog.get_category(id) {
            Ok(category) => category,
            Err(err) => {
                tracing::warn!("Rejected category selection: {}", err);
                self.category = None;
                self.fields.clear();
                return Err(AssessmentError::UnknownCategory(id.to_string()));
            }
        };

        self.category = Some(category.id);
        self.fields = category
            .parameters
            .iter()
            .map(|p| FieldState::empty(&p.name))
            .collect();

        tracing::info!(
            "Selected category {} ({} parameters)",
            category.id,
            category.parameters.len()
        );
        Ok(category)
    }

    /// Record new text for one field and re-evaluate that field only
    ///
    /// Invalid text is not an `Err`: it is recorded on the field and blocks
    /// `submit()`. Any edit clears a previously computed verdict.
    pub fn set_reading(
        &mut self,
        parameter_name: &str,
        raw_input: &str,
    ) -> Result<&FieldState, AssessmentError> {
        let category = active_category(&self.catalog, self.category)?;
        let index = category
            .parameters
            .iter()
            .position(|p| p.name == parameter_name)
            .ok_or_else(|| AssessmentError::UnknownParameter {
                category: category.id.to_string(),
                parameter: parameter_name.to_string(),
            })?;

        let parameter = &category.parameters[index];
        let field = &mut self.fields[index];
        field.raw_input = raw_input.to_string();

        match validate(raw_input, parameter) {
            Ok(value) => {
                let reading = EvaluatedReading::evaluate(parameter, value);
                tracing::debug!(
                    "{} = {} -> {:?} (deviation {:.3}, {:.1}%)",
                    parameter.name,
                    value,
                    reading.status,
                    reading.deviation,
                    reading.safeness_percentage
                );
                field.evaluated = Some(reading);
                field.error = None;
            }
            // Blank is not an error until submit
            Err(ValidationError::MissingValue) => {
                field.evaluated = None;
                field.error = None;
            }
            Err(err) => {
                tracing::debug!("{} = {:?} rejected: {}", parameter.name, raw_input, err);
                field.evaluated = None;
                field.error = Some(err);
            }
        }

        self.overall_status = None;
        self.state = editing_state(&self.fields);
        Ok(&self.fields[index])
    }

    /// Validate every field and, if all are valid, compute the overall status
    ///
    /// On rejection every missing or invalid field is marked and the
    /// session stays editable.
    pub fn submit(&mut self) -> Result<AssessmentResult, AssessmentError> {
        let category = active_category(&self.catalog, self.category)?;
        self.state = SessionState::Evaluating;

        let mut errors = Vec::new();
        let mut readings = Vec::with_capacity(category.parameters.len());

        for (parameter, field) in category.parameters.iter().zip(self.fields.iter_mut()) {
            match validate(&field.raw_input, parameter) {
                Ok(value) => {
                    let reading = EvaluatedReading::evaluate(parameter, value);
                    field.evaluated = Some(reading.clone());
                    field.error = None;
                    readings.push(reading);
                }
                Err(err) => {
                    field.evaluated = None;
                    field.error = Some(err.clone());
                    errors.push(FieldError {
                        parameter_name: parameter.name.clone(),
                        error: err,
                    });
                }
            }
        }

        if !errors.is_empty() {
            tracing::warn!(
                "Submit rejected for {}: {} of {} fields invalid",
                category.id,
                errors.len(),
                category.parameters.len()
            );
            self.overall_status = None;
            self.state = editing_state(&self.fields);
            return Err(AssessmentError::ValidationErrors(errors));
        }

        let status = classify_with(&readings, self.policy);
        let result = AssessmentResult::new(category.id, readings, Some(status));

        tracing::info!(
            "Assessed {}: {} ({} safe, {} unsafe)",
            category.id,
            status.display_text(),
            result.safe_count,
            result.unsafe_count
        );

        self.overall_status = Some(status);
        self.state = SessionState::Evaluated;
        Ok(result)
    }

    /// Clear every field and the verdict, keeping the selected category
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            *field = FieldState::empty(&field.parameter_name);
        }
        self.overall_status = None;
        self.state = SessionState::Idle;
        tracing::debug!("Session reset");
    }
}

fn active_category(
    catalog: &ParameterCatalog,
    category: Option<CategoryId>,
) -> Result<&WaterCategory, AssessmentError> {
    let id = category.ok_or(AssessmentError::NoCategorySelected)?;
    catalog
        .category(id)
        .map_err(|_| AssessmentError::UnknownCategory(id.to_string()))
}

fn editing_state(fields: &[FieldState]) -> SessionState {
    if fields.iter().any(|f| !f.is_blank()) {
        SessionState::Editing
    } else {
        SessionState::Idle
    }
}
