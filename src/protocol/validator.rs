use tracing::{error, info, warn};

use crate::browser::driver::BrowserDriver;
use crate::browser::error::DriverError;
use crate::catalog::test_case::{Outcome, TestCase};
use crate::data::person::PersonInfo;
use crate::form::field::{FormField, REJECTION_BORDER_COLOR};
use crate::form::registration::RegistrationForm;
use crate::protocol::error::ValidationError;
use crate::protocol::report::{OutcomeMismatch, ReadbackMismatch, ValidationReport};
use crate::trace::logger::TraceLogger;
use crate::trace::trace::{Stage, TraceEvent};

/// Run one (field, case) pair against a rendered registration form.
///
/// Sequence:
/// 1. `field` gets the case value, every other input its `baseline` value.
/// 2. All inputs are filled; the first failing input aborts the run (`Fill`).
/// 3. Displayed values are read back through each field's display limit.
///    A mismatch is recorded in the report but does not stop the run.
/// 4. The form is submitted.
/// 5. Accepted cases require the form to close. Rejected cases require it
///    to stay open with `field` bordered in `REJECTION_BORDER_COLOR`.
///    If the form state cannot be read the run fails with `Classify`.
pub fn validate_field(
    driver: &mut dyn BrowserDriver,
    form: &RegistrationForm,
    baseline: &PersonInfo,
    field: FormField,
    case: &TestCase,
) -> Result<ValidationReport, ValidationError> {
    validate_field_traced(driver, form, baseline, field, case, &TraceLogger::disabled())
}

/// `validate_field`, appending one trace event per stage to `tracer`.
pub fn validate_field_traced(
    driver: &mut dyn BrowserDriver,
    form: &RegistrationForm,
    baseline: &PersonInfo,
    field: FormField,
    case: &TestCase,
    tracer: &TraceLogger,
) -> Result<ValidationReport, ValidationError> {
    let kind = field.kind();
    let case_id = case.fingerprint(kind);
    let input = case.input();
    let event = |stage| TraceEvent::now(stage, field, &case.name, &case_id);

    info!(
        field = %field,
        case = %case.name,
        case_id = %case_id,
        expected = %case.expected,
        "validating field"
    );

    // ---- Fill (fatal) ----
    let filled = match form.fill_form(driver, baseline, Some((field, &input))) {
        Ok(filled) => {
            tracer.log(&event(Stage::Fill));
            filled
        }
        Err(failure) => {
            let e = ValidationError::fill(field, &case.name, failure);
            tracer.log(&event(Stage::Fill).failed().with_detail(&e));
            return Err(e);
        }
    };

    // ---- Readback (soft) ----
    let readback = form.check_text_in_form(driver, &filled);
    match &readback {
        Some(mismatch) => {
            warn!("readback mismatch, continuing to submit: {}", mismatch);
            tracer.log(&event(Stage::Readback).failed().with_detail(mismatch));
        }
        None => tracer.log(&event(Stage::Readback)),
    }

    // ---- Submit ----
    if let Err(source) = form.submit(driver) {
        let e = ValidationError::Submit {
            field,
            case_name: case.name.clone(),
            source,
        };
        tracer.log(&event(Stage::Submit).failed().with_detail(&e));
        return Err(e);
    }
    tracer.log(&event(Stage::Submit));

    // ---- Classify (fatal on mismatch) ----
    let unobservable = |source: DriverError| {
        let e = ValidationError::Classify {
            field,
            case_name: case.name.clone(),
            source,
        };
        error!("{}", e);
        tracer.log(&event(Stage::Classify).failed().with_detail(&e));
        e
    };

    let still_visible = form
        .visible_after_submit(driver, case.expected)
        .map_err(unobservable)?;
    let observed = if still_visible {
        Outcome::Rejected
    } else {
        Outcome::Accepted
    };

    let fail = |mismatch: OutcomeMismatch, readback: Option<ReadbackMismatch>| {
        error!("{} [{}]: {}", field, case.name, mismatch);
        tracer.log(&event(Stage::Classify).failed().with_detail(&mismatch));
        ValidationError::OutcomeMismatch {
            field,
            case_name: case.name.clone(),
            mismatch,
            readback,
        }
    };

    let border_color = match (case.expected, observed) {
        (Outcome::Accepted, Outcome::Rejected) => {
            return Err(fail(OutcomeMismatch::FormStillVisible, readback));
        }
        (Outcome::Rejected, Outcome::Accepted) => {
            return Err(fail(OutcomeMismatch::FormDisappeared, readback));
        }
        (Outcome::Accepted, Outcome::Accepted) => None,
        (Outcome::Rejected, Outcome::Rejected) => {
            let color = form.border_color(driver, field).map_err(unobservable)?;
            if color != REJECTION_BORDER_COLOR {
                let border = OutcomeMismatch::BorderColor {
                    expected: REJECTION_BORDER_COLOR.to_string(),
                    actual: color,
                };
                return Err(fail(border, readback));
            }
            Some(color)
        }
    };

    info!(field = %field, case = %case.name, observed = %observed, "outcome matches expectation");
    tracer.log(&event(Stage::Classify).with_detail(observed));

    Ok(ValidationReport {
        field,
        kind,
        case_name: case.name.clone(),
        case_id,
        input,
        expected: case.expected,
        observed,
        filled,
        readback,
        border_color,
    })
}
