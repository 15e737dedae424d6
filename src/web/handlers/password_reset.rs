//! Password reset pages.
//!
//! The flow is `/reset/` (ask for an address) → `/reset/done/` →
//! mailed link `/reset/:uidb64/:token/` (choose a new password) →
//! `/reset/complete/`.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;
use validator::Validate;

use crate::template::{TemplateContext, Value};
use crate::web::error::WebError;
use crate::web::forms::{error_messages, PasswordResetForm, SetPasswordForm};
use crate::web::handlers::AppState;
use crate::BoardsError;

const FORM_TEMPLATE: &str = "registration/password_reset_form.html";
const DONE_TEMPLATE: &str = "registration/password_reset_done.html";
const CONFIRM_TEMPLATE: &str = "registration/password_reset_confirm.html";
const COMPLETE_TEMPLATE: &str = "registration/password_reset_complete.html";

fn form_context(state: &AppState, email: &str, errors: Vec<String>) -> TemplateContext {
    let mut context = state.base_context();
    context.set("email", email);
    context.set("errors", errors);
    context
}

/// GET /reset/ - Show the reset request form.
pub async fn password_reset_form(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, WebError> {
    state.render(FORM_TEMPLATE, &form_context(&state, "", Vec::new()))
}

/// POST /reset/ - Mail a reset link.
///
/// Always redirects to the done page once the address is well formed, so the
/// response does not reveal whether an account exists.
pub async fn password_reset_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PasswordResetForm>,
) -> Result<Response, WebError> {
    let form = form.cleaned();

    if let Err(errors) = form.validate() {
        let context = form_context(&state, &form.email, error_messages(&errors));
        return Ok(state.render(FORM_TEMPLATE, &context)?.into_response());
    }

    state.reset_service().request_reset(&form.email).await?;

    Ok(Redirect::to("/reset/done/").into_response())
}

/// GET /reset/done/ - Tell the visitor to check their mail.
pub async fn password_reset_done(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, WebError> {
    state.render(DONE_TEMPLATE, &state.base_context())
}

fn confirm_context(state: &AppState, validlink: bool, errors: Vec<String>) -> TemplateContext {
    let mut context = state.base_context();
    context.set("validlink", validlink);
    context.set("errors", Value::from(errors));
    context
}

/// GET /reset/:uidb64/:token/ - Show the new password form.
///
/// Renders an "invalid link" page when the link does not validate.
pub async fn password_reset_confirm(
    State(state): State<Arc<AppState>>,
    Path((uidb64, token)): Path<(String, String)>,
) -> Result<Html<String>, WebError> {
    let user = state.reset_service().resolve_user(&uidb64, &token).await?;

    state.render(
        CONFIRM_TEMPLATE,
        &confirm_context(&state, user.is_some(), Vec::new()),
    )
}

/// POST /reset/:uidb64/:token/ - Store the new password.
pub async fn password_reset_confirm_submit(
    State(state): State<Arc<AppState>>,
    Path((uidb64, token)): Path<(String, String)>,
    Form(form): Form<SetPasswordForm>,
) -> Result<Response, WebError> {
    let service = state.reset_service();

    let Some(user) = service.resolve_user(&uidb64, &token).await? else {
        let context = confirm_context(&state, false, Vec::new());
        return Ok(state.render(CONFIRM_TEMPLATE, &context)?.into_response());
    };

    if let Err(errors) = form.validate() {
        let context = confirm_context(&state, true, error_messages(&errors));
        return Ok(state.render(CONFIRM_TEMPLATE, &context)?.into_response());
    }

    match service.set_password(&user, &form.new_password1).await {
        Ok(()) => Ok(Redirect::to("/reset/complete/").into_response()),
        Err(BoardsError::Validation(message)) => {
            let context = confirm_context(&state, true, vec![message]);
            Ok(state.render(CONFIRM_TEMPLATE, &context)?.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /reset/complete/ - Confirm the password was changed.
pub async fn password_reset_complete(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, WebError> {
    state.render(COMPLETE_TEMPLATE, &state.base_context())
}
