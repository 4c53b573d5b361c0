//! Authentication route handlers.
//!
//! Sign-in and sign-up are placeholders: the forms are validated, the email
//! is stored in the session through [`crate::services::auth`], and the
//! visitor is sent to the home page. Passwords are never checked or kept.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use shopfront_core::FieldErrors;
use shopfront_core::validation::{LoginForm, SignupForm};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::services::auth;

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub errors: FieldErrors,
    pub signed_in_as: Option<String>,
}

/// Sign-up page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub name: String,
    pub email: String,
    pub errors: FieldErrors,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
#[instrument(skip(session))]
pub async fn login_page(session: Session) -> Result<LoginTemplate> {
    Ok(LoginTemplate {
        email: String::new(),
        errors: FieldErrors::new(),
        signed_in_as: auth::current_user(&session).await?,
    })
}

/// Handle login form submission.
#[instrument(skip(session, form))]
pub async fn login(session: Session, Form(form): Form<LoginForm>) -> Result<Response> {
    match form.validate() {
        Ok(email) => {
            auth::sign_in(&session, &email).await?;
            add_breadcrumb("auth", "Signed in", None);
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            LoginTemplate {
                email: form.email,
                errors,
                signed_in_as: None,
            },
        )
            .into_response()),
    }
}

// =============================================================================
// Sign-up Routes
// =============================================================================

/// Display the sign-up page.
pub async fn signup_page() -> impl IntoResponse {
    SignupTemplate {
        name: String::new(),
        email: String::new(),
        errors: FieldErrors::new(),
    }
}

/// Handle sign-up form submission.
#[instrument(skip(session, form))]
pub async fn signup(session: Session, Form(form): Form<SignupForm>) -> Result<Response> {
    match form.validate() {
        Ok(email) => {
            auth::sign_up(&session, &email).await?;
            add_breadcrumb("auth", "Signed up", None);
            Ok(Redirect::to("/").into_response())
        }
        Err(errors) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            SignupTemplate {
                name: form.name,
                email: form.email,
                errors,
            },
        )
            .into_response()),
    }
}

// =============================================================================
// Logout
// =============================================================================

/// Forget the signed-in identifier.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    auth::sign_out(&session).await?;
    Ok(Redirect::to("/auth/login"))
}
