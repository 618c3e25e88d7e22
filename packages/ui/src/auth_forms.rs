//! Login and signup forms.

use api::routing::{HOME_ROUTE, LOGIN_ROUTE, SIGNUP_ROUTE};
use api::{ApiError, Provider};
use dioxus::prelude::*;
use store::models::RegisterRequest;

use crate::auth::{use_auth, use_services, SocialLoginButton};

#[component]
fn SocialLogins() -> Element {
    rsx! {
        div {
            class: "form-group",
            for provider in Provider::ALL {
                SocialLoginButton { key: "{provider}", provider }
            }
        }
        div { class: "divider", span { "OR" } }
    }
}

/// Email-or-username login. The identifier's shape decides which field is sent.
#[component]
pub fn LoginForm() -> Element {
    let services = use_services();
    let auth = use_auth();
    let nav = use_navigator();
    let mut identifier = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut local_error = use_signal(|| Option::<String>::None);

    let loading = auth().loading;
    let error = local_error().or(auth().error);
    let incomplete = identifier().trim().is_empty() || password().is_empty();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = services.session.clone();
        spawn(async move {
            local_error.set(None);
            match session.login(&identifier(), &password()).await {
                Ok(_) => {
                    nav.replace(HOME_ROUTE);
                }
                Err(ApiError::Validation(message)) => local_error.set(Some(message)),
                Err(e) => tracing::error!("Login failed: {}", e),
            }
        });
    };

    rsx! {
        div {
            class: "auth-box",
            h1 { class: "brand", "Flock" }
            form {
                class: "form-group",
                onsubmit: handle_submit,
                input {
                    r#type: "text",
                    name: "emailOrUsername",
                    placeholder: "Email address or Username",
                    value: identifier(),
                    oninput: move |evt: FormEvent| identifier.set(evt.value()),
                }
                input {
                    r#type: "password",
                    name: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
                button {
                    class: "btn-primary",
                    r#type: "submit",
                    disabled: loading || incomplete,
                    if loading { "Logging in..." } else { "Log in" }
                }
            }
            if let Some(error) = error {
                p { class: "text-error", "{error}" }
            }
            SocialLogins {}
            p {
                class: "auth-switch",
                "Don't have an account? "
                Link { to: SIGNUP_ROUTE, "Sign up" }
            }
        }
    }
}

/// Account creation. All four fields are required before submit is enabled.
#[component]
pub fn SignupForm() -> Element {
    let services = use_services();
    let auth = use_auth();
    let nav = use_navigator();
    let mut draft = use_signal(RegisterRequest::default);
    let mut local_error = use_signal(|| Option::<String>::None);

    let loading = auth().loading;
    let error = local_error().or(auth().error);
    let complete = {
        let f = draft.read();
        [&f.email, &f.full_name, &f.username, &f.password]
            .iter()
            .all(|v| !v.trim().is_empty())
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let session = services.session.clone();
        spawn(async move {
            local_error.set(None);
            let request = draft();
            match session.register(&request).await {
                Ok(user) => {
                    tracing::info!("Registered {}", user.username);
                    nav.replace(HOME_ROUTE);
                }
                Err(ApiError::Validation(message)) => local_error.set(Some(message)),
                Err(e) => tracing::error!("Registration failed: {}", e),
            }
        });
    };

    rsx! {
        div {
            class: "auth-box",
            h1 { class: "brand", "Flock" }
            p { class: "tagline", "Join the conversation and connect with people worldwide." }
            SocialLogins {}
            form {
                class: "form-group",
                onsubmit: handle_submit,
                input {
                    r#type: "email",
                    placeholder: "Email address",
                    value: draft.read().email.clone(),
                    oninput: move |evt: FormEvent| draft.write().email = evt.value(),
                }
                input {
                    placeholder: "Full Name",
                    value: draft.read().full_name.clone(),
                    oninput: move |evt: FormEvent| draft.write().full_name = evt.value(),
                }
                input {
                    placeholder: "Username",
                    value: draft.read().username.clone(),
                    oninput: move |evt: FormEvent| draft.write().username = evt.value(),
                }
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: draft.read().password.clone(),
                    oninput: move |evt: FormEvent| draft.write().password = evt.value(),
                }
                button {
                    class: "btn-primary",
                    r#type: "submit",
                    disabled: loading || !complete,
                    if loading { "Signing up..." } else { "Sign up" }
                }
            }
            if let Some(error) = error {
                p { class: "text-error", "{error}" }
            }
            p {
                class: "auth-switch",
                "Have an account? "
                Link { to: LOGIN_ROUTE, "Log in" }
            }
        }
    }
}
