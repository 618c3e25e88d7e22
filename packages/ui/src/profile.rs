//! Profile header: avatar upload, follow toggle and the edit-profile modal.

use api::{AuthPatch, ImageFile};
use dioxus::prelude::*;
use store::models::ProfileUpdate;
use store::{FollowStatus, User};

use crate::auth::{use_auth, use_services};
use crate::avatar::{Avatar, AvatarSize};
use crate::icons::FaCamera;
use crate::modal::Modal;
use crate::Icon;

#[component]
pub fn ProfileInfo(
    user: User,
    #[props(default)] follow: Option<FollowStatus>,
    #[props(default)] post_count: Option<i64>,
    on_follow: EventHandler<FollowStatus>,
    on_changed: EventHandler<()>,
) -> Element {
    let services = use_services();
    let auth = use_auth();
    let is_own = auth().user_id() == Some(user.id);
    let mut uploading = use_signal(|| false);
    let mut editing = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let user_id = user.id;
    let name = user.display_name().to_string();
    let username = user.username.clone();
    let bio = user.bio.clone().unwrap_or_default();
    let status = follow.unwrap_or_default();
    let followers = status.followers_count;
    let following = status.following_count;

    let handle_follow = {
        let follows = services.follows.clone();
        move |_| {
            let follows = follows.clone();
            spawn(async move {
                match follows.toggle_follow(user_id).await {
                    Ok(status) => on_follow.call(status),
                    Err(e) => error.set(Some(e.user_message())),
                }
            });
        }
    };

    let handle_file = move |evt: FormEvent| {
        let profiles = services.profiles.clone();
        let session = services.session.clone();
        async move {
            let Some(engine) = evt.files() else {
                return;
            };
            let Some(file_name) = engine.files().into_iter().next() else {
                return;
            };
            let Some(bytes) = engine.read_file(&file_name).await else {
                error.set(Some("Could not read the selected file".to_string()));
                return;
            };
            uploading.set(true);
            error.set(None);
            match profiles.upload_profile_image(ImageFile::new(file_name, None, bytes)).await {
                Ok(upload) => {
                    if let Some(mut me) = session.snapshot().user {
                        me.profile_image_url = Some(upload.url);
                        session.set_auth(AuthPatch::user(me));
                    }
                    on_changed.call(());
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            uploading.set(false);
        }
    };

    let follow_label = if status.is_following { "Unfollow" } else { "Follow" };
    let follow_class = if status.is_following { "btn-secondary" } else { "btn-primary" };

    rsx! {
        section {
            class: "profile-info",
            div {
                class: "profile-info__avatar",
                Avatar { user: Some(user.clone()), size: AvatarSize::Large }
                if is_own {
                    label {
                        class: "icon-btn profile-info__upload",
                        title: "Upload profile image",
                        Icon { icon: FaCamera, width: 16, height: 16 }
                        input {
                            r#type: "file",
                            accept: "image/*",
                            hidden: true,
                            disabled: uploading(),
                            onchange: handle_file,
                        }
                    }
                }
            }
            div {
                class: "profile-info__text",
                h2 { "{name}" }
                span { class: "text-muted", "@{username}" }
                if !bio.is_empty() {
                    p { "{bio}" }
                }
                div {
                    class: "profile-info__stats",
                    if let Some(count) = post_count {
                        span { strong { "{count}" } " posts" }
                    }
                    span { strong { "{followers}" } " followers" }
                    span { strong { "{following}" } " following" }
                }
            }
            if is_own {
                button { class: "btn-secondary", onclick: move |_| editing.set(true), "Edit Profile" }
            } else {
                button { class: follow_class, onclick: handle_follow, "{follow_label}" }
            }
            if uploading() {
                p { class: "text-muted", "Uploading..." }
            }
            if let Some(message) = error() {
                p { class: "text-error", "{message}" }
            }
        }
        if editing() {
            EditProfileModal {
                current: user.clone(),
                on_close: move |saved: bool| {
                    editing.set(false);
                    if saved {
                        on_changed.call(());
                    }
                },
            }
        }
    }
}

/// Edits full name and bio, then merges the result into the session.
#[component]
fn EditProfileModal(current: User, on_close: EventHandler<bool>) -> Element {
    let services = use_services();
    let max_name = services.config().limits.max_full_name_chars;
    let max_bio = services.config().limits.max_bio_chars;
    let mut draft = use_signal(|| ProfileUpdate {
        full_name: current.full_name.clone().unwrap_or_default(),
        bio: current.bio.clone().unwrap_or_default(),
    });
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let profiles = services.profiles.clone();
        let session = services.session.clone();
        spawn(async move {
            saving.set(true);
            error.set(None);
            let result = profiles.update_profile(&draft()).await;
            saving.set(false);
            match result {
                Ok(user) => {
                    session.set_auth(AuthPatch::user(user));
                    on_close.call(true);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    let name_len = draft.read().full_name.chars().count();
    let bio_len = draft.read().bio.chars().count();

    rsx! {
        Modal {
            title: "Edit Profile".to_string(),
            on_close: move |_| on_close.call(false),
            form {
                class: "form-group",
                onsubmit: handle_submit,
                label { "Full Name" }
                input {
                    r#type: "text",
                    placeholder: "Enter your full name",
                    value: draft.read().full_name.clone(),
                    oninput: move |evt: FormEvent| draft.write().full_name = evt.value(),
                }
                p { class: "text-muted", "{name_len}/{max_name}" }
                label { "Bio" }
                textarea {
                    rows: "4",
                    placeholder: "Tell us about yourself",
                    value: draft.read().bio.clone(),
                    oninput: move |evt: FormEvent| draft.write().bio = evt.value(),
                }
                p { class: "text-muted", "{bio_len}/{max_bio}" }
                if let Some(message) = error() {
                    p { class: "text-error", "{message}" }
                }
                div {
                    class: "form-actions",
                    button {
                        class: "btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_close.call(false),
                        "Cancel"
                    }
                    button {
                        class: "btn-primary",
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save" }
                    }
                }
            }
        }
    }
}
