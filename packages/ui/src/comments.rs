use dioxus::prelude::*;

use api::CommentThread;

use crate::auth::use_services;
use crate::avatar::{Avatar, AvatarSize};
use crate::icons::FaPaperPlane;
use crate::Icon;

/// Comment thread of one post with a reply box.
///
/// `on_count` receives the server's total after every load, so the card's
/// counter never drifts from the backend.
#[component]
pub fn CommentSection(post_id: i64, on_count: EventHandler<i64>) -> Element {
    let services = use_services();
    let limit = services.config().limits.max_comment_chars;
    let mut thread = use_signal(CommentThread::default);
    let mut content = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| true);

    let comments = services.comments.clone();
    let _loader = use_resource(move || {
        let comments = comments.clone();
        async move {
            match comments.fetch_comments(post_id).await {
                Ok(loaded) => {
                    on_count.call(loaded.total);
                    thread.set(loaded);
                }
                Err(e) => error.set(Some(e.user_message())),
            }
            loading.set(false);
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let comments = services.comments.clone();
        spawn(async move {
            error.set(None);
            match comments.create_comment(post_id, &content()).await {
                Ok(_) => {
                    content.set(String::new());
                    if let Some(reloaded) = comments.thread(post_id) {
                        on_count.call(reloaded.total);
                        thread.set(reloaded);
                    }
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    let length = content().chars().count();

    rsx! {
        div {
            class: "comments",
            form {
                class: "comments__form",
                onsubmit: handle_submit,
                textarea {
                    rows: "2",
                    placeholder: "Post your reply",
                    value: content(),
                    oninput: move |evt: FormEvent| content.set(evt.value()),
                }
                span { class: "text-muted", "{length}/{limit}" }
                button {
                    class: "icon-btn icon-btn--primary",
                    r#type: "submit",
                    disabled: content().trim().is_empty() || length > limit,
                    Icon { icon: FaPaperPlane, width: 14, height: 14 }
                }
            }
            if let Some(message) = error() {
                p { class: "text-error", "{message}" }
            }
            if loading() {
                p { class: "text-muted", "Loading comments..." }
            }
            for comment in thread().comments {
                div {
                    key: "{comment.id}",
                    class: "comment",
                    Avatar { user: Some(comment.user.clone()), size: AvatarSize::Small }
                    div {
                        class: "comment__body",
                        span { class: "comment__author", {comment.user.display_name().to_string()} }
                        p { {comment.content.clone()} }
                    }
                }
            }
        }
    }
}
