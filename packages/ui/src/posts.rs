//! Feed components: composer and post card.

use api::{ApiError, LikeDisplay, ServerValue};
use dioxus::prelude::*;
use store::{LikeStatus, Post};

use crate::auth::{use_auth, use_services};
use crate::avatar::{Avatar, AvatarSize};
use crate::comments::CommentSection;
use crate::icons::{FaComment, FaHeart, FaPen, FaTrash};
use crate::modal::Modal;
use crate::Icon;

/// New post, or an edit of `editing` when given.
///
/// `on_saved` fires after the server accepted the post; the caller re-reads
/// the store.
#[component]
pub fn PostComposer(
    #[props(default)] editing: Option<Post>,
    on_saved: EventHandler<Post>,
    on_close: EventHandler<()>,
) -> Element {
    let services = use_services();
    let auth = use_auth();
    let limit = services.config().limits.max_post_chars;
    let original = editing.as_ref().map(|p| p.content.clone());
    let post_id = editing.as_ref().map(|p| p.id);
    let mut content = use_signal(|| original.clone().unwrap_or_default());
    let mut error = use_signal(|| Option::<String>::None);
    let mut saving = use_signal(|| false);

    let length = content().chars().count();
    let unchanged = original.as_deref() == Some(content().as_str());
    let disabled = saving() || content().trim().is_empty() || length > limit || unchanged;
    let title = if post_id.is_some() { "Edit post" } else { "What's happening?" };
    let count_class = if length > limit {
        "composer__count composer__count--over"
    } else {
        "composer__count"
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let posts = services.posts.clone();
        spawn(async move {
            saving.set(true);
            error.set(None);
            let result = match post_id {
                Some(id) => posts.update_post(id, &content()).await,
                None => posts.create_post(&content()).await,
            };
            saving.set(false);
            match result {
                Ok(post) => {
                    content.set(String::new());
                    on_saved.call(post);
                    on_close.call(());
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    rsx! {
        Modal {
            title: title.to_string(),
            on_close: move |_| on_close.call(()),
            form {
                class: "composer",
                onsubmit: handle_submit,
                div {
                    class: "composer__body",
                    Avatar { user: auth().user }
                    textarea {
                        rows: "3",
                        placeholder: "What's happening?",
                        value: content(),
                        oninput: move |evt: FormEvent| content.set(evt.value()),
                    }
                }
                div {
                    class: count_class,
                    "{length}/{limit}"
                }
                if let Some(message) = error() {
                    p { class: "text-error", "{message}" }
                }
                div {
                    class: "composer__actions",
                    button {
                        class: "btn-primary",
                        r#type: "submit",
                        disabled: disabled,
                        if saving() { "Posting..." } else { "Post" }
                    }
                }
            }
        }
    }
}

/// One post with like, comment, and owner-only edit and delete actions.
#[component]
pub fn PostCard(post: Post, on_changed: EventHandler<()>) -> Element {
    let services = use_services();
    let auth = use_auth();
    let is_owner = auth().user_id() == Some(post.user.id);

    // Fetched values from the `post` prop win over responses made against an
    // older fetch, since keyed cards survive a list reload.
    let fetched_like = post.like_status();
    let fetched_comments = post.comment_count;
    let mut like = use_signal(|| LikeDisplay::new(fetched_like));
    let mut comment_count = use_signal(|| ServerValue::new(fetched_comments));
    let mut show_comments = use_signal(|| false);
    let mut editing = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let post_id = post.id;
    let author = post.user.clone();
    let name = author.display_name().to_string();
    let username = author.username.clone();
    let content_text = post.content.clone();
    let profile_link = format!("/profile/{}", author.id);
    let posted = post
        .created_at
        .as_deref()
        .and_then(|t| t.split('T').next())
        .unwrap_or_default()
        .to_string();

    let handle_like = {
        let services = services.clone();
        move |_| {
            let likes = services.likes.clone();
            let posts = services.posts.clone();
            spawn(async move {
                if let Ok(status) = likes.toggle_like(post_id).await {
                    like.write().confirm(fetched_like, status);
                    posts.apply_like(post_id, status);
                }
            });
        }
    };

    let handle_delete = move |_| {
        let posts = services.posts.clone();
        spawn(async move {
            match posts.delete_post(post_id).await {
                Ok(()) => on_changed.call(()),
                Err(e @ ApiError::Auth { .. }) => tracing::warn!("Delete rejected: {}", e),
                Err(e) => error.set(Some(e.user_message())),
            }
            confirm_delete.set(false);
        });
    };

    let LikeStatus { is_liked, like_count } = like.read().resolve(fetched_like);
    let comments_shown = comment_count.read().resolve(fetched_comments);
    let like_class = if is_liked { "action-btn action-btn--liked" } else { "action-btn" };

    rsx! {
        article {
            class: "post-card",
            Link { to: profile_link.clone(), Avatar { user: Some(author.clone()), size: AvatarSize::Medium } }
            div {
                class: "post-card__main",
                div {
                    class: "post-card__header",
                    Link { to: profile_link.clone(), class: "post-card__name", "{name}" }
                    span { class: "text-muted", "@{username} · {posted}" }
                    if is_owner {
                        div {
                            class: "post-card__owner",
                            button {
                                class: "icon-btn",
                                title: "Edit",
                                onclick: move |_| editing.set(true),
                                Icon { icon: FaPen, width: 14, height: 14 }
                            }
                            if confirm_delete() {
                                button { class: "btn-danger", onclick: handle_delete, "Delete" }
                                button { class: "btn-secondary", onclick: move |_| confirm_delete.set(false), "Cancel" }
                            } else {
                                button {
                                    class: "icon-btn icon-btn--danger",
                                    title: "Delete",
                                    onclick: move |_| confirm_delete.set(true),
                                    Icon { icon: FaTrash, width: 14, height: 14 }
                                }
                            }
                        }
                    }
                }
                p { class: "post-card__content", "{content_text}" }
                if let Some(message) = error() {
                    p { class: "text-error", "{message}" }
                }
                div {
                    class: "post-card__actions",
                    button {
                        class: "action-btn",
                        onclick: move |_| show_comments.set(!show_comments()),
                        Icon { icon: FaComment, width: 16, height: 16 }
                        span { "{comments_shown}" }
                    }
                    button {
                        class: like_class,
                        onclick: handle_like,
                        Icon { icon: FaHeart, width: 16, height: 16 }
                        span { "{like_count}" }
                    }
                }
                if show_comments() {
                    CommentSection {
                        post_id,
                        on_count: move |total| comment_count.write().confirm(fetched_comments, total),
                    }
                }
            }
        }
        if editing() {
            PostComposer {
                editing: Some(post.clone()),
                on_saved: move |_| on_changed.call(()),
                on_close: move |_| editing.set(false),
            }
        }
    }
}
