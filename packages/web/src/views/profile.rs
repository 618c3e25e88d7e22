use dioxus::prelude::*;

use store::{FollowStatus, Post, User};
use ui::{use_services, PostCard, PostComposer, ProfileInfo, Protected};

use super::Shell;

#[component]
pub fn Profile(id: i64) -> Element {
    rsx! {
        Protected { UserProfile { id } }
    }
}

#[derive(Clone, Default, PartialEq)]
struct ProfilePage {
    user: Option<User>,
    follow: Option<FollowStatus>,
    post_count: Option<i64>,
    posts: Vec<Post>,
    error: Option<String>,
}

#[component]
fn UserProfile(id: i64) -> Element {
    let services = use_services();
    let mut reload = use_signal(|| 0u32);
    let mut follow = use_signal(|| Option::<FollowStatus>::None);
    let mut composing = use_signal(|| false);

    let loader = use_resource(use_reactive!(|(id,)| {
        let services = services.clone();
        let _ = reload();
        async move {
            let mut page = ProfilePage::default();
            match services.profiles.fetch_profile(id).await {
                Ok(user) => page.user = Some(user),
                Err(e) => page.error = Some(e.user_message()),
            }
            match services.follows.fetch_status(id).await {
                Ok(status) => follow.set(Some(status)),
                Err(e) => tracing::warn!("Follow status for {} unavailable: {}", id, e),
            }
            page.post_count = services.posts.fetch_user_post_count(id).await.ok();
            match services.posts.fetch_user_posts(id, 0).await {
                Ok(posts) => page.posts = posts,
                Err(e) => tracing::error!("Failed to load posts of {}: {}", id, e),
            }
            page
        }
    }));

    let content = match loader() {
        None => rsx! { p { class: "feed-loading", "Loading profile..." } },
        Some(ProfilePage { user: None, error, .. }) => {
            let message = error.unwrap_or_else(|| "User not found".to_string());
            rsx! { p { class: "text-error", "{message}" } }
        }
        Some(ProfilePage { user: Some(user), post_count, posts, .. }) => rsx! {
            ProfileInfo {
                user,
                follow: follow(),
                post_count,
                on_follow: move |status| follow.set(Some(status)),
                on_changed: move |_| reload.set(reload() + 1),
            }
            if posts.is_empty() {
                p { class: "feed-empty", "No posts yet." }
            }
            for post in posts {
                PostCard {
                    key: "{post.id}",
                    post,
                    on_changed: move |_| reload.set(reload() + 1),
                }
            }
        },
    };

    rsx! {
        Shell {
            on_compose: move |_| composing.set(true),
            {content}
        }
        if composing() {
            PostComposer {
                on_saved: move |_| reload.set(reload() + 1),
                on_close: move |_| composing.set(false),
            }
        }
    }
}
