use dioxus::prelude::*;

use api::PostState;
use ui::{use_services, PostCard, PostComposer, Protected};

use super::Shell;

#[component]
pub fn Home() -> Element {
    rsx! {
        Protected { Feed {} }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum FeedNotice {
    Loading,
    Empty,
}

/// Placeholder above the feed: nothing has arrived yet, or the page is empty.
fn feed_notice(loaded: bool, state: &PostState) -> Option<FeedNotice> {
    if !state.posts.is_empty() {
        None
    } else if !loaded || state.loading {
        Some(FeedNotice::Loading)
    } else {
        Some(FeedNotice::Empty)
    }
}

/// Paged home feed. `reload` bumps re-run the fetch after any mutation.
#[component]
fn Feed() -> Element {
    let services = use_services();
    let mut page = use_signal(|| 0u32);
    let mut reload = use_signal(|| 0u32);
    let mut feed = use_signal(PostState::default);
    let mut loaded = use_signal(|| false);
    let mut composing = use_signal(|| false);

    let posts = services.posts.clone();
    let _loader = use_resource(move || {
        let posts = posts.clone();
        let page = page();
        let _ = reload();
        async move {
            if let Err(e) = posts.fetch_posts(page).await {
                tracing::error!("Failed to load feed page {}: {}", page, e);
            }
            feed.set(posts.snapshot());
            loaded.set(true);
        }
    });

    let state = feed();
    let current = page();
    let has_previous = current > 0;
    let notice_view = match feed_notice(loaded(), &state) {
        Some(FeedNotice::Loading) => rsx! { p { class: "feed-loading", "Loading posts..." } },
        Some(FeedNotice::Empty) => rsx! {
            p { class: "feed-empty", "No posts yet. Be the first to share something." }
        },
        None => rsx! {},
    };

    rsx! {
        Shell {
            on_compose: move |_| composing.set(true),
            if let Some(message) = state.error.clone() {
                p { class: "text-error", "{message}" }
            }
            {notice_view}
            for post in state.posts.clone() {
                PostCard {
                    key: "{post.id}",
                    post,
                    on_changed: move |_| reload.set(reload() + 1),
                }
            }
            div {
                class: "pager",
                button {
                    class: "btn-secondary",
                    disabled: !has_previous || state.loading,
                    onclick: move |_| page.set(current.saturating_sub(1)),
                    "Newer"
                }
                button {
                    class: "btn-secondary",
                    disabled: !state.has_more || state.loading,
                    onclick: move |_| page.set(current + 1),
                    "Older"
                }
            }
        }
        if composing() {
            PostComposer {
                on_saved: move |_| {
                    page.set(0);
                    reload.set(reload() + 1);
                },
                on_close: move |_| composing.set(false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_notice_before_first_response() {
        assert_eq!(feed_notice(false, &PostState::default()), Some(FeedNotice::Loading));
    }

    #[test]
    fn test_feed_notice_after_empty_response() {
        assert_eq!(feed_notice(true, &PostState::default()), Some(FeedNotice::Empty));
    }

    #[test]
    fn test_feed_notice_hidden_with_posts() {
        let user = store::User {
            id: 1,
            username: "alice".to_string(),
            full_name: None,
            bio: None,
            profile_image_url: None,
            email: "alice@example.com".to_string(),
        };
        let post = store::Post {
            id: 1,
            content: "hello".to_string(),
            user,
            created_at: None,
            updated_at: None,
            like_count: 0,
            liked: false,
            comment_count: 0,
        };
        let state = PostState {
            posts: vec![post],
            ..PostState::default()
        };
        assert_eq!(feed_notice(false, &state), None);
    }
}
