use dioxus::prelude::*;

use ui::icons::FaPlus;
use ui::{use_auth, Avatar, AvatarSize, Icon, LogoutButton};

use crate::Route;

/// Header and page frame for signed-in screens.
#[component]
pub fn Shell(on_compose: EventHandler<()>, children: Element) -> Element {
    let auth = use_auth();
    let me = auth().user;

    rsx! {
        div {
            class: "app-shell",
            header {
                class: "app-header",
                Link { to: Route::Home {}, class: "app-header__brand", "Flock" }
                div { class: "app-header__spacer" }
                button {
                    class: "btn-primary",
                    onclick: move |_| on_compose.call(()),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    " Post"
                }
                if let Some(user) = me {
                    Link {
                        to: Route::Profile { id: user.id },
                        Avatar { user: Some(user.clone()), size: AvatarSize::Small }
                    }
                }
                LogoutButton { class: "icon-btn" }
            }
            main { {children} }
        }
    }
}
