use dioxus::prelude::*;

use crate::icons::FaXmark;
use crate::Icon;

/// A full-screen overlay that centers its children in a titled card.
/// Clicking outside the card or on the close button triggers `on_close`.
#[component]
pub fn Modal(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                div {
                    class: "modal-header",
                    h2 { "{title}" }
                    button {
                        class: "icon-btn",
                        onclick: move |_| on_close.call(()),
                        Icon { icon: FaXmark, width: 18, height: 18 }
                    }
                }
                {children}
            }
        }
    }
}
