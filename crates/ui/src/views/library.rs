use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::{Route, practice_slug};
use crate::vm::library_sections;

#[component]
pub fn LibraryView() -> Element {
    let navigator = use_navigator();
    let sections = library_sections();

    rsx! {
        div { class: "page library-page",
            header { class: "view-header",
                h2 { class: "view-title", "Meditation Library" }
                p { class: "view-subtitle", "Pick a practice to read its guide." }
            }
            for section in sections {
                section { class: "library-section",
                    h3 { class: "library-heading", "{section.heading}" }
                    div { class: "library-grid",
                        for card in section.cards {
                            button {
                                class: "practice-card",
                                r#type: "button",
                                onclick: move |_| {
                                    let _ = navigator.push(Route::Guide {
                                        slug: practice_slug(card.title),
                                    });
                                },
                                h4 { class: "practice-card-title", "{card.title}" }
                                span { class: "practice-card-type", "{card.type_label}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
