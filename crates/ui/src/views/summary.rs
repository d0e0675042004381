use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::{Route, display_title};
use crate::vm::map_summary;

#[component]
pub fn SummaryView(slug: String, elapsed_ms: u64) -> Element {
    let navigator = use_navigator();
    let title = display_title(&slug);
    let summary = map_summary(&title, Duration::from_millis(elapsed_ms));

    rsx! {
        div { class: "page summary-page",
            header { class: "view-header",
                h2 { class: "view-title", "Session complete" }
            }
            dl { class: "summary",
                dt { "Practice" }
                dd { "{summary.practice_title}" }

                dt { "Time practiced" }
                dd { "{summary.elapsed_text}" }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    let _ = navigator.push(Route::Library {});
                },
                "Back to library"
            }
        }
    }
}
