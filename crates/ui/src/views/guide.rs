use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::{Route, display_title, practice_slug};
use crate::vm::GuideVm;

#[component]
pub fn GuideView(slug: String) -> Element {
    let navigator = use_navigator();
    let title = display_title(&slug);
    let vm = GuideVm::load(&title);

    // One entry action per proficiency tier, or a single Start.
    let entries: Vec<(&'static str, Option<usize>)> = match vm.entry_tiers() {
        Some(tiers) => tiers
            .iter()
            .map(|tier| (tier.label(), Some(tier.index())))
            .collect(),
        None => vec![("Start", None)],
    };
    let related: Vec<&'static str> = vm.related().to_vec();
    let session_slug = slug.clone();

    rsx! {
        div { class: "page guide-page",
            header { class: "view-header",
                h2 { class: "view-title", "{vm.title()}" }
                p { class: "view-subtitle", "{vm.religion_label()} · {vm.type_label()}" }
            }
            p { class: "guide-description", "{vm.description()}" }

            div { class: "guide-actions",
                for (label, tier) in entries {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: {
                            let slug = session_slug.clone();
                            move |_| {
                                let route = match tier {
                                    Some(tier) => Route::SessionTier {
                                        slug: slug.clone(),
                                        tier,
                                    },
                                    None => Route::Session { slug: slug.clone() },
                                };
                                let _ = navigator.push(route);
                            }
                        },
                        "{label}"
                    }
                }
            }

            if !related.is_empty() {
                div { class: "guide-related",
                    h3 { class: "guide-related-heading", "More like this" }
                    div { class: "guide-related-strip",
                        for other in related {
                            button {
                                class: "practice-pill",
                                r#type: "button",
                                onclick: move |_| {
                                    let _ = navigator.push(Route::Guide {
                                        slug: practice_slug(other),
                                    });
                                },
                                "{other}"
                            }
                        }
                    }
                }
            }
        }
    }
}
