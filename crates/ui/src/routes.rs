use dioxus::prelude::*;
use dioxus_router::{Navigator, Outlet, Routable, use_navigator};

use sadhana_core::catalog;
use services::navigation::NavigationRequest;

use crate::context::AppContext;
use crate::views::{GuideView, LibraryView, SessionTierView, SessionView, SummaryView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/", LibraryView)] Library {},
        #[route("/guide/:slug", GuideView)] Guide { slug: String },
        #[route("/session/:slug", SessionView)] Session { slug: String },
        #[route("/session/:slug/tier/:tier", SessionTierView)] SessionTier { slug: String, tier: usize },
        #[route("/summary/:slug/:elapsed_ms", SummaryView)] Summary { slug: String, elapsed_ms: u64 },
}

/// URL-safe form of a practice title ("Lectio Divina" -> "lectio-divina",
/// "Kabbalistic/Chassidic" -> "kabbalistic-chassidic").
#[must_use]
pub fn practice_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Map a slug back to its catalog title. Unknown slugs return `None`; the
/// views fall back to rendering the slug itself.
#[must_use]
pub fn title_for_slug(slug: &str) -> Option<&'static str> {
    catalog::all_titles().find(|title| practice_slug(title) == slug)
}

/// Display title for a route slug, degrading gracefully for unknown ones.
#[must_use]
pub fn display_title(slug: &str) -> String {
    title_for_slug(slug)
        .map(str::to_string)
        .unwrap_or_else(|| slug.replace('-', " "))
}

#[component]
fn Shell() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    // Drain the session runtime's navigation requests onto the router.
    use_future(move || {
        let ctx = ctx.clone();
        async move {
            let Some(mut rx) = ctx.take_navigation() else {
                return;
            };
            while let Some(request) = rx.recv().await {
                apply_request(navigator, request);
            }
        }
    });

    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "Sadhana" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

fn apply_request(navigator: Navigator, request: NavigationRequest) {
    match request {
        NavigationRequest::Guide(payload) => {
            let _ = navigator.push(Route::Guide {
                slug: practice_slug(&payload.title),
            });
        }
        NavigationRequest::Session(payload) => {
            let slug = practice_slug(&payload.title);
            let route = match payload.proficiency {
                Some(tier) => Route::SessionTier {
                    slug,
                    tier: tier.index(),
                },
                None => Route::Session { slug },
            };
            let _ = navigator.push(route);
        }
        NavigationRequest::Conclude(payload) => {
            // Pop to the root first so Back cannot re-enter the session.
            while navigator.can_go_back() {
                navigator.go_back();
            }
            let _ = navigator.push(Route::Summary {
                slug: practice_slug(payload.summary.practice_title()),
                elapsed_ms: u64::try_from(payload.summary.elapsed().as_millis())
                    .unwrap_or(u64::MAX),
            });
        }
    }
}
