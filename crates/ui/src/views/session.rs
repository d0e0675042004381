use dioxus::prelude::*;

use sadhana_core::model::{AmbientTrack, Proficiency};
use services::navigation::SessionPayload;

use crate::context::AppContext;
use crate::routes::display_title;
use crate::views::ViewError;
use crate::vm::{SessionIntent, SessionVm};

#[component]
pub fn SessionView(slug: String) -> Element {
    session_screen(slug, None)
}

#[component]
pub fn SessionTierView(slug: String, tier: usize) -> Element {
    session_screen(slug, Some(tier))
}

/// Snapshot of the VM taken per render, so the `rsx!` body never holds the
/// signal borrow while event handlers are attached.
#[derive(Clone, PartialEq)]
struct SessionDisplay {
    title: String,
    clock: String,
    narration_label: &'static str,
    flipped: bool,
    sound_buttons: Vec<(AmbientTrack, &'static str)>,
    steps: Vec<(String, &'static str, &'static str)>,
    description: &'static str,
}

fn session_screen(slug: String, tier: Option<usize>) -> Element {
    let ctx = use_context::<AppContext>();
    let tick_interval = ctx.settings().tick_interval();
    let title = display_title(&slug);

    let mut vm = use_signal(|| None::<SessionVm>);
    let mut load_error = use_signal(|| None::<ViewError>);

    // Enter the session once: resolve the practice, load the ambient
    // assets, then hand the state to the screen.
    use_future(move || {
        let runtime = ctx.session_runtime();
        let title = title.clone();
        async move {
            let payload = SessionPayload {
                title,
                proficiency: tier.and_then(|index| Proficiency::from_index(index).ok()),
            };
            match runtime.start_session(&payload).await {
                Ok(session) => vm.set(Some(SessionVm::new(runtime, session))),
                Err(_) => load_error.set(Some(ViewError::Unknown)),
            }
        }
    });

    // The clock widget: feed elapsed time into the session on a fixed tick
    // until it freezes.
    use_future(move || async move {
        loop {
            tokio::time::sleep(tick_interval).await;
            let mut frozen = false;
            vm.with_mut(|slot| {
                if let Some(session) = slot.as_mut() {
                    frozen = !session.tick(tick_interval);
                }
            });
            if frozen {
                break;
            }
        }
    });

    // Leaving the screen for any reason releases every audio and speech
    // side effect.
    use_drop(move || {
        vm.with_mut(|slot| {
            if let Some(session) = slot.as_mut() {
                if session.is_active() {
                    session.tear_down();
                }
            }
        });
    });

    let display = {
        let guard = vm.read();
        guard.as_ref().map(|session| SessionDisplay {
            title: session.title().to_string(),
            clock: session.clock_text(),
            narration_label: if session.is_narrating() {
                "Stop narration"
            } else {
                "Read the guide"
            },
            flipped: session.guide_flipped(),
            sound_buttons: AmbientTrack::ALL
                .into_iter()
                .map(|track| {
                    let class = if session.sound_active(track) {
                        "sound-toggle sound-toggle--active"
                    } else {
                        "sound-toggle"
                    };
                    (track, class)
                })
                .collect(),
            steps: session
                .steps()
                .iter()
                .enumerate()
                .map(|(index, step)| {
                    (format!("Step {}", index + 1), step.prompt(), step.detail())
                })
                .collect(),
            description: session.description(),
        })
    };

    rsx! {
        div { class: "page session-page",
            match (load_error(), display) {
                (Some(err), _) => rsx! {
                    p { class: "session-error", "{err.message()}" }
                },
                (None, None) => rsx! {
                    p { "Preparing session..." }
                },
                (None, Some(display)) => rsx! {
                    header { class: "session-header",
                        h2 { class: "view-title", "{display.title}" }
                        span { class: "session-clock", "{display.clock}" }
                    }

                    div { class: "session-controls",
                        for (track, class) in display.sound_buttons {
                            button {
                                class: "{class}",
                                r#type: "button",
                                onclick: move |_| {
                                    vm.with_mut(|slot| {
                                        if let Some(session) = slot.as_mut() {
                                            session.apply(SessionIntent::ToggleSound(track));
                                        }
                                    });
                                },
                                "{track.label()}"
                            }
                        }

                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                vm.with_mut(|slot| {
                                    if let Some(session) = slot.as_mut() {
                                        session.apply(SessionIntent::ToggleNarration);
                                    }
                                });
                            },
                            "{display.narration_label}"
                        }

                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                vm.with_mut(|slot| {
                                    if let Some(session) = slot.as_mut() {
                                        session.apply(SessionIntent::FlipGuide);
                                    }
                                });
                            },
                            "Flip card"
                        }
                    }

                    div { class: "session-guide",
                        if display.flipped {
                            p { class: "guide-description", "{display.description}" }
                        } else if display.steps.is_empty() {
                            p { class: "guide-empty", "No written guide for this practice." }
                        } else {
                            for (count, prompt, detail) in display.steps {
                                div { class: "step-card",
                                    span { class: "step-count", "{count}" }
                                    h4 { class: "step-prompt", "{prompt}" }
                                    p { class: "step-detail", "{detail}" }
                                }
                            }
                        }
                    }

                    div { class: "session-footer",
                        button {
                            class: "btn btn-primary btn-done",
                            r#type: "button",
                            onclick: move |_| {
                                vm.with_mut(|slot| {
                                    if let Some(session) = slot.as_mut() {
                                        session.apply(SessionIntent::Conclude);
                                    }
                                });
                            },
                            "Done"
                        }
                    }
                },
            }
        }
    }
}
