//! GitHub settings panel.
//!
//! Edits a local draft of [`GitHubSettings`]; nothing is persisted until
//! the user saves.

use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::GitHubSettings;

stylance::import_crate_style!(css, "src/components/settings/settings.module.css");

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let initial = ctx.settings.get_untracked();
    let token = RwSignal::new(initial.token);
    let username = RwSignal::new(initial.username);
    let repository = RwSignal::new(initial.repository);
    let show_token = RwSignal::new(false);
    let message = RwSignal::new(None::<String>);

    let is_connected = Signal::derive(move || ctx.settings.with(|s| s.is_complete()));

    let handle_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let draft = GitHubSettings {
            token: token.get_untracked(),
            username: username.get_untracked().trim().to_string(),
            repository: repository.get_untracked().trim().to_string(),
        };
        if let Err(e) = draft.target() {
            message.set(Some(e.to_string()));
            return;
        }
        match ctx.save_settings(draft) {
            Ok(()) => {
                log!("settings saved");
                message.set(Some("Settings saved".to_string()));
            }
            Err(e) => {
                error!("failed to save settings: {e}");
                message.set(Some(e.to_string()));
            }
        }
    };

    let handle_logout = move |_: leptos::ev::MouseEvent| {
        ctx.logout();
        token.set(String::new());
        username.set(String::new());
        repository.set(String::new());
        show_token.set(false);
        message.set(Some("Logged out".to_string()));
    };

    view! {
        <section class=css::panel aria-label="GitHub settings">
            <h2 class=css::heading>
                <Icon icon=ic::GITHUB />
                " GitHub"
                <span class=move || {
                    if is_connected.get() {
                        format!("{} {}", css::state, css::stateConnected)
                    } else {
                        css::state.to_string()
                    }
                }>
                    {move || if is_connected.get() { "connected" } else { "not configured" }}
                </span>
            </h2>
            <form class=css::form on:submit=handle_save>
                <label class=css::field>
                    <span>"Personal access token"</span>
                    <div class=css::tokenRow>
                        <input
                            type=move || if show_token.get() { "text" } else { "password" }
                            autocomplete="off"
                            placeholder="ghp_..."
                            bind:value=token
                        />
                        <button
                            type="button"
                            class=css::iconButton
                            on:click=move |_: leptos::ev::MouseEvent| show_token.update(|v| *v = !*v)
                            aria-label=move || if show_token.get() { "Hide token" } else { "Show token" }
                        >
                            <Icon icon=Signal::derive(move || {
                                if show_token.get() { ic::EYE_OFF } else { ic::EYE }
                            }) />
                        </button>
                    </div>
                </label>
                <label class=css::field>
                    <span>"Username"</span>
                    <input type="text" placeholder="octocat" bind:value=username />
                </label>
                <label class=css::field>
                    <span>"Repository"</span>
                    <input type="text" placeholder="slides" bind:value=repository />
                </label>
                <div class=css::actions>
                    <button type="submit" class=css::primary>
                        <Icon icon=ic::SAVE />
                        " Save"
                    </button>
                    <Show when=move || is_connected.get()>
                        <button type="button" class=css::secondary on:click=handle_logout>
                            <Icon icon=ic::LOGOUT />
                            " Logout"
                        </button>
                    </Show>
                </div>
                {move || message.get().map(|m| view! { <p class=css::message>{m}</p> })}
            </form>
        </section>
    }
}
