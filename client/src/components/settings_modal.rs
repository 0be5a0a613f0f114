//! Appearance settings: light/dark theme and accent color.

use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::state::ui::{Accent, UiState};
use crate::util::theme;

#[component]
pub fn SettingsModal() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let close = Callback::new(move |()| ui.update(|u| u.settings_open = false));

    let pick = move |accent: Accent| {
        theme::set_accent(accent);
        ui.update(|u| u.accent = accent);
    };

    view! {
        <Modal title="Appearance" class="dialog--settings" on_close=close>
            <div class="dialog__label">
                "Theme"
                <button
                    class="btn settings__theme"
                    on:click=move |_| {
                        let next = theme::toggle(ui.get_untracked().theme);
                        ui.update(|u| u.theme = next);
                    }
                >
                    {move || if ui.get().theme.is_dark() { "Dark" } else { "Light" }}
                </button>
            </div>
            <div class="dialog__label">
                "Accent Color"
                <div class="color-picker">
                    {Accent::ALL
                        .into_iter()
                        .map(|accent| {
                            view! {
                                <button
                                    class="color-picker__swatch"
                                    class:color-picker__swatch--selected=move || ui.get().accent == accent
                                    style=format!("background-color: {};", accent.color())
                                    title=accent.name()
                                    aria-label=accent.name()
                                    on:click=move |_| pick(accent)
                                ></button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </Modal>
    }
}
