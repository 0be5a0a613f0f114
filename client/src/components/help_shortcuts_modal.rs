//! Modal listing keyboard and mouse shortcuts for the home and map pages.

use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::state::ui::UiState;

#[derive(Clone, Copy)]
struct ShortcutRow {
    action: &'static str,
    keys: &'static str,
}

const HOME_SHORTCUTS: &[ShortcutRow] = &[
    ShortcutRow { action: "New topic", keys: "Cmd/Ctrl + N" },
    ShortcutRow { action: "Search topics", keys: "Cmd/Ctrl + K" },
    ShortcutRow { action: "Close dialog / clear search", keys: "Esc" },
];

const MAP_SHORTCUTS: &[ShortcutRow] = &[
    ShortcutRow { action: "Add node", keys: "Cmd/Ctrl + N" },
    ShortcutRow { action: "Zoom in", keys: "+ / =" },
    ShortcutRow { action: "Zoom out", keys: "-" },
    ShortcutRow { action: "Delete selected node", keys: "Delete" },
    ShortcutRow { action: "Close dialog / deselect", keys: "Esc" },
    ShortcutRow { action: "Move node", keys: "Drag the ⠿ handle" },
    ShortcutRow { action: "Open node details", keys: "Click node" },
];

fn shortcut_table(caption: &'static str, rows: &'static [ShortcutRow]) -> impl IntoView {
    view! {
        <table class="help-shortcuts-modal__table">
            <caption>{caption}</caption>
            <thead>
                <tr>
                    <th>"Action"</th>
                    <th>"Shortcut"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .iter()
                    .map(|row| {
                        view! {
                            <tr>
                                <td>{row.action}</td>
                                <td class="help-shortcuts-modal__keys">{row.keys}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

/// Shortcut tables. Map-only editing shortcuts are ignored for visitors.
#[component]
pub fn HelpShortcutsModal() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let close = Callback::new(move |()| ui.update(|u| u.help_open = false));

    view! {
        <Modal
            title="Help"
            subtitle="Keyboard and mouse combinations"
            class="help-shortcuts-modal"
            on_close=close
        >
            <div class="help-shortcuts-modal__table-wrap">
                {shortcut_table("Topics", HOME_SHORTCUTS)}
                {shortcut_table("Topic map", MAP_SHORTCUTS)}
            </div>
        </Modal>
    }
}
