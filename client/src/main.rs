//! Client entrypoint for the CSR build.

use client::{App, init_logging};
use leptos::prelude::*;

fn main() {
    init_logging();

    mount_to_body(|| {
        view! { <App/> }
    });
}
