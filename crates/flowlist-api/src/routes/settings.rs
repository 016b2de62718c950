//! Settings routes - configuration and column display
//!
//! Endpoints:
//! - api_settings: Active configuration (JSON)
//! - page_settings: Read-only settings page

use crate::AppState;
use flowlist_core::renderer_for;
use flowlist_utils::escape_html;

/// Get the active configuration (JSON API)
pub async fn api_settings(state: axum::extract::State<AppState>) -> String {
    serde_json::to_string(&state.config).unwrap_or_default()
}

/// Settings page: server/data/list configuration plus the column table
pub async fn page_settings(
    state: axum::extract::State<AppState>,
) -> axum::response::Html<String> {
    let dataset = state.dataset.read().await;
    let config = &state.config;

    let mut field_rows = String::new();
    for field in dataset.fields() {
        let renderer = renderer_for(&field);
        field_rows.push_str(&format!(
            r#"<tr class='border-b'>
                <td class='px-3 py-2 font-mono text-xs'>{}</td>
                <td class='px-3 py-2'>{}</td>
                <td class='px-3 py-2'>{}</td>
                <td class='px-3 py-2'>{}</td>
                <td class='px-3 py-2'>{}</td>
            </tr>"#,
            escape_html(&field.code),
            escape_html(&renderer.label),
            if field.visible { "yes" } else { "no" },
            if field.extra { "yes" } else { "no" },
            if renderer.sortable { "yes" } else { "no" },
        ));
    }

    let ordering = config
        .list
        .default_ordering
        .as_deref()
        .unwrap_or("(unsorted)");

    let inner_content = format!(
        r#"<h2 class='text-2xl font-bold mb-4'>Settings</h2>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-4 max-w-2xl'>
            <h3 class='font-medium mb-3'>Configuration</h3>
            <dl class='space-y-2 text-sm'>
                <div class='flex justify-between'><dt class='text-gray-500'>Listen address</dt><dd>{}:{}</dd></div>
                <div class='flex justify-between'><dt class='text-gray-500'>Data file</dt><dd class='font-mono text-xs'>{}</dd></div>
                <div class='flex justify-between'><dt class='text-gray-500'>Default ordering</dt><dd class='font-mono text-xs'>{}</dd></div>
                <div class='flex justify-between'><dt class='text-gray-500'>Highlight incomplete rows</dt><dd>{}</dd></div>
                <div class='flex justify-between'><dt class='text-gray-500'>Log level</dt><dd>{}</dd></div>
            </dl>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 max-w-2xl'>
            <h3 class='font-medium mb-3'>Columns</h3>
            <table class='w-full text-sm'>
                <thead><tr class='border-b text-left text-gray-500'>
                    <th class='px-3 py-2'>Code</th>
                    <th class='px-3 py-2'>Label</th>
                    <th class='px-3 py-2'>Visible</th>
                    <th class='px-3 py-2'>Extra</th>
                    <th class='px-3 py-2'>Sortable</th>
                </tr></thead>
                <tbody>{}</tbody>
            </table>
        </div>"#,
        escape_html(&config.server.host),
        config.server.port,
        escape_html(&config.data_path().to_string_lossy()),
        escape_html(ordering),
        if config.list.highlight_incomplete {
            "yes"
        } else {
            "no"
        },
        escape_html(&config.logging.level),
        field_rows
    );

    axum::response::Html(crate::page_shell("Settings", "/settings", &inner_content))
}
