use std::path::Path;

use tower_http::services::ServeDir;

/// Serves the generated site; `index.html` is appended to directory paths.
pub fn site_service(root: &Path) -> ServeDir {
    if !root.is_dir() {
        tracing::warn!(
            "Site root {} does not exist; public pages will 404 until the site is built",
            root.display()
        );
    }
    ServeDir::new(root).append_index_html_on_directories(true)
}
