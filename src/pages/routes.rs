/// Paths of the application under test, relative to the configured base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRoute {
    WebTables,
}

impl AppRoute {
    pub fn path(self) -> &'static str {
        match self {
            AppRoute::WebTables => "webtables",
        }
    }

    /// Join onto `base_url`, tolerating a trailing slash on the base.
    pub fn url(self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path())
    }
}
