//! Client-side navigation targets.

use std::fmt;

use codenote_core::note_code::NoteCode;

/// A page of the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`: the owner's note list.
    Home,
    /// `/access`: code entry.
    Access,
    /// `/notes/{code}`: the editor for one note.
    Note(NoteCode),
}

impl Route {
    /// Match a path. Unknown paths and malformed codes yield `None`.
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "/" | "" => Some(Self::Home),
            "/access" => Some(Self::Access),
            _ => path
                .strip_prefix("/notes/")
                .and_then(|code| NoteCode::parse(code).ok())
                .map(Self::Note),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Access => "/access".to_string(),
            Self::Note(code) => format!("/notes/{code}"),
        }
    }

    /// Absolute URL of this route under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/access"), Some(Route::Access));
        assert_eq!(
            Route::parse("/notes/1234"),
            Some(Route::Note(NoteCode::parse("1234").unwrap()))
        );
    }

    #[test]
    fn rejects_unknown_paths_and_bad_codes() {
        assert_eq!(Route::parse("/settings"), None);
        assert_eq!(Route::parse("/notes/12"), None);
        assert_eq!(Route::parse("/notes/abcd"), None);
        assert_eq!(Route::parse("/notes/1234/extra"), None);
    }

    #[test]
    fn path_and_url() {
        let route = Route::Note(NoteCode::parse("0042").unwrap());
        assert_eq!(route.path(), "/notes/0042");
        assert_eq!(route.to_string(), "/notes/0042");
        assert_eq!(
            route.url("http://localhost:5173/"),
            "http://localhost:5173/notes/0042"
        );
        assert_eq!(Route::Home.url("http://localhost:5173"), "http://localhost:5173/");
    }
}
