use std::fmt;
use std::path::Path;

use url::Url;

use super::navigation::Target;
use crate::error::ControllerError;

const CLONE_PARAM: &str = "clone";

/// The addressable state of a presentation view: a URL whose fragment holds the
/// current slide index and whose `clone` query parameter marks a commanded view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    url: Url,
}

impl Address {
    pub fn parse(input: &str) -> Result<Self, ControllerError> {
        Ok(Self {
            url: Url::parse(input)?,
        })
    }

    /// Address of a deck file on disk. Relative paths are resolved against the
    /// working directory.
    pub fn for_deck(path: &Path) -> Result<Self, ControllerError> {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        match Url::from_file_path(&absolute) {
            Ok(url) => Ok(Self { url }),
            Err(()) => Self::parse(&format!("file:///{}", absolute.display())),
        }
    }

    pub fn fragment(&self) -> Option<&str> {
        self.url.fragment()
    }

    pub fn with_fragment(mut self, fragment: &str) -> Self {
        self.url.set_fragment(Some(fragment));
        self
    }

    /// Initial navigation target: `#<integer>`, `0` when there is no fragment,
    /// `None` when the fragment is not an integer.
    pub fn initial_target(&self) -> Option<Target> {
        match self.url.fragment() {
            None | Some("") => Some(Target::Index(0)),
            Some(fragment) => fragment.parse::<i64>().ok().map(Target::Index),
        }
    }

    pub(crate) fn set_slide(&mut self, index: usize) {
        self.url.set_fragment(Some(&index.to_string()));
    }

    pub fn is_clone(&self) -> bool {
        self.url.query_pairs().any(|(key, _)| key == CLONE_PARAM)
    }

    /// This address with `clone=1` set and the fragment preserved.
    pub fn clone_address(&self) -> Self {
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != CLONE_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(pairs)
            .append_pair(CLONE_PARAM, "1");
        Self { url }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
