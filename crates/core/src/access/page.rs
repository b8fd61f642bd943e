use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::ops::Deref;

/// Console pages that sit behind the permission table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Dashboard,
    Supervisors,
    Teachers,
    Families,
    Students,
    Lessons,
}

impl Page {
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::Supervisors,
        Self::Teachers,
        Self::Families,
        Self::Students,
        Self::Lessons,
    ];

    /// Lower-case identifier used in permission checks
    pub const fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Supervisors => "supervisors",
            Self::Teachers => "teachers",
            Self::Families => "families",
            Self::Students => "students",
            Self::Lessons => "lessons",
        }
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Identifier of a navigation target: its last path segment, lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().to_lowercase())
    }

    /// Derive the identifier from a navigation target such as
    /// `/Teachers?page=2`. Query and fragment are dropped and a trailing
    /// slash does not count as a segment.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segment = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
        Self::new(segment)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The guarded page this identifier names, if any
    pub fn page(&self) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.id() == self.0)
    }
}

impl Deref for PageId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Page> for PageId {
    fn from(page: Page) -> Self {
        Self(page.id().to_string())
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_takes_last_segment() {
        assert_eq!(PageId::from_path("/Teachers").as_str(), "teachers");
        assert_eq!(PageId::from_path("/admin/LESSONS").as_str(), "lessons");
        assert_eq!(PageId::from_path("dashboard").as_str(), "dashboard");
    }

    #[test]
    fn test_from_path_ignores_query_fragment_and_trailing_slash() {
        assert_eq!(PageId::from_path("/Students?page=3&size=10").as_str(), "students");
        assert_eq!(PageId::from_path("/Families#top").as_str(), "families");
        assert_eq!(PageId::from_path("/Lessons/").as_str(), "lessons");
    }

    #[test]
    fn test_from_path_root_is_empty() {
        assert_eq!(PageId::from_path("/").as_str(), "");
        assert_eq!(PageId::from_path("").as_str(), "");
        assert_eq!(PageId::from_path("/").page(), None);
    }

    #[test]
    fn test_page_lookup() {
        assert_eq!(PageId::new("Supervisors").page(), Some(Page::Supervisors));
        assert_eq!(PageId::new("companies").page(), None);
        for page in Page::ALL {
            assert_eq!(PageId::from(page).page(), Some(page));
        }
    }
}
