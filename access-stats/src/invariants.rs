use std::{convert::Infallible, str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Debug, Display, From};
use regex::Regex;

static IMAGE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|gif|png)$").expect("valid regex"));

#[derive(Debug, Display, AsRef, From, Clone, PartialEq, Eq, Hash)]
pub struct RequestPath(String);

impl RequestPath {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// True when the path ends in `.jpg`, `.gif` or `.png`, ignoring case.
    /// A query string or any trailing character breaks the match.
    pub fn is_image(&self) -> bool {
        IMAGE_SUFFIX.is_match(self.as_str())
    }
}

impl FromStr for RequestPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.into()))
    }
}

#[derive(Debug, Display, AsRef, From, Clone, PartialEq, Eq, Hash)]
pub struct UserAgent(String);

impl UserAgent {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for UserAgent {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.into()))
    }
}

/// Hour of day on a 24-hour clock, always in `0..24`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("{_0:02}")]
pub struct Hour(u8);

impl Hour {
    pub const COUNT: usize = 24;

    pub fn all() -> impl Iterator<Item = Hour> {
        (0..Self::COUNT as u8).map(Hour)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u32> for Hour {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if (value as usize) < Self::COUNT {
            Ok(Self(value as u8))
        } else {
            Err(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asserting::prelude::*;

    fn path(s: &str) -> RequestPath {
        s.parse().unwrap()
    }

    #[test]
    fn image_suffix_is_case_insensitive() {
        assert!(path("/a/b.JPG").is_image());
        assert!(path("/img/logo.Png").is_image());
        assert!(path("/anim.gif").is_image());
    }

    #[test]
    fn image_suffix_is_end_anchored() {
        assert!(!path("/a/b.jpgx").is_image());
        assert!(!path("/a/b.jpg?query").is_image());
        assert!(!path("/a.png/index.html").is_image());
        assert!(!path("/jpg").is_image());
        assert!(!path("").is_image());
    }

    #[test]
    fn hour_displays_zero_padded() {
        assert_eq!(Hour::try_from(7u32).unwrap().to_string(), "07");
        assert_eq!(Hour::try_from(23u32).unwrap().to_string(), "23");
    }

    #[test]
    fn hour_rejects_out_of_range() {
        assert_that!(Hour::try_from(24u32)).is_err();
    }

    #[test]
    fn all_hours_ascend() {
        let hours: Vec<_> = Hour::all().map(Hour::index).collect();
        assert_eq!(hours, (0..24).collect::<Vec<_>>());
    }
}
