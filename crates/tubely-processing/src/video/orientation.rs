use std::fmt::{Display, Formatter, Result as FmtResult};

/// Display orientation bucket, used as the first storage key segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Landscape,
    Portrait,
    Other,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Other => "other",
        }
    }
}

impl Display for Orientation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Classify by the truncated integer ratio `width / height`.
///
/// A ratio of 1 is landscape and 0 is portrait. Square and 16:9 both truncate to 1 and
/// land in the same bucket; anything at or above 2:1 is `Other`. A zero height has no
/// ratio and is `Other`.
pub fn classify(width: u32, height: u32) -> Orientation {
    if height == 0 {
        return Orientation::Other;
    }

    match width / height {
        1 => Orientation::Landscape,
        0 => Orientation::Portrait,
        _ => Orientation::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_geometries() {
        assert_eq!(classify(1920, 1080), Orientation::Landscape);
        assert_eq!(classify(1280, 720), Orientation::Landscape);
        assert_eq!(classify(1080, 1920), Orientation::Portrait);
        assert_eq!(classify(3000, 1000), Orientation::Other);
    }

    #[test]
    fn test_square_truncates_to_landscape() {
        assert_eq!(classify(1080, 1080), Orientation::Landscape);
        assert_eq!(classify(1999, 1000), Orientation::Landscape);
        assert_eq!(classify(2000, 1000), Orientation::Other);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(classify(1920, 0), Orientation::Other);
        assert_eq!(classify(0, 1080), Orientation::Portrait);
    }

    #[test]
    fn test_key_segments() {
        assert_eq!(Orientation::Landscape.to_string(), "landscape");
        assert_eq!(Orientation::Portrait.as_str(), "portrait");
        assert_eq!(Orientation::Other.as_str(), "other");
    }
}
