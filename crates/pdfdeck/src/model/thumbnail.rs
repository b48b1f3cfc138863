/// Preview image for one page of a loaded document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Thumbnail {
    /// JPEG-encoded rendering of the page.
    Image {
        /// Pixel width.
        width: u32,
        /// Pixel height.
        height: u32,
        /// Encoded JPEG bytes.
        jpeg: Vec<u8>,
    },
    /// No preview: rendering failed, was skipped, or the page is past the cap.
    #[default]
    Placeholder,
}

impl Thumbnail {
    /// Returns true if this entry carries no image.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Encoded JPEG bytes, if any.
    pub fn jpeg(&self) -> Option<&[u8]> {
        match self {
            Self::Image { jpeg, .. } => Some(jpeg),
            Self::Placeholder => None,
        }
    }
}
