//! Host message codes
//!
//! Hosts drive the surface with integer operation codes. Each code maps to a
//! [`PaintMessage`] handled on the UI thread, answered with a [`PaintReply`].

use paintview_image::ExportedImage;

pub const MSG_CLEAR: i32 = 10001;
pub const MSG_SET_IMAGE: i32 = 10002;
pub const MSG_GET_IMAGE: i32 = 10003;
pub const MSG_GET_DIRTY: i32 = 10004;

/// An operation requested by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintMessage {
    Clear,
    /// Load a background image; `None` or an empty string removes it
    SetImage(Option<String>),
    GetImage,
    GetDirty,
}

impl PaintMessage {
    /// Map a host code and its optional argument to a message.
    ///
    /// Returns `None` for codes the surface does not understand.
    pub fn from_code(what: i32, arg: Option<String>) -> Option<Self> {
        match what {
            MSG_CLEAR => Some(Self::Clear),
            MSG_SET_IMAGE => Some(Self::SetImage(arg)),
            MSG_GET_IMAGE => Some(Self::GetImage),
            MSG_GET_DIRTY => Some(Self::GetDirty),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Clear => MSG_CLEAR,
            Self::SetImage(_) => MSG_SET_IMAGE,
            Self::GetImage => MSG_GET_IMAGE,
            Self::GetDirty => MSG_GET_DIRTY,
        }
    }
}

/// Result of a handled [`PaintMessage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintReply {
    Done,
    Image(Option<ExportedImage>),
    Dirty(bool),
}

impl PaintReply {
    pub fn into_image(self) -> Option<ExportedImage> {
        match self {
            Self::Image(image) => image,
            _ => None,
        }
    }

    pub fn into_dirty(self) -> bool {
        matches!(self, Self::Dirty(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(PaintMessage::from_code(10001, None), Some(PaintMessage::Clear));
        assert_eq!(
            PaintMessage::from_code(10002, Some("a.png".into())),
            Some(PaintMessage::SetImage(Some("a.png".into())))
        );
        assert_eq!(PaintMessage::from_code(10003, None), Some(PaintMessage::GetImage));
        assert_eq!(PaintMessage::from_code(10004, None), Some(PaintMessage::GetDirty));
        assert_eq!(PaintMessage::from_code(10005, None), None);
        assert_eq!(PaintMessage::from_code(0, Some("x".into())), None);
    }

    #[test]
    fn test_code_matches_from_code() {
        for message in [
            PaintMessage::Clear,
            PaintMessage::SetImage(None),
            PaintMessage::GetImage,
            PaintMessage::GetDirty,
        ] {
            let arg = match &message {
                PaintMessage::SetImage(arg) => arg.clone(),
                _ => None,
            };
            assert_eq!(PaintMessage::from_code(message.code(), arg), Some(message));
        }
    }

    #[test]
    fn test_reply_accessors() {
        assert!(PaintReply::Dirty(true).into_dirty());
        assert!(!PaintReply::Done.into_dirty());
        assert_eq!(PaintReply::Dirty(true).into_image(), None);
    }
}
