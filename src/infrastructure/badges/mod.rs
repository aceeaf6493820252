/// Destination for badge counter updates: set the visible text of a badge
/// and toggle it on or off.
///
/// Implementations decide what a badge id maps to. Updates addressed to an
/// unknown id must be a silent no-op.
pub trait BadgeSink: Send + Sync {
    fn set_text(&self, badge_id: &str, text: &str);
    fn set_visible(&self, badge_id: &str, visible: bool);
}

pub mod in_memory;
