#![forbid(unsafe_code)]

//! Location fragment and session history access.

/// Browser-style session history, reduced to the fragment.
pub trait History {
    /// Current raw fragment, including the leading `#` (empty when none).
    fn fragment(&self) -> String;

    /// Set the fragment and create a new history entry.
    fn push_fragment(&mut self, fragment: &str);

    /// Set the fragment in place without creating a history entry.
    fn replace_fragment(&mut self, fragment: &str);
}
