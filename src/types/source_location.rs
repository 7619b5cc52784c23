use alloc::sync::Arc;

/// A byte span into the input string being parsed.
///
/// Tokens carry one of these so that errors can point back at the exact
/// characters that produced them. The input is reference counted; locations
/// from different inputs do not combine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// The input string this span indexes into.
    pub input: Arc<str>,
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl SourceLocation {
    #[must_use]
    pub const fn new(input: Arc<str>, start: usize, end: usize) -> Self {
        Self { input, start, end }
    }

    /// Span from the start of `first` to the end of `second`.
    ///
    /// Returns `None` when either side is missing or the two locations index
    /// different inputs (e.g. one came from a macro body).
    #[must_use]
    pub fn range(first: Option<Self>, second: Option<Self>) -> Option<Self> {
        let (first, second) = (first?, second?);
        if Arc::ptr_eq(&first.input, &second.input) {
            Some(Self {
                input: first.input,
                start: first.start,
                end: second.end,
            })
        } else {
            None
        }
    }
}

/// Borrowed-location variant of [`SourceLocation::range`], for the common
/// case of combining two tokens' spans without cloning either up front.
pub trait SourceRangeRef {
    /// Span covering `self` through `end`.
    fn range_ref(self, end: Self) -> Option<SourceLocation>;
}

impl SourceRangeRef for Option<&SourceLocation> {
    fn range_ref(self, end: Self) -> Option<SourceLocation> {
        SourceLocation::range(self.cloned(), end.cloned())
    }
}
