///Source location an instruction originated from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub file: String,
    pub byte_start: usize,
    pub byte_end: usize,
}

impl Span {
    pub fn new(file: impl Into<String>, byte_start: usize, byte_end: usize) -> Self {
        Span {
            file: file.into(),
            byte_start,
            byte_end,
        }
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.byte_start..self.byte_end
    }
}
