/// Hard line break offsets: just after each line feed, then the text end
#[derive(Debug, Clone)]
pub struct NewlineBreaks<'a> {
    text: &'a [u16],
    offset: usize,
    done: bool,
}

impl<'a> NewlineBreaks<'a> {
    pub fn new(text: &'a [u16]) -> Self {
        Self {
            text,
            offset: 0,
            done: false,
        }
    }
}

impl Iterator for NewlineBreaks<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        match self.text[self.offset..]
            .iter()
            .position(|&unit| unit == u16::from(b'\n'))
        {
            Some(position) => {
                self.offset += position + 1;
                self.done = self.offset == self.text.len();
            }
            None => {
                self.offset = self.text.len();
                self.done = true;
            }
        }
        Some(self.offset)
    }
}
