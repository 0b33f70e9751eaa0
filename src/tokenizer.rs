use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

/// How a raw fragment was written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Bare,
    /// `terminated` is false when the line ended before the closing quote.
    Quoted { quote: Quote, terminated: bool },
}

/// A raw lexical span of the input line, borrowed and not yet unescaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    pub text: &'a str,
    pub kind: FragmentKind,
}

impl<'a> Fragment<'a> {
    fn bare(text: &'a str) -> Self {
        Fragment { text, kind: FragmentKind::Bare }
    }

    fn quoted(text: &'a str, quote: Quote, terminated: bool) -> Self {
        Fragment {
            text,
            kind: FragmentKind::Quoted { quote, terminated },
        }
    }

    /// Unescaped value of this fragment alone.
    pub fn evaluate_into(&self, out: &mut String) {
        match self.kind {
            FragmentKind::Bare => unescape_bare(self.text, out),
            FragmentKind::Quoted { quote, terminated } => {
                // quote characters are ASCII, so these byte offsets are char boundaries
                let end = if terminated { self.text.len() - 1 } else { self.text.len() };
                let interior = &self.text[1..end];
                match quote {
                    Quote::Single => out.push_str(interior),
                    Quote::Double => unescape_double(interior, out),
                }
            }
        }
    }
}

/// The fragments that make up one whitespace-delimited word, e.g. `'ab'cd`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FragmentGroup<'a> {
    fragments: Vec<Fragment<'a>>,
    total_len: usize,
}

impl<'a> FragmentGroup<'a> {
    fn push(&mut self, fragment: Fragment<'a>) {
        self.total_len += fragment.text.len();
        self.fragments.push(fragment);
    }

    pub fn fragments(&self) -> &[Fragment<'a>] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Combined raw length; never smaller than the evaluated token.
    pub fn total_len(&self) -> usize {
        self.total_len
    }

    /// Concatenates the evaluated fragments into the final token.
    pub fn evaluate(&self) -> String {
        let mut token = String::with_capacity(self.total_len);
        for fragment in &self.fragments {
            fragment.evaluate_into(&mut token);
        }
        token
    }
}

/// Splits a line into fragment groups, one group per shell word.
pub fn scan(line: &str) -> Vec<FragmentGroup<'_>> {
    let bytes = line.as_bytes();
    let mut groups = Vec::new();
    let mut group = FragmentGroup::default();
    let mut quote: Option<Quote> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }

        match quote {
            Some(Quote::Single) => {
                if b == b'\'' {
                    group.push(Fragment::quoted(&line[start..=i], Quote::Single, true));
                    quote = None;
                    start = i + 1;
                }
            }
            Some(Quote::Double) => match b {
                b'\\' => escaped = true,
                b'"' => {
                    group.push(Fragment::quoted(&line[start..=i], Quote::Double, true));
                    quote = None;
                    start = i + 1;
                }
                _ => {}
            },
            None => match b {
                b'\\' => escaped = true,
                b'\'' | b'"' => {
                    if i > start {
                        group.push(Fragment::bare(&line[start..i]));
                    }
                    quote = Some(if b == b'\'' { Quote::Single } else { Quote::Double });
                    start = i;
                }
                b' ' | b'\t' => {
                    if i > start {
                        group.push(Fragment::bare(&line[start..i]));
                    }
                    if !group.is_empty() {
                        groups.push(std::mem::take(&mut group));
                    }
                    start = i + 1;
                }
                _ => {}
            },
        }
    }

    match quote {
        Some(q) => {
            debug!(quote = ?q, fragment = &line[start..], "unterminated quote runs to end of line");
            group.push(Fragment::quoted(&line[start..], q, false));
        }
        None if bytes.len() > start => group.push(Fragment::bare(&line[start..])),
        None => {}
    }
    if !group.is_empty() {
        groups.push(group);
    }

    groups
}

/// Tokenizes and evaluates a full line into shell words.
pub fn tokenize(line: &str) -> Vec<String> {
    scan(line).iter().map(FragmentGroup::evaluate).collect()
}

// Outside quotes every `\x` becomes `x`. A lone trailing backslash stays.
fn unescape_bare(text: &str, out: &mut String) {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
}

// Inside double quotes only `\"` and `\\` are escapes.
fn unescape_double(text: &str, out: &mut String) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '"' || next == '\\' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
}
