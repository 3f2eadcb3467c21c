use crate::language_level::{JavaFeature, JavaLanguageLevel};
use crate::syntax_kind::SyntaxKind;
use crate::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.start as usize..self.range.end as usize]
    }
}

/// Tokenizes `text`, trivia included, ending with a single [`SyntaxKind::Eof`].
///
/// Lexing never fails: unknown characters become [`SyntaxKind::Error`] tokens
/// and unterminated literals or comments run to the end of their line (or the
/// input, for block comments).
pub fn lex(text: &str, level: JavaLanguageLevel) -> Vec<Token> {
    let mut lexer = Lexer::new(text, level);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        tokens.push(token);
        if token.kind == SyntaxKind::Eof {
            break;
        }
    }
    tokens
}

pub struct Lexer<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    level: JavaLanguageLevel,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str, level: JavaLanguageLevel) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            level,
        }
    }

    pub fn next_token(&mut self) -> Token {
        let start = self.pos;
        let kind = match self.peek_byte(0) {
            None => SyntaxKind::Eof,
            Some(b) => self.scan(b),
        };
        Token {
            kind,
            range: TextRange::new(start, self.pos),
        }
    }

    fn peek_byte(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.pos + n).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn scan(&mut self, b: u8) -> SyntaxKind {
        match b {
            b' ' | b'\t' | b'\n' | b'\r' | 0x0C => {
                while matches!(self.peek_byte(0), Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0C)) {
                    self.pos += 1;
                }
                SyntaxKind::Whitespace
            }
            b'/' if self.peek_byte(1) == Some(b'/') => {
                while !matches!(self.peek_byte(0), None | Some(b'\n' | b'\r')) {
                    self.pos += 1;
                }
                SyntaxKind::LineComment
            }
            b'/' if self.peek_byte(1) == Some(b'*') => self.block_comment(),
            b'0'..=b'9' => self.number(),
            b'.' if matches!(self.peek_byte(1), Some(b'0'..=b'9')) => self.number(),
            b'"' => self.quoted(b'"', SyntaxKind::StringLiteral),
            b'\'' => self.quoted(b'\'', SyntaxKind::CharLiteral),
            _ if b.is_ascii() && !is_ident_start(b as char) => self.punctuation(b),
            _ => self.word_or_error(),
        }
    }

    fn block_comment(&mut self) -> SyntaxKind {
        // `/**/` is an empty block comment, not the start of a doc comment.
        let kind = if self.peek_byte(2) == Some(b'*') && self.peek_byte(3) != Some(b'/') {
            SyntaxKind::DocComment
        } else {
            SyntaxKind::BlockComment
        };
        self.pos += 2;
        loop {
            match self.peek_byte(0) {
                None => break,
                Some(b'*') if self.peek_byte(1) == Some(b'/') => {
                    self.pos += 2;
                    break;
                }
                Some(_) => self.pos += 1,
            }
        }
        kind
    }

    fn quoted(&mut self, quote: u8, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        loop {
            match self.peek_byte(0) {
                None | Some(b'\n' | b'\r') => break,
                Some(b'\\') => {
                    self.pos += 1;
                    if !matches!(self.peek_byte(0), None | Some(b'\n' | b'\r')) {
                        self.advance_char();
                    }
                }
                Some(b) if b == quote => {
                    self.pos += 1;
                    break;
                }
                Some(_) => self.advance_char(),
            }
        }
        kind
    }

    fn advance_char(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn eat_digits(&mut self, radix: u32) {
        while let Some(b) = self.peek_byte(0) {
            if b == b'_' || (b as char).is_digit(radix) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn number(&mut self) -> SyntaxKind {
        let mut floating = false;
        if self.peek_byte(0) == Some(b'0') && matches!(self.peek_byte(1), Some(b'x' | b'X')) {
            self.pos += 2;
            self.eat_digits(16);
        } else if self.peek_byte(0) == Some(b'0') && matches!(self.peek_byte(1), Some(b'b' | b'B'))
        {
            self.pos += 2;
            self.eat_digits(2);
        } else {
            self.eat_digits(10);
            if self.peek_byte(0) == Some(b'.') && self.peek_byte(1) != Some(b'.') {
                floating = true;
                self.pos += 1;
                self.eat_digits(10);
            }
            if matches!(self.peek_byte(0), Some(b'e' | b'E')) {
                let sign = usize::from(matches!(self.peek_byte(1), Some(b'+' | b'-')));
                if matches!(self.peek_byte(1 + sign), Some(b'0'..=b'9')) {
                    floating = true;
                    self.pos += 1 + sign;
                    self.eat_digits(10);
                }
            }
        }

        match self.peek_byte(0) {
            Some(b'l' | b'L') if !floating => {
                self.pos += 1;
                SyntaxKind::LongLiteral
            }
            Some(b'f' | b'F') => {
                self.pos += 1;
                SyntaxKind::FloatLiteral
            }
            Some(b'd' | b'D') => {
                self.pos += 1;
                SyntaxKind::DoubleLiteral
            }
            _ if floating => SyntaxKind::DoubleLiteral,
            _ => SyntaxKind::IntLiteral,
        }
    }

    fn word_or_error(&mut self) -> SyntaxKind {
        let start = self.pos;
        match self.peek_char() {
            Some(c) if is_ident_start(c) => self.pos += c.len_utf8(),
            _ => {
                self.advance_char();
                return SyntaxKind::Error;
            }
        }
        while let Some(c) = self.peek_char() {
            if is_ident_continue(c) {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }

        let word = &self.text[start..self.pos];
        match SyntaxKind::from_keyword(word) {
            Some(SyntaxKind::AssertKw) if !self.level.is_enabled(JavaFeature::Assertions) => {
                SyntaxKind::Identifier
            }
            Some(SyntaxKind::EnumKw) if !self.level.is_enabled(JavaFeature::Enums) => {
                SyntaxKind::Identifier
            }
            Some(kind) => kind,
            None => SyntaxKind::Identifier,
        }
    }

    fn punctuation(&mut self, b: u8) -> SyntaxKind {
        let next = self.peek_byte(1);
        let third = self.peek_byte(2);
        let (kind, len) = match (b, next, third) {
            (b'(', _, _) => (SyntaxKind::LParen, 1),
            (b')', _, _) => (SyntaxKind::RParen, 1),
            (b'{', _, _) => (SyntaxKind::LBrace, 1),
            (b'}', _, _) => (SyntaxKind::RBrace, 1),
            (b'[', _, _) => (SyntaxKind::LBracket, 1),
            (b']', _, _) => (SyntaxKind::RBracket, 1),
            (b';', _, _) => (SyntaxKind::Semicolon, 1),
            (b',', _, _) => (SyntaxKind::Comma, 1),
            (b'.', Some(b'.'), Some(b'.')) => (SyntaxKind::Ellipsis, 3),
            (b'.', _, _) => (SyntaxKind::Dot, 1),
            (b'@', _, _) => (SyntaxKind::At, 1),
            (b'?', _, _) => (SyntaxKind::Question, 1),
            (b':', Some(b':'), _) => (SyntaxKind::DoubleColon, 2),
            (b':', _, _) => (SyntaxKind::Colon, 1),
            (b'-', Some(b'>'), _) => (SyntaxKind::Arrow, 2),
            (b'-', Some(b'-'), _) => (SyntaxKind::MinusMinus, 2),
            (b'-', Some(b'='), _) => (SyntaxKind::MinusEq, 2),
            (b'-', _, _) => (SyntaxKind::Minus, 1),
            (b'+', Some(b'+'), _) => (SyntaxKind::PlusPlus, 2),
            (b'+', Some(b'='), _) => (SyntaxKind::PlusEq, 2),
            (b'+', _, _) => (SyntaxKind::Plus, 1),
            (b'*', Some(b'='), _) => (SyntaxKind::StarEq, 2),
            (b'*', _, _) => (SyntaxKind::Star, 1),
            (b'/', Some(b'='), _) => (SyntaxKind::SlashEq, 2),
            (b'/', _, _) => (SyntaxKind::Slash, 1),
            (b'%', Some(b'='), _) => (SyntaxKind::PercentEq, 2),
            (b'%', _, _) => (SyntaxKind::Percent, 1),
            (b'~', _, _) => (SyntaxKind::Tilde, 1),
            (b'!', Some(b'='), _) => (SyntaxKind::BangEq, 2),
            (b'!', _, _) => (SyntaxKind::Bang, 1),
            (b'=', Some(b'='), _) => (SyntaxKind::EqEq, 2),
            (b'=', _, _) => (SyntaxKind::Eq, 1),
            (b'<', Some(b'<'), Some(b'=')) => (SyntaxKind::LeftShiftEq, 3),
            (b'<', Some(b'<'), _) => (SyntaxKind::LeftShift, 2),
            (b'<', Some(b'='), _) => (SyntaxKind::LessEq, 2),
            (b'<', _, _) => (SyntaxKind::Less, 1),
            // Right angles are never merged; see `SyntaxKind`.
            (b'>', Some(b'='), _) => (SyntaxKind::GreaterEq, 2),
            (b'>', _, _) => (SyntaxKind::Greater, 1),
            (b'&', Some(b'&'), _) => (SyntaxKind::AmpAmp, 2),
            (b'&', Some(b'='), _) => (SyntaxKind::AmpEq, 2),
            (b'&', _, _) => (SyntaxKind::Amp, 1),
            (b'|', Some(b'|'), _) => (SyntaxKind::PipePipe, 2),
            (b'|', Some(b'='), _) => (SyntaxKind::PipeEq, 2),
            (b'|', _, _) => (SyntaxKind::Pipe, 1),
            (b'^', Some(b'='), _) => (SyntaxKind::CaretEq, 2),
            (b'^', _, _) => (SyntaxKind::Caret, 1),
            _ => (SyntaxKind::Error, 1),
        };
        self.pos += len;
        kind
    }
}

fn is_ident_start(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}
