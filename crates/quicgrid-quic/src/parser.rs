//! Parser for QUIC strings.

use quicgrid_ir::{Grid, GridBuilder, PlacementMode, Symbol, TrackId};

use crate::error::{ParseError, ParseResult};
use crate::lexer::{Token, tokenize};

/// Parse a QUIC string into a grid with default limits.
pub fn parse(source: &str) -> ParseResult<Grid> {
    parse_with(source, Grid::builder())
}

/// Parse a QUIC string into a grid built from `template`.
///
/// The template supplies the track cap, hint geometry and identity symbol;
/// the track count is taken from the first column. An empty string yields a
/// grid with a single empty track.
pub fn parse_with(source: &str, template: GridBuilder) -> ParseResult<Grid> {
    let columns = parse_columns(source)?;
    let width = columns.first().map_or(0, Vec::len);

    let mut grid = template.tracks(width.max(1)).build()?;
    for (column, symbols) in columns.iter().enumerate() {
        for (track, symbol) in symbols.iter().enumerate() {
            grid.place(TrackId(track), *symbol, PlacementMode::Exact(column))?;
        }
    }
    Ok(grid)
}

/// Split a QUIC string into validated columns of symbols.
///
/// Every column must be non-empty and as wide as the first. The empty string
/// has no columns.
pub fn parse_columns(source: &str) -> ParseResult<Vec<Vec<Symbol>>> {
    let mut parser = Parser::new(source)?;
    parser.parse_columns()
}

/// Parser state.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a new parser from source.
    fn new(source: &str) -> ParseResult<Self> {
        let mut tokens = Vec::new();
        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t.token),
                Err((span, msg)) => {
                    return Err(ParseError::LexerError {
                        position: span.start,
                        message: msg,
                    });
                }
            }
        }
        Ok(Self { tokens, pos: 0 })
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn parse_columns(&mut self) -> ParseResult<Vec<Vec<Symbol>>> {
        if self.is_eof() {
            return Ok(vec![]);
        }

        let mut columns = vec![self.parse_column()];
        while !self.is_eof() {
            // parse_column stops only at a comma or at the end.
            self.pos += 1;
            columns.push(self.parse_column());
        }

        let expected = columns[0].len();
        for (index, column) in columns.iter().enumerate() {
            if column.is_empty() {
                return Err(ParseError::EmptyColumn(index));
            }
            if column.len() != expected {
                return Err(ParseError::MalformedInput {
                    column: index,
                    expected,
                    found: column.len(),
                });
            }
        }
        Ok(columns)
    }

    /// Consume symbols up to the next comma or the end of input.
    fn parse_column(&mut self) -> Vec<Symbol> {
        let mut symbols = vec![];
        while let Some(Token::Symbol(c)) = self.tokens.get(self.pos) {
            symbols.push(Symbol::new(*c));
            self.pos += 1;
        }
        symbols
    }
}
