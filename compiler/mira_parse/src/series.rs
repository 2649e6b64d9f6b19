//! Comma-separated list parsing.
//!
//! Parameter lists and argument lists share one shape: items separated by
//! `,`, closed by `)`, with an optional trailing separator. The terminator
//! is left for the caller to consume so it can report an unclosed group.

use mira_ir::{Span, TokenKind};

use crate::{ParseError, Parser};

/// Shape of a delimited list.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SeriesConfig {
    pub separator: TokenKind,
    pub terminator: TokenKind,
}

impl SeriesConfig {
    /// Comma-separated, trailing comma allowed.
    pub const fn comma(terminator: TokenKind) -> Self {
        SeriesConfig {
            separator: TokenKind::Comma,
            terminator,
        }
    }
}

/// One parsed item and the separator that followed it, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesItem<T> {
    pub item: T,
    pub separator: Option<Span>,
}

impl Parser<'_> {
    /// Parse items until `config.terminator` or an item with no separator
    /// after it. Neither the terminator nor whatever stopped the list is
    /// consumed.
    pub(crate) fn series<T>(
        &mut self,
        config: SeriesConfig,
        mut parse_item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<SeriesItem<T>>, ParseError> {
        let mut items = Vec::new();

        while !self.cursor.check(config.terminator) {
            let item = parse_item(self)?;
            let separator = self.cursor.eat(config.separator).map(|sep| sep.span);
            items.push(SeriesItem { item, separator });
            if separator.is_none() {
                break;
            }
        }

        Ok(items)
    }
}
