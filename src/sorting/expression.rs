//! Sort expression parsing
//!
//! An expression is a comma-separated list of terms. Each term is a field
//! name optionally followed by a direction, either space separated
//! (`name desc`) or colon separated (`name:desc`). Direction tokens are
//! case-insensitive; a missing direction means ascending.

/// A parsed sort term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortTerm<'a> {
    pub field: &'a str,
    pub descending: bool,
}

/// Outcome of parsing a single term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedTerm<'a> {
    Valid(SortTerm<'a>),
    Malformed(&'a str),
}

/// Split an expression into terms, skipping empty ones
pub fn parse(expression: &str) -> impl Iterator<Item = ParsedTerm<'_>> {
    expression
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(parse_term)
}

fn parse_term(term: &str) -> ParsedTerm<'_> {
    let (field, direction) = match term.split_once(':') {
        Some((field, direction)) => (field.trim(), Some(direction.trim())),
        None => {
            let mut tokens = term.split_whitespace();
            let field = tokens.next().unwrap_or_default();
            let direction = tokens.next();
            if tokens.next().is_some() {
                return ParsedTerm::Malformed(term);
            }
            (field, direction)
        }
    };

    if field.is_empty() || field.contains(char::is_whitespace) {
        return ParsedTerm::Malformed(term);
    }

    let descending = match direction {
        None => false,
        Some(d) if d.eq_ignore_ascii_case("asc") => false,
        Some(d) if d.eq_ignore_ascii_case("desc") => true,
        Some(_) => return ParsedTerm::Malformed(term),
    };

    ParsedTerm::Valid(SortTerm { field, descending })
}
