//! Puzzle description parser
//!
//! The parser only needs to find elements by tag, read attributes, walk
//! children and read text, so it is written against [`DocumentNode`]. The XML
//! entry point [`parse_puzzle`] plugs `roxmltree` into it.
//!
//! Expected shape:
//!
//! ```xml
//! <puzzle>
//!   <clues type="rows">
//!     <line><count color="red">2</count></line>
//!   </clues>
//!   <clues type="columns">
//!     <line><count>1</count></line>
//!   </clues>
//! </puzzle>
//! ```

use crate::model::{Clue, Color, Puzzle};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Which clue block a line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Rows,
    Columns,
}

impl Axis {
    /// Value of the `type` attribute selecting this block
    pub fn block_type(self) -> &'static str {
        match self {
            Self::Rows => "rows",
            Self::Columns => "columns",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.block_type())
    }
}

/// Result type for puzzle parsing
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while parsing a puzzle description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not a well-formed document
    Xml(String),
    /// No `puzzle` element
    MissingPuzzle,
    /// No `clues` block with `type="rows"`
    MissingRowClues,
    /// No `clues` block with `type="columns"`
    MissingColumnClues,
    /// A `count` whose text is not a non-negative integer
    InvalidCount {
        axis: Axis,
        line: usize,
        index: usize,
        text: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml(e) => write!(f, "Malformed puzzle document: {}", e),
            Self::MissingPuzzle => write!(f, "No puzzle found"),
            Self::MissingRowClues => write!(f, "No row clues found"),
            Self::MissingColumnClues => write!(f, "No column clues found"),
            Self::InvalidCount {
                axis,
                line,
                index,
                text,
            } => write!(
                f,
                "Invalid count {:?} in {} line {}, entry {}",
                text, axis, line, index
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Read access to an element of a tree-structured document
pub trait DocumentNode: Sized {
    /// Local tag name of this element
    fn tag_name(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    /// Element children in document order
    fn children(&self) -> Vec<Self>;

    /// Concatenated text of all descendant text nodes
    fn text_content(&self) -> String;

    /// All descendant elements named `tag`, in document order, excluding self
    fn descendants_named(&self, tag: &str) -> Vec<Self> {
        let mut found = Vec::new();
        collect_named(self.children(), tag, &mut found);
        found
    }

    /// First element in document order, self included, satisfying `pred`
    fn find_first(self, pred: &dyn Fn(&Self) -> bool) -> Option<Self> {
        if pred(&self) {
            return Some(self);
        }
        self.children()
            .into_iter()
            .find_map(|child| child.find_first(pred))
    }
}

fn collect_named<N: DocumentNode>(nodes: Vec<N>, tag: &str, found: &mut Vec<N>) {
    for node in nodes {
        let children = node.children();
        if node.tag_name() == tag {
            found.push(node);
        }
        collect_named(children, tag, found);
    }
}

impl<'a, 'input> DocumentNode for roxmltree::Node<'a, 'input> {
    fn tag_name(&self) -> &str {
        roxmltree::Node::tag_name(self).name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        roxmltree::Node::attribute(self, name)
    }

    fn children(&self) -> Vec<Self> {
        roxmltree::Node::children(self)
            .filter(|n| n.is_element())
            .collect()
    }

    fn text_content(&self) -> String {
        self.descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect()
    }
}

/// Parse an XML puzzle description
pub fn parse_puzzle(xml: &str) -> ParseResult<Puzzle> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| ParseError::Xml(e.to_string()))?;
    parse_document(doc.root_element())
}

/// Parse a puzzle from any document tree.
///
/// `root` is searched (itself included) for the first `puzzle` element.
pub fn parse_document<N: DocumentNode>(root: N) -> ParseResult<Puzzle> {
    let puzzle = root
        .find_first(&|n: &N| n.tag_name() == "puzzle")
        .ok_or(ParseError::MissingPuzzle)?;

    let row_block = find_clue_block(&puzzle, Axis::Rows).ok_or(ParseError::MissingRowClues)?;
    let column_block =
        find_clue_block(&puzzle, Axis::Columns).ok_or(ParseError::MissingColumnClues)?;

    let row_clues = parse_clues(&row_block, Axis::Rows)?;
    let column_clues = parse_clues(&column_block, Axis::Columns)?;

    debug!(
        rows = row_clues.len(),
        columns = column_clues.len(),
        "parsed puzzle"
    );
    Ok(Puzzle::new(row_clues, column_clues))
}

fn find_clue_block<N: DocumentNode>(puzzle: &N, axis: Axis) -> Option<N> {
    puzzle
        .descendants_named("clues")
        .into_iter()
        .find(|block| block.attribute("type") == Some(axis.block_type()))
}

fn parse_clues<N: DocumentNode>(block: &N, axis: Axis) -> ParseResult<Vec<Vec<Clue>>> {
    block
        .descendants_named("line")
        .iter()
        .enumerate()
        .map(|(line, line_node)| {
            line_node
                .descendants_named("count")
                .iter()
                .enumerate()
                .map(|(index, count)| parse_count(count, axis, line, index))
                .collect::<ParseResult<Vec<Clue>>>()
        })
        .collect()
}

fn parse_count<N: DocumentNode>(node: &N, axis: Axis, line: usize, index: usize) -> ParseResult<Clue> {
    let text = node.text_content();
    let count = text
        .trim()
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidCount {
            axis,
            line,
            index,
            text: text.clone(),
        })?;
    let color = node.attribute("color").map(Color::new).unwrap_or_default();
    Ok(Clue { count, color })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
<puzzle>
  <clues type="rows">
    <line><count color="red">2</count></line>
    <line><count>1</count><count color="blue">1</count></line>
  </clues>
  <clues type="columns">
    <line><count>1</count></line>
    <line><count color="red">1</count></line>
  </clues>
</puzzle>"#;

    #[test]
    fn test_parse_example() {
        let puzzle = parse_puzzle(EXAMPLE).unwrap();
        assert_eq!(puzzle.rows(), 2);
        assert_eq!(puzzle.columns(), 2);
        assert_eq!(puzzle.row_clues()[0], vec![Clue::new(2, "red")]);
        assert_eq!(
            puzzle.row_clues()[1],
            vec![Clue::new(1, "black"), Clue::new(1, "blue")]
        );
        assert_eq!(puzzle.column_clues()[1], vec![Clue::new(1, "red")]);
        assert_eq!(puzzle.filled_count(), 0);
    }

    #[test]
    fn test_puzzle_nested_in_document() {
        let xml = format!("<library><meta/>{}</library>", EXAMPLE.trim());
        let puzzle = parse_puzzle(&xml).unwrap();
        assert_eq!(puzzle.dims().max_row_clues, 2);
    }

    #[test]
    fn test_missing_puzzle() {
        assert_eq!(
            parse_puzzle("<nonogram/>").unwrap_err(),
            ParseError::MissingPuzzle
        );
    }

    #[test]
    fn test_missing_blocks() {
        let no_rows = r#"<puzzle><clues type="columns"><line/></clues></puzzle>"#;
        assert_eq!(parse_puzzle(no_rows).unwrap_err(), ParseError::MissingRowClues);

        let no_columns = r#"<puzzle><clues type="rows"><line/></clues></puzzle>"#;
        assert_eq!(
            parse_puzzle(no_columns).unwrap_err(),
            ParseError::MissingColumnClues
        );
    }

    #[test]
    fn test_invalid_count_fails_parse() {
        let xml = r#"<puzzle>
            <clues type="rows"><line><count>1</count><count>x</count></line></clues>
            <clues type="columns"><line><count>1</count></line></clues>
        </puzzle>"#;
        match parse_puzzle(xml).unwrap_err() {
            ParseError::InvalidCount {
                axis, line, index, text,
            } => {
                assert_eq!(axis, Axis::Rows);
                assert_eq!((line, index), (0, 1));
                assert_eq!(text, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        let xml = r#"<puzzle>
            <clues type="rows"><line><count>1</count></line></clues>
            <clues type="columns"><line><count>-1</count></line></clues>
        </puzzle>"#;
        assert!(matches!(
            parse_puzzle(xml),
            Err(ParseError::InvalidCount { axis: Axis::Columns, .. })
        ));
    }

    #[test]
    fn test_count_whitespace_is_trimmed() {
        let xml = r#"<puzzle>
            <clues type="rows"><line><count> 3 </count></line></clues>
            <clues type="columns"><line/></clues>
        </puzzle>"#;
        let puzzle = parse_puzzle(xml).unwrap();
        assert_eq!(puzzle.row_clues()[0][0].count, 3);
        assert!(puzzle.column_clues()[0].is_empty());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(parse_puzzle("<puzzle>"), Err(ParseError::Xml(_))));
    }

    #[test]
    fn test_sample_puzzle_parses() {
        let puzzle = parse_puzzle(crate::SAMPLE_PUZZLE).unwrap();
        assert_eq!((puzzle.rows(), puzzle.columns()), (8, 7));
    }
}
