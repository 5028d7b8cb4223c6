//! @ai:module:intent Split source text into blocks of consecutive comment lines
//! @ai:module:layer application
//! @ai:module:public_api scan_comment_blocks, CommentBlock, CommentLine
//! @ai:module:depends_on language
//! @ai:module:stateless true

use crate::language::{CommentStyle, Language};

/// @ai:intent Run of adjacent comment lines that may hold @api tags
#[derive(Debug, Clone)]
pub struct CommentBlock {
    pub lines: Vec<CommentLine>,
    pub start_line: usize,
    pub end_line: usize,
}

/// @ai:intent Represents a single comment line with its comment markers removed
#[derive(Debug, Clone)]
pub struct CommentLine {
    pub line_number: usize,
    pub content: String,
}

impl CommentBlock {
    fn new(line: CommentLine) -> Self {
        Self {
            start_line: line.line_number,
            end_line: line.line_number,
            lines: vec![line],
        }
    }

    fn push(&mut self, line: CommentLine) {
        self.end_line = line.line_number;
        self.lines.push(line);
    }

    /// @ai:intent Check if this block contains any @api tags
    /// @ai:effects pure
    pub fn has_api_tags(&self) -> bool {
        self.lines.iter().any(|l| l.content.starts_with("@api"))
    }
}

/// @ai:intent Split source text into comment blocks
/// @ai:post a blank or code line closes the current block unless inside a block comment
/// @ai:effects pure
pub fn scan_comment_blocks(content: &str, language: Language) -> Vec<CommentBlock> {
    let style = language.comment_style();
    let mut blocks = Vec::new();
    let mut current: Option<CommentBlock> = None;
    let mut in_block_comment = false;

    for (line_idx, line) in content.lines().enumerate() {
        let line_number = line_idx + 1;
        let trimmed = line.trim();

        let comment = if in_block_comment {
            let (text, closed) = block_comment_body(trimmed, &style);
            in_block_comment = !closed;
            Some(text)
        } else if let Some(text) = extract_single_line_comment(trimmed, &style) {
            Some(text)
        } else if let Some(rest) = style.block_start.and_then(|s| trimmed.strip_prefix(s)) {
            let (text, closed) = block_comment_body(rest, &style);
            in_block_comment = !closed;
            Some(text)
        } else {
            None
        };

        match comment {
            Some(text) => {
                let comment_line = CommentLine {
                    line_number,
                    content: text,
                };
                match &mut current {
                    Some(block) => block.push(comment_line),
                    None => current = Some(CommentBlock::new(comment_line)),
                }
            }
            None => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
        .into_iter()
        .map(|mut block| {
            block.lines.retain(|l| !l.content.is_empty());
            block
        })
        .filter(|block| !block.lines.is_empty())
        .collect()
}

/// @ai:intent Extract comment content from a single-line comment
/// @ai:effects pure
fn extract_single_line_comment(line: &str, style: &CommentStyle) -> Option<String> {
    style
        .single_line
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
        .map(|content| content.trim().to_string())
}

/// @ai:intent Strip block comment decoration from a line and report whether the block closed
/// @ai:pre the opening delimiter, if any, is already removed
/// @ai:post `/**/` and `/*****/` banners close and yield an empty body
/// @ai:effects pure
fn block_comment_body(line: &str, style: &CommentStyle) -> (String, bool) {
    // The end delimiter is searched before decoration is trimmed, since `*/` shares its `*`.
    let (body, closed) = match style.block_end.and_then(|end| line.find(end)) {
        Some(idx) => (&line[..idx], true),
        None => (line, false),
    };

    let body = body.trim();
    let body = match style.block_line_prefix {
        Some(prefix) => body.trim_start_matches(prefix),
        None => body,
    };

    (body.trim().to_string(), closed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(block: &CommentBlock) -> Vec<&str> {
        block.lines.iter().map(|l| l.content.as_str()).collect()
    }

    #[test]
    fn test_extract_rust_comment() {
        let style = Language::Rust.comment_style();
        assert_eq!(
            extract_single_line_comment("/// @api GET /users", &style),
            Some("@api GET /users".to_string())
        );
    }

    #[test]
    fn test_extract_python_comment() {
        let style = Language::Python.comment_style();
        assert_eq!(
            extract_single_line_comment("# @apiGroup users", &style),
            Some("@apiGroup users".to_string())
        );
    }

    #[test]
    fn test_code_line_splits_blocks() {
        let source = "// @api GET /a summary\n// @apiGroup a\nfn a() {}\n// @api GET /b summary\n";
        let blocks = scan_comment_blocks(source, Language::Rust);

        assert_eq!(blocks.len(), 2);
        assert_eq!(contents(&blocks[0]), vec!["@api GET /a summary", "@apiGroup a"]);
        assert_eq!(blocks[0].start_line, 1);
        assert_eq!(blocks[0].end_line, 2);
        assert_eq!(blocks[1].start_line, 4);
    }

    #[test]
    fn test_blank_line_splits_blocks() {
        let source = "// first\n\n// second\n";
        let blocks = scan_comment_blocks(source, Language::Go);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_multiline_block_comment() {
        let source = "/**\n * @api POST /users create\n * @apiGroup users\n */\nfunction create() {}\n";
        let blocks = scan_comment_blocks(source, Language::JavaScript);

        assert_eq!(blocks.len(), 1);
        assert_eq!(
            contents(&blocks[0]),
            vec!["@api POST /users create", "@apiGroup users"]
        );
        assert_eq!(blocks[0].lines[0].line_number, 2);
        assert!(blocks[0].has_api_tags());
    }

    #[test]
    fn test_python_docstring_block() {
        let source = "def f():\n    \"\"\"\n    @api GET /f summary\n    \"\"\"\n    pass\n";
        let blocks = scan_comment_blocks(source, Language::Python);

        assert_eq!(blocks.len(), 1);
        assert_eq!(contents(&blocks[0]), vec!["@api GET /f summary"]);
    }

    #[test]
    fn test_empty_block_comments_close() {
        for opener in ["/**/", "/***/", "/*********/", "/* */"] {
            let source = format!("{}\nint x;\n// @api GET /a a\n", opener);
            let blocks = scan_comment_blocks(&source, Language::C);

            assert_eq!(blocks.len(), 1, "opener {}", opener);
            assert_eq!(contents(&blocks[0]), vec!["@api GET /a a"]);
            assert_eq!(blocks[0].start_line, 3);
        }
    }

    #[test]
    fn test_banner_block_comment() {
        let source = "/****************\n * Users API\n ****************/\nint x;\n\
                      // @api GET /users list\n";
        let blocks = scan_comment_blocks(source, Language::Java);

        assert_eq!(blocks.len(), 2);
        assert_eq!(contents(&blocks[0]), vec!["Users API"]);
        assert_eq!(contents(&blocks[1]), vec!["@api GET /users list"]);
    }

    #[test]
    fn test_single_line_block_comment() {
        let source = "/* @apiGroup inline */\nint x;\n";
        let blocks = scan_comment_blocks(source, Language::C);

        assert_eq!(blocks.len(), 1);
        assert_eq!(contents(&blocks[0]), vec!["@apiGroup inline"]);
    }
}
