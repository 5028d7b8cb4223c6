//! @ai:module:intent Turn @api comment blocks into API records and document metadata
//! @ai:module:layer application
//! @ai:module:public_api extract_blocks, extract_source, extract_file, FileExtraction
//! @ai:module:depends_on api, parser, error
//! @ai:module:stateless true

use crate::api::{Api, DocInfo, Location, Param, Request, Response};
use crate::error::{Error, Result, SyntaxIssue};
use crate::language::Language;
use crate::parser::{scan_comment_blocks, CommentBlock, CommentLine};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// @ai:intent Everything extracted from one file or one source tree
#[derive(Debug, Clone, Default)]
pub struct FileExtraction {
    pub doc: Option<DocInfo>,
    pub apis: Vec<Api>,
    pub issues: Vec<SyntaxIssue>,
}

impl FileExtraction {
    /// @ai:intent Merge another extraction into this one
    /// @ai:post document metadata already present wins over metadata merged later
    pub fn merge(&mut self, other: FileExtraction) {
        if let Some(doc) = other.doc {
            match &mut self.doc {
                Some(existing) => existing.fill_from(&doc),
                None => self.doc = Some(doc),
            }
        }
        self.apis.extend(other.apis);
        self.issues.extend(other.issues);
    }
}

/// @ai:intent A single `@tag value` line
struct Tag<'a> {
    name: &'a str,
    value: &'a str,
    line: usize,
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^@(\w+)(?:\s+(.*))?$").expect("Invalid regex"))
}

fn parse_tag(line: &CommentLine) -> Option<Tag<'_>> {
    let captures = tag_regex().captures(&line.content)?;
    Some(Tag {
        name: captures.get(1)?.as_str(),
        value: captures.get(2).map(|m| m.as_str().trim()).unwrap_or(""),
        line: line.line_number,
    })
}

/// @ai:intent Read a file and extract its records
/// @ai:pre path exists and is written in `language`
/// @ai:post invalid UTF-8 is replaced and reported as an issue, the rest of the file is still read
/// @ai:effects fs:read
pub fn extract_file(path: &Path, language: Language) -> Result<FileExtraction> {
    let bytes = std::fs::read(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    match String::from_utf8(bytes) {
        Ok(content) => Ok(extract_source(&content, language, path)),
        Err(e) => {
            let valid = e.utf8_error().valid_up_to();
            let bytes = e.into_bytes();
            let line = bytes[..valid].iter().filter(|&&b| b == b'\n').count() + 1;

            let mut result = extract_source(&String::from_utf8_lossy(&bytes), language, path);
            result.issues.push(SyntaxIssue::new(
                path.to_path_buf(),
                line,
                "invalid UTF-8, undecodable bytes were replaced",
            ));
            Ok(result)
        }
    }
}

/// @ai:intent Extract records from source text
/// @ai:effects pure
pub fn extract_source(content: &str, language: Language, path: &Path) -> FileExtraction {
    extract_blocks(&scan_comment_blocks(content, language), path)
}

/// @ai:intent Extract records from already scanned comment blocks
/// @ai:post each `@api` or `@apidoc` tag starts a section running to the next one
/// @ai:post a malformed section yields one issue and no record
/// @ai:effects pure
pub fn extract_blocks(blocks: &[CommentBlock], path: &Path) -> FileExtraction {
    let mut result = FileExtraction::default();

    for block in blocks.iter().filter(|b| b.has_api_tags()) {
        let anchors: Vec<(usize, bool)> = block
            .lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| match parse_tag(line) {
                Some(tag) if tag.name == "api" => Some((idx, false)),
                Some(tag) if tag.name == "apidoc" => Some((idx, true)),
                _ => None,
            })
            .collect();

        for (i, &(start, is_doc)) in anchors.iter().enumerate() {
            let end = anchors
                .get(i + 1)
                .map(|&(next, _)| next)
                .unwrap_or(block.lines.len());
            let lines = &block.lines[start..end];

            if is_doc {
                match parse_doc_block(lines, path) {
                    Ok(doc) => result.merge(FileExtraction {
                        doc: Some(doc),
                        ..Default::default()
                    }),
                    Err(issue) => result.issues.push(issue),
                }
            } else {
                match parse_api_block(lines, path) {
                    Ok(api) => result.apis.push(api),
                    Err(issue) => result.issues.push(issue),
                }
            }
        }
    }

    result
}

fn parse_api_block(lines: &[CommentLine], path: &Path) -> std::result::Result<Api, SyntaxIssue> {
    let issue = |line: usize, message: String| SyntaxIssue::new(path.to_path_buf(), line, message);

    let mut api: Option<Api> = None;
    let mut seen: Vec<&str> = Vec::new();
    let mut description = Vec::new();

    for line in lines {
        let Some(tag) = parse_tag(line) else {
            description.push(line.content.as_str());
            continue;
        };

        if matches!(
            tag.name,
            "api" | "apiGroup" | "apiDeprecated" | "apiRequest" | "apiSuccess"
        ) {
            if seen.contains(&tag.name) {
                return Err(issue(tag.line, format!("duplicate tag: @{}", tag.name)));
            }
            seen.push(tag.name);
        }

        if tag.name == "api" {
            let [method, url, summary] = args::<3>(&tag).map_err(|m| issue(tag.line, m))?;
            let mut record = Api::new(&method, &url, &summary);
            record.location = Location::new(path.to_path_buf(), tag.line);
            api = Some(record);
            continue;
        }

        // The anchor is always the first tag of the slice.
        let Some(record) = api.as_mut() else {
            return Err(issue(tag.line, format!("unknown tag: @{}", tag.name)));
        };

        match tag.name {
            "apiGroup" => {
                let [group] = args::<1>(&tag).map_err(|m| issue(tag.line, m))?;
                record.group = group;
            }
            "apiDeprecated" => record.deprecated = Some(tag.value.to_string()),
            "apiParam" | "apiQuery" | "apiHeader" => {
                let [name, kind, summary] = args::<3>(&tag).map_err(|m| issue(tag.line, m))?;
                let param = Param {
                    name,
                    kind,
                    summary,
                };
                match tag.name {
                    "apiParam" => record.params.push(param),
                    "apiQuery" => record.queries.push(param),
                    _ => record.headers.push(param),
                }
            }
            "apiRequest" => {
                let [kind, summary] = args::<2>(&tag).map_err(|m| issue(tag.line, m))?;
                record.request = Some(Request { kind, summary });
            }
            "apiSuccess" | "apiError" => {
                let [status, kind, summary] = args::<3>(&tag).map_err(|m| issue(tag.line, m))?;
                let status = status
                    .parse::<u16>()
                    .map_err(|_| issue(tag.line, format!("invalid status code: {}", status)))?;
                let response = Response {
                    status,
                    kind,
                    summary,
                };
                if tag.name == "apiSuccess" {
                    record.success = Some(response);
                } else {
                    record.errors.push(response);
                }
            }
            other => return Err(issue(tag.line, format!("unknown tag: @{}", other))),
        }
    }

    let mut api = api.ok_or_else(|| issue(lines[0].line_number, "missing @api tag".to_string()))?;
    if api.success.is_none() {
        return Err(issue(
            api.location.line,
            "@apiSuccess must not be empty".to_string(),
        ));
    }

    // Untagged lines ahead of the anchor are free-form comment text, not description.
    api.description = description.join("\n");
    Ok(api)
}

fn parse_doc_block(lines: &[CommentLine], path: &Path) -> std::result::Result<DocInfo, SyntaxIssue> {
    let issue = |line: usize, message: String| SyntaxIssue::new(path.to_path_buf(), line, message);

    let mut doc = DocInfo::default();
    let mut seen: Vec<&str> = Vec::new();
    let mut content = Vec::new();

    for line in lines {
        let Some(tag) = parse_tag(line) else {
            content.push(line.content.as_str());
            continue;
        };

        if seen.contains(&tag.name) {
            return Err(issue(tag.line, format!("duplicate tag: @{}", tag.name)));
        }
        seen.push(tag.name);

        match tag.name {
            "apidoc" => {
                let [title] = args::<1>(&tag).map_err(|m| issue(tag.line, m))?;
                doc.title = title;
            }
            "apiVersion" => {
                let [version] = args::<1>(&tag).map_err(|m| issue(tag.line, m))?;
                doc.version = version;
            }
            "apiBaseURL" => {
                let [base_url] = args::<1>(&tag).map_err(|m| issue(tag.line, m))?;
                doc.base_url = base_url;
            }
            "apiLicense" => {
                let [name, url] = args::<2>(&tag).map_err(|m| issue(tag.line, m))?;
                if !is_url(&url) {
                    return Err(issue(
                        tag.line,
                        "second argument of @apiLicense must be a URL".to_string(),
                    ));
                }
                doc.license_name = name;
                doc.license_url = url;
            }
            "apiContent" => content.push(tag.value),
            other => return Err(issue(tag.line, format!("unknown tag: @{}", other))),
        }
    }

    doc.content = content
        .into_iter()
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(doc)
}

/// @ai:intent Split a tag value into exactly N arguments, the last taking the remainder
/// @ai:example ("GET /users list all users", 3) -> ["GET", "/users", "list all users"]
/// @ai:effects pure
fn args<const N: usize>(tag: &Tag<'_>) -> std::result::Result<[String; N], String> {
    let mut parts: Vec<String> = Vec::with_capacity(N);
    let mut rest = tag.value.trim();

    while !rest.is_empty() && parts.len() + 1 < N {
        match rest.find(char::is_whitespace) {
            Some(idx) => {
                parts.push(rest[..idx].to_string());
                rest = rest[idx..].trim_start();
            }
            None => {
                parts.push(rest.to_string());
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        parts.push(rest.to_string());
    }

    parts
        .try_into()
        .map_err(|_| format!("tag @{} requires {} arguments", tag.name, N))
}

fn is_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
