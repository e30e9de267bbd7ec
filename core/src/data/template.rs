//! Property-name templates.
//!
//! Property names may embed `${variable}` placeholders, for example
//! `geometry[${geometryUuid}].indices`. A name is parsed once into
//! literal and variable segments and rendered against a [`Variables`]
//! table. A `$` not followed by `{` is ordinary text.

use std::collections::HashMap;

use super::error::{DataError, DataResult};

/// Variable table used to render templates.
pub type Variables = HashMap<String, String>;

/// One piece of a parsed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied verbatim.
    Literal(&'a str),
    /// Name of a variable to substitute.
    Variable(&'a str),
}

/// A parsed property-name template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    source: &'a str,
    segments: Vec<Segment<'a>>,
}

impl<'a> Template<'a> {
    /// Tokenize a raw property name.
    pub fn parse(source: &'a str) -> DataResult<Self> {
        let mut segments = Vec::new();
        let mut rest = 0;

        while let Some(found) = source[rest..].find("${") {
            let open = rest + found;
            if open > rest {
                segments.push(Segment::Literal(&source[rest..open]));
            }

            let name_start = open + 2;
            let Some(len) = source[name_start..].find('}') else {
                return Err(DataError::MalformedTemplate {
                    template: source.to_string(),
                    offset: open,
                });
            };
            if len == 0 {
                return Err(DataError::MalformedTemplate {
                    template: source.to_string(),
                    offset: open,
                });
            }

            segments.push(Segment::Variable(&source[name_start..name_start + len]));
            rest = name_start + len + 1;
        }

        if rest < source.len() {
            segments.push(Segment::Literal(&source[rest..]));
        }

        Ok(Self { source, segments })
    }

    /// The raw text this template was parsed from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Parsed segments, in order.
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Names of the variables referenced, in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable(name) => Some(*name),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the template contains no placeholders.
    pub fn is_literal(&self) -> bool {
        self.variables().next().is_none()
    }

    /// Substitute every placeholder.
    pub fn render(&self, variables: &Variables) -> DataResult<String> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(name) => {
                    let value =
                        variables
                            .get(*name)
                            .ok_or_else(|| DataError::UnresolvedVariable {
                                variable: name.to_string(),
                                template: self.source.to_string(),
                            })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Resolve a raw property name against a variable table.
pub fn resolve_name(variables: &Variables, raw: &str) -> DataResult<String> {
    if !raw.contains("${") {
        return Ok(raw.to_string());
    }
    Template::parse(raw)?.render(variables)
}
